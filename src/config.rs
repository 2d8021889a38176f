use crate::error::{ReaderError, Result};
use crate::parsers::ParserKind;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Allowed range for request timeouts, in seconds
pub const TIMEOUT_RANGE: (u64, u64) = (5, 300);

/// Allowed range for the report's main-content length, in characters
pub const CONTENT_LENGTH_RANGE: (usize, usize) = (1_000, 100_000);

/// Prefix of the environment variables read by [`ReaderConfig::with_env_overrides`]
pub const ENV_PREFIX: &str = "WEB_READER_";

/// Configuration for reading a single page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Request timeout used when the caller does not pass one (seconds)
    #[serde(default = "default_timeout")]
    pub default_timeout: u64,

    /// Maximum number of main-content characters included in the report
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,

    /// User-Agent header sent with the request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whether to extract the page's links
    #[serde(default = "default_true")]
    pub extract_links: bool,

    /// Whether to extract the page's image URLs
    #[serde(default = "default_true")]
    pub extract_images: bool,

    /// Maximum number of links in the report
    #[serde(default = "default_link_limit")]
    pub link_limit: usize,

    /// Maximum number of images in the report
    #[serde(default = "default_image_limit")]
    pub image_limit: usize,

    /// Which parser to run over the fetched markup
    #[serde(default)]
    pub parser: ParserKind,

    /// Case-insensitive regex patterns; matching image URLs are dropped
    #[serde(default = "default_image_exclude_patterns")]
    pub image_exclude_patterns: Vec<String>,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_content_length() -> usize {
    15_000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_true() -> bool {
    true
}

fn default_link_limit() -> usize {
    10
}

fn default_image_limit() -> usize {
    5
}

fn default_image_exclude_patterns() -> Vec<String> {
    ["icon", "logo", "1x1", "pixel"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            default_timeout: default_timeout(),
            max_content_length: default_max_content_length(),
            user_agent: default_user_agent(),
            extract_links: true,
            extract_images: true,
            link_limit: default_link_limit(),
            image_limit: default_image_limit(),
            parser: ParserKind::default(),
            image_exclude_patterns: default_image_exclude_patterns(),
        }
    }
}

impl ReaderConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|e| ReaderError::Config(format!("cannot open {}: {}", path.display(), e)))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ReaderError::Config(format!("cannot read {}: {}", path.display(), e)))?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ReaderError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `WEB_READER_*` environment variables on top of this configuration
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DEFAULT_TIMEOUT") {
            self.default_timeout = parse_env("DEFAULT_TIMEOUT", &value)?;
        }
        if let Some(value) = lookup("MAX_CONTENT_LENGTH") {
            self.max_content_length = parse_env("MAX_CONTENT_LENGTH", &value)?;
        }
        if let Some(value) = lookup("USER_AGENT") {
            if !value.trim().is_empty() {
                self.user_agent = value;
            }
        }
        if let Some(value) = lookup("EXTRACT_LINKS") {
            self.extract_links = parse_flag("EXTRACT_LINKS", &value)?;
        }
        if let Some(value) = lookup("EXTRACT_IMAGES") {
            self.extract_images = parse_flag("EXTRACT_IMAGES", &value)?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check every bounded field
    pub fn validate(&self) -> Result<()> {
        let (min, max) = TIMEOUT_RANGE;
        if !(min..=max).contains(&self.default_timeout) {
            return Err(ReaderError::Config(format!(
                "default_timeout must be between {} and {} seconds, got {}",
                min, max, self.default_timeout
            )));
        }

        let (min, max) = CONTENT_LENGTH_RANGE;
        if !(min..=max).contains(&self.max_content_length) {
            return Err(ReaderError::Config(format!(
                "max_content_length must be between {} and {}, got {}",
                min, max, self.max_content_length
            )));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ReaderError::Config("user_agent must not be empty".to_string()));
        }

        Ok(())
    }

    /// Resolve the timeout for one request.
    ///
    /// `None` falls back to `default_timeout`. An explicit value outside
    /// [`TIMEOUT_RANGE`], zero included, is rejected.
    pub fn resolve_timeout(&self, requested: Option<u64>) -> Result<Duration> {
        let secs = requested.unwrap_or(self.default_timeout);
        let (min, max) = TIMEOUT_RANGE;
        if !(min..=max).contains(&secs) {
            return Err(ReaderError::InvalidTimeout {
                value: secs,
                min,
                max,
            });
        }
        Ok(Duration::from_secs(secs))
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ReaderError::Config(format!("{ENV_PREFIX}{key} is not a number: '{value}'")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ReaderError::Config(format!(
            "{ENV_PREFIX}{key} is not a boolean: '{value}'"
        ))),
    }
}
