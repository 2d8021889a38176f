use crate::error::{ReaderError, Result};
use crate::utils::is_web_url;
use regex::{Regex, RegexBuilder};
use url::Url;

/// Check that `raw` is an absolute http(s) URL with a host.
///
/// Runs before any network traffic; a rejected URL never reaches the fetcher.
pub fn validate_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ReaderError::MissingUrl);
    }

    let invalid = |reason: String| ReaderError::InvalidUrl {
        url: trimmed.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;

    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    if !is_web_url(&url) {
        return Err(invalid(format!("unsupported scheme: {}", url.scheme())));
    }

    Ok(url)
}

/// Drops image URLs that look like icons, logos or tracking pixels
#[derive(Debug)]
pub struct ImageFilter {
    exclude_regexes: Vec<Regex>,
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self {
            exclude_regexes: ["icon", "logo", "1x1", "pixel"]
                .iter()
                .filter_map(|p| compile_pattern(p).ok())
                .collect(),
        }
    }
}

fn compile_pattern(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

impl ImageFilter {
    /// Create a filter from case-insensitive regex patterns
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut exclude_regexes = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = compile_pattern(pattern).map_err(|e| {
                ReaderError::Config(format!("invalid image exclude pattern '{pattern}': {e}"))
            })?;
            exclude_regexes.push(regex);
        }
        Ok(Self { exclude_regexes })
    }

    /// Whether an absolute image URL should be kept
    pub fn should_keep(&self, url: &Url) -> bool {
        if !is_web_url(url) {
            return false;
        }

        let url_str = url.as_str();
        for regex in &self.exclude_regexes {
            if regex.is_match(url_str) {
                ::log::trace!("Image excluded by '{}': {}", regex.as_str(), url_str);
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_web_urls() {
        let url = validate_url("https://example.com/page").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));

        let url = validate_url("  http://example.com  ").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(matches!(validate_url(""), Err(ReaderError::MissingUrl)));
        assert!(matches!(validate_url("   "), Err(ReaderError::MissingUrl)));
        assert!(matches!(
            validate_url("not-a-url"),
            Err(ReaderError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_url("mailto:someone@example.com"),
            Err(ReaderError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_url("ftp://example.com/file"),
            Err(ReaderError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_url("/relative/path"),
            Err(ReaderError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_invalid_url_message_names_the_input() {
        let err = validate_url("not-a-url").unwrap_err();
        assert!(err.to_string().contains("'not-a-url'"));
    }

    #[test]
    fn test_default_image_filter() {
        let filter = ImageFilter::default();

        let photo = Url::parse("https://example.com/photos/cat.jpg").unwrap();
        assert!(filter.should_keep(&photo));

        for rejected in [
            "https://example.com/logo.png",
            "https://example.com/static/FavIcon.ico",
            "https://example.com/track/1x1.gif",
            "https://example.com/Pixel?id=3",
            "https://example.com/LOGO-large.svg",
        ] {
            let url = Url::parse(rejected).unwrap();
            assert!(!filter.should_keep(&url), "{} should be filtered", rejected);
        }

        let data = Url::parse("data:image/png;base64,AAAA").unwrap();
        assert!(!filter.should_keep(&data));
    }

    #[test]
    fn test_custom_patterns() {
        let filter = ImageFilter::new(&["banner", r"\.gif$"]).unwrap();
        assert!(!filter.should_keep(&Url::parse("https://example.com/Banner.png").unwrap()));
        assert!(!filter.should_keep(&Url::parse("https://example.com/anim.gif").unwrap()));
        assert!(filter.should_keep(&Url::parse("https://example.com/logo.png").unwrap()));

        assert!(matches!(
            ImageFilter::new(&["(unclosed"]),
            Err(ReaderError::Config(_))
        ));
    }
}
