// Re-export modules
pub mod config;
pub mod encoding;
pub mod error;
pub mod extractor;
pub mod fetchers;
pub mod filter;
pub mod formatter;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ReaderConfig;
pub use error::ReaderError;
pub use fetchers::Fetcher;
pub use fetchers::http::HttpFetcher;
pub use parsers::ParserKind;
pub use results::{ExtractedLink, ExtractionMode, PageMetadata, PageReport};

use extractor::ExtractOptions;
use fetchers::FetchRequest;
use std::path::Path;

/// Reads one page: validate, fetch, extract
pub struct WebReader {
    url: String,
    timeout: Option<u64>,
    config: ReaderConfig,
}

impl WebReader {
    /// Create a new reader for the given URL with default configuration
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
            config: ReaderConfig::default(),
        }
    }

    /// Set the request timeout in seconds (5 to 300)
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout = Some(timeout_seconds);
        self
    }

    /// Set an optional timeout; `None` uses the configured default
    pub fn with_timeout_opt(mut self, timeout_seconds: Option<u64>) -> Self {
        self.timeout = timeout_seconds;
        self
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let config = ReaderConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, ReaderError> {
        let config = ReaderConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Fetch over HTTP and extract a report
    pub async fn read(&self) -> Result<PageReport, ReaderError> {
        let fetcher = HttpFetcher::new()?;
        self.read_with(&fetcher).await
    }

    /// Extract a report using a caller-supplied fetcher.
    ///
    /// The URL, timeout and configuration are checked before the fetcher is
    /// called, so invalid input never produces network traffic.
    pub async fn read_with<F: Fetcher>(&self, fetcher: &F) -> Result<PageReport, ReaderError> {
        self.config.validate()?;
        let url = filter::validate_url(&self.url).inspect_err(|e| {
            ::log::warn!("Rejected URL '{}': {}", self.url, e);
        })?;
        let timeout = self.config.resolve_timeout(self.timeout)?;
        let options = ExtractOptions::from_config(&self.config)?;

        let request = FetchRequest::new(url.clone(), timeout, self.config.user_agent.as_str());
        let page = fetcher.fetch(&request).await?;

        // Parsing is CPU-bound; a panic in there surfaces as ReaderError::Extraction
        let mut report =
            tokio::task::spawn_blocking(move || extractor::extract(&page, &url, &options))
                .await?;
        // Report the address as the caller wrote it, not the normalized form
        report.url = self.url.trim().to_string();
        Ok(report)
    }

    /// Fetch over HTTP and render the report, or the error line
    pub async fn render(&self) -> String {
        match HttpFetcher::new() {
            Ok(fetcher) => self.render_with(&fetcher).await,
            Err(e) => formatter::render_error(&e),
        }
    }

    /// Render using a caller-supplied fetcher
    pub async fn render_with<F: Fetcher>(&self, fetcher: &F) -> String {
        match self.read_with(fetcher).await {
            Ok(report) => formatter::render_report(&report, self.config.max_content_length),
            Err(e) if e.is_input_error() => {
                ::log::warn!("Refused to read {}: {}", self.url, e);
                formatter::render_error(&e)
            }
            Err(e) => {
                ::log::error!("Reading {} failed: {}", self.url, e);
                formatter::render_error(&e)
            }
        }
    }
}

/// Read a page and return the formatted report or a single-line error.
///
/// `timeout` is in seconds; `None` uses `config.default_timeout`.
pub async fn fetch_webpage(url: &str, timeout: Option<u64>, config: &ReaderConfig) -> String {
    WebReader::new(url)
        .with_timeout_opt(timeout)
        .with_config(config.clone())
        .render()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::fetchers::FetchedPage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a fixed body and counts calls
    struct StaticFetcher {
        body: String,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Fetcher for StaticFetcher {
        async fn fetch(&self, request: &FetchRequest) -> Result<FetchedPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(FetchedPage {
                final_url: request.url.clone(),
                status: 200,
                encoding: "UTF-8".to_string(),
                content_type: Some("text/html".to_string()),
                body: self.body.clone(),
            })
        }
    }

    /// Always times out
    struct FailingFetcher;

    impl Fetcher for FailingFetcher {
        async fn fetch(&self, request: &FetchRequest) -> Result<FetchedPage> {
            Err(ReaderError::Timeout {
                secs: request.timeout.as_secs(),
            })
        }
    }

    #[tokio::test]
    async fn test_invalid_url_makes_no_request() {
        let fetcher = StaticFetcher::new("<html></html>");
        let out = WebReader::new("not-a-url").render_with(&fetcher).await;

        assert!(out.starts_with(formatter::ERROR_MARKER));
        assert!(out.contains("invalid URL 'not-a-url'"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_timeout_is_rejected() {
        let fetcher = StaticFetcher::new("<html></html>");
        let err = WebReader::new("https://example.com")
            .with_timeout(0)
            .read_with(&fetcher)
            .await
            .unwrap_err();

        assert!(matches!(err, ReaderError::InvalidTimeout { value: 0, .. }));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_default_timeout_reaches_fetcher() {
        let config = ReaderConfig {
            default_timeout: 42,
            ..ReaderConfig::default()
        };
        let out = WebReader::new("https://example.com")
            .with_config(config)
            .render_with(&FailingFetcher)
            .await;
        assert!(out.contains("42 seconds"));
    }

    #[tokio::test]
    async fn test_report_from_fetched_page() {
        let fetcher = StaticFetcher::new(
            r#"<html><head><title>Hello</title></head><body>
                <article><p>Article text</p><a href="/about">About</a></article>
                <div class="content">Other</div>
            </body></html>"#,
        );
        let report = WebReader::new("https://example.com/page")
            .read_with(&fetcher)
            .await
            .unwrap();

        assert_eq!(report.metadata.title, "Hello");
        assert_eq!(report.main_text, "Article text About");
        assert_eq!(report.links[0].url, "https://example.com/about");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_report_keeps_requested_url() {
        let fetcher = StaticFetcher::new("<html><body><p>Hi</p></body></html>");
        let reader = WebReader::new("https://example.com");

        let report = reader.read_with(&fetcher).await.unwrap();
        assert_eq!(report.url, "https://example.com");
        assert_eq!(report.final_url, "https://example.com/");

        let out = reader.render_with(&fetcher).await;
        assert!(out.contains("🔗 URL: https://example.com\n"));
    }

    #[tokio::test]
    async fn test_degraded_rendering() {
        let fetcher = StaticFetcher::new(
            "<html><head><title>Old page</title><style>body{}</style></head>\
             <body><script>\nalert(1);\n</script><p>Only text</p>\
             <a href=\"/x\">link</a><img src=\"/y.jpg\"></body></html>",
        );
        let config = ReaderConfig {
            parser: ParserKind::Regex,
            ..ReaderConfig::default()
        };
        let out = WebReader::new("https://example.com")
            .with_config(config)
            .render_with(&fetcher)
            .await;

        assert!(out.contains("(degraded mode)"));
        assert!(out.contains("📌 Title: Old page"));
        assert!(out.contains("Old pageOnly textlink"));
        assert!(!out.contains("alert"));
        assert!(!out.contains('<'));
        assert!(!out.contains("Links ("));
        assert!(!out.contains("Images ("));
    }

    #[tokio::test]
    async fn test_builder_config_str() {
        let reader = WebReader::new("https://example.com")
            .with_config_str(r#"{"extract_links": false}"#)
            .unwrap();
        assert!(!reader.config().extract_links);

        let result = WebReader::new("https://example.com").with_config_str(r#"{"link_limit": "x"}"#);
        assert!(matches!(result, Err(ReaderError::Config(_))));
    }
}
