use crate::encoding::decode_body;
use crate::error::{ReaderError, Result};
use crate::fetchers::{FetchRequest, FetchedPage, Fetcher};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::Duration;

/// Maximum number of redirects followed per request
const MAX_REDIRECTS: usize = 10;

/// [`Fetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client that follows redirects
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| ReaderError::Request(e.to_string()))?;
        Ok(Self { client })
    }
}

/// Map a transport error onto the reader's error taxonomy
fn classify_error(err: reqwest::Error, timeout: Duration) -> ReaderError {
    if err.is_timeout() {
        ReaderError::Timeout {
            secs: timeout.as_secs(),
        }
    } else if err.is_connect() {
        ReaderError::Connection(err.to_string())
    } else if let Some(status) = err.status() {
        ReaderError::HttpStatus {
            status: status.as_u16(),
        }
    } else {
        ReaderError::Request(err.to_string())
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedPage> {
        ::log::info!(
            "Fetching {} (timeout {}s)",
            request.url,
            request.timeout.as_secs()
        );

        let response = self
            .client
            .get(request.url.clone())
            .header(USER_AGENT, request.user_agent.as_str())
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                ::log::error!("Request to {} failed: {}", request.url, e);
                classify_error(e, request.timeout)
            })?;

        let status = response.status();
        if !status.is_success() {
            ::log::warn!("{} answered with HTTP {}", request.url, status.as_u16());
            return Err(ReaderError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_error(e, request.timeout))?;

        let (body, encoding) = decode_body(&bytes, content_type.as_deref());
        ::log::debug!(
            "Received {} bytes from {} as {}",
            bytes.len(),
            final_url,
            encoding.name()
        );

        Ok(FetchedPage {
            final_url,
            status: status.as_u16(),
            encoding: encoding.name().to_string(),
            content_type,
            body,
        })
    }
}
