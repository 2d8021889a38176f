pub mod http;

use crate::error::Result;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// One outbound GET
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl FetchRequest {
    pub fn new(url: Url, timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            url,
            timeout,
            user_agent: user_agent.into(),
        }
    }
}

/// A successfully fetched, decoded response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after redirects
    pub final_url: Url,
    pub status: u16,
    /// Name of the encoding used to decode the body
    pub encoding: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// Retrieves a page's markup
pub trait Fetcher {
    /// Perform a single attempt; failures are mapped to distinct
    /// [`ReaderError`](crate::ReaderError) variants and never retried.
    fn fetch(&self, request: &FetchRequest) -> impl Future<Output = Result<FetchedPage>> + Send;
}
