use crate::utils::truncate_chars;
use serde::{Deserialize, Serialize};

/// Title used when a page has none
pub const UNTITLED: &str = "untitled";

/// Link text used when an anchor has no visible text
pub const NO_LINK_TEXT: &str = "(no text)";

/// How the main text was extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Full HTML parse with selectors, metadata, links and images
    Structured,
    /// Regex fallback: title and stripped text only
    Degraded,
}

/// Metadata read from `<title>` and `<meta>` tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            title: UNTITLED.to_string(),
            description: String::new(),
            keywords: String::new(),
            author: String::new(),
        }
    }
}

/// A link found on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLink {
    /// Visible text, at most 50 characters
    pub text: String,
    /// Absolute http(s) URL
    pub url: String,
}

/// Everything read from one page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    /// URL that was requested
    pub url: String,

    /// URL after redirects
    pub final_url: String,

    pub status: u16,

    /// Name of the encoding the body was decoded with
    pub encoding: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    pub mode: ExtractionMode,

    pub metadata: PageMetadata,

    /// Main text; complete unless `truncated` is set
    pub main_text: String,

    /// Character count of the untruncated main text
    pub total_length: usize,

    #[serde(default)]
    pub truncated: bool,

    pub links: Vec<ExtractedLink>,

    pub images: Vec<String>,
}

impl PageReport {
    /// The main text cut to `max_chars`, and whether anything was cut
    pub fn preview(&self, max_chars: usize) -> (&str, bool) {
        let preview = truncate_chars(&self.main_text, max_chars);
        let cut = self.truncated || preview.len() < self.main_text.len();
        (preview, cut)
    }

    /// Cut the stored main text to `max_chars`, keeping `total_length`
    pub fn truncate_main_text(&mut self, max_chars: usize) {
        let kept = truncate_chars(&self.main_text, max_chars).len();
        if kept < self.main_text.len() {
            self.main_text.truncate(kept);
            self.truncated = true;
        }
    }
}
