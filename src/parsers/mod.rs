#[cfg(feature = "html")]
pub mod html;
pub mod text;


use serde::{Deserialize, Serialize};

/// Which parser runs over fetched markup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    /// Structured HTML parsing (needs the `html` feature)
    #[default]
    Html,
    /// Regex-based degraded mode
    Regex,
}

impl ParserKind {
    /// Whether the structured parser was compiled in
    pub const fn html_available() -> bool {
        cfg!(feature = "html")
    }

    /// The parser that will actually run.
    ///
    /// Asking for [`ParserKind::Html`] in a build without the `html` feature
    /// degrades to [`ParserKind::Regex`].
    pub fn resolve(self) -> Self {
        match self {
            ParserKind::Html if !Self::html_available() => {
                ::log::warn!("HTML parser unavailable, falling back to degraded mode");
                ParserKind::Regex
            }
            other => other,
        }
    }
}

/// A parsed document that supports the lookups the extractor needs.
///
/// Any HTML library can back this; the crate ships a `scraper`
/// implementation in [`html::HtmlDocument`].
pub trait DocumentTree {
    type Element<'a>: TreeElement
    where
        Self: 'a;

    /// First element matching a CSS selector, in document order
    fn select_one(&self, selector: &str) -> Option<Self::Element<'_>>;

    /// All elements with the given tag name that satisfy `predicate`
    fn find_all<'a>(
        &'a self,
        tag: &str,
        predicate: &dyn Fn(&Self::Element<'a>) -> bool,
    ) -> Vec<Self::Element<'a>>;

    /// Detach every element with one of the given tag names, returning how many went
    fn remove_all(&mut self, tags: &[&str]) -> usize;
}

/// Read access to one element of a [`DocumentTree`]
pub trait TreeElement {
    fn attr(&self, name: &str) -> Option<&str>;

    /// Text of all descendant text nodes joined by `separator`.
    ///
    /// With `strip`, every node is trimmed and empty nodes are skipped.
    fn text(&self, separator: &str, strip: bool) -> String;
}
