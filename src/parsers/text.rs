//! Degraded-mode extraction over raw markup.
//!
//! Used when no structured HTML parser is available: the title is recovered
//! with a pattern match, `<script>`/`<style>` blocks are dropped, every other
//! tag is stripped and whitespace is collapsed.

use crate::utils::clean_text;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("valid regex"));

#[allow(clippy::expect_used)]
static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid regex"));

#[allow(clippy::expect_used)]
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid regex"));

#[allow(clippy::expect_used)]
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Text of the first `<title>` element, trimmed
pub fn extract_title(markup: &str) -> Option<String> {
    TITLE_RE
        .captures(markup)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Drops script/style blocks and all tags, then collapses whitespace
pub fn strip_markup(markup: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(markup, "");
    let without_styles = STYLE_RE.replace_all(&without_scripts, "");
    let text = TAG_RE.replace_all(&without_styles, "");
    clean_text(&text)
}
