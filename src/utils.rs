use url::Url;

/// Collapse every whitespace run into a single space and trim the ends
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of characters (not bytes) in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The first `max_chars` characters of `text`, cut on a character boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Resolve a possibly relative reference against the page URL
pub fn resolve_url(base: &Url, reference: &str) -> Option<Url> {
    match base.join(reference) {
        Ok(url) => Some(url),
        Err(e) => {
            ::log::debug!("Cannot resolve '{}' against {}: {}", reference, base, e);
            None
        }
    }
}

/// Whether the URL uses a scheme the reader follows
pub fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Hello \n\n world\t! "), "Hello world !");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
        assert_eq!(char_len("日本語"), 3);
        assert_eq!(truncate_chars("日本語", 2), "日本");
    }

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/page").unwrap();
        assert_eq!(
            resolve_url(&base, "/about").unwrap().as_str(),
            "https://example.com/about"
        );
        assert_eq!(
            resolve_url(&base, "other").unwrap().as_str(),
            "https://example.com/other"
        );
        assert_eq!(
            resolve_url(&base, "//cdn.example.com/a.png").unwrap().as_str(),
            "https://cdn.example.com/a.png"
        );
        assert!(resolve_url(&base, "http://[broken").is_none());
    }

    #[test]
    fn test_is_web_url() {
        assert!(is_web_url(&Url::parse("http://example.com").unwrap()));
        assert!(is_web_url(&Url::parse("https://example.com").unwrap()));
        assert!(!is_web_url(&Url::parse("mailto:me@example.com").unwrap()));
        assert!(!is_web_url(&Url::parse("ftp://example.com").unwrap()));
    }
}
