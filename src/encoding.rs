//! Response body decoding.
//!
//! The charset declared in the `Content-Type` header wins; otherwise the
//! first 1024 bytes are searched for a `<meta>` charset declaration, and
//! UTF-8 is assumed when neither exists.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;/]+)"#).expect("valid regex")
});

/// `charset=...` parameter of a Content-Type value
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Encoding declared by a `Content-Type` header value
pub fn declared_encoding(content_type: &str) -> Option<&'static Encoding> {
    let label = CONTENT_TYPE_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))?;
    Encoding::for_label(label.as_str().as_bytes())
}

/// Encoding declared inside the markup, looking only at the first 1024 bytes.
///
/// Covers both `<meta charset>` and `<meta http-equiv="Content-Type">`.
pub fn sniff_encoding(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(1024)];
    let head = String::from_utf8_lossy(head);
    let label = CHARSET_META_RE.captures(&head).and_then(|c| c.get(1))?;
    Encoding::for_label(label.as_str().as_bytes())
}

/// Decode a response body, returning the text and the encoding used
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> (String, &'static Encoding) {
    let encoding = content_type
        .and_then(declared_encoding)
        .or_else(|| sniff_encoding(body))
        .unwrap_or(UTF_8);

    // BOM sniffing inside decode may override the chosen encoding
    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        ::log::debug!("Body contained malformed {} sequences", used.name());
    }
    (text.into_owned(), used)
}
