use crate::error::ReaderError;
use crate::parsers::ParserKind;
use crate::results::{ExtractionMode, PageReport};

/// Prefix of every error line
pub const ERROR_MARKER: &str = "❌ Error: ";

/// Appended after truncated main text
pub const TRUNCATION_NOTICE: &str = "\n\n... (content truncated)";

/// Shown when no main text was found
pub const EMPTY_CONTENT: &str = "(no main content found)";

/// Closing hint of degraded-mode reports when the HTML parser was not built
pub const PARSER_MISSING_HINT: &str =
    "⚠️ Note: the HTML parser is unavailable, build with the `html` feature for better extraction";

/// Closing hint of degraded-mode reports when the regex parser was chosen
pub const REGEX_SELECTED_HINT: &str =
    "⚠️ Note: read with the regex parser, set `parser` to `html` for metadata, links and images";

/// Hint matching how degraded mode was reached
pub fn degraded_hint() -> &'static str {
    if ParserKind::html_available() {
        REGEX_SELECTED_HINT
    } else {
        PARSER_MISSING_HINT
    }
}

const RULE_WIDTH: usize = 60;

fn push_banner(out: &mut Vec<String>, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    out.push(rule.clone());
    out.push(title.to_string());
    out.push(rule);
}

/// Render the single-line error result
pub fn render_error(err: &ReaderError) -> String {
    format!("{ERROR_MARKER}{err}")
}

/// Render a report, keeping at most `max_content_length` characters of main text
pub fn render_report(report: &PageReport, max_content_length: usize) -> String {
    match report.mode {
        ExtractionMode::Structured => render_structured(report, max_content_length),
        ExtractionMode::Degraded => render_degraded(report, max_content_length),
    }
}

fn render_preview(report: &PageReport, max_content_length: usize) -> String {
    let (preview, truncated) = report.preview(max_content_length);
    if truncated {
        format!("{preview}{TRUNCATION_NOTICE}")
    } else {
        preview.to_string()
    }
}

fn render_structured(report: &PageReport, max_content_length: usize) -> String {
    let mut out = Vec::new();
    let meta = &report.metadata;

    push_banner(&mut out, "📄 Page Info");
    out.push(format!("🔗 URL: {}", report.url));
    out.push(format!("📌 Title: {}", meta.title));
    out.push(format!("✅ Status: {}", report.status));
    out.push(format!("🌐 Encoding: {}", report.encoding));

    if !meta.description.is_empty() {
        out.push(format!("📝 Description: {}", meta.description));
    }
    if !meta.author.is_empty() {
        out.push(format!("✍️ Author: {}", meta.author));
    }
    if !meta.keywords.is_empty() {
        out.push(format!("🏷️ Keywords: {}", meta.keywords));
    }

    out.push(String::new());
    push_banner(&mut out, "📖 Main Content");
    if report.main_text.is_empty() {
        out.push(EMPTY_CONTENT.to_string());
    } else {
        out.push(render_preview(report, max_content_length));
    }
    out.push(format!("\n📊 Total characters: {}", report.total_length));

    if !report.links.is_empty() {
        out.push(String::new());
        push_banner(&mut out, &format!("🔗 Links ({} total)", report.links.len()));
        for (i, link) in report.links.iter().enumerate() {
            out.push(format!("{}. {}", i + 1, link.text));
            out.push(format!("   {}", link.url));
        }
    }

    if !report.images.is_empty() {
        out.push(String::new());
        push_banner(&mut out, &format!("🖼️ Images ({} total)", report.images.len()));
        for (i, image) in report.images.iter().enumerate() {
            out.push(format!("{}. {}", i + 1, image));
        }
    }

    out.join("\n")
}

fn render_degraded(report: &PageReport, max_content_length: usize) -> String {
    let mut out = Vec::new();

    push_banner(&mut out, "📄 Page Info (degraded mode)");
    out.push(format!("🔗 URL: {}", report.url));
    out.push(format!("📌 Title: {}", report.metadata.title));
    out.push(format!("✅ Status: {}", report.status));
    out.push(format!("🌐 Encoding: {}", report.encoding));

    out.push(String::new());
    push_banner(&mut out, "📖 Content");
    out.push(render_preview(report, max_content_length));
    out.push(String::new());
    out.push(format!("📊 Total characters: {}", report.total_length));
    out.push(String::new());
    out.push(degraded_hint().to_string());

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{ExtractedLink, PageMetadata};

    fn report(main_text: &str) -> PageReport {
        PageReport {
            url: "https://example.com/page".to_string(),
            final_url: "https://example.com/page".to_string(),
            status: 200,
            encoding: "UTF-8".to_string(),
            content_type: Some("text/html".to_string()),
            mode: ExtractionMode::Structured,
            metadata: PageMetadata {
                title: "Example".to_string(),
                ..PageMetadata::default()
            },
            main_text: main_text.to_string(),
            total_length: main_text.chars().count(),
            truncated: false,
            links: Vec::new(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_short_text_is_not_truncated() {
        let text = "a".repeat(1000);
        let out = render_report(&report(&text), 1000);
        assert!(out.contains(&text));
        assert!(!out.contains("content truncated"));
        assert!(out.contains("📊 Total characters: 1000"));
    }

    #[test]
    fn test_long_text_is_truncated() {
        let text = format!("{}{}", "a".repeat(1000), "b".repeat(500));
        let out = render_report(&report(&text), 1000);
        let expected = format!("{}{}", "a".repeat(1000), TRUNCATION_NOTICE);
        assert!(out.contains(&expected));
        assert!(!out.contains("bbb"));
        assert!(out.contains("📊 Total characters: 1500"));
    }

    #[test]
    fn test_truncation_counts_characters() {
        let text = "é".repeat(1200);
        let out = render_report(&report(&text), 1000);
        assert!(out.contains(&format!("{}{}", "é".repeat(1000), TRUNCATION_NOTICE)));
        assert!(!out.contains(&"é".repeat(1001)));
        assert!(out.contains("📊 Total characters: 1200"));
    }

    #[test]
    fn test_optional_sections() {
        let out = render_report(&report("Body"), 1000);
        assert!(!out.contains("Description:"));
        assert!(!out.contains("Author:"));
        assert!(!out.contains("Keywords:"));
        assert!(!out.contains("Links ("));
        assert!(!out.contains("Images ("));

        let mut full = report("Body");
        full.metadata.description = "About things".to_string();
        full.metadata.author = "Sam".to_string();
        full.metadata.keywords = "a, b".to_string();
        full.links = vec![
            ExtractedLink {
                text: "First".to_string(),
                url: "https://example.com/1".to_string(),
            },
            ExtractedLink {
                text: "Second".to_string(),
                url: "https://example.com/2".to_string(),
            },
        ];
        full.images = vec!["https://example.com/a.jpg".to_string()];

        let out = render_report(&full, 1000);
        assert!(out.contains("📝 Description: About things"));
        assert!(out.contains("✍️ Author: Sam"));
        assert!(out.contains("🏷️ Keywords: a, b"));
        assert!(out.contains("🔗 Links (2 total)"));
        assert!(out.contains("1. First\n   https://example.com/1"));
        assert!(out.contains("2. Second\n   https://example.com/2"));
        assert!(out.contains("🖼️ Images (1 total)"));
        assert!(out.contains("1. https://example.com/a.jpg"));
    }

    #[test]
    fn test_empty_main_text() {
        let out = render_report(&report(""), 1000);
        assert!(out.contains(EMPTY_CONTENT));
        assert!(out.contains("📊 Total characters: 0"));
    }

    #[test]
    fn test_degraded_layout() {
        let mut degraded = report("Plain text");
        degraded.mode = ExtractionMode::Degraded;
        let out = render_report(&degraded, 1000);
        assert!(out.contains("(degraded mode)"));
        assert!(out.contains("📌 Title: Example"));
        assert!(out.contains("Plain text"));
        assert!(out.ends_with(degraded_hint()));
        assert!(!out.contains("Links ("));
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_degraded_hint_when_regex_is_chosen() {
        assert_eq!(degraded_hint(), REGEX_SELECTED_HINT);
        assert!(!degraded_hint().contains("unavailable"));
    }

    #[cfg(not(feature = "html"))]
    #[test]
    fn test_degraded_hint_without_html_feature() {
        assert_eq!(degraded_hint(), PARSER_MISSING_HINT);
    }

    #[test]
    fn test_error_line() {
        let line = render_error(&ReaderError::HttpStatus { status: 503 });
        assert_eq!(line, "❌ Error: HTTP 503 - server returned an error");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_pre_truncated_report_keeps_notice() {
        let text = "x".repeat(2000);
        let mut r = report(&text);
        r.truncate_main_text(1000);
        assert!(r.truncated);
        assert_eq!(r.total_length, 2000);
        let out = render_report(&r, 1000);
        assert!(out.contains(TRUNCATION_NOTICE));
    }
}
