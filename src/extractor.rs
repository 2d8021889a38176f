//! Heuristic content extraction.
//!
//! Metadata is read first, boilerplate elements are then detached from the
//! tree, and main text, links and images come from what remains.

use crate::config::ReaderConfig;
use crate::error::Result;
use crate::fetchers::FetchedPage;
use crate::filter::ImageFilter;
use crate::parsers::text;
use crate::parsers::{DocumentTree, ParserKind, TreeElement};
use crate::results::{
    ExtractedLink, ExtractionMode, NO_LINK_TEXT, PageMetadata, PageReport, UNTITLED,
};
use crate::utils::{char_len, clean_text, is_web_url, resolve_url, truncate_chars};
use std::collections::HashSet;
use url::Url;

/// Elements removed before any text is read
pub const BOILERPLATE_TAGS: [&str; 8] = [
    "script", "style", "nav", "header", "footer", "aside", "iframe", "noscript",
];

/// Main-content candidates, most specific first
pub const CONTENT_SELECTORS: [&str; 8] = [
    "article",
    r#"[role="main"]"#,
    "main",
    ".article-content",
    ".post-content",
    ".entry-content",
    "#content",
    ".content",
];

/// Longest link text kept, in characters
pub const LINK_TEXT_LIMIT: usize = 50;

/// Extraction settings derived from [`ReaderConfig`]
#[derive(Debug)]
pub struct ExtractOptions {
    pub parser: ParserKind,
    pub extract_links: bool,
    pub extract_images: bool,
    pub link_limit: usize,
    pub image_limit: usize,
    pub image_filter: ImageFilter,
}

impl ExtractOptions {
    pub fn from_config(config: &ReaderConfig) -> Result<Self> {
        Ok(Self {
            parser: config.parser,
            extract_links: config.extract_links,
            extract_images: config.extract_images,
            link_limit: config.link_limit,
            image_limit: config.image_limit,
            image_filter: ImageFilter::new(&config.image_exclude_patterns)?,
        })
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            parser: ParserKind::default(),
            extract_links: true,
            extract_images: true,
            link_limit: 10,
            image_limit: 5,
            image_filter: ImageFilter::default(),
        }
    }
}

/// Text of the first element matching any of `selectors`, trimmed
fn first_meta_content<D: DocumentTree>(doc: &D, selectors: &[&str]) -> String {
    selectors
        .iter()
        .find_map(|selector| doc.select_one(selector))
        .and_then(|meta| meta.attr("content").map(|c| c.trim().to_string()))
        .unwrap_or_default()
}

/// Read title, description, keywords and author
pub fn extract_metadata<D: DocumentTree>(doc: &D) -> PageMetadata {
    let title = doc
        .select_one("title")
        .map(|t| t.text("", false).trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    PageMetadata {
        title,
        description: first_meta_content(
            doc,
            &[
                r#"meta[name="description"]"#,
                r#"meta[property="og:description"]"#,
            ],
        ),
        keywords: first_meta_content(doc, &[r#"meta[name="keywords"]"#]),
        author: first_meta_content(
            doc,
            &[
                r#"meta[name="author"]"#,
                r#"meta[property="article:author"]"#,
            ],
        ),
    }
}

/// Strip boilerplate, pick the main container and return its cleaned text.
///
/// Mutates `doc`: boilerplate elements stay removed for later link and image
/// extraction.
pub fn extract_main_content<D: DocumentTree>(doc: &mut D) -> String {
    doc.remove_all(&BOILERPLATE_TAGS);

    let container = CONTENT_SELECTORS.iter().find_map(|selector| {
        let found = doc.select_one(selector);
        if found.is_some() {
            ::log::debug!("Main content matched '{}'", selector);
        }
        found
    });

    let Some(container) = container.or_else(|| doc.select_one("body")) else {
        return String::new();
    };

    clean_text(&container.text("\n", true))
}

/// Collect up to `limit` unique http(s) links in document order
pub fn extract_links<D: DocumentTree>(doc: &D, base: &Url, limit: usize) -> Vec<ExtractedLink> {
    let mut links = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for anchor in doc.find_all("a", &|a| a.attr("href").is_some()) {
        if links.len() >= limit {
            break;
        }

        let href = anchor.attr("href").unwrap_or_default().trim();
        if href.is_empty()
            || href.starts_with('#')
            || href
                .get(..11)
                .is_some_and(|p| p.eq_ignore_ascii_case("javascript:"))
        {
            continue;
        }

        let Some(absolute) = resolve_url(base, href) else {
            continue;
        };

        if !seen.insert(absolute.to_string()) {
            continue;
        }

        if !is_web_url(&absolute) {
            continue;
        }

        let text = clean_text(&anchor.text("", false));
        let text = if text.is_empty() {
            NO_LINK_TEXT.to_string()
        } else {
            truncate_chars(&text, LINK_TEXT_LIMIT).to_string()
        };

        links.push(ExtractedLink {
            text,
            url: absolute.into(),
        });
    }

    links
}

/// Collect up to `limit` unique content image URLs in document order
pub fn extract_images<D: DocumentTree>(
    doc: &D,
    base: &Url,
    limit: usize,
    filter: &ImageFilter,
) -> Vec<String> {
    let mut images = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for img in doc.find_all("img", &|_| true) {
        if images.len() >= limit {
            break;
        }

        let src = ["src", "data-src", "data-lazy-src"]
            .iter()
            .filter_map(|name| img.attr(name))
            .map(str::trim)
            .find(|value| !value.is_empty());

        let Some(src) = src else {
            continue;
        };

        let Some(absolute) = resolve_url(base, src) else {
            continue;
        };

        if seen.contains(absolute.as_str()) || !filter.should_keep(&absolute) {
            continue;
        }

        seen.insert(absolute.to_string());
        images.push(absolute.into());
    }

    images
}

/// Fields shared by both extraction modes
fn base_report(page: &FetchedPage, url: &Url, mode: ExtractionMode) -> PageReport {
    PageReport {
        url: url.to_string(),
        final_url: page.final_url.to_string(),
        status: page.status,
        encoding: page.encoding.clone(),
        content_type: page.content_type.clone(),
        mode,
        metadata: PageMetadata::default(),
        main_text: String::new(),
        total_length: 0,
        truncated: false,
        links: Vec::new(),
        images: Vec::new(),
    }
}

/// Run the full extraction over a parsed document
pub fn extract_structured<D: DocumentTree>(
    mut doc: D,
    page: &FetchedPage,
    base: &Url,
    options: &ExtractOptions,
) -> PageReport {
    let mut report = base_report(page, base, ExtractionMode::Structured);

    report.metadata = extract_metadata(&doc);
    report.main_text = extract_main_content(&mut doc);
    report.total_length = char_len(&report.main_text);

    if options.extract_links {
        report.links = extract_links(&doc, base, options.link_limit);
    }
    if options.extract_images {
        report.images = extract_images(&doc, base, options.image_limit, &options.image_filter);
    }

    ::log::info!(
        "Extracted '{}': {} characters, {} links, {} images",
        report.metadata.title,
        report.total_length,
        report.links.len(),
        report.images.len()
    );
    report
}

/// Regex fallback: title and stripped text, nothing else
pub fn extract_degraded(page: &FetchedPage, base: &Url) -> PageReport {
    let mut report = base_report(page, base, ExtractionMode::Degraded);

    report.metadata.title = text::extract_title(&page.body).unwrap_or_else(|| UNTITLED.to_string());
    report.main_text = text::strip_markup(&page.body);
    report.total_length = char_len(&report.main_text);

    ::log::info!(
        "Extracted '{}' in degraded mode: {} characters",
        report.metadata.title,
        report.total_length
    );
    report
}

/// Pick the parser and extract a report from a fetched page
pub fn extract(page: &FetchedPage, base: &Url, options: &ExtractOptions) -> PageReport {
    match options.parser.resolve() {
        #[cfg(feature = "html")]
        ParserKind::Html => {
            let doc = crate::parsers::html::HtmlDocument::parse(&page.body);
            extract_structured(doc, page, base, options)
        }
        _ => extract_degraded(page, base),
    }
}
