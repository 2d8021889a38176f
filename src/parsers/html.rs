use crate::parsers::{DocumentTree, TreeElement};
use scraper::element_ref::Select;
use scraper::{ElementRef, Html, Selector};

/// `scraper`-backed [`DocumentTree`]
pub struct HtmlDocument {
    html: Html,
}

/// Element handle borrowed from an [`HtmlDocument`]
#[derive(Clone, Copy)]
pub struct HtmlElement<'a>(ElementRef<'a>);

impl HtmlDocument {
    /// Parses a full HTML document
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Matches reachable from the root element.
    ///
    /// `Html::select` scans the whole node arena, which still holds the
    /// children of detached subtrees, so lookups walk the attached tree only.
    fn attached<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.root_element().select(selector)
    }
}

fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(compiled) => Some(compiled),
        Err(e) => {
            ::log::debug!("Ignoring invalid selector '{}': {:?}", selector, e);
            None
        }
    }
}

impl DocumentTree for HtmlDocument {
    type Element<'a> = HtmlElement<'a>;

    fn select_one(&self, selector: &str) -> Option<HtmlElement<'_>> {
        let selector = compile(selector)?;
        self.attached(&selector).next().map(HtmlElement)
    }

    fn find_all<'a>(
        &'a self,
        tag: &str,
        predicate: &dyn Fn(&HtmlElement<'a>) -> bool,
    ) -> Vec<HtmlElement<'a>> {
        let Some(selector) = compile(tag) else {
            return Vec::new();
        };
        self.attached(&selector)
            .map(HtmlElement)
            .filter(|element| predicate(element))
            .collect()
    }

    fn remove_all(&mut self, tags: &[&str]) -> usize {
        let mut ids = Vec::new();
        for tag in tags {
            if let Some(selector) = compile(tag) {
                ids.extend(self.attached(&selector).map(|element| element.id()));
            }
        }

        for id in &ids {
            if let Some(mut node) = self.html.tree.get_mut(*id) {
                node.detach();
            }
        }

        ::log::debug!("Removed {} boilerplate elements", ids.len());
        ids.len()
    }
}

impl TreeElement for HtmlElement<'_> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn text(&self, separator: &str, strip: bool) -> String {
        if strip {
            self.0
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(separator)
        } else {
            self.0.text().collect::<Vec<_>>().join(separator)
        }
    }
}
