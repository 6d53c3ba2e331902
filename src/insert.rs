use crate::parsers::html;
use crate::results::InsertionResult;
use crate::suggest::LinkSuggestionEngine;
use crate::utils::escape_attribute;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use url::Url;

static OPEN_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<a\s[^>]*?href\s*=").expect("open anchor pattern should be valid")
});
static CLOSE_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</a\s*>").expect("close anchor pattern should be valid"));
// A `<` only starts markup when a tag name, `/` or `!` follows it
static UNCLOSED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[A-Za-z/!][^>]*$").expect("unclosed tag pattern should be valid")
});

/// Splices suggested links into free-form page content
pub struct ContentLinkInserter<'a> {
    engine: &'a LinkSuggestionEngine<'a>,
    link_class: String,
    site_url: Option<Url>,
}

impl<'a> ContentLinkInserter<'a> {
    pub fn new(engine: &'a LinkSuggestionEngine<'a>) -> Self {
        Self {
            engine,
            link_class: "internal-link".to_string(),
            site_url: None,
        }
    }

    /// Set the class attribute of inserted anchors
    pub fn with_link_class(mut self, link_class: &str) -> Self {
        self.link_class = link_class.to_string();
        self
    }

    /// Treat absolute links to this site as existing internal links
    pub fn with_site_url(mut self, site_url: Option<Url>) -> Self {
        self.site_url = site_url;
        self
    }

    /// Link up to `max_insertions` occurrences of suggested anchor texts.
    ///
    /// Each suggestion replaces at most one occurrence of its anchor text.
    /// Suggestions whose text doesn't appear, only appears inside existing
    /// markup, or whose target the content already links to are skipped.
    pub fn insert(&self, content: &str, source_slug: &str, max_insertions: usize) -> InsertionResult {
        let suggestions = self.engine.suggest_for(source_slug, max_insertions);
        let mut linked = html::internal_link_targets(content, self.site_url.as_ref());

        let mut output = content.to_string();
        let mut inserted_links = Vec::new();

        for link in suggestions {
            if inserted_links.len() >= max_insertions {
                break;
            }
            if linked.contains(&link.to_page_id) {
                ::log::debug!("{} already links to {}", source_slug, link.to_page_id);
                continue;
            }
            let Some(pattern) = anchor_pattern(&link.anchor_text) else {
                continue;
            };
            let Some(range) = find_insertable(&output, &pattern) else {
                ::log::debug!(
                    "Anchor text {:?} not found in {}",
                    link.anchor_text,
                    source_slug
                );
                continue;
            };

            let element = format!(
                r#"<a href="/{}" class="{}">{}</a>"#,
                escape_attribute(&link.to_page_id),
                escape_attribute(&self.link_class),
                &output[range.clone()]
            );
            output.replace_range(range, &element);

            ::log::info!(
                "Linked {:?} in {} to /{}",
                link.anchor_text,
                source_slug,
                link.to_page_id
            );
            linked.insert(link.to_page_id.clone());
            inserted_links.push(link);
        }

        InsertionResult {
            content: output,
            inserted_links,
        }
    }
}

/// Case-insensitive pattern for the literal anchor text, bounded by word
/// boundaries on the sides that start or end with a word character
fn anchor_pattern(anchor_text: &str) -> Option<Regex> {
    let text = anchor_text.trim();
    if text.is_empty() {
        return None;
    }

    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let leading = if text.starts_with(is_word) { r"\b" } else { "" };
    let trailing = if text.ends_with(is_word) { r"\b" } else { "" };

    match Regex::new(&format!("(?i){}{}{}", leading, regex::escape(text), trailing)) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            ::log::warn!("Skipping anchor text {:?}: {}", anchor_text, e);
            None
        }
    }
}

/// First match of `pattern` that sits in plain text, outside any tag or open anchor
fn find_insertable(content: &str, pattern: &Regex) -> Option<Range<usize>> {
    pattern
        .find_iter(content)
        .find(|m| {
            let before = &content[..m.start()];
            !inside_tag(before) && !inside_anchor(before)
        })
        .map(|m| m.range())
}

fn inside_tag(before: &str) -> bool {
    UNCLOSED_TAG.is_match(before)
}

fn inside_anchor(before: &str) -> bool {
    let Some(open) = OPEN_ANCHOR.find_iter(before).last() else {
        return false;
    };
    match CLOSE_ANCHOR.find_iter(before).last() {
        Some(close) => close.start() < open.start(),
        None => true,
    }
}
