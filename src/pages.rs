use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kind of content a page carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    /// "Best X for Y" roundups
    Recommendation,
    /// Single product reviews
    Review,
    /// X vs Y pages
    Comparison,
    /// How-to guides
    Tutorial,
    /// Glossaries, checklists, downloads
    Resource,
}

impl PageType {
    /// Every page type, in declaration order
    pub const ALL: [PageType; 5] = [
        PageType::Recommendation,
        PageType::Review,
        PageType::Comparison,
        PageType::Tutorial,
        PageType::Resource,
    ];
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageType::Recommendation => "Recommendation",
            PageType::Review => "Review",
            PageType::Comparison => "Comparison",
            PageType::Tutorial => "Tutorial",
            PageType::Resource => "Resource",
        };
        f.write_str(name)
    }
}

/// Metadata the CMS supplies for a single page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Unique key of the page, also its URL path
    pub slug: String,

    /// Display title
    pub title: String,

    /// Content kind, drives rule matching
    pub page_type: PageType,

    /// Target keywords; the first one is the primary keyword
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl PageRecord {
    /// Create a new page record
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        page_type: PageType,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            page_type,
            keywords,
        }
    }

    /// First keyword, if any
    pub fn primary_keyword(&self) -> Option<&str> {
        self.keywords.first().map(String::as_str)
    }
}

/// In-memory page store keyed by slug
#[derive(Debug, Default, Clone)]
pub struct PageRegistry {
    pages: Vec<PageRecord>,
    index: HashMap<String, usize>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a page, or replace the record that already has its slug
    pub fn upsert(&mut self, page: PageRecord) {
        match self.index.get(&page.slug) {
            Some(&pos) => {
                ::log::debug!("Updating page {}", page.slug);
                self.pages[pos] = page;
            }
            None => {
                ::log::debug!("Registering page {} ({})", page.slug, page.page_type);
                self.index.insert(page.slug.clone(), self.pages.len());
                self.pages.push(page);
            }
        }
    }

    /// Upsert each page in order
    pub fn bulk_upsert(&mut self, pages: impl IntoIterator<Item = PageRecord>) {
        for page in pages {
            self.upsert(page);
        }
    }

    pub fn get(&self, slug: &str) -> Option<&PageRecord> {
        self.index.get(slug).map(|&pos| &self.pages[pos])
    }

    /// All pages in registration order
    pub fn all(&self) -> &[PageRecord] {
        &self.pages
    }

    /// All pages except the one with `slug`
    pub fn excluding<'a>(&'a self, slug: &'a str) -> impl Iterator<Item = &'a PageRecord> + 'a {
        self.pages.iter().filter(move |page| page.slug != slug)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
