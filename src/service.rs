use crate::insert::ContentLinkInserter;
use crate::pages::{PageRecord, PageRegistry};
use crate::parsers::AnchorTemplateResolver;
use crate::report::ReportGenerator;
use crate::results::{GeneratedLink, InsertionResult, LinkValidationResult};
use crate::rules::{LinkRule, LinkRuleRegistry};
use crate::suggest::LinkSuggestionEngine;
use crate::tracker::{LinkPerformanceRecord, LinkPerformanceTracker};
use crate::validator::LinkValidator;
use crate::{Linker, LinkerConfig};
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

/// Cloneable handle for hosts that touch the link state from many tasks.
///
/// Pages, rules and performance counters each sit behind their own lock.
/// Operations that need several of them lock in the order pages, rules,
/// tracker.
#[derive(Clone)]
pub struct SharedLinker {
    config: Arc<LinkerConfig>,
    resolver: Arc<AnchorTemplateResolver>,
    validator: Arc<LinkValidator>,
    site_url: Option<Url>,
    pages: Arc<Mutex<PageRegistry>>,
    rules: Arc<Mutex<LinkRuleRegistry>>,
    tracker: Arc<Mutex<LinkPerformanceTracker>>,
}

impl SharedLinker {
    pub fn new(linker: Linker) -> Self {
        let parts = linker.into_parts();
        Self {
            config: Arc::new(parts.config),
            resolver: Arc::new(parts.resolver),
            validator: Arc::new(parts.validator),
            site_url: parts.site_url,
            pages: Arc::new(Mutex::new(parts.pages)),
            rules: Arc::new(Mutex::new(parts.rules)),
            tracker: Arc::new(Mutex::new(parts.tracker)),
        }
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    pub async fn upsert_page(&self, page: PageRecord) {
        self.pages.lock().await.upsert(page);
    }

    pub async fn bulk_upsert(&self, pages: Vec<PageRecord>) {
        self.pages.lock().await.bulk_upsert(pages);
    }

    pub async fn add_rule(&self, rule: LinkRule) {
        self.rules.lock().await.add_rule(rule);
    }

    pub async fn page_count(&self) -> usize {
        self.pages.lock().await.len()
    }

    pub async fn rule_count(&self) -> usize {
        self.rules.lock().await.count()
    }

    pub async fn suggest(&self, source_slug: &str, max_links: usize) -> Vec<GeneratedLink> {
        let pages = self.pages.lock().await;
        let rules = self.rules.lock().await;
        LinkSuggestionEngine::new(&pages, &rules, &self.resolver).suggest_for(source_slug, max_links)
    }

    pub async fn insert(&self, content: &str, source_slug: &str, max_insertions: usize) -> InsertionResult {
        let pages = self.pages.lock().await;
        let rules = self.rules.lock().await;
        let engine = LinkSuggestionEngine::new(&pages, &rules, &self.resolver);
        ContentLinkInserter::new(&engine)
            .with_link_class(&self.config.link_class)
            .with_site_url(self.site_url.clone())
            .insert(content, source_slug, max_insertions)
    }

    pub fn validate(&self, from_slug: &str, to_slug: &str, anchor_text: &str) -> LinkValidationResult {
        self.validator.validate(from_slug, to_slug, anchor_text)
    }

    pub async fn record_impression(&self, link_id: &str) {
        self.tracker.lock().await.record_impression(link_id);
    }

    pub async fn record_click(&self, link_id: &str) {
        self.tracker.lock().await.record_click(link_id);
    }

    pub async fn performance(&self, link_id: &str) -> Option<LinkPerformanceRecord> {
        self.tracker.lock().await.get(link_id).cloned()
    }

    fn reports(&self) -> ReportGenerator {
        ReportGenerator::new(
            (*self.resolver).clone(),
            (*self.validator).clone(),
            self.config.max_links,
        )
    }

    pub async fn stats_report(&self) -> String {
        let pages = self.pages.lock().await;
        let rules = self.rules.lock().await;
        self.reports().stats_report(&pages, &rules)
    }

    pub async fn rules_report(&self) -> String {
        let rules = self.rules.lock().await;
        self.reports().rules_report(&rules)
    }

    pub async fn performance_report(&self) -> String {
        let tracker = self.tracker.lock().await;
        self.reports().performance_report(&tracker)
    }
}
