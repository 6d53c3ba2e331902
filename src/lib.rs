pub mod config;
pub mod error;
pub mod insert;
pub mod pages;
pub mod parsers;
pub mod report;
pub mod results;
pub mod rules;
pub mod service;
pub mod store;
pub mod suggest;
pub mod tracker;
pub mod utils;
pub mod validator;


// Re-export commonly used types for convenience
pub use config::LinkerConfig;
pub use error::LinkerError;
pub use insert::ContentLinkInserter;
pub use pages::{PageRecord, PageRegistry, PageType};
pub use parsers::{AnchorTemplateResolver, TemplateDefaults};
pub use report::ReportGenerator;
pub use results::{GeneratedLink, InsertionResult, LinkType, LinkValidationResult};
pub use rules::{LinkRule, LinkRuleRegistry};
pub use service::SharedLinker;
pub use store::Snapshot;
pub use suggest::LinkSuggestionEngine;
pub use tracker::{LinkPerformanceRecord, LinkPerformanceTracker};
pub use validator::LinkValidator;

use std::path::Path;
use url::Url;

/// Owns one page registry, rule registry and performance tracker, plus the
/// configuration that drives them.
///
/// Build it, populate it, query it. Nothing here is global, so separate
/// instances never share state.
pub struct Linker {
    config: LinkerConfig,
    pages: PageRegistry,
    rules: LinkRuleRegistry,
    tracker: LinkPerformanceTracker,
    resolver: AnchorTemplateResolver,
    validator: LinkValidator,
    site_url: Option<Url>,
}

impl Default for Linker {
    fn default() -> Self {
        Self::new(LinkerConfig::default())
    }
}

impl Linker {
    /// Create a linker from configuration
    pub fn new(config: LinkerConfig) -> Self {
        let rules = if config.use_default_rules {
            LinkRuleRegistry::with_default_rules()
        } else {
            LinkRuleRegistry::new()
        };

        let tracker = match config.max_tracked_links {
            Some(max) => LinkPerformanceTracker::with_retention(max),
            None => LinkPerformanceTracker::new(),
        };

        let resolver = AnchorTemplateResolver::new(TemplateDefaults {
            use_case: config.use_case.clone(),
            competitors: config.competitors.clone(),
        });

        let site_url = config.site_url.as_deref().and_then(|raw| match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                ::log::warn!("Ignoring invalid site_url {:?}: {}", raw, e);
                None
            }
        });

        Self {
            validator: LinkValidator::new(config.validator.clone()),
            config,
            pages: PageRegistry::new(),
            rules,
            tracker,
            resolver,
            site_url,
        }
    }

    /// Load configuration from a file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, LinkerError> {
        let config = LinkerConfig::from_file(path)?;
        Ok(Self::new(config))
    }

    /// Load configuration from a string
    pub fn from_config_str(config_str: &str) -> Result<Self, LinkerError> {
        let config = LinkerConfig::from_json(config_str)?;
        Ok(Self::new(config))
    }

    /// Add the pages, rules and performance records of a snapshot
    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        ::log::info!(
            "Loading {} pages, {} rules, {} performance records",
            snapshot.pages.len(),
            snapshot.rules.len(),
            snapshot.performance.len()
        );

        self.pages.bulk_upsert(snapshot.pages);
        for rule in snapshot.rules {
            self.rules.add_rule(rule);
        }
        for record in snapshot.performance {
            self.tracker.restore(record);
        }
        self
    }

    /// Current pages, rules and performance records.
    ///
    /// Built-in rules are left out when they were seeded from configuration.
    pub fn snapshot(&self) -> Snapshot {
        let skip = if self.config.use_default_rules {
            rules::default_rules().len()
        } else {
            0
        };

        Snapshot {
            pages: self.pages.all().to_vec(),
            rules: self.rules.all().iter().skip(skip).cloned().collect(),
            performance: self.tracker.all().into_iter().cloned().collect(),
        }
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    pub fn rules(&self) -> &LinkRuleRegistry {
        &self.rules
    }

    pub fn tracker(&self) -> &LinkPerformanceTracker {
        &self.tracker
    }

    pub fn upsert_page(&mut self, page: PageRecord) {
        self.pages.upsert(page);
    }

    pub fn bulk_upsert(&mut self, pages: impl IntoIterator<Item = PageRecord>) {
        self.pages.bulk_upsert(pages);
    }

    pub fn add_rule(&mut self, rule: LinkRule) {
        self.rules.add_rule(rule);
    }

    /// Suggestion engine over the current pages and rules
    pub fn engine(&self) -> LinkSuggestionEngine<'_> {
        LinkSuggestionEngine::new(&self.pages, &self.rules, &self.resolver)
    }

    /// Suggest up to `max_links` links to the other registered pages
    pub fn suggest(&self, source_slug: &str, max_links: usize) -> Vec<GeneratedLink> {
        self.engine().suggest_for(source_slug, max_links)
    }

    /// Suggest links using the configured `max_links`
    pub fn suggest_default(&self, source_slug: &str) -> Vec<GeneratedLink> {
        self.suggest(source_slug, self.config.max_links)
    }

    /// Splice up to `max_insertions` links into `content`
    pub fn insert(&self, content: &str, source_slug: &str, max_insertions: usize) -> InsertionResult {
        let engine = self.engine();
        ContentLinkInserter::new(&engine)
            .with_link_class(&self.config.link_class)
            .with_site_url(self.site_url.clone())
            .insert(content, source_slug, max_insertions)
    }

    /// Splice links into `content` using the configured `max_insertions`
    pub fn insert_default(&self, content: &str, source_slug: &str) -> InsertionResult {
        self.insert(content, source_slug, self.config.max_insertions)
    }

    pub fn validate(&self, from_slug: &str, to_slug: &str, anchor_text: &str) -> LinkValidationResult {
        self.validator.validate(from_slug, to_slug, anchor_text)
    }

    pub fn record_impression(&mut self, link_id: &str) {
        self.tracker.record_impression(link_id);
    }

    pub fn record_click(&mut self, link_id: &str) {
        self.tracker.record_click(link_id);
    }

    pub fn performance(&self, link_id: &str) -> Option<&LinkPerformanceRecord> {
        self.tracker.get(link_id)
    }

    /// Report generator configured like this linker
    pub fn reports(&self) -> ReportGenerator {
        ReportGenerator::new(
            self.resolver.clone(),
            self.validator.clone(),
            self.config.max_links,
        )
    }

    pub fn stats_report(&self) -> String {
        self.reports().stats_report(&self.pages, &self.rules)
    }

    pub fn rules_report(&self) -> String {
        self.reports().rules_report(&self.rules)
    }

    pub fn performance_report(&self) -> String {
        self.reports().performance_report(&self.tracker)
    }

    /// Move the state behind per-structure locks for concurrent use
    pub fn into_shared(self) -> SharedLinker {
        SharedLinker::new(self)
    }

    pub(crate) fn into_parts(self) -> LinkerParts {
        LinkerParts {
            config: self.config,
            pages: self.pages,
            rules: self.rules,
            tracker: self.tracker,
            resolver: self.resolver,
            validator: self.validator,
            site_url: self.site_url,
        }
    }
}

pub(crate) struct LinkerParts {
    pub config: LinkerConfig,
    pub pages: PageRegistry,
    pub rules: LinkRuleRegistry,
    pub tracker: LinkPerformanceTracker,
    pub resolver: AnchorTemplateResolver,
    pub validator: LinkValidator,
    pub site_url: Option<Url>,
}
