use crate::pages::{PageRegistry, PageType};
use crate::parsers::AnchorTemplateResolver;
use crate::results::GeneratedLink;
use crate::rules::LinkRuleRegistry;
use crate::suggest::LinkSuggestionEngine;
use crate::tracker::LinkPerformanceTracker;
use crate::validator::LinkValidator;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

const RULE: &str = "==================================================";

/// Renders plain-text reports for the admin view.
///
/// Header and label wording is relied upon by consumers that grep the output.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    resolver: AnchorTemplateResolver,
    validator: LinkValidator,
    max_links_per_page: usize,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(AnchorTemplateResolver::default(), LinkValidator::default(), 3)
    }
}

impl ReportGenerator {
    pub fn new(
        resolver: AnchorTemplateResolver,
        validator: LinkValidator,
        max_links_per_page: usize,
    ) -> Self {
        Self {
            resolver,
            validator,
            max_links_per_page,
        }
    }

    /// Generate links for every page and summarize them
    pub fn stats_report(&self, pages: &PageRegistry, rules: &LinkRuleRegistry) -> String {
        let engine = LinkSuggestionEngine::new(pages, rules, &self.resolver);

        let mut by_type: BTreeMap<PageType, (usize, usize)> = BTreeMap::new();
        let mut failures: Vec<(GeneratedLink, Vec<String>)> = Vec::new();
        let mut total_links = 0;

        for page in pages.all() {
            let links = engine.suggest_for(&page.slug, self.max_links_per_page);
            total_links += links.len();

            let counts = by_type.entry(page.page_type).or_default();
            counts.0 += 1;
            counts.1 += links.len();

            for link in links {
                let result = self.validator.validate_link(&link);
                if !result.valid {
                    failures.push((link, result.issues));
                }
            }
        }

        let average = if pages.is_empty() {
            0.0
        } else {
            total_links as f64 / pages.len() as f64
        };

        let summary = StatsSummary {
            page_count: pages.len(),
            total_links,
            average,
            by_type,
            failures,
        };
        render(|out| summary.write_to(out))
    }

    /// List the rule matrix grouped by source type
    pub fn rules_report(&self, rules: &LinkRuleRegistry) -> String {
        render(|out| write_rules(out, rules))
    }

    /// Impression, click and CTR summary, best performers first
    pub fn performance_report(&self, tracker: &LinkPerformanceTracker) -> String {
        render(|out| write_performance(out, tracker))
    }
}

/// Run a report writer against a fresh buffer
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    if let Err(e) = write(&mut out) {
        ::log::error!("Report rendering failed: {}", e);
    }
    out
}

fn write_header(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "{RULE}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{RULE}")
}

struct StatsSummary {
    page_count: usize,
    total_links: usize,
    average: f64,
    by_type: BTreeMap<PageType, (usize, usize)>,
    failures: Vec<(GeneratedLink, Vec<String>)>,
}

impl StatsSummary {
    fn write_to(&self, out: &mut String) -> fmt::Result {
        write_header(out, "Internal Link Report")?;
        writeln!(out, "Total Pages: {}", self.page_count)?;
        writeln!(out, "Total Generated Links: {}", self.total_links)?;
        writeln!(out, "Average Links per Page: {:.2}", self.average)?;
        writeln!(out)?;
        writeln!(out, "Links by Page Type:")?;
        for (page_type, (page_count, link_count)) in &self.by_type {
            writeln!(out, "  {}: {} pages, {} links", page_type, page_count, link_count)?;
        }
        writeln!(out)?;
        writeln!(out, "Validation Failures: {}", self.failures.len())?;
        for (link, issues) in &self.failures {
            writeln!(
                out,
                "  {} -> {} \"{}\": {}",
                link.from_page_id,
                link.to_page_id,
                link.anchor_text,
                issues.join("; ")
            )?;
        }
        Ok(())
    }
}

fn write_rules(out: &mut String, rules: &LinkRuleRegistry) -> fmt::Result {
    write_header(out, "Internal Link Rules Report")?;
    writeln!(out, "Total Rules: {}", rules.count())?;

    for page_type in PageType::ALL {
        let mut from_type: Vec<_> = rules.rules_from(page_type).collect();
        if from_type.is_empty() {
            continue;
        }
        from_type.sort_by_key(|rule| rule.priority);

        writeln!(out)?;
        writeln!(out, "{} ({} rules):", page_type, from_type.len())?;
        for rule in from_type {
            write!(
                out,
                "  -> {} [priority {}] \"{}\"",
                rule.to, rule.priority, rule.anchor_template
            )?;
            if let Some(threshold) = rule.min_keyword_match {
                write!(out, " (min keyword match {})", threshold)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_performance(out: &mut String, tracker: &LinkPerformanceTracker) -> fmt::Result {
    let totals = tracker.totals();

    write_header(out, "Link Performance Report")?;
    writeln!(out, "Tracked Links: {}", totals.links)?;
    writeln!(out, "Total Impressions: {}", totals.impressions)?;
    writeln!(out, "Total Clicks: {}", totals.clicks)?;
    writeln!(out, "Overall CTR: {:.2}%", totals.ctr())?;

    let mut records = tracker.all();
    records.sort_by(|a, b| {
        b.ctr()
            .total_cmp(&a.ctr())
            .then_with(|| b.clicks.cmp(&a.clicks))
            .then_with(|| a.link_id.cmp(&b.link_id))
    });

    if !records.is_empty() {
        writeln!(out)?;
        for record in records {
            writeln!(
                out,
                "  {}: {} impressions, {} clicks, CTR {:.2}%",
                record.link_id,
                record.impressions,
                record.clicks,
                record.ctr()
            )?;
        }
    }
    Ok(())
}
