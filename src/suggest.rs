use crate::pages::{PageRecord, PageRegistry};
use crate::parsers::AnchorTemplateResolver;
use crate::results::{GeneratedLink, LinkType};
use crate::rules::LinkRuleRegistry;
use uuid::Uuid;

/// A suggestion that has not been given an id yet
struct Draft<'a> {
    target: &'a PageRecord,
    anchor_text: String,
    priority: i32,
}

/// Produces ranked link suggestions for a source page
pub struct LinkSuggestionEngine<'a> {
    pages: &'a PageRegistry,
    rules: &'a LinkRuleRegistry,
    resolver: &'a AnchorTemplateResolver,
}

impl<'a> LinkSuggestionEngine<'a> {
    pub fn new(
        pages: &'a PageRegistry,
        rules: &'a LinkRuleRegistry,
        resolver: &'a AnchorTemplateResolver,
    ) -> Self {
        Self {
            pages,
            rules,
            resolver,
        }
    }

    /// Suggest up to `max_links` links from `source_slug` to pages in `candidates`.
    ///
    /// Rules are walked in registry order and the `max_links` budget is shared
    /// by all of them, so once it is used up later rules contribute nothing.
    /// The collected drafts are then ordered by rule priority (lowest first).
    /// An unknown source page yields no suggestions.
    pub fn suggest<'c, I>(&self, source_slug: &str, candidates: I, max_links: usize) -> Vec<GeneratedLink>
    where
        I: IntoIterator<Item = &'c PageRecord>,
    {
        let Some(source) = self.pages.get(source_slug) else {
            ::log::debug!("No page registered for {}, nothing to suggest", source_slug);
            return Vec::new();
        };

        let candidates: Vec<&PageRecord> = candidates
            .into_iter()
            .filter(|page| page.slug != source_slug)
            .collect();

        let mut drafts: Vec<Draft<'_>> = Vec::new();
        for rule in self.rules.rules_from(source.page_type) {
            for target in candidates.iter().copied().filter(|page| page.page_type == rule.to) {
                if drafts.len() >= max_links {
                    break;
                }
                drafts.push(Draft {
                    target,
                    anchor_text: self.resolver.render_for(&rule.anchor_template, target),
                    priority: rule.priority,
                });
            }
        }

        // Stable, so equal priorities keep rule then candidate order
        drafts.sort_by_key(|draft| draft.priority);
        drafts.truncate(max_links);

        ::log::debug!("Suggested {} links for {}", drafts.len(), source_slug);

        drafts
            .into_iter()
            .map(|draft| GeneratedLink {
                id: Uuid::new_v4().to_string(),
                from_page_id: source.slug.clone(),
                to_page_id: draft.target.slug.clone(),
                anchor_text: draft.anchor_text,
                link_type: LinkType::Auto,
                priority: draft.priority,
            })
            .collect()
    }

    /// Suggest links from `source_slug` to every other registered page
    pub fn suggest_for(&self, source_slug: &str, max_links: usize) -> Vec<GeneratedLink> {
        self.suggest(source_slug, self.pages.excluding(source_slug), max_links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::PageType;
    use crate::rules::LinkRule;
    use std::collections::HashSet;

    fn page(slug: &str, title: &str, page_type: PageType, keywords: &[&str]) -> PageRecord {
        PageRecord::new(
            slug,
            title,
            page_type,
            keywords.iter().map(|k| k.to_string()).collect(),
        )
    }

    fn site() -> PageRegistry {
        let mut pages = PageRegistry::new();
        pages.bulk_upsert(vec![
            page("how-to-setup-vps", "How to Setup a VPS", PageType::Tutorial, &["setup vps"]),
            page("best-vps-providers", "Best VPS Providers", PageType::Recommendation, &["vps providers"]),
            page("best-cheap-vps", "Best Cheap VPS", PageType::Recommendation, &["cheap vps"]),
            page("hostinger-review", "Hostinger VPS Review", PageType::Review, &["hostinger"]),
            page("vultr-review", "Vultr Cloud Review", PageType::Review, &["vultr"]),
            page("vps-glossary", "VPS Glossary", PageType::Resource, &["vps terms"]),
        ]);
        pages
    }

    #[test]
    fn test_single_default_rule() {
        let mut pages = PageRegistry::new();
        pages.upsert(page("best-vps-providers", "Best VPS Providers", PageType::Recommendation, &[]));
        pages.upsert(page("how-to-setup-vps", "How to Setup VPS", PageType::Tutorial, &["setup vps"]));

        let mut rules = LinkRuleRegistry::new();
        rules.add_rule(LinkRule::new(
            PageType::Tutorial,
            PageType::Recommendation,
            1,
            "Best {keyword} for {useCase}",
        ));
        let resolver = AnchorTemplateResolver::default();
        let engine = LinkSuggestionEngine::new(&pages, &rules, &resolver);

        let candidates = vec![pages.get("best-vps-providers").unwrap().clone()];
        let links = engine.suggest("how-to-setup-vps", &candidates, 3);

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].from_page_id, "how-to-setup-vps");
        assert_eq!(links[0].to_page_id, "best-vps-providers");
        assert_eq!(links[0].anchor_text, "Best  for beginners");
        assert_eq!(links[0].link_type, LinkType::Auto);
        assert_eq!(links[0].priority, 1);
    }

    #[test]
    fn test_unknown_source_yields_nothing() {
        let pages = site();
        let rules = LinkRuleRegistry::with_default_rules();
        let resolver = AnchorTemplateResolver::default();
        let engine = LinkSuggestionEngine::new(&pages, &rules, &resolver);

        assert!(engine.suggest("missing", pages.all(), 3).is_empty());
    }

    #[test]
    fn test_no_rules_for_source_type() {
        let pages = site();
        let mut rules = LinkRuleRegistry::new();
        rules.add_rule(LinkRule::new(PageType::Review, PageType::Tutorial, 1, "x"));
        let resolver = AnchorTemplateResolver::default();
        let engine = LinkSuggestionEngine::new(&pages, &rules, &resolver);

        assert!(engine.suggest_for("how-to-setup-vps", 3).is_empty());
    }

    #[test]
    fn test_never_links_to_itself() {
        let pages = site();
        let mut rules = LinkRuleRegistry::with_default_rules();
        for page_type in PageType::ALL {
            rules.add_rule(LinkRule::new(page_type, page_type, 0, "{keyword}"));
        }
        let resolver = AnchorTemplateResolver::default();
        let engine = LinkSuggestionEngine::new(&pages, &rules, &resolver);

        for source in pages.all() {
            // Even when the caller forgets to exclude the source
            for link in engine.suggest(&source.slug, pages.all(), 10) {
                assert_ne!(link.to_page_id, source.slug);
            }
            for link in engine.suggest_for(&source.slug, 10) {
                assert_ne!(link.to_page_id, source.slug);
            }
        }
    }

    #[test]
    fn test_lower_priority_number_ranks_first() {
        let pages = site();
        let mut rules = LinkRuleRegistry::new();
        // Registered worst-first to prove the sort
        rules.add_rule(LinkRule::new(PageType::Tutorial, PageType::Review, 2, "{productName} review"));
        rules.add_rule(LinkRule::new(PageType::Tutorial, PageType::Recommendation, 1, "best {keyword}"));
        let resolver = AnchorTemplateResolver::default();
        let engine = LinkSuggestionEngine::new(&pages, &rules, &resolver);

        let links = engine.suggest_for("how-to-setup-vps", 10);
        let targets: Vec<&str> = links.iter().map(|l| l.to_page_id.as_str()).collect();
        assert_eq!(
            targets,
            vec!["best-vps-providers", "best-cheap-vps", "hostinger-review", "vultr-review"]
        );
        assert_eq!(links[1].anchor_text, "best cheap vps");
        assert_eq!(links[2].anchor_text, "Hostinger VPS review");
    }

    #[test]
    fn test_budget_is_shared_across_rules() {
        let pages = site();
        let mut rules = LinkRuleRegistry::new();
        rules.add_rule(LinkRule::new(PageType::Tutorial, PageType::Review, 2, "{productName} review"));
        rules.add_rule(LinkRule::new(PageType::Tutorial, PageType::Recommendation, 1, "best {keyword}"));
        let resolver = AnchorTemplateResolver::default();
        let engine = LinkSuggestionEngine::new(&pages, &rules, &resolver);

        // The first rule fills the budget before the better rule is reached
        let links = engine.suggest_for("how-to-setup-vps", 2);
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.priority == 2));

        let links = engine.suggest_for("how-to-setup-vps", 3);
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].to_page_id, "best-vps-providers");
        assert_eq!(links[0].priority, 1);
    }

    #[test]
    fn test_fewer_candidates_than_budget() {
        let pages = site();
        let rules = LinkRuleRegistry::with_default_rules();
        let resolver = AnchorTemplateResolver::default();
        let engine = LinkSuggestionEngine::new(&pages, &rules, &resolver);

        // Resource -> Tutorial and Resource -> Recommendation: 1 + 2 candidates
        let links = engine.suggest_for("vps-glossary", 10);
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].anchor_text, "setup vps guide");

        assert!(engine.suggest_for("vps-glossary", 0).is_empty());
    }

    #[test]
    fn test_ids_are_fresh_per_call() {
        let pages = site();
        let rules = LinkRuleRegistry::with_default_rules();
        let resolver = AnchorTemplateResolver::default();
        let engine = LinkSuggestionEngine::new(&pages, &rules, &resolver);

        let first = engine.suggest_for("how-to-setup-vps", 3);
        let second = engine.suggest_for("how-to-setup-vps", 3);
        let ids: HashSet<&str> = first
            .iter()
            .chain(second.iter())
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids.len(), first.len() + second.len());
    }
}
