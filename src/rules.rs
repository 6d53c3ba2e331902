use crate::pages::PageType;
use serde::{Deserialize, Serialize};

/// Directed linking rule between two page types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRule {
    /// Source page type
    pub from: PageType,

    /// Target page type
    pub to: PageType,

    /// Ordering key, lower values are preferred
    pub priority: i32,

    /// Anchor text template, e.g. "Best {keyword} for {useCase}"
    pub anchor_template: String,

    /// Reserved keyword-overlap threshold. Stored and reported, never used for gating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_keyword_match: Option<f64>,
}

impl LinkRule {
    /// Create a rule with no keyword threshold
    pub fn new(from: PageType, to: PageType, priority: i32, anchor_template: &str) -> Self {
        Self {
            from,
            to,
            priority,
            anchor_template: anchor_template.to_string(),
            min_keyword_match: None,
        }
    }

    /// Attach a keyword threshold
    pub fn with_min_keyword_match(mut self, threshold: f64) -> Self {
        self.min_keyword_match = Some(threshold);
        self
    }
}

/// The rule matrix shipped with the crate
pub fn default_rules() -> Vec<LinkRule> {
    use PageType::*;

    vec![
        LinkRule::new(Tutorial, Recommendation, 1, "Best {keyword} for {useCase}"),
        LinkRule::new(Tutorial, Review, 2, "{productName} review"),
        LinkRule::new(Review, Comparison, 1, "{productName} vs {competitors}"),
        LinkRule::new(Review, Recommendation, 2, "best {keyword}"),
        LinkRule::new(Comparison, Review, 1, "{productName} review"),
        LinkRule::new(Comparison, Recommendation, 2, "best {keyword}"),
        LinkRule::new(Recommendation, Review, 1, "{productName} review"),
        LinkRule::new(Recommendation, Tutorial, 2, "how to {keyword}"),
        LinkRule::new(Resource, Tutorial, 1, "{keyword} guide"),
        LinkRule::new(Resource, Recommendation, 2, "best {keyword}"),
    ]
}

/// Ordered, append-only collection of link rules
#[derive(Debug, Default, Clone)]
pub struct LinkRuleRegistry {
    rules: Vec<LinkRule>,
}

impl LinkRuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with [`default_rules`]
    pub fn with_default_rules() -> Self {
        let mut registry = Self::new();
        for rule in default_rules() {
            registry.add_rule(rule);
        }
        registry
    }

    /// Append a rule. Duplicate (from, to) pairs are kept.
    pub fn add_rule(&mut self, rule: LinkRule) {
        ::log::debug!(
            "Adding rule {} -> {} (priority {})",
            rule.from,
            rule.to,
            rule.priority
        );
        self.rules.push(rule);
    }

    /// Rules whose source type is `page_type`, in insertion order
    pub fn rules_from(&self, page_type: PageType) -> impl Iterator<Item = &LinkRule> {
        self.rules.iter().filter(move |rule| rule.from == page_type)
    }

    pub fn all(&self) -> &[LinkRule] {
        &self.rules
    }

    pub fn count(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_from_keeps_insertion_order() {
        let mut registry = LinkRuleRegistry::new();
        registry.add_rule(LinkRule::new(PageType::Review, PageType::Tutorial, 5, "a"));
        registry.add_rule(LinkRule::new(PageType::Tutorial, PageType::Review, 1, "b"));
        registry.add_rule(LinkRule::new(PageType::Review, PageType::Comparison, 2, "c"));

        let templates: Vec<&str> = registry
            .rules_from(PageType::Review)
            .map(|r| r.anchor_template.as_str())
            .collect();
        assert_eq!(templates, vec!["a", "c"]);
        assert_eq!(registry.rules_from(PageType::Resource).count(), 0);
    }

    #[test]
    fn test_duplicate_pairs_are_accepted() {
        let mut registry = LinkRuleRegistry::new();
        let rule = LinkRule::new(PageType::Tutorial, PageType::Review, 1, "{productName}");
        registry.add_rule(rule.clone());
        registry.add_rule(rule);
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.rules_from(PageType::Tutorial).count(), 2);
    }

    #[test]
    fn test_default_rules_cover_every_source_type() {
        let registry = LinkRuleRegistry::with_default_rules();
        assert_eq!(registry.count(), default_rules().len());
        for page_type in PageType::ALL {
            assert!(
                registry.rules_from(page_type).count() > 0,
                "no default rule from {page_type}"
            );
        }

        let tutorial_first = registry.rules_from(PageType::Tutorial).next().unwrap();
        assert_eq!(tutorial_first.to, PageType::Recommendation);
        assert_eq!(tutorial_first.priority, 1);
        assert_eq!(tutorial_first.anchor_template, "Best {keyword} for {useCase}");
    }

    #[test]
    fn test_rule_json_field_names() {
        let json = r#"{"from":"review","to":"comparison","priority":1,"anchorTemplate":"{productName} vs {competitors}","minKeywordMatch":0.5}"#;
        let rule: LinkRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.min_keyword_match, Some(0.5));

        let plain = LinkRule::new(PageType::Review, PageType::Comparison, 1, "x");
        let out = serde_json::to_string(&plain).unwrap();
        assert!(!out.contains("minKeywordMatch"));
    }
}
