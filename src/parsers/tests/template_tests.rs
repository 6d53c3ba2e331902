use crate::pages::{PageRecord, PageType};
use crate::parsers::template::{self, AnchorTemplateResolver, TemplateDefaults};
use std::collections::HashMap;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod render_tests {
    use super::*;

    #[test]
    fn test_substitutes_known_placeholders() {
        let resolver = AnchorTemplateResolver::default();
        let out = resolver.render(
            "Best {keyword} for {useCase}",
            &vars(&[("keyword", "vps"), ("useCase", "startups")]),
        );
        assert_eq!(out, "Best vps for startups");
    }

    #[test]
    fn test_repeated_placeholder() {
        let resolver = AnchorTemplateResolver::default();
        let out = resolver.render("{keyword} and more {keyword}", &vars(&[("keyword", "vps")]));
        assert_eq!(out, "vps and more vps");
    }

    #[test]
    fn test_unresolved_placeholder_is_left_verbatim() {
        let resolver = AnchorTemplateResolver::default();
        let out = resolver.render("{productName} vs {rival}", &vars(&[("productName", "Acme VPS")]));
        assert_eq!(out, "Acme VPS vs {rival}");
    }

    #[test]
    fn test_template_without_placeholders() {
        let resolver = AnchorTemplateResolver::default();
        assert_eq!(resolver.render("plain text", &HashMap::new()), "plain text");
        assert_eq!(resolver.render("", &HashMap::new()), "");
    }

    #[test]
    fn test_non_identifier_braces_are_untouched() {
        let resolver = AnchorTemplateResolver::default();
        let out = resolver.render("{ keyword } {}", &vars(&[("keyword", "vps")]));
        assert_eq!(out, "{ keyword } {}");
    }
}

#[cfg(test)]
mod vars_tests {
    use super::*;

    #[test]
    fn test_vars_from_target_page() {
        let target = PageRecord::new(
            "hostinger-review",
            "Hostinger VPS Review 2025",
            PageType::Review,
            vec!["hostinger vps".to_string(), "cheap vps".to_string()],
        );
        let vars = AnchorTemplateResolver::default().vars_for(&target);

        assert_eq!(vars["keyword"], "hostinger vps");
        assert_eq!(vars["productName"], "Hostinger VPS");
        assert_eq!(vars["competitors"], "others");
        assert_eq!(vars["useCase"], "beginners");
    }

    #[test]
    fn test_missing_keyword_renders_empty() {
        let target = PageRecord::new("x", "Solo", PageType::Review, vec![]);
        let resolver = AnchorTemplateResolver::default();
        assert_eq!(resolver.render_for("[{keyword}]", &target), "[]");
        assert_eq!(resolver.render_for("{productName} review", &target), "Solo review");
    }

    #[test]
    fn test_custom_defaults() {
        let resolver = AnchorTemplateResolver::new(TemplateDefaults {
            use_case: "agencies".to_string(),
            competitors: "DigitalOcean".to_string(),
        });
        let target = PageRecord::new("x", "Linode Review", PageType::Review, vec![]);
        assert_eq!(
            resolver.render_for("{productName} vs {competitors} for {useCase}", &target),
            "Linode Review vs DigitalOcean for agencies"
        );
    }

    #[test]
    fn test_product_name_collapses_whitespace() {
        assert_eq!(template::product_name("  Vultr   High  Frequency "), "Vultr High");
        assert_eq!(template::product_name(""), "");
    }
}
