use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Base used to resolve relative hrefs when no site URL is configured
const LOCAL_BASE: &str = "http://localhost/";

/// Extracts the href of every anchor in an HTML fragment
pub fn parse_links(content: &str) -> Vec<String> {
    let doc = Html::parse_fragment(content);

    let link_selector = Selector::parse("a[href]").expect("anchor selector should be valid");
    let links = doc
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("Content contains {} anchors", links.len());
    links
}

/// Slugs of the pages on our own site that `content` already links to.
///
/// Relative hrefs always count as internal. Absolute hrefs count only when
/// their host matches `site_url`.
pub fn internal_link_targets(content: &str, site_url: Option<&Url>) -> HashSet<String> {
    let local_base;
    let base = match site_url {
        Some(url) => url,
        None => {
            local_base = match Url::parse(LOCAL_BASE) {
                Ok(url) => url,
                Err(_) => return HashSet::new(),
            };
            &local_base
        }
    };

    parse_links(content)
        .iter()
        .filter_map(|href| resolve_internal_slug(href, base))
        .collect()
}

/// Resolve an href against `base` and return its slug if it stays on the same host
fn resolve_internal_slug(href: &str, base: &Url) -> Option<String> {
    if href.starts_with('#') {
        return None;
    }

    let resolved = base.join(href).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }
    if resolved.host_str() != base.host_str() {
        return None;
    }

    let slug = resolved.path().trim_matches('/');
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}
