use crate::pages::PageRecord;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern should be valid"));

/// Placeholder values that don't come from the target page
#[derive(Debug, Clone)]
pub struct TemplateDefaults {
    /// Substituted for `{useCase}`
    pub use_case: String,
    /// Substituted for `{competitors}`
    pub competitors: String,
}

/// `{useCase}` value when none is configured
pub const DEFAULT_USE_CASE: &str = "beginners";

/// `{competitors}` value when none is configured
pub const DEFAULT_COMPETITORS: &str = "others";

impl Default for TemplateDefaults {
    fn default() -> Self {
        Self {
            use_case: DEFAULT_USE_CASE.to_string(),
            competitors: DEFAULT_COMPETITORS.to_string(),
        }
    }
}

/// Renders anchor text templates such as `"Best {keyword} for {useCase}"`.
///
/// Placeholders with no value are left in the output untouched.
#[derive(Debug, Clone, Default)]
pub struct AnchorTemplateResolver {
    defaults: TemplateDefaults,
}

impl AnchorTemplateResolver {
    pub fn new(defaults: TemplateDefaults) -> Self {
        Self { defaults }
    }

    /// Substitute every `{name}` found in `vars`
    pub fn render(&self, template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => {
                    ::log::debug!("Unresolved placeholder {} in {:?}", &caps[0], template);
                    caps[0].to_string()
                }
            })
            .into_owned()
    }

    /// Template variables describing `target`
    pub fn vars_for(&self, target: &PageRecord) -> HashMap<String, String> {
        let mut vars = HashMap::with_capacity(4);
        vars.insert(
            "keyword".to_string(),
            target.primary_keyword().unwrap_or_default().to_string(),
        );
        vars.insert("productName".to_string(), product_name(&target.title));
        vars.insert("competitors".to_string(), self.defaults.competitors.clone());
        vars.insert("useCase".to_string(), self.defaults.use_case.clone());
        vars
    }

    /// Render `template` for a link pointing at `target`
    pub fn render_for(&self, template: &str, target: &PageRecord) -> String {
        self.render(template, &self.vars_for(target))
    }
}

/// First two whitespace-separated words of a title
pub fn product_name(title: &str) -> String {
    title.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}
