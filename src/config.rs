use crate::error::{LinkerError, Result};
use crate::parsers::template::{DEFAULT_COMPETITORS, DEFAULT_USE_CASE};
use crate::validator::ValidatorConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for link generation, insertion and tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkerConfig {
    /// Maximum links returned by a suggestion request
    #[serde(default = "default_max_links")]
    pub max_links: usize,

    /// Maximum anchors spliced into a single piece of content
    #[serde(default = "default_max_insertions")]
    pub max_insertions: usize,

    /// CSS class put on inserted anchor elements
    #[serde(default = "default_link_class")]
    pub link_class: String,

    /// Value substituted for `{useCase}`
    #[serde(default = "default_use_case")]
    pub use_case: String,

    /// Value substituted for `{competitors}`
    #[serde(default = "default_competitors")]
    pub competitors: String,

    /// Seed the rule registry with the built-in rule matrix
    #[serde(default = "default_use_default_rules")]
    pub use_default_rules: bool,

    /// Public site URL, used to recognize absolute links to our own pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,

    /// Upper bound on tracked link records (unbounded if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tracked_links: Option<usize>,

    /// Anchor quality scoring
    #[serde(default)]
    pub validator: ValidatorConfig,
}

fn default_max_links() -> usize {
    3
}

fn default_max_insertions() -> usize {
    3
}

fn default_link_class() -> String {
    "internal-link".to_string()
}

fn default_use_case() -> String {
    DEFAULT_USE_CASE.to_string()
}

fn default_competitors() -> String {
    DEFAULT_COMPETITORS.to_string()
}

fn default_use_default_rules() -> bool {
    true
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            max_links: default_max_links(),
            max_insertions: default_max_insertions(),
            link_class: default_link_class(),
            use_case: default_use_case(),
            competitors: default_competitors(),
            use_default_rules: default_use_default_rules(),
            site_url: None,
            max_tracked_links: None,
            validator: ValidatorConfig::default(),
        }
    }
}

impl LinkerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut contents = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|source| LinkerError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}
