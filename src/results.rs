use serde::{Deserialize, Serialize};

/// How a link came into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Placed by an editor
    Manual,
    /// Produced by the suggestion engine
    Auto,
}

/// A link produced for one source page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLink {
    /// Unique per generation; regenerating yields a new id
    pub id: String,

    /// Slug of the page the link lives on
    pub from_page_id: String,

    /// Slug of the page the link points to
    pub to_page_id: String,

    /// Rendered anchor text
    pub anchor_text: String,

    pub link_type: LinkType,

    /// Copied from the rule that produced the link
    pub priority: i32,
}

impl GeneratedLink {
    /// Relative href of the target page
    pub fn href(&self) -> String {
        format!("/{}", self.to_page_id)
    }
}

/// Outcome of scoring a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkValidationResult {
    /// `score` reached the pass threshold
    pub valid: bool,

    /// Quality score, starts at 100 and may go negative
    pub score: i32,

    /// Human-readable problems, in the order they were detected
    pub issues: Vec<String>,
}

/// Rewritten content plus the links that were actually spliced in
#[derive(Debug, Clone, PartialEq)]
pub struct InsertionResult {
    pub content: String,
    pub inserted_links: Vec<GeneratedLink>,
}
