use crate::results::{GeneratedLink, LinkValidationResult};
use serde::{Deserialize, Serialize};

pub const SELF_LINK_ISSUE: &str = "Cannot link to the same page";
pub const GENERIC_ANCHOR_ISSUE: &str = "Avoid generic anchor text";
pub const SHORT_ANCHOR_ISSUE: &str = "Anchor text is too short";
pub const LONG_ANCHOR_ISSUE: &str = "Anchor text is too long";

const SELF_LINK_PENALTY: i32 = 100;
const GENERIC_ANCHOR_PENALTY: i32 = 30;
const SHORT_ANCHOR_PENALTY: i32 = 20;
const LONG_ANCHOR_PENALTY: i32 = 10;

/// Thresholds used when scoring a link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Anchor phrases that say nothing about the target (compared case-insensitively)
    #[serde(default = "default_generic_anchors")]
    pub generic_anchors: Vec<String>,

    /// Anchors with fewer characters than this are penalized
    #[serde(default = "default_min_anchor_length")]
    pub min_anchor_length: usize,

    /// Anchors with more characters than this are penalized
    #[serde(default = "default_max_anchor_length")]
    pub max_anchor_length: usize,

    /// Minimum score for a link to count as valid
    #[serde(default = "default_pass_score")]
    pub pass_score: i32,
}

fn default_generic_anchors() -> Vec<String> {
    ["click here", "read more", "learn more", "this"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_min_anchor_length() -> usize {
    3
}

fn default_max_anchor_length() -> usize {
    60
}

fn default_pass_score() -> i32 {
    50
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            generic_anchors: default_generic_anchors(),
            min_anchor_length: default_min_anchor_length(),
            max_anchor_length: default_max_anchor_length(),
            pass_score: default_pass_score(),
        }
    }
}

/// Scores (source, target, anchor text) triples.
///
/// Scoring starts at 100 and every failed check subtracts its penalty. The
/// score is not clamped, so several defects show up as a negative number.
#[derive(Debug, Clone)]
pub struct LinkValidator {
    config: ValidatorConfig,
    generic_anchors: Vec<String>,
}

impl Default for LinkValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl LinkValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        let generic_anchors = config
            .generic_anchors
            .iter()
            .map(|phrase| phrase.trim().to_lowercase())
            .collect();

        Self {
            config,
            generic_anchors,
        }
    }

    /// Score a single link
    pub fn validate(&self, from_slug: &str, to_slug: &str, anchor_text: &str) -> LinkValidationResult {
        let mut score = 100;
        let mut issues = Vec::new();

        if from_slug == to_slug {
            issues.push(SELF_LINK_ISSUE.to_string());
            score -= SELF_LINK_PENALTY;
        }

        if self.is_generic(anchor_text) {
            issues.push(GENERIC_ANCHOR_ISSUE.to_string());
            score -= GENERIC_ANCHOR_PENALTY;
        }

        let length = anchor_text.chars().count();
        if length < self.config.min_anchor_length {
            issues.push(SHORT_ANCHOR_ISSUE.to_string());
            score -= SHORT_ANCHOR_PENALTY;
        }
        if length > self.config.max_anchor_length {
            issues.push(LONG_ANCHOR_ISSUE.to_string());
            score -= LONG_ANCHOR_PENALTY;
        }

        LinkValidationResult {
            valid: score >= self.config.pass_score,
            score,
            issues,
        }
    }

    /// Score a generated link
    pub fn validate_link(&self, link: &GeneratedLink) -> LinkValidationResult {
        self.validate(&link.from_page_id, &link.to_page_id, &link.anchor_text)
    }

    fn is_generic(&self, anchor_text: &str) -> bool {
        let normalized = anchor_text.trim().to_lowercase();
        self.generic_anchors.iter().any(|phrase| *phrase == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_link_scores_full_marks() {
        let result = LinkValidator::default().validate("a", "b", "best vps providers");
        assert!(result.valid);
        assert_eq!(result.score, 100);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_self_link_is_always_invalid() {
        let validator = LinkValidator::default();
        for anchor in ["any text", "best vps for beginners", "x"] {
            let result = validator.validate("same", "same", anchor);
            assert!(!result.valid);
            assert!(result.issues.iter().any(|i| i == SELF_LINK_ISSUE));
        }
    }

    #[test]
    fn test_self_link_with_generic_anchor() {
        let result =
            LinkValidator::default().validate("how-to-setup-vps", "how-to-setup-vps", "Learn more");
        assert!(!result.valid);
        assert_eq!(result.issues, vec![SELF_LINK_ISSUE, GENERIC_ANCHOR_ISSUE]);
        assert_eq!(result.score, 100 - 100 - 30);
    }

    #[test]
    fn test_penalties_compound_below_zero() {
        // "this" is generic but long enough; a self link pushes it negative
        let result = LinkValidator::default().validate("p", "p", "this");
        assert_eq!(result.score, 100 - 100 - 30);

        let result = LinkValidator::default().validate("p", "p", "ab");
        assert_eq!(result.score, 100 - 100 - 20);
        assert_eq!(result.issues, vec![SELF_LINK_ISSUE, SHORT_ANCHOR_ISSUE]);
    }

    #[test]
    fn test_generic_match_ignores_case_and_padding() {
        let result = LinkValidator::default().validate("a", "b", "  CLICK Here ");
        assert_eq!(result.score, 70);
        assert!(result.valid);
        assert_eq!(result.issues, vec![GENERIC_ANCHOR_ISSUE]);
    }

    #[test]
    fn test_length_bounds() {
        let validator = LinkValidator::default();

        let short = validator.validate("a", "b", "vp");
        assert_eq!(short.score, 80);
        assert_eq!(short.issues, vec![SHORT_ANCHOR_ISSUE]);

        let exactly_three = validator.validate("a", "b", "vps");
        assert!(exactly_three.issues.is_empty());

        let long = validator.validate("a", "b", &"x".repeat(61));
        assert_eq!(long.score, 90);
        assert_eq!(long.issues, vec![LONG_ANCHOR_ISSUE]);

        let sixty = validator.validate("a", "b", &"x".repeat(60));
        assert!(sixty.issues.is_empty());
    }

    #[test]
    fn test_validation_is_repeatable() {
        let validator = LinkValidator::default();
        let first = validator.validate("a", "a", "read more");
        let second = validator.validate("a", "a", "read more");
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_config() {
        let config = ValidatorConfig {
            generic_anchors: vec!["Here".to_string()],
            pass_score: 90,
            ..ValidatorConfig::default()
        };
        let validator = LinkValidator::new(config);

        let result = validator.validate("a", "b", "here");
        assert_eq!(result.score, 70);
        assert!(!result.valid);

        // Default phrases no longer apply
        assert!(validator.validate("a", "b", "read more").valid);
    }
}
