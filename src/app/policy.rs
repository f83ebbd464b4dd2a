// HighlightWizard - app/policy.rs
//
// Assembles the highlight policy from validated configuration and
// command-line overrides.
//
// Merge rules:
//   - CLI categories replace the configured allowlist.
//   - CLI keywords are added after the configured keywords.

use crate::core::highlight::{CategoryRule, HighlightPolicy, KeywordRule};
use crate::platform::config::AppConfig;
use crate::util::constants;
use crate::util::error::RuleError;

/// Highlight settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct PolicyOverrides {
    /// Replaces the configured category allowlist when non-empty.
    pub categories: Vec<String>,
    /// Added to the configured keyword patterns.
    pub keywords: Vec<String>,
}

/// Build the highlight policy for this run.
///
/// Config values were validated at load time; CLI values are validated here
/// and any problem is an error, since the user asked for them explicitly.
pub fn build_policy(
    config: &AppConfig,
    overrides: &PolicyOverrides,
) -> Result<HighlightPolicy, RuleError> {
    let category_rule = if overrides.categories.is_empty() {
        CategoryRule::new(config.highlight_categories.iter().copied())
    } else {
        CategoryRule::from_labels(overrides.categories.as_slice())?
    };

    let keyword_count = config.highlight_keywords.len() + overrides.keywords.len();
    if keyword_count > constants::MAX_KEYWORD_RULES {
        return Err(RuleError::TooManyKeywords {
            count: keyword_count,
            max: constants::MAX_KEYWORD_RULES,
        });
    }

    let mut policy = HighlightPolicy::new();
    if !category_rule.is_empty() {
        policy.push(Box::new(category_rule));
    }
    for pattern in config
        .highlight_keywords
        .iter()
        .chain(overrides.keywords.iter())
    {
        policy.push(Box::new(KeywordRule::new(pattern)?));
    }

    if policy.is_empty() {
        tracing::warn!("Highlight policy has no rules; no event will be a highlight");
    } else {
        tracing::debug!(rules = policy.len(), "Highlight policy built");
    }

    Ok(policy)
}
