// HighlightWizard - core/highlight.rs
//
// Highlight selection rules. A rule decides, record by record, whether an
// event is a highlight; selection keeps source order and never re-sorts.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{EventCategory, EventRecord};
use crate::util::constants;
use crate::util::error::RuleError;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;

/// Decides whether a single record is a highlight.
///
/// Any `Fn(&EventRecord) -> bool + Send + Sync` closure is a rule as well.
pub trait HighlightRule: Send + Sync {
    fn is_highlight(&self, record: &EventRecord) -> bool;

    /// Short human-readable form for logging.
    fn describe(&self) -> String {
        "custom rule".to_string()
    }
}

impl<F> HighlightRule for F
where
    F: Fn(&EventRecord) -> bool + Send + Sync,
{
    fn is_highlight(&self, record: &EventRecord) -> bool {
        self(record)
    }
}

// =============================================================================
// Category allowlist
// =============================================================================

/// Matches records whose category is in an allowlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    categories: BTreeSet<EventCategory>,
}

impl CategoryRule {
    pub fn new<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = EventCategory>,
    {
        Self {
            categories: categories.into_iter().collect(),
        }
    }

    /// Build from category names as written in event logs.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, RuleError> {
        let mut categories = BTreeSet::new();
        for label in labels {
            let label = label.as_ref();
            match EventCategory::from_label(label.trim()) {
                EventCategory::Unknown => {
                    return Err(RuleError::UnknownCategory {
                        value: label.to_string(),
                    })
                }
                category => {
                    categories.insert(category);
                }
            }
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> impl Iterator<Item = EventCategory> + '_ {
        self.categories.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRule {
    /// Goals and red cards.
    fn default() -> Self {
        Self::new(constants::DEFAULT_HIGHLIGHT_CATEGORIES.iter().copied())
    }
}

impl HighlightRule for CategoryRule {
    fn is_highlight(&self, record: &EventRecord) -> bool {
        self.categories.contains(&record.category)
    }

    fn describe(&self) -> String {
        let names: Vec<&str> = self.categories.iter().map(|c| c.label()).collect();
        format!("category in [{}]", names.join(", "))
    }
}

// =============================================================================
// Description keyword
// =============================================================================

/// Matches records whose description matches a case-insensitive regex.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pattern: Regex,
}

impl KeywordRule {
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        if pattern.len() > constants::MAX_KEYWORD_PATTERN_LENGTH {
            return Err(RuleError::PatternTooLong {
                length: pattern.len(),
                max_length: constants::MAX_KEYWORD_PATTERN_LENGTH,
            });
        }
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| RuleError::InvalidRegex {
                pattern: pattern.to_string(),
                source: e,
            })?;
        Ok(Self { pattern: regex })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl HighlightRule for KeywordRule {
    fn is_highlight(&self, record: &EventRecord) -> bool {
        self.pattern.is_match(&record.description)
    }

    fn describe(&self) -> String {
        format!("description =~ /{}/i", self.pattern.as_str())
    }
}

// =============================================================================
// Policy (any-of combinator)
// =============================================================================

/// A set of rules; a record is a highlight if any rule matches.
///
/// An empty policy selects nothing.
#[derive(Default)]
pub struct HighlightPolicy {
    rules: Vec<Box<dyn HighlightRule>>,
}

impl HighlightPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, builder style.
    pub fn with_rule<R: HighlightRule + 'static>(mut self, rule: R) -> Self {
        self.push(Box::new(rule));
        self
    }

    pub fn push(&mut self, rule: Box<dyn HighlightRule>) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for HighlightPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightPolicy")
            .field("rules", &self.describe())
            .finish()
    }
}

impl HighlightRule for HighlightPolicy {
    fn is_highlight(&self, record: &EventRecord) -> bool {
        self.rules.iter().any(|rule| rule.is_highlight(record))
    }

    fn describe(&self) -> String {
        if self.rules.is_empty() {
            return "nothing".to_string();
        }
        let parts: Vec<String> = self.rules.iter().map(|r| r.describe()).collect();
        parts.join(" OR ")
    }
}

/// Apply a rule to records, returning indices of the highlights.
///
/// Indices are ascending, i.e. highlights keep source order.
pub fn select_highlights(records: &[EventRecord], rule: &dyn HighlightRule) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| rule.is_highlight(record))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(minute: u32, category: EventCategory, description: &str) -> EventRecord {
        EventRecord {
            timestamp_minutes: minute,
            category,
            description: description.to_string(),
            line_number: u64::from(minute) + 1,
        }
    }

    fn sample() -> Vec<EventRecord> {
        vec![
            make_record(0, EventCategory::GameStart, "Match begins"),
            make_record(12, EventCategory::Goal, "Header from corner"),
            make_record(34, EventCategory::YellowCard, "Late tackle"),
            make_record(40, EventCategory::Other, "Penalty appeal waved away"),
            make_record(55, EventCategory::RedCard, "Second yellow"),
            make_record(90, EventCategory::FullTime, "End of match"),
        ]
    }

    #[test]
    fn test_default_rule_selects_goals_and_red_cards() {
        let result = select_highlights(&sample(), &CategoryRule::default());
        assert_eq!(result, vec![1, 4]);
    }

    #[test]
    fn test_default_rule_excludes_every_other_category() {
        let rule = CategoryRule::default();
        for category in EventCategory::all() {
            let expected = matches!(category, EventCategory::Goal | EventCategory::RedCard);
            assert_eq!(
                rule.is_highlight(&make_record(1, *category, "")),
                expected,
                "{category}"
            );
        }
    }

    #[test]
    fn test_category_rule_from_labels() {
        let rule = CategoryRule::from_labels(&["yellow_card", " FOUL "]).unwrap();
        assert_eq!(
            rule.categories().collect::<Vec<_>>(),
            vec![EventCategory::YellowCard, EventCategory::Foul]
        );
        let err = CategoryRule::from_labels(&["GOAL", "PENALTY"]).unwrap_err();
        assert!(matches!(err, RuleError::UnknownCategory { ref value } if value == "PENALTY"));
    }

    #[test]
    fn test_keyword_rule_is_case_insensitive() {
        let rule = KeywordRule::new("penalty").unwrap();
        assert_eq!(select_highlights(&sample(), &rule), vec![3]);
    }

    #[test]
    fn test_keyword_rule_rejects_bad_patterns() {
        assert!(matches!(
            KeywordRule::new("[unclosed"),
            Err(RuleError::InvalidRegex { .. })
        ));
        let long = "a".repeat(constants::MAX_KEYWORD_PATTERN_LENGTH + 1);
        assert!(matches!(
            KeywordRule::new(&long),
            Err(RuleError::PatternTooLong { .. })
        ));
    }

    #[test]
    fn test_policy_is_any_of_and_keeps_order() {
        let policy = HighlightPolicy::new()
            .with_rule(KeywordRule::new("penalty").unwrap())
            .with_rule(CategoryRule::default());
        assert_eq!(select_highlights(&sample(), &policy), vec![1, 3, 4]);
        assert_eq!(
            policy.describe(),
            "description =~ /penalty/i OR category in [GOAL, RED_CARD]"
        );
    }

    #[test]
    fn test_empty_policy_selects_nothing() {
        let policy = HighlightPolicy::new();
        assert!(select_highlights(&sample(), &policy).is_empty());
    }

    #[test]
    fn test_closure_rule() {
        let late = |record: &EventRecord| record.timestamp_minutes >= 45;
        assert_eq!(select_highlights(&sample(), &late), vec![4, 5]);
    }

    #[test]
    fn test_selection_is_idempotent() {
        let records = sample();
        let rule = CategoryRule::default();
        assert_eq!(
            select_highlights(&records, &rule),
            select_highlights(&records, &rule)
        );
    }
}
