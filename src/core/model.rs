// HighlightWizard - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Event Category
// =============================================================================

/// Closed classification of a match event.
///
/// `Unknown` is a parse-time sentinel only: the parser coerces it to
/// `Other` before a record is built, so stored records never carry it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum EventCategory {
    Goal,
    YellowCard,
    RedCard,
    Foul,
    Substitution,
    GameStart,
    HalfTime,
    FullTime,
    Other,
    #[default]
    Unknown,
}

impl EventCategory {
    /// Every category a record can carry, in declaration order.
    pub fn all() -> &'static [EventCategory] {
        &[
            EventCategory::Goal,
            EventCategory::YellowCard,
            EventCategory::RedCard,
            EventCategory::Foul,
            EventCategory::Substitution,
            EventCategory::GameStart,
            EventCategory::HalfTime,
            EventCategory::FullTime,
            EventCategory::Other,
        ]
    }

    /// Literal name used in event logs and rendered listings.
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Goal => "GOAL",
            EventCategory::YellowCard => "YELLOW_CARD",
            EventCategory::RedCard => "RED_CARD",
            EventCategory::Foul => "FOUL",
            EventCategory::Substitution => "SUBSTITUTION",
            EventCategory::GameStart => "GAME_START",
            EventCategory::HalfTime => "HALF_TIME",
            EventCategory::FullTime => "FULL_TIME",
            EventCategory::Other => "OTHER",
            EventCategory::Unknown => "UNKNOWN",
        }
    }

    /// Map a category name from an event log to a category.
    ///
    /// Case-insensitive exact match against the nine loggable names.
    /// Anything else, including `""` and `"UNKNOWN"`, is `Unknown`.
    pub fn from_label(raw: &str) -> EventCategory {
        let upper = raw.to_ascii_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|category| category.label() == upper)
            .unwrap_or(EventCategory::Unknown)
    }

    /// Look up a category by its numeric code (declaration order).
    pub fn from_code(code: u8) -> Option<EventCategory> {
        match code {
            0..=8 => Some(Self::all()[code as usize]),
            9 => Some(EventCategory::Unknown),
            _ => None,
        }
    }

    /// Label for a numeric category code, `INVALID_TYPE` when out of range.
    pub fn label_for_code(code: u8) -> &'static str {
        Self::from_code(code)
            .map(|c| c.label())
            .unwrap_or(crate::util::constants::INVALID_CATEGORY_LABEL)
    }

    /// Numeric code of this category.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Event Record (normalised output of parsing)
// =============================================================================

/// A single parsed, validated line of an event log.
///
/// Only the parser builds these, and only from a line that passed every
/// check, so there is no partially filled state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Match minute of the event.
    pub timestamp_minutes: u32,

    /// Event category. Never `Unknown`.
    pub category: EventCategory,

    /// Free text, trimmed of surrounding spaces. May contain commas.
    pub description: String,

    /// 1-based line in the source the record was parsed from.
    pub line_number: u64,
}

impl EventRecord {
    /// Render as a listing line: `[<minute>'] <CATEGORY>: <description>`.
    pub fn display_line(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for EventRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}'] {}: {}",
            self.timestamp_minutes, self.category, self.description
        )
    }
}

// =============================================================================
// Non-fatal diagnostics
// =============================================================================

/// An unrecognised category string that was kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryWarning {
    /// 1-based line number of the affected record.
    pub line_number: u64,

    /// The category text exactly as it appeared in the log.
    pub raw_category: String,
}

impl std::fmt::Display for CategoryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: unknown event type '{}', treating as {}",
            self.line_number,
            self.raw_category,
            EventCategory::Other
        )
    }
}

// =============================================================================
// Load Summary
// =============================================================================

/// Statistics for the most recent successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Name of the source that was read.
    pub source_name: String,

    /// Total lines read, including comments and empty lines.
    pub lines_read: u64,

    /// Comment and empty lines skipped.
    pub lines_skipped: u64,

    /// Records produced.
    pub records: usize,

    /// Records whose category was coerced to `Other`.
    pub warnings: Vec<CategoryWarning>,

    /// Records per category.
    pub records_by_category: BTreeMap<EventCategory, usize>,
}

// =============================================================================
// Load Progress (for front-end updates)
// =============================================================================

/// Progress messages sent from the load worker to its owner.
#[derive(Debug, Clone)]
pub enum LoadProgress {
    /// The worker started reading the source.
    Started { source_name: String },

    /// A category string was not recognised (non-fatal).
    Warning { warning: CategoryWarning },

    /// The source was parsed successfully.
    Loaded {
        records: Vec<EventRecord>,
        summary: LoadSummary,
    },

    /// Highlights were derived from the loaded records. Terminal.
    Classified { highlights: Vec<EventRecord> },

    /// Loading failed; no records were kept. Terminal.
    Failed { error: String },

    /// The owner cancelled before classification finished. Terminal.
    Cancelled,
}

impl LoadProgress {
    /// Whether no further messages follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LoadProgress::Classified { .. } | LoadProgress::Failed { .. } | LoadProgress::Cancelled
        )
    }
}
