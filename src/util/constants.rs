// HighlightWizard - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

use crate::core::model::EventCategory;

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "HighlightWizard";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "HighlightWizard";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Event log format
// =============================================================================

/// Separator between the fields of a data line.
pub const FIELD_SEPARATOR: char = ',';

/// Lines starting with this character are comments.
pub const COMMENT_PREFIX: char = '#';

/// Minimum number of fields on a data line: timestamp, category, description.
pub const MIN_FIELDS: usize = 3;

/// Label returned for a numeric category code outside the enumeration.
pub const INVALID_CATEGORY_LABEL: &str = "INVALID_TYPE";

// =============================================================================
// Highlight policy
// =============================================================================

/// Categories treated as highlights when nothing else is configured.
pub const DEFAULT_HIGHLIGHT_CATEGORIES: &[EventCategory] =
    &[EventCategory::Goal, EventCategory::RedCard];

/// Maximum length of a keyword regex (config file or CLI).
pub const MAX_KEYWORD_PATTERN_LENGTH: usize = 512;

/// Maximum number of keyword rules accepted from config and CLI combined.
pub const MAX_KEYWORD_RULES: usize = 64;

// =============================================================================
// Background worker
// =============================================================================

/// Default time the CLI and tests wait for a background load to finish.
pub const DEFAULT_WORKER_TIMEOUT_MS: u64 = 10_000;

// =============================================================================
// Rendering
// =============================================================================

/// Header printed above the text highlight listing.
pub const HIGHLIGHTS_HEADER: &str = "--- Football Highlights ---";

/// Header printed above the text listing of every event.
pub const ALL_EVENTS_HEADER: &str = "--- All Events ---";

/// Rule printed below a text listing.
pub const LISTING_FOOTER: &str = "-------------------------";

/// Message printed instead of an empty highlight listing.
pub const NO_HIGHLIGHTS_MESSAGE: &str = "No highlights found in the loaded events.";

/// Message printed instead of an empty event listing.
pub const NO_EVENTS_MESSAGE: &str = "No events loaded or log was empty.";

// =============================================================================
// Logging & configuration
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
