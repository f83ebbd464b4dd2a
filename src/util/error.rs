// HighlightWizard - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation. All errors preserve the causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all HighlightWizard operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum HighlightError {
    /// Loading an event log failed.
    Load(LoadError),

    /// A highlight rule could not be built.
    Rule(RuleError),

    /// Writing a listing or export failed.
    Export(ExportError),

    /// Configuration loading failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Failed to load event log: {e}"),
            Self::Rule(e) => write!(f, "Highlight rule error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for HighlightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Rule(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors that abort a whole `load` call.
///
/// A load is all-or-nothing: any of these means no records from the call
/// were kept.
#[derive(Debug)]
pub enum LoadError {
    /// The source could not be opened or read.
    Io {
        source_name: String,
        operation: &'static str,
        source: io::Error,
    },

    /// A data line is malformed.
    Format {
        source_name: String,
        line_number: u64,
        cause: LineError,
    },
}

impl LoadError {
    /// Line number of a format error, `None` for I/O errors.
    pub fn line_number(&self) -> Option<u64> {
        match self {
            Self::Format { line_number, .. } => Some(*line_number),
            Self::Io { .. } => None,
        }
    }

    /// Name of the source the failing load was reading.
    pub fn source_name(&self) -> &str {
        match self {
            Self::Io { source_name, .. } | Self::Format { source_name, .. } => source_name,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                source_name,
                operation,
                source,
            } => write!(f, "could not {operation} '{source_name}': {source}"),
            Self::Format {
                source_name,
                line_number,
                cause,
            } => write!(f, "'{source_name}' line {line_number}: {cause}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Format { cause, .. } => Some(cause),
        }
    }
}

impl From<LoadError> for HighlightError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

/// Why a single data line was rejected.
///
/// Raised by the line parser without source context; the loader wraps it
/// into `LoadError::Format` with the line number and source name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// Fewer than the minimum number of comma-separated fields.
    TooFewFields { found: usize, line: String },

    /// The timestamp field is not an integer.
    InvalidNumber { value: String },

    /// The timestamp is negative or too large.
    OutOfRange { value: String },
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields { found, line } => write!(
                f,
                "expected at least {} comma-separated values, found {found}. Line: '{line}'",
                crate::util::constants::MIN_FIELDS
            ),
            Self::InvalidNumber { value } => {
                write!(f, "invalid number format for timestamp. Value: '{value}'")
            }
            Self::OutOfRange { value } => {
                write!(f, "timestamp value out of range. Value: '{value}'")
            }
        }
    }
}

impl std::error::Error for LineError {}

// ---------------------------------------------------------------------------
// Rule errors
// ---------------------------------------------------------------------------

/// Errors building a highlight rule from user input.
#[derive(Debug)]
pub enum RuleError {
    /// A keyword regex does not compile.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    /// A keyword regex exceeds the maximum allowed length.
    PatternTooLong { length: usize, max_length: usize },

    /// Too many keyword rules were supplied.
    TooManyKeywords { count: usize, max: usize },

    /// A category name is not one of the known categories.
    UnknownCategory { value: String },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "invalid keyword regex '{pattern}': {source}")
            }
            Self::PatternTooLong { length, max_length } => write!(
                f,
                "keyword regex is {length} chars, exceeds maximum of {max_length}"
            ),
            Self::TooManyKeywords { count, max } => {
                write!(f, "{count} keyword rules given, maximum is {max}")
            }
            Self::UnknownCategory { value } => {
                write!(f, "unknown event category '{value}'")
            }
        }
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<RuleError> for HighlightError {
    fn from(e: RuleError) -> Self {
        Self::Rule(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to rendering and export.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the output.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for HighlightError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for HighlightError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for HighlightWizard results.
pub type Result<T> = std::result::Result<T, HighlightError>;
