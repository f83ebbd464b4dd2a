// HighlightWizard - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::highlight::KeywordRule;
use crate::core::model::EventCategory;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for HighlightWizard configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/highlightwizard/ or %APPDATA%\HighlightWizard\config\)
    pub config_dir: PathBuf,

    /// Full path of the default config.toml.
    pub config_file: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        let config_dir = match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => proj_dirs.config_dir().to_path_buf(),
            None => {
                tracing::warn!("Could not determine platform directories, using current directory");
                PathBuf::from(".")
            }
        };
        let config_file = config_dir.join(constants::CONFIG_FILE_NAME);

        tracing::debug!(config = %config_file.display(), "Platform paths resolved");

        Self {
            config_dir,
            config_file,
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[highlights]` section.
    pub highlights: HighlightsSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[highlights]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct HighlightsSection {
    /// Category allowlist, by log name.
    pub categories: Option<Vec<String>>,
    /// Description regexes, matched case-insensitively.
    pub keywords: Option<Vec<String>>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Categories whose events are highlights.
    pub highlight_categories: Vec<EventCategory>,
    /// Keyword regexes; a matching description makes an event a highlight.
    pub highlight_keywords: Vec<String>,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            highlight_categories: constants::DEFAULT_HIGHLIGHT_CATEGORIES.to_vec(),
            highlight_keywords: Vec::new(),
            log_level: None,
        }
    }
}

/// Read and deserialise a config file without validating values.
pub fn read_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Where a config path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Resolved from the platform config directory; may legitimately be absent.
    PlatformDefault,
    /// Named by the user (`--config`); absence is reported.
    Explicit,
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing platform default gives defaults with no warnings (first-run); a
/// missing explicit path gives defaults with a warning.
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_path: &Path, source: ConfigSource) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        match source {
            ConfigSource::PlatformDefault => tracing::debug!(
                path = %config_path.display(),
                "No config.toml found; using defaults"
            ),
            ConfigSource::Explicit => warnings.push(format!(
                "Config file '{}' does not exist. Using defaults.",
                config_path.display()
            )),
        }
        return (AppConfig::default(), warnings);
    }

    let raw = match read_raw_config(config_path) {
        Ok(raw) => raw,
        Err(e) => {
            warnings.push(format!("{e}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Validate each field, accumulating every problem as a warning.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Highlights: categories --
    if let Some(names) = raw.highlights.categories {
        let mut categories = Vec::new();
        for name in names {
            match EventCategory::from_label(name.trim()) {
                EventCategory::Unknown => warnings.push(format!(
                    "[highlights] categories: \"{name}\" is not a known event category. Ignored.",
                )),
                category if categories.contains(&category) => {}
                category => categories.push(category),
            }
        }
        config.highlight_categories = categories;
    }

    // -- Highlights: keywords --
    if let Some(patterns) = raw.highlights.keywords {
        for pattern in patterns {
            if config.highlight_keywords.len() >= constants::MAX_KEYWORD_RULES {
                warnings.push(format!(
                    "[highlights] keywords: more than {} patterns. Extra patterns ignored.",
                    constants::MAX_KEYWORD_RULES,
                ));
                break;
            }
            match KeywordRule::new(&pattern) {
                Ok(_) => config.highlight_keywords.push(pattern),
                Err(e) => warnings.push(format!("[highlights] keywords: {e}. Ignored.")),
            }
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    config
}
