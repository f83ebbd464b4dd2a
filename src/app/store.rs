// HighlightWizard - app/store.rs
//
// The event store: owns the parsed records of the current event log and the
// highlight subset derived from them.
//
// Lifecycle:
//   - `load` clears both sequences, then parses the whole source. A failure
//     leaves both empty (all-or-nothing).
//   - `classify` rebuilds the highlights from the loaded records.
//   - Both are re-enterable; nothing survives a new `load`.
//
// Single-threaded and synchronous. Front ends that must stay responsive hand
// the work to `app::worker::LoadManager` instead.

use crate::core::highlight::{self, CategoryRule, HighlightRule};
use crate::core::model::{CategoryWarning, EventRecord, LoadSummary};
use crate::core::parser;
use crate::platform::fs;
use crate::util::error::LoadError;
use std::io::BufRead;
use std::path::Path;

/// Parsed events of one source plus their highlights.
pub struct EventStore {
    rule: Box<dyn HighlightRule>,
    all_events: Vec<EventRecord>,
    highlight_events: Vec<EventRecord>,
    last_summary: Option<LoadSummary>,
}

impl EventStore {
    /// Store using the default rule (goals and red cards).
    pub fn new() -> Self {
        Self::with_rule(Box::new(CategoryRule::default()))
    }

    /// Store using a custom highlight rule.
    pub fn with_rule(rule: Box<dyn HighlightRule>) -> Self {
        Self {
            rule,
            all_events: Vec::new(),
            highlight_events: Vec::new(),
            last_summary: None,
        }
    }

    /// Replace the highlight rule. Takes effect on the next `classify`.
    pub fn set_rule(&mut self, rule: Box<dyn HighlightRule>) {
        self.rule = rule;
    }

    /// Load an event log from disk.
    pub fn load(&mut self, path: &Path) -> Result<&[EventRecord], LoadError> {
        self.clear();
        let source_name = path.display().to_string();
        let reader = fs::open_event_log(path).map_err(|e| LoadError::Io {
            source_name: source_name.clone(),
            operation: "open",
            source: e,
        })?;
        self.load_from_reader(reader, &source_name)
    }

    /// Load an event log from any buffered stream.
    ///
    /// `source_name` names the stream in errors and logs.
    pub fn load_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        source_name: &str,
    ) -> Result<&[EventRecord], LoadError> {
        self.clear();

        let result = parser::parse_reader(reader, source_name).map_err(|e| {
            tracing::debug!(error = %e, "Load aborted");
            e
        })?;

        tracing::info!(
            source = source_name,
            records = result.records.len(),
            warnings = result.summary.warnings.len(),
            "Events loaded"
        );

        self.all_events = result.records;
        self.last_summary = Some(result.summary);
        Ok(&self.all_events)
    }

    /// Recompute the highlights from the loaded records.
    pub fn classify(&mut self) -> &[EventRecord] {
        self.highlight_events.clear();
        let indices = highlight::select_highlights(&self.all_events, self.rule.as_ref());
        self.highlight_events
            .extend(indices.into_iter().map(|idx| self.all_events[idx].clone()));

        tracing::info!(
            rule = %self.rule.describe(),
            events = self.all_events.len(),
            highlights = self.highlight_events.len(),
            "Highlight analysis complete"
        );

        &self.highlight_events
    }

    /// Every record of the last successful load, in source order.
    pub fn all_records(&self) -> &[EventRecord] {
        &self.all_events
    }

    /// Highlights from the last `classify`, in source order.
    pub fn highlights(&self) -> &[EventRecord] {
        &self.highlight_events
    }

    /// Unknown-category warnings from the last successful load.
    pub fn warnings(&self) -> &[CategoryWarning] {
        self.last_summary
            .as_ref()
            .map(|s| s.warnings.as_slice())
            .unwrap_or(&[])
    }

    /// Statistics of the last successful load.
    pub fn last_summary(&self) -> Option<&LoadSummary> {
        self.last_summary.as_ref()
    }

    fn clear(&mut self) {
        self.all_events.clear();
        self.highlight_events.clear();
        self.last_summary = None;
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("rule", &self.rule.describe())
            .field("all_events", &self.all_events.len())
            .field("highlight_events", &self.highlight_events.len())
            .finish()
    }
}
