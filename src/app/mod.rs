// HighlightWizard - app/mod.rs
//
// Application layer: the event store, highlight policy assembly, and the
// background worker.
// Dependencies: core, platform.

pub mod policy;
pub mod store;
pub mod worker;
