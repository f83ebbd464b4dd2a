// HighlightWizard - core/mod.rs
//
// Core business logic layer: event model, line parser, highlight rules,
// rendering.
// Must NOT depend on: app, platform, or the filesystem directly.

pub mod export;
pub mod highlight;
pub mod model;
pub mod parser;
