// HighlightWizard - util/mod.rs
//
// Utility modules: error types, named constants, logging setup.
// `constants` names the default highlight categories, so util depends on
// core::model for that one type; nothing else reaches into core.

pub mod constants;
pub mod error;
pub mod logging;
