// HighlightWizard - lib.rs
//
// Library entry point. The command-line front end in `main.rs` is a thin
// collaborator over `app::store::EventStore`; other front ends use the same
// surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
