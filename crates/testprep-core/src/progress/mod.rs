//! Progress reporting for setup runs
//!
//! The orchestrator pushes [`ProgressEvent`]s into a [`ProgressSink`] and never
//! renders anything itself. Spinner rendering lives in the `tui` module.

mod handler;
mod logging;

pub use handler::{NoOpProgress, ProgressEvent, ProgressSink, Stage};
pub use logging::LogProgress;
