//! Logging-based progress sink

use super::{ProgressEvent, ProgressSink};
use tracing::{debug, error, info};

/// Sink that routes progress events to tracing, for non-interactive output
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_event(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::StageStarted { stage } => {
                debug!(%stage, "{}", stage.start_message());
            }
            ProgressEvent::StageSucceeded { stage, detail } => {
                info!(%stage, "{}", detail);
            }
            ProgressEvent::StageFailed { stage, message } => {
                error!(%stage, "{}", message);
            }
            ProgressEvent::Finished { message } => {
                info!("{}", message);
            }
        }
    }
}
