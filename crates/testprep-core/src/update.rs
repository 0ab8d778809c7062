//! The `update` operation
//!
//! Currently a no-op that always reports success.

use crate::progress::{ProgressEvent, ProgressSink};

/// Message reported when there is nothing to update
pub const UP_TO_DATE_MESSAGE: &str = "Nothing to update";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    UpToDate,
}

pub fn run(progress: &dyn ProgressSink) -> UpdateOutcome {
    progress.on_event(&ProgressEvent::Finished {
        message: UP_TO_DATE_MESSAGE.to_string(),
    });
    UpdateOutcome::UpToDate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingProgress;

    #[test]
    fn test_update_reports_up_to_date() {
        let progress = RecordingProgress::new();

        assert_eq!(run(&progress), UpdateOutcome::UpToDate);
        assert_eq!(
            progress.events(),
            vec![ProgressEvent::Finished {
                message: UP_TO_DATE_MESSAGE.to_string()
            }]
        );
    }
}
