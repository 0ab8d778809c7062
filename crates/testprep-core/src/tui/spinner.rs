//! One cliclack spinner per pipeline stage

use crate::progress::{ProgressEvent, ProgressSink, Stage};
use std::sync::Mutex;

/// Renders each stage as a spinner that resolves to a success or error line
#[derive(Default)]
pub struct SpinnerProgress {
    active: Mutex<Option<(Stage, cliclack::ProgressBar)>>,
}

/// Put `item` in the slot for `stage`, handing back whatever was there
/// together with the label it was started with
fn replace_active<T>(
    slot: &mut Option<(Stage, T)>,
    stage: Stage,
    item: T,
) -> Option<(&'static str, T)> {
    slot.replace((stage, item))
        .map(|(previous, item)| (previous.start_message(), item))
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for SpinnerProgress {
    fn on_event(&self, event: &ProgressEvent) {
        let mut active = match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        match event {
            ProgressEvent::StageStarted { stage } => {
                let spinner = cliclack::spinner();
                spinner.start(stage.start_message());
                if let Some((label, previous)) = replace_active(&mut active, *stage, spinner) {
                    previous.stop(label);
                }
            }
            ProgressEvent::StageSucceeded { detail, .. } => match active.take() {
                Some((_, spinner)) => spinner.stop(detail),
                None => {
                    let _ = cliclack::log::success(detail);
                }
            },
            ProgressEvent::StageFailed { message, .. } => match active.take() {
                Some((_, spinner)) => spinner.error(message),
                None => {
                    let _ = cliclack::log::error(message);
                }
            },
            ProgressEvent::Finished { message } => match active.take() {
                Some((_, spinner)) => spinner.stop(message),
                None => {
                    let _ = cliclack::log::success(message);
                }
            },
        }
    }
}
