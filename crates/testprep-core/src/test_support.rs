//! Scripted collaborators for unit tests

use crate::error::SetupError;
use crate::progress::{ProgressEvent, ProgressSink, Stage};
use crate::runtime::CommandExecutor;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

enum Reply {
    Output(String),
    Exit(i32),
}

/// Executor that records commands and answers by command prefix
///
/// Commands without a scripted reply succeed with empty output.
#[derive(Default)]
pub struct StubExecutor {
    replies: Vec<(String, Reply)>,
    calls: Mutex<Vec<String>>,
}

impl StubExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, prefix: &str, output: &str) -> Self {
        self.replies
            .push((prefix.to_string(), Reply::Output(output.to_string())));
        self
    }

    pub fn fail(mut self, prefix: &str, exit_code: i32) -> Self {
        self.replies.push((prefix.to_string(), Reply::Exit(exit_code)));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for StubExecutor {
    async fn run(&self, command: &str, _cwd: &Path) -> Result<String, SetupError> {
        self.calls.lock().unwrap().push(command.to_string());

        let reply = self
            .replies
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply);

        match reply {
            Some(Reply::Output(output)) => Ok(output.clone()),
            Some(Reply::Exit(exit_code)) => Err(SetupError::CommandFailed {
                command: command.to_string(),
                exit_code: *exit_code,
            }),
            None => Ok(String::new()),
        }
    }
}

/// Sink that keeps every event for later assertions
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn started_stages(&self) -> Vec<Stage> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::StageStarted { stage } => Some(stage),
                _ => None,
            })
            .collect()
    }

    pub fn succeeded_stages(&self) -> Vec<Stage> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::StageSucceeded { stage, .. } => Some(stage),
                _ => None,
            })
            .collect()
    }

    pub fn details(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::StageSucceeded { detail, .. } => Some(detail),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::StageFailed { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for RecordingProgress {
    fn on_event(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
