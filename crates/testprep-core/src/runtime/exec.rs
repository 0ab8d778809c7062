//! Shell command execution in the project directory
//!
//! Every external step (installs, version listings) goes through
//! [`CommandExecutor`], so the pipeline can be driven by a scripted executor
//! in tests.

use crate::error::SetupError;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// Runs a shell command and returns its combined output
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `command` in `cwd`
    ///
    /// Resolves with stdout and stderr concatenated in arrival order, or
    /// fails with [`SetupError::CommandFailed`] on a non-zero exit.
    async fn run(&self, command: &str, cwd: &Path) -> Result<String, SetupError>;
}

/// Executor backed by the system shell
///
/// There is no timeout: a hung command hangs the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellExecutor;

impl ShellExecutor {
    fn shell_command(command: &str) -> TokioCommand {
        #[cfg(windows)]
        {
            let mut cmd = TokioCommand::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        }
        #[cfg(not(windows))]
        {
            let mut cmd = TokioCommand::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn run(&self, command: &str, cwd: &Path) -> Result<String, SetupError> {
        debug!(command, cwd = %cwd.display(), "Running command");

        let spawn_error = |source| SetupError::Spawn {
            command: command.to_string(),
            source,
        };

        let mut child = Self::shell_command(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| spawn_error(std::io::Error::other("stdout was not captured")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| spawn_error(std::io::Error::other("stderr was not captured")))?;

        let mut stdout_reader = BufReader::new(stdout);
        let mut stderr_reader = BufReader::new(stderr);
        // Partial lines survive a cancelled read_until, so the buffers live
        // outside the loop
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();
        let mut stdout_open = true;
        let mut stderr_open = true;
        let mut output = String::new();

        while stdout_open || stderr_open {
            tokio::select! {
                read = stdout_reader.read_until(b'\n', &mut stdout_buf), if stdout_open => {
                    stdout_open = drain_line(read, &mut stdout_buf, &mut output, "stdout");
                }
                read = stderr_reader.read_until(b'\n', &mut stderr_buf), if stderr_open => {
                    stderr_open = drain_line(read, &mut stderr_buf, &mut output, "stderr");
                }
            }
        }

        let status = child.wait().await.map_err(spawn_error)?;
        if status.success() {
            Ok(output)
        } else {
            Err(SetupError::CommandFailed {
                command: command.to_string(),
                exit_code: status.code().unwrap_or(-1),
            })
        }
    }
}

/// Move a completed line from `buf` into `output`; returns whether the
/// stream is still open
///
/// Bytes that are not valid UTF-8 are replaced rather than ending the read,
/// so the child never blocks on a full pipe.
fn drain_line(
    read: std::io::Result<usize>,
    buf: &mut Vec<u8>,
    output: &mut String,
    stream: &'static str,
) -> bool {
    match read {
        Ok(0) => false,
        Ok(_) => {
            {
                let text = String::from_utf8_lossy(buf);
                let line: &str = &text;
                let line = line.strip_suffix('\n').unwrap_or(line);
                let line = line.strip_suffix('\r').unwrap_or(line);
                debug!(stream, "{}", line);
                output.push_str(line);
                output.push('\n');
            }
            buf.clear();
            true
        }
        Err(e) => {
            debug!(stream, error = %e, "Error reading command output");
            false
        }
    }
}
