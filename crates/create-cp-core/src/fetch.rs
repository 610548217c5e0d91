//! Template fetching through the version-control client.
//!
//! The clone runs as a child process while a [`FetchProgress`] reporter
//! shows activity. Failure and interruption share one termination path:
//! report, kill the child, and hand a non-success outcome back to the
//! caller, which exits non-zero.

use crate::cancel::CancellationToken;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Spinner text while the clone runs
pub const DOWNLOADING_MESSAGE: &str = "Downloading from remote repo, please wait a moment...";
/// Failure text for any unsuccessful clone
pub const FAILED_MESSAGE: &str = "something wrong";
/// Failure text after an interrupt
pub const ABORTED_MESSAGE: &str = "Downloading abort";

/// How long to wait for stderr after a failed clone exits
const STDERR_GRACE: Duration = Duration::from_secs(2);

/// Progress display driven by the fetcher
pub trait FetchProgress {
    fn start(&self, message: &str);
    fn succeed(&self, message: &str);
    fn fail(&self, message: &str);
}

/// Result of a fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Completed,
    Failed { reason: String },
    Aborted,
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Completed)
    }
}

/// A `clone` invocation of the version-control client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneCommand {
    pub program: String,
    pub locator: String,
    pub target_dir: String,
    pub depth: Option<u32>,
}

impl CloneCommand {
    pub fn new(
        program: impl Into<String>,
        locator: impl Into<String>,
        target_dir: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            locator: locator.into(),
            target_dir: target_dir.into(),
            depth: None,
        }
    }

    pub fn with_depth(mut self, depth: Option<u32>) -> Self {
        self.depth = depth;
        self
    }

    /// Arguments passed after the program name
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["clone".to_string()];
        if let Some(depth) = self.depth {
            args.push("--depth".to_string());
            args.push(depth.to_string());
        }
        args.push(self.locator.clone());
        args.push(self.target_dir.clone());
        args
    }
}

impl fmt::Display for CloneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.args().join(" "))
    }
}

/// Runs clone commands relative to a working directory
#[derive(Debug, Clone)]
pub struct Fetcher {
    cwd: Utf8PathBuf,
}

impl Fetcher {
    pub fn new(cwd: impl Into<Utf8PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    pub fn cwd(&self) -> &Utf8Path {
        &self.cwd
    }

    /// Clone the template, racing the child against `token`
    pub async fn fetch(
        &self,
        command: &CloneCommand,
        progress: &dyn FetchProgress,
        token: &CancellationToken,
    ) -> FetchOutcome {
        progress.start(DOWNLOADING_MESSAGE);
        info!("Cloning template: {}", command.locator);
        debug!("Running: {}", command);

        if token.is_cancelled() {
            progress.fail(ABORTED_MESSAGE);
            return FetchOutcome::Aborted;
        }

        if which::which(&command.program).is_err() {
            warn!("Version-control client not found: {}", command.program);
            progress.fail(FAILED_MESSAGE);
            return FetchOutcome::Failed {
                reason: format!("{} not found", command.program),
            };
        }

        let spawned = Command::new(&command.program)
            .args(command.args())
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to spawn {}: {}", command.program, e);
                progress.fail(FAILED_MESSAGE);
                return FetchOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let stderr_task = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf).await;
                buf
            })
        });

        tokio::select! {
            status = child.wait() => match status {
                Ok(status) if status.success() => {
                    progress.succeed("Downloaded");
                    info!("Template cloned into {}", command.target_dir);
                    FetchOutcome::Completed
                }
                Ok(status) => {
                    if let Some(task) = stderr_task {
                        if let Ok(Ok(stderr)) = tokio::time::timeout(STDERR_GRACE, task).await {
                            debug!("Clone stderr: {}", stderr.trim());
                        }
                    }
                    let reason = format!("{} exited with {}", command.program, status);
                    stop(&mut child, progress, FAILED_MESSAGE).await;
                    FetchOutcome::Failed { reason }
                }
                Err(e) => {
                    stop(&mut child, progress, FAILED_MESSAGE).await;
                    FetchOutcome::Failed { reason: e.to_string() }
                }
            },
            () = token.cancelled() => {
                stop(&mut child, progress, ABORTED_MESSAGE).await;
                FetchOutcome::Aborted
            }
        }
    }
}

/// Shared termination path for failure and interrupt
async fn stop(child: &mut Child, progress: &dyn FetchProgress, message: &str) {
    progress.fail(message);
    if let Err(e) = child.kill().await {
        debug!("Child already gone: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_command_args() {
        let cmd = CloneCommand::new("git", "git@github.com:antfu/vitesse.git", "my-app");
        assert_eq!(
            cmd.args(),
            vec!["clone", "git@github.com:antfu/vitesse.git", "my-app"]
        );
        assert_eq!(
            cmd.to_string(),
            "git clone git@github.com:antfu/vitesse.git my-app"
        );
    }

    #[test]
    fn test_clone_command_with_depth() {
        let cmd = CloneCommand::new("git", "repo.git", "dir").with_depth(Some(1));
        assert_eq!(cmd.to_string(), "git clone --depth 1 repo.git dir");
    }

    #[test]
    fn test_outcome_success() {
        assert!(FetchOutcome::Completed.is_success());
        assert!(!FetchOutcome::Aborted.is_success());
        assert!(!FetchOutcome::Failed {
            reason: "x".into()
        }
        .is_success());
    }
}
