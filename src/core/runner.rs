use async_trait::async_trait;
use std::path::PathBuf;
use std::process::ExitStatus;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::GeneralConfig;
use crate::core::data::Delegation;
use crate::core::interrupt::Interrupt;
use crate::core::traits::{Delegate, Outcome};
use crate::utils::error::{AppError, AppResult};

/// Runs delegations as child processes of the configured build tool.
///
/// Each child gets the collaborator directory as its working directory and
/// inherits stdin, stdout and stderr, so `make clean` output and diagnostics
/// reach the invoker unchanged.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    tool: String,
    tool_args: Vec<String>,
    base_dir: PathBuf,
    interrupt: Interrupt,
}

impl ProcessRunner {
    pub fn new(tool: impl Into<String>, tool_args: Vec<String>) -> Self {
        Self {
            tool: tool.into(),
            tool_args,
            base_dir: PathBuf::from("."),
            interrupt: Interrupt::new(),
        }
    }

    pub fn from_config(general: &GeneralConfig) -> Self {
        Self::new(general.build_tool.clone(), general.tool_args.clone())
    }

    /// Directory that relative collaborator paths are resolved against.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Share the run's interrupt flag; a triggered flag kills the running
    /// child and refuses to start new ones.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    fn command(&self, delegation: &Delegation, dir: PathBuf) -> Command {
        let mut cmd = Command::new(&self.tool);
        cmd.args(&self.tool_args)
            .arg(&delegation.target)
            .current_dir(dir)
            .kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, delegation: &Delegation, message: impl Into<String>) -> AppError {
        AppError::Spawn {
            tool: self.tool.clone(),
            dir: delegation.dir.display().to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl Delegate for ProcessRunner {
    async fn run(&self, delegation: &Delegation) -> AppResult<Outcome> {
        let dir = self.base_dir.join(&delegation.dir);
        if !dir.is_dir() {
            return Err(self.spawn_error(delegation, "no such directory"));
        }

        if self.interrupt.is_triggered() {
            return Err(AppError::Interrupted);
        }

        debug!(command = %self.describe(delegation), dir = %dir.display(), "spawning");

        let mut child = self
            .command(delegation, dir)
            .spawn()
            .map_err(|e| self.spawn_error(delegation, e.to_string()))?;

        tokio::select! {
            biased;

            _ = self.interrupt.triggered() => {
                warn!(dir = %delegation.dir.display(), "stopping child after interrupt");
                if let Err(e) = child.kill().await {
                    warn!(error = %e, "failed to kill child");
                }
                Err(AppError::Interrupted)
            }
            status = child.wait() => {
                let status = status
                    .map_err(|e| AppError::Io(format!("waiting for {}: {}", self.tool, e)))?;
                debug!(%status, "child finished");
                // Ctrl-C reaches the child too and it often exits first
                if self.interrupt.is_triggered() || killed_by_sigint(&status) {
                    self.interrupt.trigger();
                    Err(AppError::Interrupted)
                } else if status.success() {
                    Ok(Outcome::Success)
                } else {
                    Ok(Outcome::Failed(status.code()))
                }
            }
        }
    }

    fn describe(&self, delegation: &Delegation) -> String {
        let mut parts = vec![self.tool.clone()];
        parts.extend(self.tool_args.iter().cloned());
        parts.push(delegation.target.clone());
        format!("{} (in {})", parts.join(" "), delegation.dir.display())
    }
}

#[cfg(unix)]
fn killed_by_sigint(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;

    const SIGINT: i32 = 2;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_sigint(_status: &ExitStatus) -> bool {
    false
}
