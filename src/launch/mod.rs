//! Foreground launch of a single descriptor.
//!
//! Spawns the entry point once and waits for it. Restart policy and log
//! capture belong to the external supervisor.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{info, warn};

use crate::config::LaunchDescriptor;

/// Launch error type.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for child: {0}")]
    Wait(#[source] std::io::Error),
    #[error("interrupted")]
    Interrupted,
}

/// Builds and runs child processes relative to the config's directory.
pub struct Launcher {
    base_dir: PathBuf,
}

impl Launcher {
    /// A relative `base_dir` is made absolute against the current directory,
    /// since the child resolves its program only after changing directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            base_dir: absolute_or_unchanged(base_dir),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Command for the descriptor, with its env layered over the inherited one.
    pub fn command(&self, app: &LaunchDescriptor) -> Command {
        let mut cmd = Command::new(app.program(&self.base_dir));
        cmd.current_dir(app.resolved_cwd(&self.base_dir))
            .envs(&app.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        cmd
    }

    /// Run the descriptor once and wait for it to exit.
    ///
    /// Ctrl-C kills the child and returns [`LaunchError::Interrupted`].
    pub async fn run(&self, app: &LaunchDescriptor) -> Result<ExitStatus, LaunchError> {
        self.run_until(app, tokio::signal::ctrl_c()).await
    }

    /// Run the descriptor once, killing the child when `shutdown` resolves first.
    pub async fn run_until<F>(
        &self,
        app: &LaunchDescriptor,
        shutdown: F,
    ) -> Result<ExitStatus, LaunchError>
    where
        F: Future,
    {
        let program = app.program(&self.base_dir);
        let mut child = self
            .command(app)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        info!(
            app = %app.name,
            program = %program.display(),
            pid = ?child.id(),
            "Process started"
        );

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(LaunchError::Wait)?;
                info!(app = %app.name, status = %status, "Process exited");
                Ok(status)
            }
            _ = shutdown => {
                warn!(app = %app.name, "Interrupted, stopping process");
                if let Err(e) = child.kill().await {
                    warn!(error = %e, "Failed to kill process");
                }
                Err(LaunchError::Interrupted)
            }
        }
    }
}

fn absolute_or_unchanged(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::path::absolute(&path) {
        Ok(abs) => abs,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot make base directory absolute");
            path
        }
    }
}
