//! Launch descriptor for a single managed process.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::env_value;
use crate::settings::{Settings, SettingsError};

/// How to start one managed process: entry point, working directory and the
/// environment injected into the child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchDescriptor {
    /// Process identifier used by the supervisor.
    pub name: String,
    /// Executable entry point, relative to `cwd`.
    pub script: String,
    /// Working directory of the child process.
    #[serde(default = "default_cwd")]
    pub cwd: String,
    /// Variables injected into the child's environment.
    #[serde(default, deserialize_with = "env_value::deserialize")]
    pub env: BTreeMap<String, String>,
}

fn default_cwd() -> String {
    ".".to_string()
}

impl LaunchDescriptor {
    /// Returns the value of an environment variable, if declared.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Returns true only when the toggle is declared as "1".
    pub fn toggle(&self, key: &str) -> bool {
        self.get(key) == Some("1")
    }

    /// Working directory resolved against the directory holding the config.
    pub fn resolved_cwd(&self, base: &Path) -> PathBuf {
        let cwd = Path::new(&self.cwd);
        if cwd.is_absolute() {
            cwd.to_path_buf()
        } else {
            base.join(cwd)
        }
    }

    /// Path of the entry point, resolved against the working directory.
    pub fn program(&self, base: &Path) -> PathBuf {
        self.resolved_cwd(base).join(&self.script)
    }

    /// Typed view of the environment as the managed application reads it.
    pub fn settings(&self) -> Result<Settings, SettingsError> {
        Settings::from_env(&self.env)
    }
}
