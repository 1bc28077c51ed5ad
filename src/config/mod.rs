//! Launch configuration loading and validation.
//!
//! Uses serde_yaml to load ecosystem files describing how the supervisor
//! starts the managed application, with support for environment variable
//! overrides for sensitive credentials.

mod descriptor;
mod env_value;
mod error;
mod variant;

pub use descriptor::LaunchDescriptor;
pub use error::ConfigError;
pub use variant::Variant;

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};
use tracing::debug;

/// Keys whose values may be replaced from the process environment.
pub const SECRET_KEYS: [&str; 3] = ["PG_PASSWORD", "JWT_SECRET_KEY", "ADMIN_PASSWORD"];

/// Root of an ecosystem file: the list of processes handed to the supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ecosystem {
    /// Managed processes. Every shipped variant declares exactly one.
    pub apps: Vec<LaunchDescriptor>,
}

impl Ecosystem {
    /// Load an ecosystem from a YAML file at the given path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let ecosystem = Self::from_yaml(&content)?;

        debug!(path = %path.display(), apps = ecosystem.apps.len(), "Ecosystem loaded");
        Ok(ecosystem)
    }

    /// Parse and validate an ecosystem from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let ecosystem: Ecosystem = serde_yaml::from_str(yaml)?;
        ecosystem.validate()?;
        Ok(ecosystem)
    }

    /// Load one of the built-in variants.
    pub fn builtin(variant: Variant) -> Result<Self, ConfigError> {
        Self::from_yaml(variant.source())
    }

    /// Descriptors handed to the supervisor.
    pub fn descriptors(&self) -> &[LaunchDescriptor] {
        &self.apps
    }

    /// Consume the ecosystem, keeping only its descriptors.
    pub fn into_descriptors(self) -> Vec<LaunchDescriptor> {
        self.apps
    }

    /// Look up a descriptor by process name.
    pub fn find(&self, name: &str) -> Option<&LaunchDescriptor> {
        self.apps.iter().find(|app| app.name == name)
    }

    /// Replace secret values from a lookup (usually the process environment).
    ///
    /// Only keys a descriptor already declares are touched, so variants that
    /// leave credentials to the application defaults stay that way.
    pub fn apply_secret_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for app in self.apps.iter_mut() {
            for key in SECRET_KEYS {
                let Some(current) = app.env.get_mut(key) else {
                    continue;
                };
                if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                    debug!(app = %app.name, key, "Secret overridden from environment");
                    *current = value;
                }
            }
        }
    }

    /// Validate the ecosystem.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.apps.is_empty() {
            return Err(ConfigError::Validation(
                "at least one app is required".into(),
            ));
        }

        let mut names = HashSet::new();
        for (idx, app) in self.apps.iter().enumerate() {
            if app.name.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "apps[{}].name is required",
                    idx
                )));
            }

            if app.script.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "app {}: script is required",
                    app.name
                )));
            }

            if !names.insert(app.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "app {}: duplicate name",
                    app.name
                )));
            }

            for key in app.env.keys() {
                if key.is_empty() || key.contains('=') || key.contains('\0') {
                    return Err(ConfigError::Validation(format!(
                        "app {}: invalid environment variable name {:?}",
                        app.name, key
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Descriptors of a built-in variant. Always a single-element list.
pub fn get_descriptors(variant: Variant) -> Result<Vec<LaunchDescriptor>, ConfigError> {
    Ecosystem::builtin(variant).map(Ecosystem::into_descriptors)
}
