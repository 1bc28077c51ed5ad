//! Built-in descriptor variants embedded at compile time.

use std::fmt;
use std::str::FromStr;

use super::ConfigError;

const FULL_YAML: &str = include_str!("../../configs/ecosystem.full.yaml");
const MIGRATIONS_YAML: &str = include_str!("../../configs/ecosystem.migrations.yaml");
const MINIMAL_YAML: &str = include_str!("../../configs/ecosystem.minimal.yaml");

/// One of the shipped launch configurations. A deployment picks exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// All toggles off, full database/JWT/admin settings.
    Full,
    /// `RUN_MIGRATIONS=1`, credentials left to the application defaults.
    Migrations,
    /// Host, port and `NGINX_SETUP=0` only.
    Minimal,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Full, Variant::Migrations, Variant::Minimal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Full => "full",
            Variant::Migrations => "migrations",
            Variant::Minimal => "minimal",
        }
    }

    /// Embedded YAML source of this variant.
    pub(crate) fn source(&self) -> &'static str {
        match self {
            Variant::Full => FULL_YAML,
            Variant::Migrations => MIGRATIONS_YAML,
            Variant::Minimal => MINIMAL_YAML,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(Variant::Full),
            "migrations" | "migration" => Ok(Variant::Migrations),
            "minimal" | "min" => Ok(Variant::Minimal),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}
