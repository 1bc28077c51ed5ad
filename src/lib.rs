//! Launch configuration for the `fastapi` application process.
//!
//! Produces the descriptors an external process supervisor consumes, and can
//! run a descriptor once in the foreground.

pub mod config;
pub mod launch;
pub mod settings;

pub use config::{ConfigError, Ecosystem, LaunchDescriptor, Variant, get_descriptors};
