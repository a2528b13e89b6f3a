//! Engine settings: the configured endpoint baseline and tunables.
//!
//! Settings come from the host application, typically via the TOML loader
//! here. The engine itself never writes to the settings file.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Defaults, EndpointEntry, Settings};
