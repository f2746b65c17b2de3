//! Layered settings loading.

mod builder;
mod env;
mod error;
mod file;
mod source;

pub use builder::Config;
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::FileSource;
pub use source::{ConfigEntry, ConfigSource, TableSource};
