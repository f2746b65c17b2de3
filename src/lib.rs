pub mod apps;
pub mod config;
pub mod context;
mod error;
pub mod network;
pub mod settings;

pub use apps::{AppId, AppLocations, AppOrdering, IdentifierRegistry, KnownApp, Mode};
pub use config::{Config, ConfigError};
pub use context::ClientEnvironment;
pub use error::Error;
pub use settings::LocalSettings;
