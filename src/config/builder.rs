use std::path::Path;

use serde::de::DeserializeOwned;

use super::env::EnvSource;
use super::file::FileSource;
use super::source::{merge_at_path, ConfigSource, TableSource};
use super::ConfigError;

/// Builder for loading settings from layered sources.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Nested tables are merged recursively; other values
/// (including arrays) are replaced entirely.
///
/// ## Example
///
/// ```no_run
/// use dapp_env::Config;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Eth {
///     default_node: String,
///     network_type: String,
/// }
///
/// #[derive(Deserialize)]
/// struct Settings {
///     eth: Eth,
/// }
///
/// // With DAPP__ETH__NETWORK_TYPE=rinkeby overriding the file
/// let settings: Settings = Config::builder()
///     .with_file("dapp.toml", true)
///     .with_env("DAPP", "__")
///     .build()?;
/// # Ok::<(), dapp_env::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Config {
    /// Creates a new settings builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML file layer.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds an environment variable layer.
    ///
    /// Variables are mapped to paths by removing the prefix and separator,
    /// splitting on the separator and lowercasing each segment. Values are
    /// coerced to boolean, integer, float, or string (fallback).
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds an in-memory layer.
    pub fn with_table(self, table: toml::Table) -> Self {
        self.with_source(TableSource::new(table))
    }

    /// Adds any custom layer.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads every layer, merges them, and deserializes the result once.
    pub fn build<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        let mut merged = toml::Table::new();

        for source in &self.sources {
            for entry in source.entries()? {
                merge_at_path(&mut merged, &entry.path, entry.value);
            }
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(ConfigError::DeserializeError)
    }
}
