//! TOML file layer.

use std::path::{Path, PathBuf};

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Settings loaded from a TOML file.
///
/// A missing required file is an error; a missing optional file contributes nothing.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl ConfigSource for FileSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if self.required {
                    return Err(ConfigError::FileNotFound(self.path.clone()));
                }
                return Ok(vec![]);
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(vec![ConfigEntry::root(table)])
    }
}
