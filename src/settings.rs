//! Local settings: node, network, and storage gateway overrides.

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::config::EnvSource;
use crate::{Config, Error};

/// File layered under the environment by [`LocalSettings::load`].
pub const SETTINGS_FILE: &str = "dapp.toml";

/// Prefix of environment overrides, e.g. `DAPP__ETH__DEFAULT_NODE`.
pub const ENV_PREFIX: &str = "DAPP";
pub const ENV_SEPARATOR: &str = "__";

pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocalSettings {
    #[serde(default)]
    pub eth: EthSettings,
    #[serde(default)]
    pub ipfs: IpfsSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EthSettings {
    #[serde(default, deserialize_with = "optional_scalar")]
    pub default_node: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub network_type: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub ens_registry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IpfsSettings {
    #[serde(default = "default_gateway", deserialize_with = "scalar")]
    pub gateway: String,
}

impl Default for IpfsSettings {
    fn default() -> Self {
        Self {
            gateway: default_gateway(),
        }
    }
}

fn default_gateway() -> String {
    DEFAULT_IPFS_GATEWAY.to_string()
}

/// Accepts any scalar as text; environment layers coerce `1337` or `true`.
fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match toml::Value::deserialize(deserializer)? {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(dt) => Ok(dt.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar value, found {}",
            other.type_str()
        ))),
    }
}

fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar(deserializer).map(Some)
}

impl LocalSettings {
    /// Optional `dapp.toml` in the working directory, then `DAPP__*` variables.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(SETTINGS_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::layered(path, EnvSource::new(ENV_PREFIX, ENV_SEPARATOR))
    }

    fn layered(path: impl AsRef<Path>, env: EnvSource) -> Result<Self, Error> {
        Ok(Config::builder()
            .with_file(path, false)
            .with_source(env)
            .build()?)
    }

    /// Node the primary transport connects to.
    pub fn default_eth_node(&self) -> Result<&str, Error> {
        non_blank(self.eth.default_node.as_deref()).ok_or(Error::MissingDefaultNode)
    }

    /// Network the client expects to be on.
    pub fn eth_network_type(&self) -> Result<&str, Error> {
        non_blank(self.eth.network_type.as_deref()).ok_or(Error::MissingNetworkType)
    }

    pub fn ens_registry(&self) -> Option<&str> {
        non_blank(self.eth.ens_registry.as_deref())
    }

    pub fn ipfs_gateway(&self) -> &str {
        &self.ipfs.gateway
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
