//! Network descriptors and the built-in network table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::contracts::ContractRole;
use crate::Error;

/// Network type reported for anything the lookup does not recognize.
pub const UNKNOWN_NETWORK: &str = "unknown";

/// Which chain the client targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    #[serde(rename = "type")]
    pub network_type: String,
    pub settings: ChainSettings,
}

impl NetworkDescriptor {
    pub fn is_unknown(&self) -> bool {
        self.network_type == UNKNOWN_NETWORK
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    pub name: String,
    pub short_name: String,
    pub live: bool,
}

/// Result of a network-settings lookup.
///
/// `addresses` is keyed by contract role key (e.g. `ensRegistry`); values may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub settings: NetworkDescriptor,
    #[serde(default)]
    pub addresses: BTreeMap<String, String>,
}

/// Maps a network type identifier to its descriptor and contract addresses.
pub trait NetworkLookup: Send + Sync + std::fmt::Debug {
    fn network_config(&self, network_type: &str) -> Result<NetworkConfig, Error>;
}

struct KnownNetwork {
    key: &'static str,
    network_type: &'static str,
    chain_id: Option<u64>,
    name: &'static str,
    short_name: &'static str,
    live: bool,
    ens_registry: Option<&'static str>,
}

static NETWORKS: [KnownNetwork; 4] = [
    KnownNetwork {
        key: "main",
        network_type: "main",
        chain_id: Some(1),
        name: "Mainnet",
        short_name: "Main",
        live: true,
        ens_registry: Some("0x314159265dd8dbb310642f98f50c066173c1259b"),
    },
    KnownNetwork {
        key: "rinkeby",
        network_type: "rinkeby",
        chain_id: Some(4),
        name: "Rinkeby testnet",
        short_name: "Rinkeby",
        live: true,
        ens_registry: Some("0x98df287b6c145399aaa709692c8d308357bc085d"),
    },
    KnownNetwork {
        key: "ropsten",
        network_type: "ropsten",
        chain_id: Some(3),
        name: "Ropsten testnet",
        short_name: "Ropsten",
        live: true,
        ens_registry: Some("0x6afe2cacee211ea9179992f89dc61ff25c61e923"),
    },
    KnownNetwork {
        key: "local",
        network_type: "private",
        chain_id: Some(1337),
        name: "Local testnet",
        short_name: "Local",
        live: false,
        ens_registry: None,
    },
];

static UNKNOWN: KnownNetwork = KnownNetwork {
    key: UNKNOWN_NETWORK,
    network_type: UNKNOWN_NETWORK,
    chain_id: None,
    name: "Unknown network",
    short_name: "Unknown",
    live: false,
    ens_registry: None,
};

/// Built-in table of supported networks.
///
/// Unrecognized types resolve to the `unknown` descriptor rather than failing.
#[derive(Debug, Clone, Default)]
pub struct KnownNetworks {
    ens_registry: Option<String>,
}

impl KnownNetworks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `address` as the registry on every network.
    pub fn with_ens_registry(mut self, address: impl Into<String>) -> Self {
        self.ens_registry = Some(address.into());
        self
    }
}

impl NetworkLookup for KnownNetworks {
    fn network_config(&self, network_type: &str) -> Result<NetworkConfig, Error> {
        let network = NETWORKS
            .iter()
            .find(|n| n.key == network_type)
            .unwrap_or(&UNKNOWN);

        let ens_registry = self
            .ens_registry
            .clone()
            .or_else(|| network.ens_registry.map(str::to_string))
            .unwrap_or_default();

        let mut addresses = BTreeMap::new();
        addresses.insert(ContractRole::EnsRegistry.key().to_string(), ens_registry);

        Ok(NetworkConfig {
            settings: NetworkDescriptor {
                network_type: network.network_type.to_string(),
                settings: ChainSettings {
                    chain_id: network.chain_id,
                    name: network.name.to_string(),
                    short_name: network.short_name.to_string(),
                    live: network.live,
                },
            },
            addresses,
        })
    }
}
