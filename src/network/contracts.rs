//! Contract addresses the client depends on, and their diagnostics.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::settings::NetworkDescriptor;

/// Logical role of a contract the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractRole {
    /// Registry of human-readable names.
    EnsRegistry,
}

impl ContractRole {
    pub const ALL: [ContractRole; 1] = [ContractRole::EnsRegistry];

    /// Key used in network-settings address sets.
    pub const fn key(self) -> &'static str {
        match self {
            ContractRole::EnsRegistry => "ensRegistry",
        }
    }
}

impl fmt::Display for ContractRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Address per contract role; a role may be unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContractAddresses {
    addresses: BTreeMap<ContractRole, Option<String>>,
}

impl ContractAddresses {
    /// Projects a raw address set onto the roles the client uses.
    ///
    /// Roles that are missing or empty in `raw` are kept, unset.
    pub fn project(raw: &BTreeMap<String, String>) -> Self {
        let addresses = ContractRole::ALL
            .iter()
            .map(|role| {
                let address = raw
                    .get(role.key())
                    .map(|a| a.trim())
                    .filter(|a| !a.is_empty())
                    .map(str::to_string);
                (*role, address)
            })
            .collect();
        Self { addresses }
    }

    pub fn get(&self, role: ContractRole) -> Option<&str> {
        self.addresses.get(&role).and_then(|a| a.as_deref())
    }

    pub fn ens_registry(&self) -> Option<&str> {
        self.get(ContractRole::EnsRegistry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContractRole, Option<&str>)> {
        self.addresses.iter().map(|(role, a)| (*role, a.as_deref()))
    }

    pub fn missing(&self) -> Vec<ContractRole> {
        self.iter()
            .filter(|(_, address)| address.is_none())
            .map(|(role, _)| role)
            .collect()
    }
}

impl fmt::Display for ContractAddresses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (role, address) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{role}={}", address.unwrap_or("<unset>"))?;
        }
        Ok(())
    }
}

/// A non-fatal problem found while resolving network configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigWarning {
    #[error(
        "some contracts are missing addresses ({missing:?}); they most likely need to be set \
         as environment variables. current contract addresses: {addresses}"
    )]
    MissingContractAddresses {
        missing: Vec<ContractRole>,
        addresses: ContractAddresses,
    },

    #[error("address for {role} is not a 20-byte hex address: {address:?}")]
    MalformedAddress { role: ContractRole, address: String },

    #[error(
        "configured to connect to an unsupported network ({network_type:?}); \
         the network environment variables most likely need to change"
    )]
    UnsupportedNetwork { network_type: String },
}

/// Checks the resolved configuration and logs each problem found.
pub fn validate(network: &NetworkDescriptor, contracts: &ContractAddresses) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let missing = contracts.missing();
    if !missing.is_empty() {
        warnings.push(ConfigWarning::MissingContractAddresses {
            missing,
            addresses: contracts.clone(),
        });
    }

    for (role, address) in contracts.iter() {
        if let Some(address) = address {
            if !is_address(address) {
                warnings.push(ConfigWarning::MalformedAddress {
                    role,
                    address: address.to_string(),
                });
            }
        }
    }

    if network.is_unknown() {
        warnings.push(ConfigWarning::UnsupportedNetwork {
            network_type: network.network_type.clone(),
        });
    }

    for warning in &warnings {
        warn!(%warning, "network configuration");
    }

    warnings
}

fn is_address(s: &str) -> bool {
    let mut bytes = [0u8; 20];
    s.strip_prefix("0x")
        .is_some_and(|digits| hex::decode_to_slice(digits, &mut bytes).is_ok())
}
