//! Canonical sub-application names and their identifiers.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::RegistryError;

/// A 32-byte application identifier, written as `0x` followed by 64 hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppId([u8; 32]);

impl AppId {
    /// Builds an identifier from a literal at compile time.
    ///
    /// Panics (at compile time, in const context) on malformed input.
    pub const fn from_hex_literal(s: &str) -> Self {
        let bytes = s.as_bytes();
        assert!(bytes.len() == 66, "app id must be 0x + 64 hex digits");
        assert!(bytes[0] == b'0' && bytes[1] == b'x', "app id must start with 0x");

        let mut out = [0u8; 32];
        let mut i = 0;
        while i < 32 {
            out[i] = (nibble(bytes[2 + 2 * i]) << 4) | nibble(bytes[3 + 2 * i]);
            i += 1;
        }
        Self(out)
    }

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

const fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit in app id"),
    }
}

impl FromStr for AppId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RegistryError::InvalidAppId(s.to_string());
        let digits = s.strip_prefix("0x").ok_or_else(invalid)?;

        let mut out = [0u8; 32];
        hex::decode_to_slice(digits, &mut out).map_err(|_| invalid())?;
        Ok(Self(out))
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppId({self})")
    }
}

impl Serialize for AppId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AppId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The sub-applications bundled with the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KnownApp {
    Finance,
    TokenManager,
    Vault,
    Voting,
}

impl KnownApp {
    pub const ALL: [KnownApp; 4] = [
        KnownApp::Finance,
        KnownApp::TokenManager,
        KnownApp::Vault,
        KnownApp::Voting,
    ];

    /// Canonical name, as used in registries and priority orders.
    pub const fn name(self) -> &'static str {
        match self {
            KnownApp::Finance => "Finance",
            KnownApp::TokenManager => "TokenManager",
            KnownApp::Vault => "Vault",
            KnownApp::Voting => "Voting",
        }
    }

    pub const fn id(self) -> AppId {
        match self {
            KnownApp::Finance => FINANCE_ID,
            KnownApp::TokenManager => TOKEN_MANAGER_ID,
            KnownApp::Vault => VAULT_ID,
            KnownApp::Voting => VOTING_ID,
        }
    }
}

impl fmt::Display for KnownApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const FINANCE_ID: AppId = AppId::from_hex_literal(
    "0xbf8491150dafc5dcaee5b861414dca922de09ccffa344964ae167212e8c673ae",
);
const TOKEN_MANAGER_ID: AppId = AppId::from_hex_literal(
    "0x6b20a3010614eeebf2138ccec99f028a61c811b3b1a3343b6ff635985c75c91f",
);
const VAULT_ID: AppId = AppId::from_hex_literal(
    "0x7e852e0fcfce6551c13800f1e7476f982525c2b5277ba14b24339c68416336d1",
);
const VOTING_ID: AppId = AppId::from_hex_literal(
    "0x9fa3927f639745e587912d4b0fea7ef9013bf93fb907d29faeab57417ba6e1d4",
);

/// Mapping from canonical application name to identifier, with a reverse index.
///
/// Names and identifiers are each unique within a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierRegistry {
    by_name: BTreeMap<String, AppId>,
    by_id: HashMap<AppId, String>,
}

impl IdentifierRegistry {
    /// Builds a registry, rejecting duplicate names or identifiers.
    pub fn new<I, N>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (N, AppId)>,
        N: Into<String>,
    {
        let mut by_name = BTreeMap::new();
        let mut by_id = HashMap::new();

        for (name, id) in entries {
            let name = name.into();
            if by_name.contains_key(&name) {
                return Err(RegistryError::DuplicateName(name));
            }
            if by_id.contains_key(&id) {
                return Err(RegistryError::DuplicateId(id));
            }
            by_id.insert(id, name.clone());
            by_name.insert(name, id);
        }

        Ok(Self { by_name, by_id })
    }

    /// The four bundled applications.
    pub fn standard() -> Self {
        let by_name = KnownApp::ALL
            .iter()
            .map(|app| (app.name().to_string(), app.id()))
            .collect();
        let by_id = KnownApp::ALL
            .iter()
            .map(|app| (app.id(), app.name().to_string()))
            .collect();
        Self { by_name, by_id }
    }

    pub fn id_of(&self, name: &str) -> Option<AppId> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, id: &AppId) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, AppId)> {
        self.by_name.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for IdentifierRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
