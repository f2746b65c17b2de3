//! Sub-application identity, ordering, and code locations.

mod locator;
mod order;
mod registry;

pub use locator::{AppLocations, AppOverride, LocatorMap, Mode, OverrideMap};
pub use order::{AppOrdering, AppRecord, InstalledApp, PriorityOrder};
pub use registry::{AppId, IdentifierRegistry, KnownApp};

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("duplicate application name in registry: {0}")]
    DuplicateName(String),

    #[error("duplicate application id in registry: {0}")]
    DuplicateId(AppId),

    #[error("invalid application id: {0:?}")]
    InvalidAppId(String),
}
