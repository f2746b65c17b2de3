//! Canonical display order for installed applications.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::registry::{AppId, IdentifierRegistry, KnownApp};

/// Canonical names in display priority, highest first.
///
/// Names with no registry entry are never matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityOrder {
    names: Vec<String>,
}

impl PriorityOrder {
    pub fn new<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// TokenManager, Finance, Voting, Vault.
    pub fn standard() -> Self {
        Self::new(
            [
                KnownApp::TokenManager,
                KnownApp::Finance,
                KnownApp::Voting,
                KnownApp::Vault,
            ]
            .map(KnownApp::name),
        )
    }

    /// Position of the first occurrence of `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for PriorityOrder {
    fn default() -> Self {
        Self::standard()
    }
}

/// Read access to an installed application record.
pub trait AppRecord {
    fn app_id(&self) -> &AppId;
    fn name(&self) -> &str;
}

/// Minimal installed application record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledApp {
    pub app_id: AppId,
    pub name: String,
}

impl InstalledApp {
    pub fn new(app_id: AppId, name: impl Into<String>) -> Self {
        Self {
            app_id,
            name: name.into(),
        }
    }
}

impl AppRecord for InstalledApp {
    fn app_id(&self) -> &AppId {
        &self.app_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<T: AppRecord + ?Sized> AppRecord for &T {
    fn app_id(&self) -> &AppId {
        (**self).app_id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Total order over installed applications.
///
/// Ranked applications (known identifier whose name is in the priority order)
/// come first, by priority. Everything else follows, ordered by
/// case-insensitive name.
#[derive(Debug, Clone)]
pub struct AppOrdering {
    ranks: HashMap<AppId, usize>,
}

impl AppOrdering {
    /// Precomputes identifier ranks from the registry's reverse index.
    pub fn new(registry: &IdentifierRegistry, priority: &PriorityOrder) -> Self {
        let ranks = registry
            .iter()
            .filter_map(|(name, id)| priority.index_of(name).map(|rank| (id, rank)))
            .collect();
        Self { ranks }
    }

    /// Priority index of an identifier, `None` when unranked.
    pub fn rank(&self, id: &AppId) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    pub fn compare<A, B>(&self, a: &A, b: &B) -> Ordering
    where
        A: AppRecord + ?Sized,
        B: AppRecord + ?Sized,
    {
        match (self.rank(a.app_id()), self.rank(b.app_id())) {
            (Some(ra), Some(rb)) => ra.cmp(&rb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => compare_names(a.name(), b.name()),
        }
    }

    /// Stable in-place sort into display order.
    pub fn sort<A: AppRecord>(&self, apps: &mut [A]) {
        apps.sort_by(|a, b| self.compare(a, b));
    }
}

impl Default for AppOrdering {
    fn default() -> Self {
        Self::new(&IdentifierRegistry::standard(), &PriorityOrder::standard())
    }
}

/// Compares lowercased names by Unicode scalar value, not by UTF-16 code unit.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
