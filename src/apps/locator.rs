//! Where each sub-application's code is loaded from.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::registry::{AppId, KnownApp};

/// Base URL per application identifier.
pub type LocatorMap = BTreeMap<AppId, String>;

/// Development-only code-loading substitutions per application identifier.
pub type OverrideMap = BTreeMap<AppId, AppOverride>;

static NO_OVERRIDES: OverrideMap = BTreeMap::new();

/// Points code-loading at locally served files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppOverride {
    pub script: String,
    pub start_url: String,
}

/// Execution mode of the client process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    /// Variable consulted by [`Mode::from_env`].
    pub const ENV_VAR: &'static str = "DAPP_ENV";

    /// Production only when `DAPP_ENV=production`; anything else is development.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(Self::ENV_VAR).ok().as_deref())
    }

    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => Mode::Production,
            _ => Mode::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Mode::Production
    }

    /// The static locator configuration for this mode.
    pub fn app_locations(self) -> AppLocations {
        match self {
            Mode::Development => AppLocations::development(),
            Mode::Production => AppLocations::production(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Development => "development",
            Mode::Production => "production",
        })
    }
}

impl FromStr for Mode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_env_value(Some(s)))
    }
}

/// Locators, and in development the code overrides, for the bundled apps.
///
/// The Vault app has no development locator: it is not served locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppLocations {
    Development {
        locator: LocatorMap,
        overrides: OverrideMap,
    },
    Production {
        locator: LocatorMap,
    },
}

const DEV_SERVED: [(KnownApp, &str); 3] = [
    (KnownApp::Finance, "http://localhost:3002/"),
    (KnownApp::TokenManager, "http://localhost:3003/"),
    (KnownApp::Voting, "http://localhost:3001/"),
];

const PACKAGE_HOSTS: [(KnownApp, &str); 3] = [
    (KnownApp::Finance, "https://finance.aragonpm.com/"),
    (KnownApp::TokenManager, "https://token-manager.aragonpm.com/"),
    (KnownApp::Voting, "https://voting.aragonpm.com/"),
];

const DEV_SCRIPT: &str = "/script.js";
const DEV_START_URL: &str = "/index.html";

impl AppLocations {
    pub fn development() -> Self {
        let locator = DEV_SERVED
            .iter()
            .map(|(app, url)| (app.id(), url.to_string()))
            .collect();
        let overrides = DEV_SERVED
            .iter()
            .map(|(app, _)| {
                let served = AppOverride {
                    script: DEV_SCRIPT.to_string(),
                    start_url: DEV_START_URL.to_string(),
                };
                (app.id(), served)
            })
            .collect();
        AppLocations::Development { locator, overrides }
    }

    pub fn production() -> Self {
        let locator = PACKAGE_HOSTS
            .iter()
            .map(|(app, url)| (app.id(), url.to_string()))
            .collect();
        AppLocations::Production { locator }
    }

    pub fn mode(&self) -> Mode {
        match self {
            AppLocations::Development { .. } => Mode::Development,
            AppLocations::Production { .. } => Mode::Production,
        }
    }

    pub fn locator(&self) -> &LocatorMap {
        match self {
            AppLocations::Development { locator, .. } | AppLocations::Production { locator } => {
                locator
            }
        }
    }

    /// Always empty in production.
    pub fn overrides(&self) -> &OverrideMap {
        match self {
            AppLocations::Development { overrides, .. } => overrides,
            AppLocations::Production { .. } => &NO_OVERRIDES,
        }
    }

    pub fn base_url(&self, id: &AppId) -> Option<&str> {
        self.locator().get(id).map(String::as_str)
    }

    pub fn override_for(&self, id: &AppId) -> Option<&AppOverride> {
        self.overrides().get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_env_value() {
        assert_eq!(Mode::from_env_value(Some("production")), Mode::Production);
        assert_eq!(Mode::from_env_value(Some("development")), Mode::Development);
        assert_eq!(Mode::from_env_value(Some("test")), Mode::Development);
        assert_eq!(Mode::from_env_value(Some("")), Mode::Development);
        assert_eq!(Mode::from_env_value(None), Mode::Development);
        assert!("production".parse::<Mode>().unwrap().is_production());
    }

    #[test]
    fn test_resolution_is_pure() {
        for mode in [Mode::Development, Mode::Production] {
            assert_eq!(mode.app_locations(), mode.app_locations());
            assert_eq!(mode.app_locations().mode(), mode);
        }
    }

    #[test]
    fn test_development_serves_three_apps_locally() {
        let locations = Mode::Development.app_locations();

        assert_eq!(locations.locator().len(), 3);
        assert_eq!(
            locations.base_url(&KnownApp::Voting.id()),
            Some("http://localhost:3001/")
        );
        assert_eq!(
            locations.base_url(&KnownApp::Finance.id()),
            Some("http://localhost:3002/")
        );
        assert_eq!(
            locations.base_url(&KnownApp::TokenManager.id()),
            Some("http://localhost:3003/")
        );

        let overrides = locations.overrides();
        assert_eq!(
            overrides.keys().collect::<Vec<_>>(),
            locations.locator().keys().collect::<Vec<_>>()
        );
        for served in overrides.values() {
            assert_eq!(served.script, "/script.js");
            assert_eq!(served.start_url, "/index.html");
        }
    }

    #[test]
    fn test_vault_never_has_development_locator() {
        let locations = Mode::Development.app_locations();
        assert_eq!(locations.base_url(&KnownApp::Vault.id()), None);
        assert!(locations.override_for(&KnownApp::Vault.id()).is_none());
    }

    #[test]
    fn test_production_uses_package_hosts_without_overrides() {
        let locations = Mode::Production.app_locations();

        assert!(locations.overrides().is_empty());
        assert_eq!(locations.locator().len(), 3);
        assert_eq!(
            locations.base_url(&KnownApp::TokenManager.id()),
            Some("https://token-manager.aragonpm.com/")
        );
        assert_eq!(locations.base_url(&KnownApp::Vault.id()), None);
    }
}
