//! Process-wide client environment, resolved once at startup.

use std::sync::Arc;

use tracing::debug;

use crate::apps::{AppLocations, AppOrdering, IdentifierRegistry, Mode, PriorityOrder};
use crate::network::{
    self, ConfigWarning, Connector, ContractAddresses, KnownNetworks, NetworkDescriptor,
    NetworkLookup, NoWallet, StorageGatewayConfig, TransportHandles, WalletSource,
    WebSocketConnector,
};
use crate::{Error, LocalSettings};

/// Immutable runtime configuration for the client.
///
/// Built once, then shared by reference (or inside an `Arc`). Nothing here
/// changes after [`ClientEnvironmentBuilder::build`] returns.
///
/// ## Example
///
/// ```no_run
/// use dapp_env::{ClientEnvironment, LocalSettings, Mode};
///
/// let env = ClientEnvironment::builder()
///     .with_mode(Mode::from_env())
///     .with_settings(LocalSettings::load()?)
///     .build()?;
///
/// for warning in env.warnings() {
///     eprintln!("{warning}");
/// }
/// # Ok::<(), dapp_env::Error>(())
/// ```
#[derive(Debug)]
pub struct ClientEnvironment {
    mode: Mode,
    registry: IdentifierRegistry,
    priority: PriorityOrder,
    ordering: AppOrdering,
    locations: AppLocations,
    network: NetworkDescriptor,
    contracts: ContractAddresses,
    storage: StorageGatewayConfig,
    transports: TransportHandles,
    warnings: Vec<ConfigWarning>,
}

impl ClientEnvironment {
    pub fn builder() -> ClientEnvironmentBuilder {
        ClientEnvironmentBuilder::default()
    }

    /// Mode from `DAPP_ENV`, settings from `dapp.toml` and `DAPP__*` variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::builder()
            .with_mode(Mode::from_env())
            .with_settings(LocalSettings::load()?)
            .build()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn registry(&self) -> &IdentifierRegistry {
        &self.registry
    }

    pub fn priority(&self) -> &PriorityOrder {
        &self.priority
    }

    /// Comparator for sorting installed applications into display order.
    pub fn app_ordering(&self) -> &AppOrdering {
        &self.ordering
    }

    pub fn app_locations(&self) -> &AppLocations {
        &self.locations
    }

    pub fn network(&self) -> &NetworkDescriptor {
        &self.network
    }

    pub fn contract_addresses(&self) -> &ContractAddresses {
        &self.contracts
    }

    pub fn storage(&self) -> &StorageGatewayConfig {
        &self.storage
    }

    pub fn transports(&self) -> &TransportHandles {
        &self.transports
    }

    /// Diagnostics found during resolution; always empty in production.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }
}

/// Builder for [`ClientEnvironment`].
///
/// Only the local settings are mandatory; every collaborator has a default.
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ClientEnvironmentBuilder {
    mode: Mode,
    settings: Option<LocalSettings>,
    registry: Option<IdentifierRegistry>,
    priority: Option<PriorityOrder>,
    lookup: Option<Arc<dyn NetworkLookup>>,
    connector: Option<Arc<dyn Connector>>,
    wallet: Option<Arc<dyn WalletSource>>,
}

impl ClientEnvironmentBuilder {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_settings(mut self, settings: LocalSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_registry(mut self, registry: IdentifierRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_priority(mut self, priority: PriorityOrder) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the built-in network table.
    pub fn with_network_lookup(mut self, lookup: impl NetworkLookup + 'static) -> Self {
        self.lookup = Some(Arc::new(lookup));
        self
    }

    pub fn with_connector(mut self, connector: impl Connector + 'static) -> Self {
        self.connector = Some(Arc::new(connector));
        self
    }

    pub fn with_wallet(mut self, wallet: impl WalletSource + 'static) -> Self {
        self.wallet = Some(Arc::new(wallet));
        self
    }

    /// Resolves the environment.
    ///
    /// Fails when the network type or the default node is missing or unusable.
    /// Missing contract addresses and unsupported networks only produce
    /// warnings, and only outside production.
    pub fn build(self) -> Result<ClientEnvironment, Error> {
        let settings = self.settings.ok_or(Error::MissingSettings)?;
        let mode = self.mode;

        let network_type = settings.eth_network_type()?;
        let lookup = self.lookup.unwrap_or_else(|| {
            let mut known = KnownNetworks::new();
            if let Some(address) = settings.ens_registry() {
                known = known.with_ens_registry(address);
            }
            Arc::new(known)
        });
        let resolved = lookup.network_config(network_type)?;
        let contracts = ContractAddresses::project(&resolved.addresses);
        let network = resolved.settings;

        let warnings = if mode.is_production() {
            Vec::new()
        } else {
            network::validate(&network, &contracts)
        };

        let storage = StorageGatewayConfig::new(settings.ipfs_gateway());

        let node = settings.default_eth_node()?;
        let connector = self
            .connector
            .unwrap_or_else(|| Arc::new(WebSocketConnector));
        let wallet = self.wallet.unwrap_or_else(|| Arc::new(NoWallet));
        let transports = TransportHandles::resolve(node, connector.as_ref(), wallet.as_ref())?;

        let registry = self.registry.unwrap_or_default();
        let priority = self.priority.unwrap_or_default();
        let ordering = AppOrdering::new(&registry, &priority);

        debug!(
            %mode,
            network = %network.network_type,
            node = transports.default.endpoint(),
            wallet = transports.wallet.is_some(),
            warnings = warnings.len(),
            "client environment resolved"
        );

        Ok(ClientEnvironment {
            mode,
            registry,
            priority,
            ordering,
            locations: mode.app_locations(),
            network,
            contracts,
            storage,
            transports,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::{AppId, InstalledApp, KnownApp};
    use crate::network::{ChainSettings, InjectedWallet, NetworkConfig, WebSocketTransport};
    use std::collections::BTreeMap;

    fn settings(network_type: &str) -> LocalSettings {
        let mut settings = LocalSettings::default();
        settings.eth.default_node = Some("wss://node.example:8546".into());
        settings.eth.network_type = Some(network_type.into());
        settings
    }

    #[derive(Debug)]
    struct MissingRegistry;

    impl NetworkLookup for MissingRegistry {
        fn network_config(&self, network_type: &str) -> Result<NetworkConfig, Error> {
            Ok(NetworkConfig {
                settings: NetworkDescriptor {
                    network_type: network_type.to_string(),
                    settings: ChainSettings {
                        chain_id: Some(4),
                        name: "Rinkeby testnet".into(),
                        short_name: "Rinkeby".into(),
                        live: true,
                    },
                },
                addresses: BTreeMap::from([("ensRegistry".to_string(), String::new())]),
            })
        }
    }

    #[derive(Debug)]
    struct FailingLookup;

    impl NetworkLookup for FailingLookup {
        fn network_config(&self, _network_type: &str) -> Result<NetworkConfig, Error> {
            Err(Error::MissingNetworkType)
        }
    }

    #[test]
    fn test_builds_complete_environment() {
        let env = ClientEnvironment::builder()
            .with_settings(settings("main"))
            .build()
            .unwrap();

        assert_eq!(env.mode(), Mode::Development);
        assert_eq!(env.network().network_type, "main");
        assert_eq!(
            env.contract_addresses().ens_registry(),
            Some("0x314159265dd8dbb310642f98f50c066173c1259b")
        );
        assert_eq!(env.storage().gateway, "https://ipfs.io/ipfs");
        assert_eq!(env.storage().rpc.host, "ipfs.infura.io");
        assert_eq!(env.transports().default.endpoint(), "wss://node.example:8546/");
        assert!(env.transports().default.supports_subscriptions());
        assert!(env.transports().wallet.is_none());
        assert_eq!(env.registry().len(), 4);
        assert_eq!(env.app_locations(), &Mode::Development.app_locations());
        assert!(env.warnings().is_empty());
    }

    #[test]
    fn test_missing_settings_is_fatal() {
        let result = ClientEnvironment::builder().build();
        assert!(matches!(result, Err(Error::MissingSettings)));
    }

    #[test]
    fn test_missing_network_type_is_fatal() {
        let mut settings = settings("main");
        settings.eth.network_type = None;

        let result = ClientEnvironment::builder().with_settings(settings).build();
        assert!(matches!(result, Err(Error::MissingNetworkType)));
    }

    #[test]
    fn test_missing_default_node_is_fatal() {
        let mut settings = settings("main");
        settings.eth.default_node = None;

        let result = ClientEnvironment::builder()
            .with_mode(Mode::Production)
            .with_settings(settings)
            .build();
        assert!(matches!(result, Err(Error::MissingDefaultNode)));
    }

    #[test]
    fn test_non_streaming_node_is_fatal() {
        let mut settings = settings("main");
        settings.eth.default_node = Some("https://node.example".into());

        let result = ClientEnvironment::builder().with_settings(settings).build();
        assert!(matches!(result, Err(Error::UnsupportedTransport { .. })));
    }

    #[test]
    fn test_lookup_failure_propagates() {
        let result = ClientEnvironment::builder()
            .with_settings(settings("main"))
            .with_network_lookup(FailingLookup)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_address_warns_in_development_only() {
        let dev = ClientEnvironment::builder()
            .with_settings(settings("rinkeby"))
            .with_network_lookup(MissingRegistry)
            .build()
            .unwrap();

        assert_eq!(dev.contract_addresses().ens_registry(), None);
        assert_eq!(dev.contract_addresses().iter().count(), 1);
        assert!(matches!(
            dev.warnings(),
            [ConfigWarning::MissingContractAddresses { .. }]
        ));

        let prod = ClientEnvironment::builder()
            .with_mode(Mode::Production)
            .with_settings(settings("rinkeby"))
            .with_network_lookup(MissingRegistry)
            .build()
            .unwrap();

        assert_eq!(prod.contract_addresses().ens_registry(), None);
        assert!(prod.warnings().is_empty());
    }

    #[test]
    fn test_unknown_network_still_resolves() {
        let env = ClientEnvironment::builder()
            .with_settings(settings("kovan"))
            .build()
            .unwrap();

        assert!(env.network().is_unknown());
        assert!(env
            .warnings()
            .iter()
            .any(|w| matches!(w, ConfigWarning::UnsupportedNetwork { .. })));
        assert!(env
            .warnings()
            .iter()
            .any(|w| matches!(w, ConfigWarning::MissingContractAddresses { .. })));
    }

    #[test]
    fn test_registry_override_from_settings() {
        let mut settings = settings("local");
        settings.eth.ens_registry = Some("0x5f6f7e8cc7346a11ca2def8f827b7a0b612c56a1".into());

        let env = ClientEnvironment::builder()
            .with_settings(settings)
            .build()
            .unwrap();

        assert_eq!(env.network().network_type, "private");
        assert_eq!(
            env.contract_addresses().ens_registry(),
            Some("0x5f6f7e8cc7346a11ca2def8f827b7a0b612c56a1")
        );
        assert!(env.warnings().is_empty());
    }

    #[test]
    fn test_production_selects_package_locations() {
        let env = ClientEnvironment::builder()
            .with_mode(Mode::Production)
            .with_settings(settings("main"))
            .build()
            .unwrap();

        assert!(env.app_locations().overrides().is_empty());
        assert_eq!(
            env.app_locations().base_url(&KnownApp::Voting.id()),
            Some("https://voting.aragonpm.com/")
        );
    }

    #[test]
    fn test_wallet_injection() {
        let wallet = WebSocketTransport::new("ws://wallet.local:1248").unwrap();
        let env = ClientEnvironment::builder()
            .with_settings(settings("main"))
            .with_wallet(InjectedWallet(Arc::new(wallet)))
            .build()
            .unwrap();

        let injected = env.transports().wallet.as_ref().unwrap();
        assert_eq!(injected.endpoint(), "ws://wallet.local:1248/");
    }

    #[test]
    fn test_environment_orders_installed_apps() {
        let env = ClientEnvironment::builder()
            .with_settings(settings("main"))
            .build()
            .unwrap();

        let mut apps = vec![
            InstalledApp::new(AppId::from_bytes([1; 32]), "Custom"),
            InstalledApp::new(KnownApp::Vault.id(), "Vault"),
            InstalledApp::new(KnownApp::Voting.id(), "Voting"),
        ];
        env.app_ordering().sort(&mut apps);

        let names: Vec<_> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Voting", "Vault", "Custom"]);
    }

    #[test]
    fn test_shareable_across_threads() {
        let env = Arc::new(
            ClientEnvironment::builder()
                .with_settings(settings("main"))
                .build()
                .unwrap(),
        );

        let handle = {
            let env = Arc::clone(&env);
            std::thread::spawn(move || env.network().network_type.clone())
        };
        assert_eq!(handle.join().unwrap(), "main");
    }
}
