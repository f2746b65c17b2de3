//! Network, contract, storage, and transport resolution.

mod contracts;
mod settings;
mod storage;
mod transport;

pub use contracts::{validate, ConfigWarning, ContractAddresses, ContractRole};
pub use settings::{
    ChainSettings, KnownNetworks, NetworkConfig, NetworkDescriptor, NetworkLookup,
    UNKNOWN_NETWORK,
};
pub use storage::{RpcEndpoint, StorageGatewayConfig, FALLBACK_RPC};
pub use transport::{
    Connector, InjectedWallet, NoWallet, Transport, TransportHandles, WalletSource,
    WebSocketConnector, WebSocketTransport,
};
