//! Connection handles to the blockchain node.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::Error;

/// A connection used to send requests to a blockchain node.
pub trait Transport: fmt::Debug + Send + Sync {
    /// Endpoint this transport talks to.
    fn endpoint(&self) -> &str;

    /// Whether the transport can carry publish/subscribe notifications.
    fn supports_subscriptions(&self) -> bool;
}

/// Builds the primary transport from the resolved node URL.
pub trait Connector: fmt::Debug + Send + Sync {
    fn connect(&self, url: &str) -> Result<Arc<dyn Transport>, Error>;
}

/// Source of a wallet-provided connection, if the host environment injects one.
pub trait WalletSource: fmt::Debug + Send + Sync {
    fn injected(&self) -> Option<Arc<dyn Transport>>;
}

/// Persistent streaming transport over WebSocket.
///
/// Construction validates the endpoint; the socket itself is opened by the
/// client library that drives requests over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSocketTransport {
    url: Url,
}

impl WebSocketTransport {
    pub fn new(url: &str) -> Result<Self, Error> {
        let parsed = Url::parse(url).map_err(|source| Error::InvalidNodeUrl {
            url: url.to_string(),
            source,
        })?;

        match parsed.scheme() {
            "ws" | "wss" => Ok(Self { url: parsed }),
            scheme => Err(Error::UnsupportedTransport {
                url: url.to_string(),
                scheme: scheme.to_string(),
            }),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Transport for WebSocketTransport {
    fn endpoint(&self) -> &str {
        self.url.as_str()
    }

    fn supports_subscriptions(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketConnector;

impl Connector for WebSocketConnector {
    fn connect(&self, url: &str) -> Result<Arc<dyn Transport>, Error> {
        Ok(Arc::new(WebSocketTransport::new(url)?))
    }
}

/// No wallet connection is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWallet;

impl WalletSource for NoWallet {
    fn injected(&self) -> Option<Arc<dyn Transport>> {
        None
    }
}

/// A wallet connection handed over by the host environment.
#[derive(Debug, Clone)]
pub struct InjectedWallet(pub Arc<dyn Transport>);

impl WalletSource for InjectedWallet {
    fn injected(&self) -> Option<Arc<dyn Transport>> {
        Some(Arc::clone(&self.0))
    }
}

/// The primary node connection plus the optional wallet connection.
#[derive(Debug, Clone)]
pub struct TransportHandles {
    pub default: Arc<dyn Transport>,
    pub wallet: Option<Arc<dyn Transport>>,
}

impl TransportHandles {
    /// Connects to `node_url`; a missing wallet is not an error.
    pub fn resolve(
        node_url: &str,
        connector: &dyn Connector,
        wallet: &dyn WalletSource,
    ) -> Result<Self, Error> {
        Ok(Self {
            default: connector.connect(node_url)?,
            wallet: wallet.injected(),
        })
    }
}
