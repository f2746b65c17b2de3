//! Content-addressed storage endpoints.

use serde::Serialize;

/// Public RPC service of the storage network, used when the gateway is not enough.
pub const FALLBACK_RPC: RpcEndpoint = RpcEndpoint {
    host: "ipfs.infura.io",
    port: 5001,
    protocol: "https",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RpcEndpoint {
    pub host: &'static str,
    pub port: u16,
    pub protocol: &'static str,
}

impl RpcEndpoint {
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageGatewayConfig {
    pub gateway: String,
    pub rpc: RpcEndpoint,
}

impl StorageGatewayConfig {
    pub fn new(gateway: impl Into<String>) -> Self {
        Self {
            gateway: gateway.into(),
            rpc: FALLBACK_RPC,
        }
    }

    /// Gateway URL for a content identifier.
    pub fn content_url(&self, cid: &str) -> String {
        format!("{}/{}", self.gateway.trim_end_matches('/'), cid)
    }
}
