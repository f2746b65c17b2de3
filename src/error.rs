use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the dapp-env library.
///
/// Every variant aborts initialization; non-fatal problems surface as
/// [`ConfigWarning`](crate::network::ConfigWarning)s instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("settings error: {0}")]
    Config(#[from] ConfigError),

    #[error("no Ethereum network type configured")]
    MissingNetworkType,

    #[error("no default Ethereum node configured")]
    MissingDefaultNode,

    #[error("invalid node URL '{url}': {source}")]
    InvalidNodeUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("node URL '{url}' uses '{scheme}', expected a streaming transport (ws or wss)")]
    UnsupportedTransport { url: String, scheme: String },

    #[error("client environment requires local settings")]
    MissingSettings,
}
