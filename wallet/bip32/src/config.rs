use crate::{Network, DEFAULT_CACHE_CAPACITY};
use serde::{Deserialize, Serialize};

/// Settings of a [`Wallet`](crate::Wallet).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletConfig {
    /// Number of derived keys kept in the LRU cache. Zero disables caching.
    pub cache_capacity: usize,
    /// Network used by [`Wallet::get_serialized_key`](crate::Wallet::get_serialized_key).
    pub network: Network,
}

impl Default for WalletConfig {
    fn default() -> Self {
        WalletConfig { cache_capacity: DEFAULT_CACHE_CAPACITY, network: Network::default() }
    }
}
