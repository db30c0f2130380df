//!
//! BIP32 hierarchical deterministic keys: extended keys, derivation paths,
//! and a caching derivation engine ([`Wallet`]).
//!

mod address;
mod attrs;
mod base58;
mod cache;
mod child_number;
mod config;
mod derivation_path;
mod error;
mod network;
mod private_key;
mod public_key;
mod result;
pub mod types;
mod wallet;
mod xkey;

pub use address::Address;
pub use attrs::ExtendedKeyAttrs;
pub use base58::{decode_check, encode_check};
pub use cache::{Cache, DEFAULT_CACHE_CAPACITY};
pub use child_number::ChildNumber;
pub use config::WalletConfig;
pub use derivation_path::{DerivationLevel, DerivationPath};
pub use error::Error;
pub use network::{Network, NetworkPrefixes};
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use result::Result;
pub use types::*;
pub use wallet::{DerivationStats, Wallet};
pub use xkey::{ExtendedKey, KeyMaterial};
