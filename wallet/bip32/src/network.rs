use crate::{Error, KeyKind};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Version bytes a network uses for addresses, WIF keys, and extended keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkPrefixes {
    pub public_key_hash: u8,
    pub script_hash: u8,
    pub wif: u8,
    pub extended_public: u32,
    pub extended_private: u32,
}

const MAINNET: NetworkPrefixes =
    NetworkPrefixes { public_key_hash: 0x00, script_hash: 0x05, wif: 0x80, extended_public: 0x0488b21e, extended_private: 0x0488ade4 };

const TESTNET: NetworkPrefixes =
    NetworkPrefixes { public_key_hash: 0x6f, script_hash: 0xc4, wif: 0xef, extended_public: 0x043587cf, extended_private: 0x04358394 };

const NOL: NetworkPrefixes =
    NetworkPrefixes { public_key_hash: 0x19, script_hash: 0x44, wif: 0x23, extended_public: 0x42696720, extended_private: 0x426c6b73 };

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    #[serde(alias = "main")]
    Mainnet,
    Testnet,
    Regtest,
    Nol,
}

impl Network {
    /// Lookup order for decoding. Testnet precedes regtest, so shared
    /// version bytes decode as testnet.
    pub const ALL: [Network; 4] = [Network::Mainnet, Network::Testnet, Network::Regtest, Network::Nol];

    pub fn prefixes(&self) -> &'static NetworkPrefixes {
        match self {
            Network::Mainnet => &MAINNET,
            Network::Testnet | Network::Regtest => &TESTNET,
            Network::Nol => &NOL,
        }
    }

    pub fn extended_version(&self, kind: KeyKind) -> u32 {
        match kind {
            KeyKind::Private => self.prefixes().extended_private,
            KeyKind::Public => self.prefixes().extended_public,
        }
    }

    pub fn from_extended_version(version: u32) -> Option<(Network, KeyKind)> {
        Self::ALL.into_iter().find_map(|network| {
            let prefixes = network.prefixes();
            if prefixes.extended_private == version {
                Some((network, KeyKind::Private))
            } else if prefixes.extended_public == version {
                Some((network, KeyKind::Public))
            } else {
                None
            }
        })
    }

    pub fn from_wif_version(version: u8) -> Option<Network> {
        Self::ALL.into_iter().find(|network| network.prefixes().wif == version)
    }

    pub fn from_address_version(version: u8) -> Option<Network> {
        Self::ALL.into_iter().find(|network| network.prefixes().public_key_hash == version)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
            Network::Nol => "nol",
        };
        f.write_str(s)
    }
}

impl TryFrom<&str> for Network {
    type Error = Error;
    fn try_from(network: &str) -> Result<Self, Self::Error> {
        match network {
            "main" | "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            "nol" => Ok(Network::Nol),
            _ => Err(Error::UnknownNetwork(network.to_string())),
        }
    }
}

impl FromStr for Network {
    type Err = Error;
    fn from_str(network: &str) -> Result<Self, Self::Err> {
        Network::try_from(network)
    }
}
