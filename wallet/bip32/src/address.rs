use crate::{base58, Error, Network, Result};
use hdkeys_hashes::{Hash160, HASH160_SIZE};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Pay-to-public-key-hash address: `version || HASH160(pubkey)`, Base58Check encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    network: Network,
    hash: Hash160,
}

impl Address {
    pub fn p2pkh(network: Network, hash: Hash160) -> Self {
        Address { network, hash }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn public_key_hash(&self) -> &Hash160 {
        &self.hash
    }

    pub fn to_bytes(&self) -> [u8; HASH160_SIZE + 1] {
        let mut bytes = [0u8; HASH160_SIZE + 1];
        bytes[0] = self.network.prefixes().public_key_hash;
        bytes[1..].copy_from_slice(self.hash.as_ref());
        bytes
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58::encode_check(&self.to_bytes()))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(address: &str) -> Result<Self> {
        let payload = base58::decode_check(address)?;
        if payload.len() != HASH160_SIZE + 1 {
            return Err(Error::InvalidFormat(format!("address payload of {} bytes", payload.len())));
        }
        let network = Network::from_address_version(payload[0]).ok_or(Error::UnknownVersion(payload[0] as u32))?;
        let mut hash = [0u8; HASH160_SIZE];
        hash.copy_from_slice(&payload[1..]);
        Ok(Address { network, hash: Hash160::from_bytes(hash) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mainnet() {
        let address: Address = "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH".parse().unwrap();
        assert_eq!(address.network(), Network::Mainnet);
        assert_eq!(address.public_key_hash().to_string(), "751e76e8199196d454941c45d1b3a323f1433bd6");
        assert_eq!(address.to_string(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn test_network_versions() {
        let hash: Hash160 = "751e76e8199196d454941c45d1b3a323f1433bd6".parse().unwrap();
        let testnet = Address::p2pkh(Network::Testnet, hash).to_string();
        assert!(testnet.starts_with('m') || testnet.starts_with('n'));
        assert_eq!(testnet.parse::<Address>().unwrap(), Address::p2pkh(Network::Testnet, hash));

        let nol = Address::p2pkh(Network::Nol, hash).to_string();
        assert_eq!(nol.parse::<Address>().unwrap().network(), Network::Nol);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMJ".parse::<Address>(), Err(Error::Checksum));
        let short = base58::encode_check(&[0u8; 10]);
        assert!(matches!(short.parse::<Address>(), Err(Error::InvalidFormat(_))));
        let unknown = base58::encode_check(&[0x42u8; 21]);
        assert_eq!(unknown.parse::<Address>(), Err(Error::UnknownVersion(0x42)));
    }
}
