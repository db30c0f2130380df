use crate::{base58, Error, Network, PrivateKeyBytes, PublicKey, Result, KEY_SIZE};
use hdkeys_curve::{CurvePoint, SECP256K1};
use hdkeys_math::{from_be_bytes, to_be_bytes_fixed, BigUint};
use num::Zero;
use std::fmt::{self, Debug};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// secp256k1 secret scalar in `[1, n-1]`, stored as 32 big-endian bytes.
///
/// `compress_public_key` selects the encoding of public keys derived from it
/// when the caller does not ask for one explicitly.
#[derive(Clone)]
pub struct PrivateKey {
    bytes: Zeroizing<PrivateKeyBytes>,
    compress_public_key: bool,
}

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: PrivateKeyBytes = bytes
            .try_into()
            .map_err(|_| Error::InvalidArgument(format!("private key must be {KEY_SIZE} bytes, got {}", bytes.len())))?;
        let bytes = Zeroizing::new(bytes);
        check_range(&from_be_bytes(bytes.as_slice()))?;
        Ok(PrivateKey { bytes, compress_public_key: true })
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hdkeys_utils::decode_hex(hex)?);
        Self::from_bytes(&bytes)
    }

    /// Left-pads the scalar to 32 bytes.
    pub fn from_scalar(scalar: &BigUint) -> Result<Self> {
        check_range(scalar)?;
        Ok(PrivateKey { bytes: Zeroizing::new(to_be_bytes_fixed(scalar)?), compress_public_key: true })
    }

    pub fn with_compression(mut self, compress_public_key: bool) -> Self {
        self.compress_public_key = compress_public_key;
        self
    }

    pub fn compress_public_key(&self) -> bool {
        self.compress_public_key
    }

    pub fn to_bytes(&self) -> PrivateKeyBytes {
        *self.bytes
    }

    pub fn as_bytes(&self) -> &PrivateKeyBytes {
        &self.bytes
    }

    pub fn scalar(&self) -> BigUint {
        from_be_bytes(self.bytes.as_slice())
    }

    pub fn to_curve_point(&self) -> Result<CurvePoint> {
        Ok(CurvePoint::from_scalar(&self.scalar())?)
    }

    /// Public key in the requested encoding, or in the key's own
    /// `compress_public_key` encoding when `compressed` is `None`.
    pub fn to_public_key(&self, compressed: Option<bool>) -> Result<PublicKey> {
        let point = self.to_curve_point()?;
        Ok(PublicKey::from_curve_point(&point, compressed.unwrap_or(self.compress_public_key)))
    }

    /// Wallet Import Format: `version || key || [0x01 if compressed]`, Base58Check encoded.
    pub fn to_wif(&self, network: Network) -> Zeroizing<String> {
        let mut payload = Zeroizing::new(Vec::with_capacity(KEY_SIZE + 2));
        payload.push(network.prefixes().wif);
        payload.extend_from_slice(self.bytes.as_slice());
        if self.compress_public_key {
            payload.push(WIF_COMPRESSED_FLAG);
        }
        Zeroizing::new(base58::encode_check(&payload))
    }

    /// Parses a WIF string. The compression flag comes from the trailing
    /// `0x01` marker.
    pub fn from_wif(wif: &str) -> Result<(Self, Network)> {
        let payload = base58::decode_check(wif)?;
        let (version, rest) = payload.split_first().ok_or_else(|| Error::InvalidFormat("empty WIF payload".to_string()))?;
        let network = Network::from_wif_version(*version).ok_or(Error::UnknownVersion(*version as u32))?;
        let (key, compressed) = match rest.len() {
            KEY_SIZE => (rest, false),
            n if n == KEY_SIZE + 1 && rest[KEY_SIZE] == WIF_COMPRESSED_FLAG => (&rest[..KEY_SIZE], true),
            n => return Err(Error::InvalidFormat(format!("WIF key payload of {n} bytes"))),
        };
        Ok((Self::from_bytes(key)?.with_compression(compressed), network))
    }
}

fn check_range(scalar: &BigUint) -> Result<()> {
    if scalar.is_zero() || scalar >= SECP256K1.order() {
        return Err(Error::InvalidKeyMaterial);
    }
    Ok(())
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.as_slice().ct_eq(other.bytes.as_slice()) & Choice::from((self.compress_public_key == other.compress_public_key) as u8)
    }
}

/// NOTE: uses [`ConstantTimeEq`] internally
impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PrivateKey {}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").field("key", &"...").field("compress_public_key", &self.compress_public_key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_range() {
        assert!(PrivateKey::from_hex(ONE).is_ok());
        assert_eq!(PrivateKey::from_bytes(&[0u8; 32]), Err(Error::InvalidKeyMaterial));
        assert_eq!(PrivateKey::from_scalar(SECP256K1.order()), Err(Error::InvalidKeyMaterial));
        assert!(matches!(PrivateKey::from_bytes(&[1u8; 31]), Err(Error::InvalidArgument(_))));

        let max = PrivateKey::from_scalar(&(SECP256K1.order() - 1u32)).unwrap();
        assert_eq!(max.to_bytes()[31], 0x40);
    }

    #[test]
    fn test_from_scalar_pads() {
        let key = PrivateKey::from_scalar(&BigUint::from(0x0102u32)).unwrap();
        assert_eq!(key.to_bytes()[..30], [0u8; 30]);
        assert_eq!(key.to_bytes()[30..], [0x01, 0x02]);
        assert_eq!(key.scalar(), BigUint::from(0x0102u32));
    }

    #[test]
    fn test_public_key_encoding() {
        let key = PrivateKey::from_hex(ONE).unwrap();
        assert_eq!(key.to_public_key(None).unwrap().as_bytes().len(), 33);
        assert_eq!(key.to_public_key(Some(false)).unwrap().as_bytes().len(), 65);
        let uncompressed = key.clone().with_compression(false);
        assert_eq!(uncompressed.to_public_key(None).unwrap().as_bytes().len(), 65);
        assert_ne!(key, uncompressed);
        assert_eq!(key.to_public_key(None).unwrap().to_string(), "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    }

    #[test]
    fn test_wif() {
        let key = PrivateKey::from_hex(ONE).unwrap();
        assert_eq!(key.to_wif(Network::Mainnet).as_str(), "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn");
        let uncompressed = key.clone().with_compression(false);
        assert_eq!(uncompressed.to_wif(Network::Mainnet).as_str(), "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf");

        let (parsed, network) = PrivateKey::from_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap();
        assert_eq!(network, Network::Mainnet);
        assert_eq!(parsed, key);
        let (parsed, _) = PrivateKey::from_wif("5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf").unwrap();
        assert!(!parsed.compress_public_key());

        let testnet = key.to_wif(Network::Testnet);
        assert!(testnet.starts_with('c'));
        assert_eq!(PrivateKey::from_wif(&testnet).unwrap().1, Network::Testnet);
    }

    #[test]
    fn test_debug_redacts() {
        let key = PrivateKey::from_hex(ONE).unwrap();
        assert!(!format!("{key:?}").contains("01"));
    }
}
