//! Extended keys and their `xprv`/`xpub` serialization.

use crate::{
    base58, ChainCode, ChildNumber, Depth, Error, ExtendedKeyAttrs, KeyFingerprint, KeyKind, Network, PrivateKey, PublicKey, Result,
    KEY_SIZE, MAX_SEED_SIZE, MIN_SEED_SIZE,
};
use hdkeys_hashes::hmac_sha512;
use hdkeys_utils::{Deserializer, Endian, Serializer};
use zeroize::Zeroizing;

/// HMAC key for master key generation.
const MASTER_KEY_DOMAIN: &[u8] = b"Bitcoin seed";

/// Key held by an [`ExtendedKey`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyMaterial {
    Private(PrivateKey),
    Public(PublicKey),
}

impl KeyMaterial {
    pub fn kind(&self) -> KeyKind {
        match self {
            KeyMaterial::Private(_) => KeyKind::Private,
            KeyMaterial::Public(_) => KeyKind::Public,
        }
    }
}

/// A private or public key together with its chain code and position in
/// the hierarchy. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedKey {
    key: KeyMaterial,
    attrs: ExtendedKeyAttrs,
}

impl ExtendedKey {
    /// Size of a serialized extended key without the Base58Check checksum.
    pub const BYTE_SIZE: usize = 78;

    /// Size of [`ExtendedKey::signature`]: everything but the version bytes.
    pub const SIGNATURE_SIZE: usize = Self::BYTE_SIZE - 4;

    /// Maximum derivation depth.
    pub const MAX_DEPTH: Depth = u8::MAX;

    pub fn new_private(private_key: PrivateKey, attrs: ExtendedKeyAttrs) -> Self {
        ExtendedKey { key: KeyMaterial::Private(private_key), attrs }
    }

    /// Extended public keys always carry the compressed encoding.
    pub fn new_public(public_key: PublicKey, attrs: ExtendedKeyAttrs) -> Result<Self> {
        if !public_key.is_compressed() {
            return Err(Error::InvalidArgument("extended public keys must be compressed".to_string()));
        }
        Ok(ExtendedKey { key: KeyMaterial::Public(public_key), attrs })
    }

    /// Create the master private key for the given seed value.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if !(MIN_SEED_SIZE..=MAX_SEED_SIZE).contains(&seed.len()) {
            return Err(Error::SeedLength(seed.len()));
        }

        let digest = Zeroizing::new(hmac_sha512(MASTER_KEY_DOMAIN, &[seed])?);
        let (secret_key, chain_code) = digest.split_at(KEY_SIZE);
        let private_key = PrivateKey::from_bytes(secret_key)?;
        let mut attrs = ExtendedKeyAttrs::default();
        attrs.chain_code.copy_from_slice(chain_code);

        Ok(Self::new_private(private_key, attrs))
    }

    pub fn kind(&self) -> KeyKind {
        self.key.kind()
    }

    pub fn is_private(&self) -> bool {
        self.kind().is_private()
    }

    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }

    pub fn private_key(&self) -> Result<&PrivateKey> {
        match &self.key {
            KeyMaterial::Private(key) => Ok(key),
            KeyMaterial::Public(_) => Err(Error::WrongKeyKind { expected: KeyKind::Private, found: KeyKind::Public }),
        }
    }

    pub fn public_key(&self) -> Result<&PublicKey> {
        match &self.key {
            KeyMaterial::Public(key) => Ok(key),
            KeyMaterial::Private(_) => Err(Error::WrongKeyKind { expected: KeyKind::Public, found: KeyKind::Private }),
        }
    }

    /// Get attributes for this key such as depth, parent fingerprint,
    /// child number, and chain code.
    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        &self.attrs
    }

    pub fn depth(&self) -> Depth {
        self.attrs.depth
    }

    pub fn child_number(&self) -> ChildNumber {
        self.attrs.child_number
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.attrs.chain_code
    }

    pub fn parent_fingerprint(&self) -> KeyFingerprint {
        self.attrs.parent_fingerprint
    }

    /// The public counterpart of this key (BIP32 `N()`). Public keys are returned as is.
    pub fn to_public(&self) -> Result<ExtendedKey> {
        match &self.key {
            KeyMaterial::Private(key) => Self::new_public(key.to_public_key(Some(true))?, self.attrs.clone()),
            KeyMaterial::Public(_) => Ok(self.clone()),
        }
    }

    /// 33 key bytes: `0x00 || private key` or the compressed public key.
    fn write_key_bytes(&self, serializer: &mut Serializer) {
        match &self.key {
            KeyMaterial::Private(key) => serializer.write_u8(0).write_bytes(key.as_bytes()),
            KeyMaterial::Public(key) => serializer.write_bytes(key.as_bytes()),
        };
    }

    /// `depth || parent fingerprint || child number || chain code || key bytes`.
    ///
    /// Identifies the key among its siblings and is the serialized payload
    /// after the version bytes.
    pub fn signature(&self) -> Zeroizing<Vec<u8>> {
        let mut serializer = Serializer::with_capacity(Self::BYTE_SIZE);
        self.write_signature(&mut serializer);
        Zeroizing::new(serializer.into_bytes())
    }

    fn write_signature(&self, serializer: &mut Serializer) {
        serializer
            .write_u8(self.attrs.depth)
            .write_bytes(&self.attrs.parent_fingerprint)
            .write_u32(self.attrs.child_number.0, Endian::Big)
            .write_bytes(&self.attrs.chain_code);
        self.write_key_bytes(serializer);
    }

    /// Base58Check string with the network's version bytes (`xprv…`, `tpub…`).
    pub fn to_serialized(&self, network: Network) -> Zeroizing<String> {
        let mut serializer = Serializer::with_capacity(Self::BYTE_SIZE);
        serializer.write_u32(network.extended_version(self.kind()), Endian::Big);
        self.write_signature(&mut serializer);
        let bytes = Zeroizing::new(serializer.into_bytes());
        Zeroizing::new(base58::encode_check(&bytes))
    }

    /// Parses a serialized extended key, returning it with the network its
    /// version bytes belong to.
    pub fn from_serialized(encoded: &str) -> Result<(ExtendedKey, Network)> {
        let bytes = base58::decode_check(encoded)?;
        if bytes.len() != Self::BYTE_SIZE {
            return Err(Error::InvalidFormat(format!("extended key is {} bytes, expected {}", bytes.len(), Self::BYTE_SIZE)));
        }

        let mut deserializer = Deserializer::new(&bytes);
        let version = deserializer.read_u32(Endian::Big)?;
        let (network, kind) = Network::from_extended_version(version).ok_or(Error::UnknownVersion(version))?;

        let mut attrs = ExtendedKeyAttrs { depth: deserializer.read_u8()?, ..Default::default() };
        attrs.parent_fingerprint.copy_from_slice(deserializer.read_bytes(4)?);
        attrs.child_number = ChildNumber(deserializer.read_u32(Endian::Big)?);
        attrs.chain_code.copy_from_slice(deserializer.read_bytes(KEY_SIZE)?);
        let key_bytes = deserializer.read_bytes(KEY_SIZE + 1)?;

        if attrs.depth == 0 && (attrs.parent_fingerprint != KeyFingerprint::default() || attrs.child_number.0 != 0) {
            return Err(Error::InvalidFormat("master key with a parent fingerprint or child number".to_string()));
        }

        let key = match kind {
            KeyKind::Private if key_bytes[0] == 0 => Self::new_private(PrivateKey::from_bytes(&key_bytes[1..])?, attrs),
            KeyKind::Private => return Err(Error::InvalidFormat("private key bytes must start with 0x00".to_string())),
            KeyKind::Public => Self::new_public(PublicKey::from_bytes(key_bytes)?, attrs)?,
        };

        Ok((key, network))
    }
}
