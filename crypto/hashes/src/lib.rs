use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use std::fmt::{Debug, Display, Formatter};
use std::str::{self, FromStr};

pub use hmac::digest::InvalidLength;

pub const HASH160_SIZE: usize = 20;

pub type HmacSha512 = Hmac<Sha512>;

/// RIPEMD-160 of SHA-256, the identifier of public keys and scripts.
#[derive(PartialEq, Eq, Clone, Copy, Hash, Default, Debug)]
pub struct Hash160([u8; HASH160_SIZE]);

impl Hash160 {
    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; HASH160_SIZE]) -> Self {
        Hash160(bytes)
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> [u8; HASH160_SIZE] {
        self.0
    }

    /// First four bytes, used as a BIP32 key fingerprint.
    #[inline]
    pub fn fingerprint(&self) -> [u8; 4] {
        [self.0[0], self.0[1], self.0[2], self.0[3]]
    }
}

impl AsRef<[u8]> for Hash160 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Hash160 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut hex = [0u8; HASH160_SIZE * 2];
        let encoded = faster_hex::hex_encode(&self.0, &mut hex).map_err(|_| std::fmt::Error)?;
        f.write_str(encoded)
    }
}

impl FromStr for Hash160 {
    type Err = faster_hex::Error;

    fn from_str(hash_str: &str) -> Result<Self, Self::Err> {
        if hash_str.len() != HASH160_SIZE * 2 {
            return Err(faster_hex::Error::InvalidLength(hash_str.len()));
        }
        let mut bytes = [0u8; HASH160_SIZE];
        faster_hex::hex_decode(hash_str.as_bytes(), &mut bytes)?;
        Ok(Hash160(bytes))
    }
}

#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice.
#[inline]
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

#[inline]
pub fn hash160(data: &[u8]) -> Hash160 {
    Hash160(Ripemd160::digest(Sha256::digest(data)).into())
}

/// HMAC-SHA512 of the concatenation of `parts`, keyed with `key`.
pub fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<[u8; 64], InvalidLength> {
    let mut hmac = HmacSha512::new_from_slice(key)?;
    for part in parts {
        hmac.update(part);
    }
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&hmac.finalize().into_bytes());
    Ok(digest)
}
