use std::fmt::{self, Display};

/// Size of a private key, a chain code, and an x coordinate.
pub const KEY_SIZE: usize = 32;

/// Chain code: extension for both private and public keys.
pub type ChainCode = [u8; KEY_SIZE];

/// Derivation depth.
pub type Depth = u8;

/// BIP32 key fingerprints.
pub type KeyFingerprint = [u8; 4];

/// Bytes which represent a private key.
pub type PrivateKeyBytes = [u8; KEY_SIZE];

/// Seed length bounds accepted for master key generation.
pub const MIN_SEED_SIZE: usize = 16;
pub const MAX_SEED_SIZE: usize = 64;

/// Whether a key (or a requested derivation result) is private or public.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyKind {
    Private,
    Public,
}

impl KeyKind {
    pub fn is_private(&self) -> bool {
        matches!(self, KeyKind::Private)
    }
}

impl Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Private => f.write_str("private"),
            KeyKind::Public => f.write_str("public"),
        }
    }
}
