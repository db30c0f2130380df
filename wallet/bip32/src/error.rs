//!
//! Error types emitted by key parsing and derivation.
//!

use crate::{ChildNumber, KeyKind};
use hdkeys_curve::CurveError;
use hdkeys_hashes::InvalidLength;
use hdkeys_math::MathError;
use hdkeys_utils::SerializationError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid child index {0} (must be below 2^31)")]
    ChildNumber(u32),

    #[error("Hardened child {0} cannot be derived from a public key")]
    HardenedDerivationUnsupported(ChildNumber),

    #[error("Private key is not available")]
    PrivateKeyUnavailable,

    #[error("Derivation impossible: {0}")]
    DerivationImpossible(String),

    #[error("Invalid key material: scalar is zero or not below the curve order")]
    InvalidKeyMaterial,

    #[error("Expected a {expected} key, found a {found} key")]
    WrongKeyKind { expected: KeyKind, found: KeyKind },

    #[error("Maximum derivation depth exceeded")]
    Depth,

    #[error("Seed length {0} is outside of 16..=64 bytes")]
    SeedLength(usize),

    #[error("Invalid checksum")]
    Checksum,

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Unknown version bytes 0x{0:08x}")]
    UnknownVersion(u32),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error("Serialization -> {0}")]
    Serialization(#[from] SerializationError),

    #[error("Base58 -> {0}")]
    Base58(#[from] bs58::decode::Error),

    /// HMAC-SHA512 takes keys of any length, so this is never produced in practice.
    #[error("Invalid HMAC key length")]
    Hmac,
}

impl From<InvalidLength> for Error {
    fn from(_: InvalidLength) -> Error {
        Error::Hmac
    }
}

impl Error {
    /// True for the failures that mean the requested key cannot be reached
    /// from the keys known to the caller.
    pub fn is_derivation_impossible(&self) -> bool {
        matches!(self, Error::DerivationImpossible(_) | Error::HardenedDerivationUnsupported(_) | Error::PrivateKeyUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Error::from(InvalidLength), Error::Hmac);
        assert_eq!(Error::from(MathError::NotAResidue), Error::Math(MathError::NotAResidue));
        assert!(Error::PrivateKeyUnavailable.is_derivation_impossible());
        assert!(!Error::InvalidKeyMaterial.is_derivation_impossible());
    }
}
