use crate::{ChainCode, ChildNumber, Depth, KeyFingerprint};

/// Extended key attributes: fields common to extended keys including depth,
/// fingerprints, child numbers, and chain codes.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ExtendedKeyAttrs {
    /// Depth in the key derivation hierarchy.
    pub depth: Depth,

    /// Parent fingerprint.
    pub parent_fingerprint: KeyFingerprint,

    /// Child number.
    pub child_number: ChildNumber,

    /// Chain code.
    pub chain_code: ChainCode,
}

impl ExtendedKeyAttrs {
    /// Attributes of a master key: depth 0, zero fingerprint and child number.
    pub fn master(chain_code: ChainCode) -> Self {
        ExtendedKeyAttrs { chain_code, ..Default::default() }
    }

    pub fn is_master(&self) -> bool {
        self.depth == 0
    }
}
