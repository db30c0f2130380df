//! Derivation paths

use crate::{ChildNumber, Depth, Error, KeyKind, Result};
use core::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Prefix of paths that resolve to private keys.
const PRIVATE_PREFIX: &str = "m";
/// Prefix of paths that resolve to public keys.
const PUBLIC_PREFIX: &str = "M";

/// One step of a derivation path.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct DerivationLevel {
    depth: Depth,
    child_number: ChildNumber,
}

impl DerivationLevel {
    /// Depth of the key this level produces (the first level has depth 1).
    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    pub fn is_hardened(&self) -> bool {
        self.child_number.is_hardened()
    }
}

/// Derivation paths within a hierarchical keyspace, e.g. `m/44'/0'/0'` or `M/0/1`.
///
/// The leading `m` asks for a private key, `M` for a public one. Levels are
/// shared between a path and its [`DerivationPath::to_public`] copy.
#[derive(Clone, Debug)]
pub struct DerivationPath {
    kind: KeyKind,
    levels: Arc<[DerivationLevel]>,
    source: Arc<str>,
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D>(deserializer: D) -> std::result::Result<DerivationPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DerivationPathVisitor;
        impl<'de> de::Visitor<'de> for DerivationPathVisitor {
            type Value = DerivationPath;
            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a derivation path string such as m/44'/0'/0'")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                DerivationPath::from_str(value).map_err(|err| de::Error::custom(err.to_string()))
            }
        }

        deserializer.deserialize_str(DerivationPathVisitor)
    }
}

impl Serialize for DerivationPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.source)
    }
}

impl DerivationPath {
    /// Whether the path resolves to a private or a public key.
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn is_private(&self) -> bool {
        self.kind.is_private()
    }

    pub fn levels(&self) -> &[DerivationLevel] {
        &self.levels
    }

    /// Iterate over the levels in this derivation path.
    pub fn iter(&self) -> impl Iterator<Item = DerivationLevel> + '_ {
        self.levels.iter().copied()
    }

    /// Is this derivation path empty? (i.e. the root)
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the count of levels in this derivation path.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Get the parent [`DerivationPath`] for the current one.
    ///
    /// Returns `None` if this is already the root path.
    pub fn parent(&self) -> Option<Self> {
        self.levels.len().checked_sub(1).map(|n| {
            let levels: Arc<[DerivationLevel]> = self.levels[..n].into();
            let source = render(self.kind, &levels);
            DerivationPath { kind: self.kind, levels, source: source.into() }
        })
    }

    /// Copy of this path resolving to a public key, sharing the levels.
    pub fn to_public(&self) -> Self {
        if self.kind == KeyKind::Public {
            return self.clone();
        }
        let source = format!("{PUBLIC_PREFIX}{}", &self.source[PRIVATE_PREFIX.len()..]);
        DerivationPath { kind: KeyKind::Public, levels: self.levels.clone(), source: source.into() }
    }
}

fn render(kind: KeyKind, levels: &[DerivationLevel]) -> String {
    let mut path = String::from(if kind.is_private() { PRIVATE_PREFIX } else { PUBLIC_PREFIX });
    for level in levels {
        path.push('/');
        path.push_str(&level.child_number.to_string());
    }
    path
}

impl PartialEq for DerivationPath {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.levels == other.levels
    }
}

impl Eq for DerivationPath {}

impl Hash for DerivationPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.levels.hash(state);
    }
}

impl AsRef<[DerivationLevel]> for DerivationPath {
    fn as_ref(&self) -> &[DerivationLevel] {
        &self.levels
    }
}

/// Writes the path as it was parsed, so `h` and `'` markers round-trip.
impl Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<DerivationPath> {
        let mut segments = path.split('/');

        let kind = match segments.next() {
            Some(PRIVATE_PREFIX) => KeyKind::Private,
            Some(PUBLIC_PREFIX) => KeyKind::Public,
            _ => {
                return Err(Error::InvalidFormat(format!(
                    "derivation path `{path}` does not start with `{PRIVATE_PREFIX}` or `{PUBLIC_PREFIX}`"
                )))
            }
        };

        let levels = segments
            .enumerate()
            .map(|(index, segment)| {
                let depth = Depth::try_from(index + 1)
                    .map_err(|_| Error::InvalidFormat(format!("derivation path `{path}` is deeper than {} levels", Depth::MAX)))?;
                let child_number = segment.parse::<ChildNumber>().map_err(|err| match err {
                    Error::ChildNumber(index) => {
                        Error::InvalidFormat(format!("derivation path `{path}` has child index {index} outside of 0..2^31"))
                    }
                    err => err,
                })?;
                Ok(DerivationLevel { depth, child_number })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DerivationPath { kind, levels: levels.into(), source: path.into() })
    }
}
