//!
//! BIP32 key derivation engine with an LRU cache of derived keys.
//!

use crate::{
    Cache, ChildNumber, DerivationPath, Depth, Error, ExtendedKey, ExtendedKeyAttrs, KeyKind, PrivateKey, PublicKey, Result, WalletConfig,
    KEY_SIZE,
};
use hdkeys_curve::{CurvePoint, SECP256K1};
use hdkeys_hashes::hmac_sha512;
use hdkeys_math::{from_be_bytes, BigUint};
use log::{debug, trace};
use num::Zero;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use zeroize::Zeroizing;

/// Counters describing the work done by a [`Wallet`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DerivationStats {
    pub hmac_invocations: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// Cache key of a derived child: the kind of the result, the parent's
/// signature, and the requested depth and child number.
#[derive(PartialEq, Eq)]
struct ChildKeySignature {
    kind: KeyKind,
    parent: Zeroizing<Vec<u8>>,
    depth: Depth,
    child_number: ChildNumber,
}

impl ChildKeySignature {
    fn new(kind: KeyKind, parent: &ExtendedKey, child_number: ChildNumber) -> Result<Self> {
        let depth = parent.depth().checked_add(1).ok_or(Error::Depth)?;
        Ok(ChildKeySignature { kind, parent: parent.signature(), depth, child_number })
    }
}

impl Hash for ChildKeySignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.parent.as_slice().hash(state);
        self.depth.hash(state);
        self.child_number.hash(state);
    }
}

/// Derives keys along [`DerivationPath`]s from a master key pair.
///
/// Every derived key is cached, so repeated requests for the same node (or
/// for paths sharing a prefix) reuse earlier work. Derivation mutates the
/// cache and takes `&mut self`.
pub struct Wallet {
    master_public_key: Arc<ExtendedKey>,
    master_private_key: Option<Arc<ExtendedKey>>,
    cache: Cache<ChildKeySignature, Arc<ExtendedKey>>,
    config: WalletConfig,
    stats: DerivationStats,
}

impl Wallet {
    /// Builds a wallet from master keys. Public-only wallets pass `None`
    /// as the private key and can only derive non-hardened public children.
    pub fn new(master_public_key: ExtendedKey, master_private_key: Option<ExtendedKey>) -> Result<Self> {
        if master_public_key.is_private() {
            return Err(Error::WrongKeyKind { expected: KeyKind::Public, found: KeyKind::Private });
        }
        if let Some(private) = &master_private_key {
            if !private.is_private() {
                return Err(Error::WrongKeyKind { expected: KeyKind::Private, found: KeyKind::Public });
            }
            if private.to_public()? != master_public_key {
                return Err(Error::InvalidArgument("master public key does not match the master private key".to_string()));
            }
        }

        let config = WalletConfig::default();
        Ok(Wallet {
            master_public_key: Arc::new(master_public_key),
            master_private_key: master_private_key.map(Arc::new),
            cache: Cache::new(config.cache_capacity),
            config,
            stats: DerivationStats::default(),
        })
    }

    /// Master keys from a 16 to 64 byte seed.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let master_private_key = ExtendedKey::from_seed(seed)?;
        Self::new(master_private_key.to_public()?, Some(master_private_key))
    }

    /// Applies `config`, resizing (and emptying) the cache.
    pub fn with_config(mut self, config: WalletConfig) -> Self {
        self.cache = Cache::new(config.cache_capacity);
        self.config = config;
        self
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn master_public_key(&self) -> Arc<ExtendedKey> {
        self.master_public_key.clone()
    }

    pub fn master_private_key(&self) -> Result<Arc<ExtendedKey>> {
        self.master_private_key.clone().ok_or(Error::PrivateKeyUnavailable)
    }

    pub fn has_private_key(&self) -> bool {
        self.master_private_key.is_some()
    }

    pub fn stats(&self) -> DerivationStats {
        self.stats
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Resolves `path` to a key.
    ///
    /// Intermediate levels are derived privately whenever the private master
    /// key is known; only the last level honours the public/private kind of
    /// the path.
    pub fn get_key(&mut self, path: &DerivationPath) -> Result<Arc<ExtendedKey>> {
        if path.is_empty() {
            return match path.kind() {
                KeyKind::Private => self.master_private_key(),
                KeyKind::Public => Ok(self.master_public_key()),
            };
        }

        if path.is_private() && self.master_private_key.is_none() {
            return Err(Error::DerivationImpossible(format!("`{path}` needs a private key but only the public master key is known")));
        }

        let mut current = self.master_private_key.clone().unwrap_or_else(|| self.master_public_key.clone());
        let terminal_depth = path.len();
        for level in path.iter() {
            let terminal = level.depth() as usize == terminal_depth;
            let child_number = level.child_number();
            current = match (current.kind(), terminal, path.kind()) {
                (KeyKind::Private, true, KeyKind::Public) => self.derive_public_child_from_private(&current, child_number)?,
                (KeyKind::Private, _, _) => self.derive_private_child_from_private(&current, child_number)?,
                (KeyKind::Public, _, _) => self.derive_public_child_from_public(&current, child_number)?,
            };
        }

        Ok(current)
    }

    /// [`Wallet::get_key`] serialized for the configured network.
    pub fn get_serialized_key(&mut self, path: &DerivationPath) -> Result<Zeroizing<String>> {
        let network = self.config.network;
        Ok(self.get_key(path)?.to_serialized(network))
    }

    /// BIP32 `CKDpriv`.
    pub fn derive_private_child_from_private(&mut self, parent: &ExtendedKey, child_number: ChildNumber) -> Result<Arc<ExtendedKey>> {
        parent.private_key()?;
        self.cached(KeyKind::Private, parent, child_number, |wallet| {
            with_next_index_on_invalid(child_number, |child_number| ckd_priv(parent, child_number, &mut wallet.stats))
        })
    }

    /// BIP32 `N(CKDpriv(parent, i))`: the public key of the private child.
    pub fn derive_public_child_from_private(&mut self, parent: &ExtendedKey, child_number: ChildNumber) -> Result<Arc<ExtendedKey>> {
        parent.private_key()?;
        self.cached(KeyKind::Public, parent, child_number, |wallet| {
            wallet.derive_private_child_from_private(parent, child_number)?.to_public()
        })
    }

    /// BIP32 `CKDpub`. Fails for hardened child numbers.
    pub fn derive_public_child_from_public(&mut self, parent: &ExtendedKey, child_number: ChildNumber) -> Result<Arc<ExtendedKey>> {
        if child_number.is_hardened() {
            return Err(Error::HardenedDerivationUnsupported(child_number));
        }
        parent.public_key()?;
        self.cached(KeyKind::Public, parent, child_number, |wallet| {
            with_next_index_on_invalid(child_number, |child_number| ckd_pub(parent, child_number, &mut wallet.stats))
        })
    }

    fn cached<F>(&mut self, kind: KeyKind, parent: &ExtendedKey, child_number: ChildNumber, derive: F) -> Result<Arc<ExtendedKey>>
    where
        F: FnOnce(&mut Self) -> Result<ExtendedKey>,
    {
        let signature = ChildKeySignature::new(kind, parent, child_number)?;
        if let Some(key) = self.cache.get(&signature) {
            self.stats.cache_hits += 1;
            trace!("cache hit: {kind} child {child_number} at depth {}", signature.depth);
            return Ok(key);
        }

        self.stats.cache_misses += 1;
        trace!("cache miss: {kind} child {child_number} at depth {}", signature.depth);
        let key = Arc::new(derive(self)?);
        debug!("derived {kind} key at depth {} (child {})", key.depth(), key.child_number());
        self.cache.insert(signature, key.clone());
        Ok(key)
    }
}

/// Runs `derive` for `child_number`, moving on to the next index of the
/// same range while it reports [`Error::InvalidKeyMaterial`].
fn with_next_index_on_invalid<F>(child_number: ChildNumber, mut derive: F) -> Result<ExtendedKey>
where
    F: FnMut(ChildNumber) -> Result<ExtendedKey>,
{
    let mut child_number = child_number;
    loop {
        match derive(child_number) {
            Err(Error::InvalidKeyMaterial) => {
                debug!("child {child_number} yields invalid key material, skipping");
                child_number = child_number.checked_next().ok_or(Error::InvalidKeyMaterial)?;
            }
            result => return result,
        }
    }
}

/// Splits an HMAC-SHA512 output into `IL` as an integer and `IR` as a chain code.
/// `IL` must be below the curve order.
fn split_digest(digest: &[u8; 64]) -> Result<(BigUint, [u8; KEY_SIZE])> {
    let (il, ir) = digest.split_at(KEY_SIZE);
    let il = from_be_bytes(il);
    if &il >= SECP256K1.order() {
        return Err(Error::InvalidKeyMaterial);
    }
    let mut chain_code = [0u8; KEY_SIZE];
    chain_code.copy_from_slice(ir);
    Ok((il, chain_code))
}

fn ckd_priv(parent: &ExtendedKey, child_number: ChildNumber, stats: &mut DerivationStats) -> Result<ExtendedKey> {
    let parent_key = parent.private_key()?;
    let depth = parent.depth().checked_add(1).ok_or(Error::Depth)?;
    let parent_public = parent_key.to_public_key(Some(true))?;

    let data = if child_number.is_hardened() {
        let mut data = Zeroizing::new(Vec::with_capacity(KEY_SIZE + 1));
        data.push(0);
        data.extend_from_slice(parent_key.as_bytes());
        data
    } else {
        Zeroizing::new(parent_public.as_bytes().to_vec())
    };

    stats.hmac_invocations += 1;
    let digest = Zeroizing::new(hmac_sha512(parent.chain_code(), &[data.as_slice(), child_number.to_bytes().as_slice()])?);
    let (il, chain_code) = split_digest(&digest)?;

    let scalar = (&il + parent_key.scalar()) % SECP256K1.order();
    if scalar.is_zero() {
        return Err(Error::InvalidKeyMaterial);
    }
    let private_key = PrivateKey::from_scalar(&scalar)?.with_compression(parent_key.compress_public_key());

    let attrs = ExtendedKeyAttrs { depth, parent_fingerprint: parent_public.fingerprint(), child_number, chain_code };
    Ok(ExtendedKey::new_private(private_key, attrs))
}

fn ckd_pub(parent: &ExtendedKey, child_number: ChildNumber, stats: &mut DerivationStats) -> Result<ExtendedKey> {
    if child_number.is_hardened() {
        return Err(Error::HardenedDerivationUnsupported(child_number));
    }
    let parent_key = parent.public_key()?;
    let depth = parent.depth().checked_add(1).ok_or(Error::Depth)?;

    stats.hmac_invocations += 1;
    let digest = hmac_sha512(parent.chain_code(), &[parent_key.as_bytes(), child_number.to_bytes().as_slice()])?;
    let (il, chain_code) = split_digest(&digest)?;
    let point = tweak_point(parent_key.to_curve_point()?, &il)?;

    let attrs = ExtendedKeyAttrs { depth, parent_fingerprint: parent_key.fingerprint(), child_number, chain_code };
    ExtendedKey::new_public(PublicKey::from_curve_point(&point, true), attrs)
}

/// `IL·G + K_par`.
fn tweak_point(parent_point: CurvePoint, il: &BigUint) -> Result<CurvePoint> {
    if il.is_zero() {
        return Ok(parent_point);
    }
    let tweak = CurvePoint::from_scalar(il)?;
    if tweak == parent_point {
        Ok(tweak.double()?)
    } else if tweak.x() == parent_point.x() {
        // IL·G = -K_par, the sum is the point at infinity
        Err(Error::InvalidKeyMaterial)
    } else {
        Ok(tweak.add(&parent_point)?)
    }
}
