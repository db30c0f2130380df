use crate::{Address, Error, KeyFingerprint, Network, Result};
use hdkeys_curve::{CurvePoint, COMPRESSED_POINT_SIZE, UNCOMPRESSED_POINT_SIZE};
use hdkeys_hashes::{hash160, Hash160};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

/// SEC1-encoded secp256k1 public key, 33 bytes compressed or 65 uncompressed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Parses and validates the encoding. Uncompressed points must satisfy
    /// the curve equation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = CurvePoint::from_bytes(bytes)?;
        if !point.is_on_curve() {
            return Err(Error::InvalidArgument("public key point is not on the curve".to_string()));
        }
        Ok(PublicKey { bytes: bytes.to_vec() })
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_bytes(&hdkeys_utils::decode_hex(hex)?)
    }

    pub fn from_curve_point(point: &CurvePoint, compressed: bool) -> Self {
        PublicKey { bytes: point.to_bytes(compressed) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_compressed(&self) -> bool {
        self.bytes.len() == COMPRESSED_POINT_SIZE
    }

    pub fn to_curve_point(&self) -> Result<CurvePoint> {
        Ok(CurvePoint::from_bytes(&self.bytes)?)
    }

    /// Re-encodes the key in the requested form.
    pub fn to_encoding(&self, compressed: bool) -> Result<PublicKey> {
        if self.is_compressed() == compressed {
            return Ok(self.clone());
        }
        Ok(Self::from_curve_point(&self.to_curve_point()?, compressed))
    }

    pub fn hash160(&self) -> Hash160 {
        hash160(&self.bytes)
    }

    /// First four bytes of HASH160 over the key bytes as encoded.
    pub fn fingerprint(&self) -> KeyFingerprint {
        self.hash160().fingerprint()
    }

    pub fn to_address(&self, network: Network) -> Address {
        Address::p2pkh(network, self.hash160())
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hex = [0u8; UNCOMPRESSED_POINT_SIZE * 2];
        let encoded = faster_hex::hex_encode(&self.bytes, &mut hex[..self.bytes.len() * 2]).map_err(|_| fmt::Error)?;
        f.write_str(encoded)
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(hex: &str) -> Result<Self> {
        Self::from_hex(hex)
    }
}
