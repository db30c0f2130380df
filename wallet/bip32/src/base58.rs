//! Base58Check: Base58 over the payload followed by the first four bytes of its double SHA-256.

use crate::{Error, Result};
use zeroize::Zeroizing;

pub fn encode_check(payload: &[u8]) -> String {
    bs58::encode(payload).with_check().into_string()
}

/// Decodes and strips the checksum.
pub fn decode_check(encoded: &str) -> Result<Zeroizing<Vec<u8>>> {
    let data = bs58::decode(encoded).with_check(None).into_vec().map_err(|err| match err {
        bs58::decode::Error::InvalidChecksum { .. } => Error::Checksum,
        bs58::decode::Error::NoChecksum => Error::InvalidFormat(format!("base58check string `{encoded}` is too short")),
        err => Error::Base58(err),
    })?;
    Ok(Zeroizing::new(data))
}
