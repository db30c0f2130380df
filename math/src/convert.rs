use crate::{MathError, Result};
use num::BigUint;

/// Interpret `bytes` as an unsigned big-endian integer.
#[inline]
pub fn from_be_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Serialize `value` as exactly `N` big-endian bytes, left-padded with zeros.
pub fn to_be_bytes_fixed<const N: usize>(value: &BigUint) -> Result<[u8; N]> {
    let bytes = value.to_bytes_be();
    // `to_bytes_be` yields a single `0` byte for zero
    let significant = if bytes == [0] { &[][..] } else { &bytes[..] };
    if significant.len() > N {
        return Err(MathError::Overflow(N));
    }
    let mut out = [0u8; N];
    out[N - significant.len()..].copy_from_slice(significant);
    Ok(out)
}
