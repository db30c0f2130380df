//!
//! Field helpers. Every function reduces its operands first, so callers may
//! pass values outside `[0, m)`.
//!

use crate::{MathError, Result};
use num::{BigUint, One, Zero};

/// Result of Euler's criterion `a^((p-1)/2) mod p`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Legendre {
    /// `a ≡ 0 (mod p)`
    Zero,
    /// `a` is a non-zero quadratic residue
    Residue,
    /// `a` has no square root modulo `p`
    NonResidue,
}

#[inline]
pub fn mod_add(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// `(a - b) mod m`, never underflowing.
pub fn mod_sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    let b = b % m;
    if a >= b {
        a - b
    } else {
        m - b + a
    }
}

#[inline]
pub fn mod_mul(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// Multiplicative inverse of `a` modulo `m`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(MathError::ZeroModulus);
    }
    (a % m).modinv(m).ok_or(MathError::NotInvertible)
}

/// Legendre symbol `a|p` computed with Euler's criterion. `p` must be an odd prime.
pub fn legendre_symbol(a: &BigUint, p: &BigUint) -> Legendre {
    let p_minus_one = p - 1u32;
    let symbol = (a % p).modpow(&(&p_minus_one >> 1u32), p);
    if symbol.is_zero() {
        Legendre::Zero
    } else if symbol.is_one() {
        Legendre::Residue
    } else {
        Legendre::NonResidue
    }
}
