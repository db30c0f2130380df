//!
//! Modular square roots.
//!

use crate::{legendre_symbol, Legendre, MathError, Result};
use num::{BigUint, Integer, One, Zero};

/// Compute `x` such that `x² ≡ a (mod p)` for a prime `p`.
///
/// Uses the `a^((p+1)/4)` shortcut when `p ≡ 3 (mod 4)` (which covers the
/// secp256k1 field) and Tonelli–Shanks otherwise. Returns
/// [`MathError::NotAResidue`] when no root exists; `a ≡ 0` yields `Ok(0)`.
pub fn mod_sqrt(a: &BigUint, p: &BigUint) -> Result<BigUint> {
    if p.is_zero() {
        return Err(MathError::ZeroModulus);
    }

    let a = a % p;
    if a.is_zero() {
        return Ok(a);
    }
    if *p == BigUint::from(2u32) {
        return Ok(a);
    }

    match legendre_symbol(&a, p) {
        Legendre::Residue => {}
        Legendre::Zero | Legendre::NonResidue => return Err(MathError::NotAResidue),
    }

    if p % 4u32 == BigUint::from(3u32) {
        let exponent = (p + 1u32) >> 2u32;
        return Ok(a.modpow(&exponent, p));
    }

    // p - 1 = s * 2^e with s odd
    let mut s: BigUint = p - 1u32;
    let mut e = 0u32;
    while s.is_even() {
        s >>= 1u32;
        e += 1;
    }

    // any quadratic non-residue will do
    let mut n = BigUint::from(2u32);
    while legendre_symbol(&n, p) != Legendre::NonResidue {
        n += 1u32;
    }

    let mut x = a.modpow(&((&s + 1u32) >> 1u32), p);
    let mut b = a.modpow(&s, p);
    let mut g = n.modpow(&s, p);
    let mut r = e;

    loop {
        let mut t = b.clone();
        let mut m = 0u32;
        while m < r && !t.is_one() {
            t = (&t * &t) % p;
            m += 1;
        }

        if m == 0 {
            return Ok(x);
        }
        if m == r {
            // b has full order, which only happens for a non-residue
            return Err(MathError::NotAResidue);
        }

        let gs = g.modpow(&(BigUint::one() << (r - m - 1)), p);
        g = (&gs * &gs) % p;
        x = (x * &gs) % p;
        b = (b * &g) % p;
        r = m;
    }
}
