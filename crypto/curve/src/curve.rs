use crate::CurvePoint;
use hdkeys_math::{from_be_bytes, mod_add, mod_mul, BigUint};
use hex_literal::hex;
use once_cell::sync::Lazy;

const FIELD: [u8; 32] = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");
const ORDER: [u8; 32] = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");
const GENERATOR_X: [u8; 32] = hex!("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");
const GENERATOR_Y: [u8; 32] = hex!("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8");

/// The secp256k1 curve `y² = x³ + 7` over the prime field `p`.
pub static SECP256K1: Lazy<Curve> = Lazy::new(Curve::secp256k1);

/// Short Weierstrass curve with `a = 0`.
#[derive(Clone, Debug)]
pub struct Curve {
    field: BigUint,
    generator: CurvePoint,
    order: BigUint,
    b: BigUint,
}

impl Curve {
    fn secp256k1() -> Self {
        Curve {
            field: from_be_bytes(&FIELD),
            generator: CurvePoint::from_coordinates(from_be_bytes(&GENERATOR_X), from_be_bytes(&GENERATOR_Y)),
            order: from_be_bytes(&ORDER),
            b: BigUint::from(7u32),
        }
    }

    /// Field prime `p`.
    pub fn field(&self) -> &BigUint {
        &self.field
    }

    /// Base point `G`.
    pub fn generator(&self) -> &CurvePoint {
        &self.generator
    }

    /// Order `n` of the base point.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Right-hand side of the curve equation, `x³ + b mod p`.
    pub fn rhs(&self, x: &BigUint) -> BigUint {
        let x_cubed = mod_mul(&mod_mul(x, x, &self.field), x, &self.field);
        mod_add(&x_cubed, &self.b, &self.field)
    }

    /// Checks the curve equation for `point`.
    pub fn contains(&self, point: &CurvePoint) -> bool {
        point.x() < &self.field && point.y() < &self.field && mod_mul(point.y(), point.y(), &self.field) == self.rhs(point.x())
    }
}
