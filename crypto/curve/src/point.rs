use crate::{CurveError, Result, SECP256K1};
use hdkeys_math::{from_be_bytes, mod_inverse, mod_mul, mod_sqrt, mod_sub, to_be_bytes_fixed, BigUint};
use num::{Integer, Zero};
use std::fmt::{Display, Formatter};

pub const COORDINATE_SIZE: usize = 32;
pub const COMPRESSED_POINT_SIZE: usize = 1 + COORDINATE_SIZE;
pub const UNCOMPRESSED_POINT_SIZE: usize = 1 + 2 * COORDINATE_SIZE;

const EVEN_PREFIX: u8 = 0x02;
const ODD_PREFIX: u8 = 0x03;
const UNCOMPRESSED_PREFIX: u8 = 0x04;

/// Affine point on secp256k1.
///
/// The point at infinity has no representation. Operations that would
/// produce it fail with [`CurveError::InvalidOperation`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurvePoint {
    x: BigUint,
    y: BigUint,
}

impl CurvePoint {
    pub(crate) fn from_coordinates(x: BigUint, y: BigUint) -> Self {
        CurvePoint { x, y }
    }

    pub fn generator() -> Self {
        SECP256K1.generator().clone()
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    pub fn is_on_curve(&self) -> bool {
        SECP256K1.contains(self)
    }

    /// Computes `scalar·G`. The scalar must lie in `[1, n-1]`.
    pub fn from_scalar(scalar: &BigUint) -> Result<Self> {
        SECP256K1.generator().multiply(scalar)
    }

    /// Chord addition. Fails when both points share an x coordinate,
    /// which covers doubling (use [`CurvePoint::double`]) and `P + (-P)`.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &CurvePoint) -> Result<CurvePoint> {
        if self.x == other.x {
            return Err(CurveError::InvalidOperation("addition of points with equal x coordinates"));
        }
        let p = SECP256K1.field();
        let numerator = mod_sub(&other.y, &self.y, p);
        let denominator = mod_sub(&other.x, &self.x, p);
        let lambda = mod_mul(&numerator, &mod_inverse(&denominator, p)?, p);
        Ok(self.complete(&lambda, &other.x))
    }

    /// Tangent doubling. Fails for points with `y = 0`.
    pub fn double(&self) -> Result<CurvePoint> {
        if self.y.is_zero() {
            return Err(CurveError::InvalidOperation("doubling a point with y = 0"));
        }
        let p = SECP256K1.field();
        let numerator = mod_mul(&BigUint::from(3u32), &mod_mul(&self.x, &self.x, p), p);
        let denominator = mod_mul(&BigUint::from(2u32), &self.y, p);
        let lambda = mod_mul(&numerator, &mod_inverse(&denominator, p)?, p);
        Ok(self.complete(&lambda, &self.x))
    }

    // x3 = λ² - x1 - x2, y3 = λ(x1 - x3) - y1
    fn complete(&self, lambda: &BigUint, other_x: &BigUint) -> CurvePoint {
        let p = SECP256K1.field();
        let x = mod_sub(&mod_sub(&mod_mul(lambda, lambda, p), &self.x, p), other_x, p);
        let y = mod_sub(&mod_mul(lambda, &mod_sub(&self.x, &x, p), p), &self.y, p);
        CurvePoint { x, y }
    }

    /// Left-to-right double-and-add. The scalar must lie in `[1, n-1]`.
    pub fn multiply(&self, scalar: &BigUint) -> Result<CurvePoint> {
        if scalar.is_zero() || scalar >= SECP256K1.order() {
            return Err(CurveError::InvalidScalar);
        }
        let mut acc = self.clone();
        for bit in (0..scalar.bits() - 1).rev() {
            acc = acc.double()?;
            if scalar.bit(bit) {
                acc = acc.add(self)?;
            }
        }
        Ok(acc)
    }

    pub fn negate(&self) -> CurvePoint {
        let p = SECP256K1.field();
        CurvePoint { x: self.x.clone(), y: mod_sub(&BigUint::zero(), &self.y, p) }
    }

    /// SEC1 encoding: `02|03 || x` when compressed, `04 || x || y` otherwise.
    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        let x = coordinate_bytes(&self.x);
        if compressed {
            let prefix = if self.y.is_odd() { ODD_PREFIX } else { EVEN_PREFIX };
            let mut bytes = Vec::with_capacity(COMPRESSED_POINT_SIZE);
            bytes.push(prefix);
            bytes.extend_from_slice(&x);
            bytes
        } else {
            let mut bytes = Vec::with_capacity(UNCOMPRESSED_POINT_SIZE);
            bytes.push(UNCOMPRESSED_PREFIX);
            bytes.extend_from_slice(&x);
            bytes.extend_from_slice(&coordinate_bytes(&self.y));
            bytes
        }
    }

    /// Parses a SEC1 point. Compressed inputs are decompressed through a
    /// modular square root and the parity bit selects `y` or `p - y`.
    pub fn from_bytes(bytes: &[u8]) -> Result<CurvePoint> {
        let p = SECP256K1.field();
        match (bytes.len(), bytes.first().copied()) {
            (UNCOMPRESSED_POINT_SIZE, Some(UNCOMPRESSED_PREFIX)) => {
                let x = from_be_bytes(&bytes[1..COMPRESSED_POINT_SIZE]);
                let y = from_be_bytes(&bytes[COMPRESSED_POINT_SIZE..]);
                if &x >= p || &y >= p {
                    return Err(CurveError::InvalidEncoding("coordinate is not a field element".to_string()));
                }
                Ok(CurvePoint { x, y })
            }
            (COMPRESSED_POINT_SIZE, Some(prefix @ (EVEN_PREFIX | ODD_PREFIX))) => {
                let x = from_be_bytes(&bytes[1..]);
                if &x >= p {
                    return Err(CurveError::InvalidEncoding("coordinate is not a field element".to_string()));
                }
                let root = mod_sqrt(&SECP256K1.rhs(&x), p)?;
                let y = if root.is_odd() == (prefix == ODD_PREFIX) { root } else { mod_sub(&BigUint::zero(), &root, p) };
                Ok(CurvePoint { x, y })
            }
            (len, prefix) => Err(CurveError::InvalidEncoding(format!("{len} bytes with prefix {prefix:02x?}"))),
        }
    }
}

impl Display for CurvePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:064x}, {:064x})", self.x, self.y)
    }
}

fn coordinate_bytes(value: &BigUint) -> [u8; COORDINATE_SIZE] {
    to_be_bytes_fixed(value).expect("coordinates are reduced modulo p")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdkeys_math::MathError;

    fn point(x: &str, y: &str) -> CurvePoint {
        CurvePoint { x: BigUint::parse_bytes(x.as_bytes(), 16).unwrap(), y: BigUint::parse_bytes(y.as_bytes(), 16).unwrap() }
    }

    fn hex_bytes(s: &str) -> Vec<u8> {
        let mut bytes = vec![0u8; s.len() / 2];
        faster_hex::hex_decode(s.as_bytes(), &mut bytes).unwrap();
        bytes
    }

    fn two_g() -> CurvePoint {
        point(
            "C6047F9441ED7D6D3045406E95C07CD85C778E4B8CEF3CA7ABAC09B95C709EE5",
            "1AE168FEA63DC339A3C58419466CEAEEF7F632653266D0E1236431A950CFE52A",
        )
    }

    fn three_g() -> CurvePoint {
        point(
            "F9308A019258C31049344F85F89D5229B531C845836F99B08601F113BCE036F9",
            "388F7B0F632DE8140FE337E62A37F3566500A99934C2231B6CB9FD7584B8E672",
        )
    }

    #[test]
    fn test_small_multiples() {
        let g = CurvePoint::generator();
        assert!(g.is_on_curve());
        assert_eq!(g.double().unwrap(), two_g());
        assert_eq!(g.double().unwrap().add(&g).unwrap(), three_g());
        assert_eq!(g.add(&two_g()).unwrap(), three_g());
        assert_eq!(CurvePoint::from_scalar(&BigUint::from(1u32)).unwrap(), g);
        assert_eq!(CurvePoint::from_scalar(&BigUint::from(2u32)).unwrap(), two_g());
        assert_eq!(CurvePoint::from_scalar(&BigUint::from(3u32)).unwrap(), three_g());
        assert_eq!(two_g().multiply(&BigUint::from(3u32)).unwrap(), g.multiply(&BigUint::from(6u32)).unwrap());
    }

    #[test]
    fn test_scalar_range() {
        let order = SECP256K1.order();
        assert_eq!(CurvePoint::from_scalar(&BigUint::zero()), Err(CurveError::InvalidScalar));
        assert_eq!(CurvePoint::from_scalar(order), Err(CurveError::InvalidScalar));
        let last = CurvePoint::from_scalar(&(order - 1u32)).unwrap();
        assert_eq!(last, CurvePoint::generator().negate());
    }

    #[test]
    fn test_equal_x_rejected() {
        let g = CurvePoint::generator();
        assert!(matches!(g.add(&g), Err(CurveError::InvalidOperation(_))));
        assert!(matches!(g.add(&g.negate()), Err(CurveError::InvalidOperation(_))));
        let flat = CurvePoint { x: BigUint::from(5u32), y: BigUint::zero() };
        assert!(matches!(flat.double(), Err(CurveError::InvalidOperation(_))));
    }

    #[test]
    fn test_known_decompression() {
        let compressed = hex_bytes("020F031CA83F3FB372BD6C2430119E0B947CF059D19CDEA98F4CEFFEF620C584F9");
        let uncompressed = hex_bytes(
            "040f031ca83f3fb372bd6c2430119e0b947cf059d19cdea98f4ceffef620c584f9f064f1fde4bc07d4f48c5114680ad1adaf5f6eaa2166f7e4b4887703a681b548",
        );
        let a = CurvePoint::from_bytes(&compressed).unwrap();
        let b = CurvePoint::from_bytes(&uncompressed).unwrap();
        assert_eq!(a, b);
        assert!(a.is_on_curve());
        assert_eq!(a.to_bytes(false), uncompressed);
        assert_eq!(b.to_bytes(true), compressed);
    }

    #[test]
    fn test_encoding_round_trip() {
        for k in 252u32..=257 {
            let p = CurvePoint::from_scalar(&BigUint::from(k)).unwrap();
            assert_eq!(CurvePoint::from_bytes(&p.to_bytes(true)).unwrap(), p, "compressed k={k}");
            assert_eq!(CurvePoint::from_bytes(&p.to_bytes(false)).unwrap(), p, "uncompressed k={k}");
        }
        let g = CurvePoint::generator();
        let neg = g.negate();
        assert_ne!(g.to_bytes(true)[0], neg.to_bytes(true)[0]);
        assert_eq!(CurvePoint::from_bytes(&neg.to_bytes(true)).unwrap(), neg);
    }

    #[test]
    fn test_encoding_round_trip_large_scalars() {
        let order = SECP256K1.order();
        let master = BigUint::parse_bytes(b"e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35", 16).unwrap();
        let mut prefixes = Vec::new();
        for k in [order - 1u32, order / 2u32, (order / 2u32) + 1u32, master.clone()] {
            let p = CurvePoint::from_scalar(&k).unwrap();
            let compressed = p.to_bytes(true);
            prefixes.push(compressed[0]);
            assert_eq!(CurvePoint::from_bytes(&compressed).unwrap(), p, "compressed k={k}");
            assert_eq!(CurvePoint::from_bytes(&p.to_bytes(false)).unwrap(), p, "uncompressed k={k}");
        }
        // n/2 and n/2 + 1 are negations of each other
        assert!(prefixes.contains(&EVEN_PREFIX));
        assert!(prefixes.contains(&ODD_PREFIX));

        // (n-1)·G = -G
        assert_eq!(CurvePoint::from_scalar(&(order - 1u32)).unwrap(), CurvePoint::generator().negate());

        // public key of the BIP32 test vector 1 master key
        let master_point = CurvePoint::from_scalar(&master).unwrap();
        let expected = hex_bytes("0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2");
        assert_eq!(master_point.to_bytes(true), expected);
        assert_eq!(CurvePoint::from_bytes(&expected).unwrap(), master_point);
    }

    #[test]
    fn test_invalid_encodings() {
        let g = CurvePoint::generator().to_bytes(true);
        let mut bad_prefix = g.clone();
        bad_prefix[0] = 0x05;
        assert!(matches!(CurvePoint::from_bytes(&bad_prefix), Err(CurveError::InvalidEncoding(_))));
        assert!(matches!(CurvePoint::from_bytes(&g[..32]), Err(CurveError::InvalidEncoding(_))));
        assert!(matches!(CurvePoint::from_bytes(&[]), Err(CurveError::InvalidEncoding(_))));

        let mut beyond_field = vec![EVEN_PREFIX];
        beyond_field.extend_from_slice(&[0xff; 32]);
        assert!(matches!(CurvePoint::from_bytes(&beyond_field), Err(CurveError::InvalidEncoding(_))));
    }

    #[test]
    fn test_x_without_curve_point() {
        let mut missing = 0;
        for x in 1u8..=50 {
            let mut bytes = vec![EVEN_PREFIX; COMPRESSED_POINT_SIZE];
            bytes[1..].fill(0);
            bytes[COMPRESSED_POINT_SIZE - 1] = x;
            match CurvePoint::from_bytes(&bytes) {
                Ok(p) => assert!(p.is_on_curve()),
                Err(CurveError::Math(MathError::NotAResidue)) => missing += 1,
                Err(err) => panic!("unexpected error {err}"),
            }
        }
        assert!(missing > 0);
    }
}
