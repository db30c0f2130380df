//!
//! secp256k1 domain parameters and affine point arithmetic.
//!

pub mod curve;
pub mod error;
pub mod point;

pub use curve::{Curve, SECP256K1};
pub use error::{CurveError, Result};
pub use hdkeys_math::BigUint;
pub use point::{CurvePoint, COMPRESSED_POINT_SIZE, UNCOMPRESSED_POINT_SIZE};
