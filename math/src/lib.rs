//!
//! Modular arithmetic over arbitrary-precision unsigned integers.
//!
//! Integers are [`BigUint`] values from the `num` crate; this crate only adds
//! the field helpers the curve code needs, fixed-width byte conversion and
//! the modular square root used by point decompression.
//!

pub mod convert;
pub mod error;
pub mod modular;
pub mod sqrt;

pub use convert::{from_be_bytes, to_be_bytes_fixed};
pub use error::{MathError, Result};
pub use modular::{legendre_symbol, mod_add, mod_inverse, mod_mul, mod_sub, Legendre};
pub use num::BigUint;
pub use sqrt::mod_sqrt;
