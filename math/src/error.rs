use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("value is not a quadratic residue modulo the given prime")]
    NotAResidue,

    #[error("value has no inverse modulo the given modulus")]
    NotInvertible,

    #[error("modulus must be non-zero")]
    ZeroModulus,

    #[error("integer does not fit in {0} bytes")]
    Overflow(usize),
}

pub type Result<T, E = MathError> = std::result::Result<T, E>;
