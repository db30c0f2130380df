use hdkeys_math::MathError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("scalar must be in the range [1, n-1]")]
    InvalidScalar,

    #[error("invalid point operation: {0}")]
    InvalidOperation(&'static str),

    #[error("invalid point encoding: {0}")]
    InvalidEncoding(String),

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type Result<T, E = CurveError> = std::result::Result<T, E>;
