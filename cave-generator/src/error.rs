//! Construction errors. Once a generator exists every operation on it is total.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CaveError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaveError {
    #[error("cave dimensions must be positive, got {width} x {height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("birth chance must be within [0, 1], got {0}")]
    BirthChanceOutOfRange(f64),
}
