//! Quanta Core - Fundamental types
//!
//! This crate provides the pieces of Quanta that know nothing about units:
//! - Precision-safe multiply/divide and half-up rounding
//! - `QuantityError`: structured errors with machine-readable codes

mod error;
pub mod number;

pub use error::{codes, QuantityError, Result};
pub use number::{div_safe, format_scalar, mul_safe, round_half_up, round_to};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{QuantityError, Result};
}
