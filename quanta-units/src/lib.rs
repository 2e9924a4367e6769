//! Quanta Units - physical quantities with unit algebra
//!
//! Parses quantity text such as `"2.5 m/s^2"` into immutable values and
//! converts, combines, compares and renders them with dimensional checks.
//!
//! Unit families:
//! - SI base units with decimal prefixes (yocto..yotta, googol)
//! - Information units with binary prefixes (KiB, MiB, ...)
//! - Imperial, US customary and historical units
//! - Absolute temperatures (tempK, tempC, tempF, tempR)
//! - Differential degrees (degK, degC, degF, degR)
//!
//! ```
//! use quanta_units::Quantity;
//!
//! let speed = Quantity::parse("24.5 m/s").unwrap();
//! assert_eq!(speed.to_string_in("km/h", Some(1)).unwrap(), "88.2 km/h");
//! ```

pub(crate) mod dimension;
mod unit;
mod units;
mod temperature;
mod parse;
mod quantity;
mod convert;
mod ops;
mod format;
mod swift;

pub use dimension::Dimension;
pub use unit::{Atom, Prefix, PrefixScope, Unit, UnitId};
pub use units::{UnitRegistry, UNITS};
pub use temperature::{Scale, Thermal};
pub use parse::{parse_quantity, parse_units, ParsedQuantity, MAX_EXPONENT};
pub use quantity::{Quantity, EQ_TOLERANCE};
pub use convert::{Converted, Target};
pub use ops::Operand;
pub use format::{default_formatter, plain_text, reset_default_formatter, set_default_formatter, Formatter};
pub use swift::SwiftConverter;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Dimension, Operand, Quantity, SwiftConverter, Target, UNITS};
    pub use quanta_core::{QuantityError, Result};
}
