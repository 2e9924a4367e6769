//! Temperature scales and the rules for combining temperatures
//!
//! Two families share the kelvin axis. Absolute temperatures (`tempK`,
//! `tempC`, `tempF`, `tempR`) are points on a scale and carry an offset.
//! Differential degrees (`degK`, `degC`, `degF`, `degR`) are plain linear
//! intervals. Additive operations between the families follow the table in
//! [`additive_plan`].

use quanta_core::{QuantityError, Result};
use serde::Serialize;

/// A temperature scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scale {
    Kelvin,
    Celsius,
    Fahrenheit,
    Rankine,
}

impl Scale {
    /// Lowest representable value on this scale
    pub fn absolute_zero(self) -> f64 {
        match self {
            Scale::Kelvin => 0.0,
            Scale::Celsius => -273.15,
            Scale::Fahrenheit => -459.67,
            Scale::Rankine => 0.0,
        }
    }

    /// Absolute temperature on this scale to kelvin
    pub fn to_kelvin(self, value: f64) -> f64 {
        match self {
            Scale::Kelvin => value,
            Scale::Celsius => value + 273.15,
            Scale::Fahrenheit => (value + 459.67) * 5.0 / 9.0,
            Scale::Rankine => value * 5.0 / 9.0,
        }
    }

    /// Kelvin to an absolute temperature on this scale
    pub fn from_kelvin(self, kelvin: f64) -> f64 {
        match self {
            Scale::Kelvin => kelvin,
            Scale::Celsius => kelvin - 273.15,
            Scale::Fahrenheit => kelvin * 9.0 / 5.0 - 459.67,
            Scale::Rankine => kelvin * 9.0 / 5.0,
        }
    }

    /// Size of a degree interval on this scale, in kelvin degrees
    pub fn degrees_to_kelvin(self, value: f64) -> f64 {
        match self {
            Scale::Kelvin | Scale::Celsius => value,
            Scale::Fahrenheit | Scale::Rankine => value * 5.0 / 9.0,
        }
    }

    /// Kelvin degrees to degrees of this scale
    pub fn kelvin_to_degrees(self, kelvin: f64) -> f64 {
        match self {
            Scale::Kelvin | Scale::Celsius => kelvin,
            Scale::Fahrenheit | Scale::Rankine => kelvin * 9.0 / 5.0,
        }
    }

    /// Units text of the absolute temperature unit of this scale
    pub fn temperature_units(self) -> &'static str {
        match self {
            Scale::Kelvin => "tempK",
            Scale::Celsius => "tempC",
            Scale::Fahrenheit => "tempF",
            Scale::Rankine => "tempR",
        }
    }

    /// Units text of the differential degree unit of this scale
    pub fn degree_units(self) -> &'static str {
        match self {
            Scale::Kelvin => "degK",
            Scale::Celsius => "degC",
            Scale::Fahrenheit => "degF",
            Scale::Rankine => "degR",
        }
    }
}

/// Temperature family of a unit definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Thermal {
    Absolute(Scale),
    Degree(Scale),
}

impl Thermal {
    pub fn scale(self) -> Scale {
        match self {
            Thermal::Absolute(scale) | Thermal::Degree(scale) => scale,
        }
    }
}

/// Classification of an operand for the temperature rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// A single absolute temperature unit
    Absolute(Scale),
    /// A single differential degree unit
    Differential(Scale),
    /// Anything else
    Other,
}

/// Additive operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Sub,
}

/// Which operand of a binary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// How an add or subtract between compatible operands is carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Convert the right operand into the left operand's units and combine
    /// scalars
    Linear,
    /// Move the absolute temperature on this side by the other operand,
    /// converted to the temperature's degree unit
    Shift(Side),
    /// Difference of two absolute temperatures, in the left operand's degree
    /// unit
    Difference,
}

/// Decision table for add and subtract
///
/// | op  | abs, abs     | abs, other  | other, abs  | other, other |
/// |-----|--------------|-------------|-------------|--------------|
/// | add | error        | shift left  | shift right | linear       |
/// | sub | difference   | shift left  | error       | linear       |
pub fn additive_plan(op: AddOp, lhs: Family, rhs: Family) -> Result<Plan> {
    use Family::Absolute;

    match (op, lhs, rhs) {
        (AddOp::Add, Absolute(_), Absolute(_)) => Err(QuantityError::CannotAddTwoTemperatures),
        (AddOp::Add, Absolute(_), _) => Ok(Plan::Shift(Side::Left)),
        (AddOp::Add, _, Absolute(_)) => Ok(Plan::Shift(Side::Right)),
        (AddOp::Sub, Absolute(_), Absolute(_)) => Ok(Plan::Difference),
        (AddOp::Sub, Absolute(_), _) => Ok(Plan::Shift(Side::Left)),
        (AddOp::Sub, _, Absolute(_)) => {
            Err(QuantityError::CannotSubtractTemperatureFromDifferentialDegree)
        }
        _ => Ok(Plan::Linear),
    }
}

/// Multiplicative operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Mul,
    Div,
}

/// Guard for multiply and divide between two quantities
///
/// `lhs_unitless`/`rhs_unitless` tell whether each side is a pure number.
/// Multiplication involving an absolute temperature is only allowed by a pure
/// number. Division never accepts a temperature divisor, and divides a
/// temperature only by a pure number.
pub fn check_multiplicative(
    op: MulOp,
    lhs: Family,
    rhs: Family,
    lhs_unitless: bool,
    rhs_unitless: bool,
) -> Result<()> {
    let lhs_abs = matches!(lhs, Family::Absolute(_));
    let rhs_abs = matches!(rhs, Family::Absolute(_));
    match op {
        MulOp::Mul => {
            if (lhs_abs || rhs_abs) && !(lhs_unitless || rhs_unitless) {
                return Err(QuantityError::CannotMultiplyByTemperatures);
            }
        }
        MulOp::Div => {
            if rhs_abs || (lhs_abs && !rhs_unitless) {
                return Err(QuantityError::CannotDivideWithTemperatures);
            }
        }
    }
    Ok(())
}
