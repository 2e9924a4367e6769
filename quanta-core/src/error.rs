//! Structured quantity errors
//!
//! Every failure of the engine is a value. Errors carry the offending text
//! where one exists and a stable machine-readable code for embedders.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_INITIALIZATION_VALUE: &str = "INVALID_INITIALIZATION_VALUE";
    pub const UNIT_NOT_RECOGNIZED: &str = "UNIT_NOT_RECOGNIZED";
    pub const BELOW_ABSOLUTE_ZERO: &str = "BELOW_ABSOLUTE_ZERO";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const CANNOT_ADD_TEMPERATURES: &str = "CANNOT_ADD_TEMPERATURES";
    pub const CANNOT_SUBTRACT_FROM_DEGREE: &str = "CANNOT_SUBTRACT_FROM_DEGREE";
    pub const CANNOT_MULTIPLY_TEMPERATURES: &str = "CANNOT_MULTIPLY_TEMPERATURES";
    pub const CANNOT_DIVIDE_TEMPERATURES: &str = "CANNOT_DIVIDE_TEMPERATURES";
    pub const ARG_TYPE: &str = "ARG_TYPE";
}

/// Errors raised while building, converting or combining quantities
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "context")]
pub enum QuantityError {
    /// Input was not a string, a finite number or a quantity
    #[error("Only strings, numbers or quantities accepted as initialization values, got {0}")]
    InvalidInitializationValue(String),

    /// Quantity text could not be parsed or names an unknown unit
    #[error("Unit not recognized: {0}")]
    UnitNotRecognized(String),

    /// Absolute temperature lower than the zero point of its scale
    #[error("Temperatures must not be less than absolute zero: {0}")]
    BelowAbsoluteZero(String),

    #[error("Incompatible units: cannot convert {from} to {to}")]
    IncompatibleUnits { from: String, to: String },

    #[error("Divide by zero")]
    DivideByZero,

    #[error("Cannot add two temperatures")]
    CannotAddTwoTemperatures,

    #[error("Cannot subtract temperature from a differential degree unit")]
    CannotSubtractTemperatureFromDifferentialDegree,

    #[error("Cannot multiply by temperatures")]
    CannotMultiplyByTemperatures,

    #[error("Cannot divide with temperatures")]
    CannotDivideWithTemperatures,

    /// A string was required
    #[error("Argument should be a string, got {0}")]
    ArgumentTypeError(String),
}

impl QuantityError {
    pub fn unit_not_recognized(text: impl Into<String>) -> Self {
        QuantityError::UnitNotRecognized(text.into())
    }

    pub fn incompatible(from: impl Into<String>, to: impl Into<String>) -> Self {
        QuantityError::IncompatibleUnits {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn below_absolute_zero(text: impl Into<String>) -> Self {
        QuantityError::BelowAbsoluteZero(text.into())
    }

    /// Name of a JSON value's type, used in type errors
    pub fn describe_json(value: &serde_json::Value) -> &'static str {
        match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            QuantityError::InvalidInitializationValue(_) => codes::INVALID_INITIALIZATION_VALUE,
            QuantityError::UnitNotRecognized(_) => codes::UNIT_NOT_RECOGNIZED,
            QuantityError::BelowAbsoluteZero(_) => codes::BELOW_ABSOLUTE_ZERO,
            QuantityError::IncompatibleUnits { .. } => codes::INCOMPATIBLE_UNITS,
            QuantityError::DivideByZero => codes::DIV_ZERO,
            QuantityError::CannotAddTwoTemperatures => codes::CANNOT_ADD_TEMPERATURES,
            QuantityError::CannotSubtractTemperatureFromDifferentialDegree => {
                codes::CANNOT_SUBTRACT_FROM_DEGREE
            }
            QuantityError::CannotMultiplyByTemperatures => codes::CANNOT_MULTIPLY_TEMPERATURES,
            QuantityError::CannotDivideWithTemperatures => codes::CANNOT_DIVIDE_TEMPERATURES,
            QuantityError::ArgumentTypeError(_) => codes::ARG_TYPE,
        }
    }
}

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, QuantityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(QuantityError::DivideByZero.code(), "DIV_ZERO");
        assert_eq!(
            QuantityError::unit_not_recognized("zz").code(),
            codes::UNIT_NOT_RECOGNIZED
        );
        assert_eq!(
            QuantityError::incompatible("m", "s").code(),
            codes::INCOMPATIBLE_UNITS
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            QuantityError::unit_not_recognized("aa").to_string(),
            "Unit not recognized: aa"
        );
        assert_eq!(
            QuantityError::incompatible("m", "s").to_string(),
            "Incompatible units: cannot convert m to s"
        );
        assert_eq!(
            QuantityError::CannotAddTwoTemperatures.to_string(),
            "Cannot add two temperatures"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let err = QuantityError::incompatible("m", "kg");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"kind\":\"IncompatibleUnits\""));
        let back: QuantityError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);

        let json = serde_json::to_value(QuantityError::DivideByZero).unwrap();
        assert_eq!(json["kind"], "DivideByZero");
    }

    #[test]
    fn test_describe_json() {
        assert_eq!(QuantityError::describe_json(&serde_json::Value::Null), "null");
        assert_eq!(QuantityError::describe_json(&serde_json::json!([1])), "array");
        assert_eq!(QuantityError::describe_json(&serde_json::json!({})), "object");
    }
}
