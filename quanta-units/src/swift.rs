//! Fast repeated conversion of plain numbers between two fixed units

use quanta_core::{QuantityError, Result};

use crate::parse::parse_units;
use crate::quantity::Quantity;

enum Method {
    Identity,
    /// Absolute temperatures go through kelvin for every value
    Temperature,
    Linear { from_base: f64, to_base: f64 },
}

/// Converter from one unit expression to another, resolved once
///
/// ```
/// use quanta_units::SwiftConverter;
///
/// let convert = SwiftConverter::new("MPa", "bar").unwrap();
/// assert_eq!(convert.convert_all(&[250.0, 10.0, 15.0]).unwrap(), vec![2500.0, 100.0, 150.0]);
/// ```
pub struct SwiftConverter {
    from: Quantity,
    to: Quantity,
    method: Method,
}

impl SwiftConverter {
    /// Resolve both unit expressions
    ///
    /// Fails when either is unknown or they are not compatible. Reciprocal
    /// units are not converted here.
    pub fn new(from: &str, to: &str) -> Result<Self> {
        let from = one_of(from)?;
        let to = one_of(to)?;
        if !from.is_compatible_with(&to) {
            return Err(QuantityError::incompatible(from.units(), to.units()));
        }

        let method = if from.equals(&to)? {
            Method::Identity
        } else if from.is_temperature() || to.is_temperature() {
            Method::Temperature
        } else {
            Method::Linear {
                from_base: from.base_scalar(),
                to_base: to.base_scalar(),
            }
        };

        Ok(SwiftConverter { from, to, method })
    }

    pub fn convert(&self, value: f64) -> Result<f64> {
        match self.method {
            Method::Identity => Ok(value),
            Method::Temperature => Ok(self.from.with_scalar(value)?.convert_to(&self.to)?.scalar()),
            Method::Linear { from_base, to_base } => Ok(value * from_base / to_base),
        }
    }

    pub fn convert_all(&self, values: &[f64]) -> Result<Vec<f64>> {
        values.iter().map(|value| self.convert(*value)).collect()
    }
}

fn one_of(units: &str) -> Result<Quantity> {
    let (numerator, denominator) = parse_units(units)?;
    Quantity::new(1.0, numerator, denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear() {
        let convert = SwiftConverter::new("m/h", "m/s").unwrap();
        assert_relative_eq!(convert.convert(2500.0).unwrap(), 2500.0 / 3600.0, max_relative = 1e-12);

        let convert = SwiftConverter::new("MPa", "bar").unwrap();
        assert_eq!(
            convert.convert_all(&[250.0, 10.0, 15.0]).unwrap(),
            vec![2500.0, 100.0, 150.0]
        );
    }

    #[test]
    fn test_identity() {
        let convert = SwiftConverter::new("m", "meter").unwrap();
        assert_eq!(convert.convert(2.5).unwrap(), 2.5);
        assert!(matches!(convert.method, Method::Identity));
    }

    #[test]
    fn test_temperatures() {
        let convert = SwiftConverter::new("tempF", "tempC").unwrap();
        assert_eq!(convert.convert(32.0).unwrap(), 0.0);
        assert!(matches!(
            convert.convert(-500.0),
            Err(QuantityError::BelowAbsoluteZero(_))
        ));

        let convert = SwiftConverter::new("degC", "degF").unwrap();
        assert_eq!(convert.convert(10.0).unwrap(), 18.0);
    }

    #[test]
    fn test_rejects_incompatible_and_reciprocal() {
        assert!(matches!(
            SwiftConverter::new("m", "s"),
            Err(QuantityError::IncompatibleUnits { .. })
        ));
        assert!(matches!(
            SwiftConverter::new("ohm", "S"),
            Err(QuantityError::IncompatibleUnits { .. })
        ));
        assert!(matches!(
            SwiftConverter::new("m", "zz"),
            Err(QuantityError::UnitNotRecognized(_))
        ));
    }
}
