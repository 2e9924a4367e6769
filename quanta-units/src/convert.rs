//! Unit conversion between compatible quantities
//!
//! Conversions go through base scalars. Absolute temperatures convert through
//! kelvin with their offsets; differential degrees through kelvin degrees.
//! Results of [`Quantity::to`] are memoized per instance.

use std::ops::Deref;
use std::sync::Arc;

use quanta_core::{div_safe, QuantityError, Result};
use tracing::trace;

use crate::ops::clean_terms;
use crate::parse::parse_quantity;
use crate::quantity::Quantity;
use crate::temperature::{Scale, Thermal};
use crate::unit::Atom;
use crate::units::UNITS;

/// Target of a conversion: unit text or another quantity whose units are
/// used (its scalar is ignored)
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Text(&'a str),
    Quantity(&'a Quantity),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(text: &'a str) -> Self {
        Target::Text(text)
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(text: &'a String) -> Self {
        Target::Text(text.as_str())
    }
}

impl<'a> From<&'a Quantity> for Target<'a> {
    fn from(quantity: &'a Quantity) -> Self {
        Target::Quantity(quantity)
    }
}

impl Target<'_> {
    /// One unit of the target expression
    fn resolve(&self) -> Result<Quantity> {
        match self {
            Target::Text(text) if text.trim().is_empty() => Quantity::from_number(1.0),
            Target::Text(text) => {
                let parsed = parse_quantity(text)?;
                Quantity::new(1.0, parsed.numerator, parsed.denominator)
            }
            Target::Quantity(quantity) => {
                Quantity::new(1.0, quantity.numerator().to_vec(), quantity.denominator().to_vec())
            }
        }
    }
}

/// Result of [`Quantity::to`]: the receiver itself when the units already
/// match, or a shared converted value from the cache
#[derive(Debug, Clone)]
pub enum Converted<'a> {
    Unchanged(&'a Quantity),
    Cached(Arc<Quantity>),
}

impl Converted<'_> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Converted::Unchanged(_))
    }

    pub fn into_owned(self) -> Quantity {
        match self {
            Converted::Unchanged(quantity) => quantity.clone(),
            Converted::Cached(quantity) => Arc::unwrap_or_clone(quantity),
        }
    }

    /// The cached value, if this conversion produced a new quantity
    pub fn as_arc(&self) -> Option<&Arc<Quantity>> {
        match self {
            Converted::Unchanged(_) => None,
            Converted::Cached(quantity) => Some(quantity),
        }
    }
}

impl Deref for Converted<'_> {
    type Target = Quantity;

    fn deref(&self) -> &Quantity {
        match self {
            Converted::Unchanged(quantity) => quantity,
            Converted::Cached(quantity) => quantity,
        }
    }
}

impl Quantity {
    /// Convert to other units
    ///
    /// Returns the receiver unchanged when the target units equal its own.
    /// Units with exactly reciprocal signatures (`ohm` and `S`) convert
    /// through [`Quantity::inverse`].
    pub fn to<'t>(&self, target: impl Into<Target<'t>>) -> Result<Converted<'_>> {
        let target: Target<'t> = target.into();
        let target = target.resolve()?;
        let key = target.units();
        if key == self.units() {
            return Ok(Converted::Unchanged(self));
        }

        if let Ok(cache) = self.cache.read() {
            if let Some(hit) = cache.get(key) {
                trace!(from = self.units(), to = key, "conversion cache hit");
                return Ok(Converted::Cached(Arc::clone(hit)));
            }
        }
        trace!(from = self.units(), to = key, "conversion cache miss");

        let converted = Arc::new(self.convert_to(&target)?);
        match self.cache.write() {
            Ok(mut cache) => {
                let stored = cache.entry(key.to_string()).or_insert(converted);
                Ok(Converted::Cached(Arc::clone(stored)))
            }
            Err(_) => Ok(Converted::Cached(converted)),
        }
    }

    /// Convert to the units of `target`, uncached
    pub(crate) fn convert_to(&self, target: &Quantity) -> Result<Quantity> {
        if self.units() == target.units() {
            return Ok(self.clone());
        }

        if !self.is_compatible_with(target) {
            if self.dimension().invert() == target.dimension() {
                return self.inverse()?.convert_to(target);
            }
            return Err(QuantityError::incompatible(self.units(), target.units()));
        }

        let scalar = match thermal_of(target) {
            Some(Thermal::Absolute(scale)) => scale.from_kelvin(self.base_scalar()),
            Some(Thermal::Degree(scale)) => scale.kelvin_to_degrees(self.kelvin_degrees()),
            None => div_safe(self.base_scalar(), target.base_scalar())?,
        };

        Quantity::new(scalar, target.numerator().to_vec(), target.denominator().to_vec())
    }

    /// Temperature interval in kelvin degrees
    fn kelvin_degrees(&self) -> f64 {
        match thermal_of(self) {
            Some(Thermal::Absolute(scale)) => scale.degrees_to_kelvin(self.scalar()),
            _ => self.base_scalar(),
        }
    }

    /// Same quantity expressed in unprefixed base units
    ///
    /// Absolute temperatures become `tempK`.
    pub fn to_base(&self) -> Quantity {
        if self.is_base() {
            return self.clone();
        }
        if self.is_temperature() {
            let kelvin = Atom::new(None, UNITS.temperature_unit(Scale::Kelvin));
            return Quantity::assemble(
                self.base_scalar(),
                self.base_scalar(),
                vec![kelvin],
                vec![Atom::ONE],
            );
        }

        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        for atom in self.numerator() {
            expand(atom, &mut numerator, &mut denominator);
        }
        for atom in self.denominator() {
            expand(atom, &mut denominator, &mut numerator);
        }
        let (numerator, denominator) = clean_terms(numerator, denominator);
        Quantity::assemble(self.base_scalar(), self.base_scalar(), numerator, denominator)
    }
}

/// Temperature family of a lone temperature unit
fn thermal_of(quantity: &Quantity) -> Option<Thermal> {
    if quantity.is_degrees() {
        quantity.numerator()[0].thermal()
    } else {
        None
    }
}

/// Push the base breakdown of `atom` onto the given sides
fn expand(atom: &Atom, same: &mut Vec<Atom>, other: &mut Vec<Atom>) {
    if atom.is_one() {
        return;
    }
    let unit = atom.unit();
    if unit.base {
        same.push(Atom::new(None, atom.unit_id()));
        return;
    }
    same.extend(unit.numerator.iter().map(|id| Atom::new(None, *id)));
    other.extend(unit.denominator.iter().map(|id| Atom::new(None, *id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn q(text: &str) -> Quantity {
        Quantity::parse(text).unwrap()
    }

    #[test]
    fn test_to_same_units_is_unchanged() {
        let a = q("100 cm");
        let converted = a.to("cm").unwrap();
        assert!(converted.is_unchanged());
        assert!(converted.same(&a));

        let unitless = q("3");
        assert!(unitless.to("").unwrap().is_unchanged());
    }

    #[test]
    fn test_linear_conversions() {
        assert_eq!(q("2 m^3").to("l").unwrap().scalar(), 2000.0);
        assert_eq!(q("1 m^3").to("cm^3").unwrap().scalar(), 1e6);
        assert_eq!(q("1 cm^3").to("mm^3").unwrap().scalar(), 1000.0);
        assert_eq!(q("0.000773 m^3").to("cm^3").unwrap().scalar(), 773.0);
        assert_eq!(
            q("10 cm").to("ft").unwrap().scalar(),
            div_safe(0.1, 0.3048).unwrap()
        );
    }

    #[test]
    fn test_target_quantity_scalar_ignored() {
        let converted = q("1 m").to(&q("5 cm")).unwrap().into_owned();
        assert_eq!(converted.scalar(), 100.0);
        assert_eq!(converted.units(), "cm");
        assert_eq!(q("1 m").to("5 cm").unwrap().scalar(), 100.0);
    }

    #[test]
    fn test_incompatible() {
        assert_eq!(
            q("1 m").to("s").unwrap_err(),
            QuantityError::incompatible("m", "s")
        );
        assert!(matches!(
            q("1 m").to(""),
            Err(QuantityError::IncompatibleUnits { .. })
        ));
        assert!(matches!(
            q("1 m").to("zz"),
            Err(QuantityError::UnitNotRecognized(_))
        ));
    }

    #[test]
    fn test_reciprocal_conversion() {
        let siemens = q("10 ohm").to("S").unwrap().into_owned();
        assert_eq!(siemens.scalar(), 0.1);
        assert_eq!(siemens.kind(), "conductance");
        assert!(matches!(
            q("0 ohm").to("S"),
            Err(QuantityError::DivideByZero)
        ));
    }

    #[test]
    fn test_temperature_conversions() {
        assert_eq!(q("32 tempF").to("tempC").unwrap().scalar(), 0.0);
        assert_relative_eq!(q("0 tempF").to("tempK").unwrap().scalar(), 255.37222222222223, max_relative = 1e-12);
        assert_relative_eq!(q("0 tempC").to("tempF").unwrap().scalar(), 32.0, max_relative = 1e-12);
        assert_relative_eq!(q("100 degC").to("tempC").unwrap().scalar(), -173.15, max_relative = 1e-12);
    }

    #[test]
    fn test_degree_conversions() {
        assert_eq!(q("10 degC").to("degF").unwrap().scalar(), 18.0);
        assert_eq!(q("18 tempF").to("degC").unwrap().scalar(), 10.0);
        assert_eq!(q("1 degK/s").to("degC/min").unwrap().scalar(), 60.0);
        assert_eq!(q("100 cm/degF").to("m/degF").unwrap().scalar(), 1.0);
    }

    #[test]
    fn test_below_absolute_zero_after_conversion() {
        assert!(matches!(
            q("1 degK").to("tempF").map(|c| c.scalar()),
            Ok(v) if v < 0.0
        ));
        assert!(matches!(
            q("-300 degC").to("tempC"),
            Err(QuantityError::BelowAbsoluteZero(_))
        ));
    }

    #[test]
    fn test_cache_shares_results() {
        let a = q("1 m");
        let first = a.to("cm").unwrap();
        let second = a.to("centimeter").unwrap();
        let (first, second) = (first.as_arc().unwrap(), second.as_arc().unwrap());
        assert!(Arc::ptr_eq(first, second));
        assert_eq!(first.scalar(), 100.0);
    }

    #[test]
    fn test_to_base() {
        let base = q("0.3 mm^2 ms^-2").to_base();
        assert_eq!(base.scalar(), 0.3);
        assert_eq!(base.units(), "m2/s2");

        assert_eq!(q("0.018 MPa").to_base().scalar(), 18000.0);
        assert_eq!(q("66 cm3").to_base().scalar(), 0.000066);
        assert_eq!(q("66 cm3").to_base().units(), "m3");
        assert_eq!(q("1 N").to_base().units(), "kg*m/s2");

        let kelvin = q("0 tempC").to_base();
        assert_eq!(kelvin.units(), "tempK");
        assert_eq!(kelvin.scalar(), 273.15);

        let already = q("2 m/s");
        assert!(already.to_base().same(&already));
    }

    #[test]
    fn test_to_base_cancels() {
        let base = q("1 J/N").to_base();
        assert_eq!(base.units(), "m");
        assert_eq!(base.scalar(), 1.0);
    }
}
