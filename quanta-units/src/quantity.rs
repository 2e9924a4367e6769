//! Quantity type - a scalar with numerator and denominator unit atoms

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use quanta_core::{mul_safe, QuantityError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dimension::Dimension;
use crate::format::plain_text;
use crate::parse::{normalize, parse_quantity};
use crate::temperature::{Family, Thermal};
use crate::unit::Atom;
use crate::units::UNITS;

/// Relative tolerance used when comparing base scalars
pub const EQ_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// A physical quantity: a scalar with an associated unit expression
///
/// Quantities never change after construction. Conversions are memoized in
/// a per-instance cache keyed by the target units.
pub struct Quantity {
    scalar: f64,
    base_scalar: f64,
    numerator: Vec<Atom>,
    denominator: Vec<Atom>,
    dimension: Dimension,
    units: String,
    init_value: Option<String>,
    pub(crate) cache: RwLock<HashMap<String, Arc<Quantity>>>,
}

impl Quantity {
    /// Create a quantity from a scalar and unit atoms
    ///
    /// Fails when an absolute temperature is combined with other units or
    /// lies below absolute zero.
    pub fn new(scalar: f64, numerator: Vec<Atom>, denominator: Vec<Atom>) -> Result<Self> {
        let numerator = normalize(numerator);
        let denominator = normalize(denominator);
        check_temperature_terms(&numerator, &denominator)?;

        let dimension = signature(&numerator, &denominator);
        let units = render_units(&numerator, &denominator);

        let base_scalar = match single_thermal(&numerator, &denominator) {
            Some(Thermal::Absolute(scale)) => {
                if scalar < scale.absolute_zero() {
                    return Err(QuantityError::below_absolute_zero(plain_text(scalar, &units)));
                }
                scale.to_kelvin(scalar)
            }
            _ => mul_safe(unit_factor(&numerator, &denominator), scalar),
        };

        Ok(Quantity {
            scalar,
            base_scalar,
            numerator,
            denominator,
            dimension,
            units,
            init_value: None,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Parse quantity text such as "2.5 m/s^2"
    pub fn parse(text: &str) -> Result<Self> {
        let parsed = parse_quantity(text)?;
        let mut quantity = Quantity::new(parsed.scalar, parsed.numerator, parsed.denominator)?;
        quantity.init_value = Some(text.to_string());
        Ok(quantity)
    }

    /// Parse quantity text, returning `None` on any failure
    pub fn parse_or_none(text: &str) -> Option<Self> {
        Quantity::parse(text).ok()
    }

    /// Dimensionless quantity from a plain number
    pub fn from_number(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(QuantityError::InvalidInitializationValue(value.to_string()));
        }
        Quantity::new(value, vec![Atom::ONE], vec![Atom::ONE])
    }

    /// Build from a dynamically typed value: strings parse, numbers are
    /// dimensionless, anything else is rejected
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(text) => Quantity::parse(text),
            serde_json::Value::Number(number) => match number.as_f64() {
                Some(n) => Quantity::from_number(n),
                None => Err(QuantityError::InvalidInitializationValue(number.to_string())),
            },
            other => Err(QuantityError::InvalidInitializationValue(
                QuantityError::describe_json(other).to_string(),
            )),
        }
    }

    /// Null-returning parse of a dynamically typed value
    ///
    /// Non-strings fail with `ArgumentTypeError`; unparsable strings give
    /// `Ok(None)`.
    pub fn parse_value(value: &serde_json::Value) -> Result<Option<Self>> {
        match value {
            serde_json::Value::String(text) => Ok(Quantity::parse_or_none(text)),
            other => Err(QuantityError::ArgumentTypeError(
                QuantityError::describe_json(other).to_string(),
            )),
        }
    }

    /// Same units, new scalar
    pub(crate) fn with_scalar(&self, scalar: f64) -> Result<Self> {
        Quantity::new(scalar, self.numerator.clone(), self.denominator.clone())
    }

    /// Build a quantity whose invariants are already known to hold
    pub(crate) fn assemble(
        scalar: f64,
        base_scalar: f64,
        numerator: Vec<Atom>,
        denominator: Vec<Atom>,
    ) -> Self {
        let numerator = normalize(numerator);
        let denominator = normalize(denominator);
        Quantity {
            scalar,
            base_scalar,
            dimension: signature(&numerator, &denominator),
            units: render_units(&numerator, &denominator),
            numerator,
            denominator,
            init_value: None,
            cache: RwLock::new(HashMap::new()),
        }
    }

    // ========== Accessors ==========

    pub fn scalar(&self) -> f64 {
        self.scalar
    }

    /// Scalar expressed in base units (kelvin for absolute temperatures)
    pub fn base_scalar(&self) -> f64 {
        self.base_scalar
    }

    pub fn numerator(&self) -> &[Atom] {
        &self.numerator
    }

    pub fn denominator(&self) -> &[Atom] {
        &self.denominator
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Canonical unit text ("cm2*J3/s2*A2", "1/s", "" when unitless)
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Kind label of the signature ("length", "conductance")
    pub fn kind(&self) -> String {
        UNITS.kind_of(&self.dimension)
    }

    /// Source text of a parsed quantity, untrimmed
    pub fn init_value(&self) -> Option<&str> {
        self.init_value.as_deref()
    }

    // ========== Predicates ==========

    pub fn is_unitless(&self) -> bool {
        is_unity(&self.numerator) && is_unity(&self.denominator)
    }

    /// Check if every atom is an unprefixed base unit
    pub fn is_base(&self) -> bool {
        self.numerator
            .iter()
            .chain(self.denominator.iter())
            .all(|atom| atom.is_one() || atom.is_base())
    }

    /// A single temperature unit, absolute or differential
    pub fn is_degrees(&self) -> bool {
        single_thermal(&self.numerator, &self.denominator).is_some()
    }

    /// A single absolute temperature unit
    pub fn is_temperature(&self) -> bool {
        matches!(
            single_thermal(&self.numerator, &self.denominator),
            Some(Thermal::Absolute(_))
        )
    }

    pub(crate) fn family(&self) -> Family {
        match single_thermal(&self.numerator, &self.denominator) {
            Some(Thermal::Absolute(scale)) => Family::Absolute(scale),
            Some(Thermal::Degree(scale)) => Family::Differential(scale),
            None => Family::Other,
        }
    }

    /// Check if both quantities reduce to the same base signature
    pub fn is_compatible_with(&self, other: &Quantity) -> bool {
        self.dimension == other.dimension
    }

    /// Scalar of a unitless quantity
    pub fn to_float(&self) -> Result<f64> {
        if self.is_unitless() {
            Ok(self.scalar)
        } else {
            Err(QuantityError::incompatible(self.units.as_str(), ""))
        }
    }

    // ========== Comparison ==========

    /// Order two compatible quantities by their base scalars
    ///
    /// Base scalars within [`EQ_TOLERANCE`] of each other (relative) compare
    /// equal.
    pub fn compare(&self, other: &Quantity) -> Result<Ordering> {
        if !self.is_compatible_with(other) {
            return Err(QuantityError::incompatible(
                self.units.as_str(),
                other.units.as_str(),
            ));
        }
        let (a, b) = (self.base_scalar, other.base_scalar);
        if (a - b).abs() <= EQ_TOLERANCE * a.abs().max(b.abs()) {
            return Ok(Ordering::Equal);
        }
        Ok(a.partial_cmp(&b).unwrap_or(Ordering::Equal))
    }

    /// Identical scalar and unit atoms, order included
    pub fn same(&self, other: &Quantity) -> bool {
        self.scalar == other.scalar
            && self.numerator == other.numerator
            && self.denominator == other.denominator
    }
}

/// Check that absolute temperatures stand alone
fn check_temperature_terms(numerator: &[Atom], denominator: &[Atom]) -> Result<()> {
    let absolute = |atom: &Atom| matches!(atom.thermal(), Some(Thermal::Absolute(_)));
    if denominator.iter().any(absolute) {
        return Err(QuantityError::CannotDivideWithTemperatures);
    }
    if numerator.iter().any(absolute) {
        if numerator.len() > 1 {
            return Err(QuantityError::CannotMultiplyByTemperatures);
        }
        if !is_unity(denominator) {
            return Err(QuantityError::CannotDivideWithTemperatures);
        }
    }
    Ok(())
}

fn is_unity(atoms: &[Atom]) -> bool {
    atoms.len() == 1 && atoms[0].is_one()
}

/// Temperature family of a lone temperature atom
fn single_thermal(numerator: &[Atom], denominator: &[Atom]) -> Option<Thermal> {
    if numerator.len() == 1 && is_unity(denominator) {
        numerator[0].thermal()
    } else {
        None
    }
}

fn signature(numerator: &[Atom], denominator: &[Atom]) -> Dimension {
    let mut dimension = Dimension::DIMENSIONLESS;
    for atom in numerator {
        dimension = dimension.multiply(&atom.unit().dimension);
    }
    for atom in denominator {
        dimension = dimension.divide(&atom.unit().dimension);
    }
    dimension
}

/// Factor taking one of these units to base units
///
/// Prefixes are folded in with `mul_safe`; unit factors multiply directly.
pub(crate) fn unit_factor(numerator: &[Atom], denominator: &[Atom]) -> f64 {
    let mut q = 1.0;
    for atom in numerator {
        if let Some(prefix) = atom.prefix() {
            q = mul_safe(q, prefix.factor);
        }
        q *= atom.unit().scalar;
    }
    for atom in denominator {
        if let Some(prefix) = atom.prefix() {
            q /= prefix.factor;
        }
        q /= atom.unit().scalar;
    }
    q
}

/// Render one side, grouping repeated atoms in order of first appearance
fn render_side(atoms: &[Atom]) -> String {
    let mut groups: Vec<(Atom, usize)> = Vec::new();
    for atom in atoms {
        match groups.iter_mut().find(|(a, _)| a == atom) {
            Some((_, count)) => *count += 1,
            None => groups.push((*atom, 1)),
        }
    }
    groups
        .iter()
        .map(|(atom, count)| {
            if *count > 1 {
                format!("{}{}", atom.symbol(), count)
            } else {
                atom.symbol()
            }
        })
        .collect::<Vec<_>>()
        .join("*")
}

fn render_units(numerator: &[Atom], denominator: &[Atom]) -> String {
    let num_unity = is_unity(numerator);
    let den_unity = is_unity(denominator);
    if num_unity && den_unity {
        return String::new();
    }
    let mut text = if num_unity {
        "1".to_string()
    } else {
        render_side(numerator)
    };
    if !den_unity {
        text.push('/');
        text.push_str(&render_side(denominator));
    }
    text
}

impl Clone for Quantity {
    fn clone(&self) -> Self {
        Quantity {
            scalar: self.scalar,
            base_scalar: self.base_scalar,
            numerator: self.numerator.clone(),
            denominator: self.denominator.clone(),
            dimension: self.dimension,
            units: self.units.clone(),
            init_value: self.init_value.clone(),
            cache: RwLock::new(HashMap::new()),
        }
    }
}

impl fmt::Debug for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quantity")
            .field("scalar", &self.scalar)
            .field("units", &self.units)
            .field("base_scalar", &self.base_scalar)
            .finish()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", plain_text(self.scalar, &self.units))
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self> {
        Quantity::parse(s)
    }
}

/// Compatible quantities compare by base scalar; incompatible ones are
/// never equal
impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compare(other), Ok(Ordering::Equal))
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Quantity::parse(&text).map_err(serde::de::Error::custom)
    }
}
