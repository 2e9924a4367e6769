//! Dimensional analysis types
//!
//! Each quantity reduces to a 10-element exponent vector over the base axes:
//! [length, mass, time, current, temperature, substance, luminosity,
//! currency, information, angle]
//!
//! The vector is the signature used for kind classification. Two quantities
//! are compatible exactly when their vectors are equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dimension indices for the base axes
pub const LENGTH: usize = 0;
pub const MASS: usize = 1;
pub const TIME: usize = 2;
pub const CURRENT: usize = 3;
pub const TEMPERATURE: usize = 4;
pub const SUBSTANCE: usize = 5;
pub const LUMINOSITY: usize = 6;
pub const CURRENCY: usize = 7;
pub const INFORMATION: usize = 8;
pub const ANGLE: usize = 9;

/// Number of base axes
pub const AXES: usize = 10;

/// Represents the dimensions of a quantity as exponents of the base axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub exponents: [i32; AXES],
}

/// Signature to kind name. Several signatures may share a kind.
const KINDS: &[([i32; AXES], &str)] = &[
    ([2, 1, -4, -2, 0, 0, 0, 0, 0, 0], "elastance"),
    ([2, 1, -3, -2, 0, 0, 0, 0, 0, 0], "resistance"),
    ([2, 1, -2, -2, 0, 0, 0, 0, 0, 0], "inductance"),
    ([2, 1, -3, -1, 0, 0, 0, 0, 0, 0], "potential"),
    ([0, 1, -2, -1, 0, 0, 0, 0, 0, 0], "magnetism"),
    ([2, 1, -2, -1, 0, 0, 0, 0, 0, 0], "magnetism"),
    ([-1, 0, 0, 1, 0, 0, 0, 0, 0, 0], "magnetism"),
    ([3, -1, 0, 0, 0, 0, 0, 0, 0, 0], "specific_volume"),
    ([1, 0, -4, 0, 0, 0, 0, 0, 0, 0], "snap"),
    ([1, 0, -3, 0, 0, 0, 0, 0, 0, 0], "jolt"),
    ([1, 0, -2, 0, 0, 0, 0, 0, 0, 0], "acceleration"),
    ([2, 0, -2, 0, 0, 0, 0, 0, 0, 0], "radiation"),
    ([0, 0, -1, 0, 0, 0, 0, 0, 0, 0], "frequency"),
    ([1, 0, -1, 0, 0, 0, 0, 0, 0, 0], "speed"),
    ([2, 0, -1, 0, 0, 0, 0, 0, 0, 0], "viscosity"),
    ([-1, 1, -1, 0, 0, 0, 0, 0, 0, 0], "viscosity"),
    ([3, 0, -1, 0, 0, 0, 0, 0, 0, 0], "volumetric_flow"),
    ([-1, 0, 0, 0, 0, 0, 0, 0, 0, 0], "wavenumber"),
    ([0, 0, 0, 0, 0, 0, 0, 0, 0, 0], "unitless"),
    ([1, 0, 0, 0, 0, 0, 0, 0, 0, 0], "length"),
    ([2, 0, 0, 0, 0, 0, 0, 0, 0, 0], "area"),
    ([3, 0, 0, 0, 0, 0, 0, 0, 0, 0], "volume"),
    ([0, 0, 1, 0, 0, 0, 0, 0, 0, 0], "time"),
    ([0, 0, 0, 0, 1, 0, 0, 0, 0, 0], "temperature"),
    ([1, 1, -3, 0, 0, 0, 0, 0, 0, 0], "yank"),
    ([2, 1, -3, 0, 0, 0, 0, 0, 0, 0], "power"),
    ([-1, 1, -2, 0, 0, 0, 0, 0, 0, 0], "pressure"),
    ([1, 1, -2, 0, 0, 0, 0, 0, 0, 0], "force"),
    ([2, 1, -2, 0, 0, 0, 0, 0, 0, 0], "energy"),
    ([1, 1, -1, 0, 0, 0, 0, 0, 0, 0], "momentum"),
    ([2, 1, -1, 0, 0, 0, 0, 0, 0, 0], "angular_momentum"),
    ([-3, 1, 0, 0, 0, 0, 0, 0, 0, 0], "density"),
    ([-2, 1, 0, 0, 0, 0, 0, 0, 0, 0], "area_density"),
    ([0, 1, 0, 0, 0, 0, 0, 0, 0, 0], "mass"),
    ([0, -1, 1, 1, 0, 0, 0, 0, 0, 0], "radiation_exposure"),
    ([0, 0, 0, 1, 0, 0, 0, 0, 0, 0], "current"),
    ([0, 0, 1, 1, 0, 0, 0, 0, 0, 0], "charge"),
    ([-2, -1, 3, 2, 0, 0, 0, 0, 0, 0], "conductance"),
    ([-2, -1, 4, 2, 0, 0, 0, 0, 0, 0], "capacitance"),
    ([0, 0, -1, 0, 0, 1, 0, 0, 0, 0], "activity"),
    ([-3, 0, 0, 0, 0, 1, 0, 0, 0, 0], "molar_concentration"),
    ([0, 0, 0, 0, 0, 1, 0, 0, 0, 0], "substance"),
    ([-2, 0, 0, 0, 0, 0, 1, 0, 0, 0], "illuminance"),
    ([0, 0, 0, 0, 0, 0, 1, 0, 0, 0], "luminous_power"),
    ([0, 0, 0, 0, 0, 0, 0, 1, 0, 0], "currency"),
    ([0, 0, -1, 0, 0, 0, 0, 0, 1, 0], "information_rate"),
    ([0, 0, 0, 0, 0, 0, 0, 0, 1, 0], "information"),
    ([0, 0, -1, 0, 0, 0, 0, 0, 0, 1], "angular_velocity"),
    ([0, 0, 0, 0, 0, 0, 0, 0, 0, 1], "angle"),
];

impl Dimension {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0; AXES] };

    /// Length dimension [L]
    pub const LENGTH: Dimension = Dimension::axis(LENGTH);

    /// Mass dimension [M]
    pub const MASS: Dimension = Dimension::axis(MASS);

    /// Time dimension [T]
    pub const TIME: Dimension = Dimension::axis(TIME);

    /// Temperature dimension [Θ]
    pub const TEMPERATURE: Dimension = Dimension::axis(TEMPERATURE);

    /// Create a new dimension from exponents
    pub fn new(exponents: [i32; AXES]) -> Self {
        Dimension { exponents }
    }

    /// Unit exponent along a single base axis
    pub const fn axis(index: usize) -> Self {
        let mut exponents = [0; AXES];
        exponents[index] = 1;
        Dimension { exponents }
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        let mut result = [0i32; AXES];
        for (i, slot) in result.iter_mut().enumerate() {
            *slot = self.exponents[i] + other.exponents[i];
        }
        Dimension { exponents: result }
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Dimension {
        self.multiply(&other.invert())
    }

    /// Raise to integer power (multiply exponents)
    pub fn power(&self, exp: i32) -> Dimension {
        let mut result = self.exponents;
        for slot in result.iter_mut() {
            *slot *= exp;
        }
        Dimension { exponents: result }
    }

    /// Invert dimensions (negate exponents)
    pub fn invert(&self) -> Dimension {
        self.power(-1)
    }

    /// Kind name if the signature is a known one
    pub fn name(&self) -> Option<&'static str> {
        KINDS
            .iter()
            .find(|(exponents, _)| *exponents == self.exponents)
            .map(|(_, name)| *name)
    }

    /// Kind name, or the exponent notation for composite signatures
    pub fn kind(&self) -> String {
        match self.name() {
            Some(name) => name.to_string(),
            None => self.to_string(),
        }
    }

    /// Every kind name, in table order and without duplicates
    pub fn kinds() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for (_, name) in KINDS.iter() {
            if !names.contains(name) {
                names.push(*name);
            }
        }
        names
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = ["L", "M", "T", "I", "Θ", "N", "J", "C", "B", "A"];
        let mut parts = Vec::new();

        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp != 0 {
                if exp == 1 {
                    parts.push(names[i].to_string());
                } else {
                    parts.push(format!("{}^{}", names[i], exp));
                }
            }
        }

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}
