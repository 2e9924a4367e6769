//! Unit and prefix definitions, and the atoms quantities are built from

use serde::Serialize;
use std::fmt;

use crate::temperature::Thermal;
use crate::units::UNITS;
use crate::Dimension;

/// Index of a unit definition in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UnitId(pub(crate) u16);

/// Index of a prefix definition in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PrefixId(pub(crate) u16);

/// Unit kinds a prefix may combine with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrefixScope {
    /// Any prefixable unit
    Any,
    /// Units of the `information` kind only (binary prefixes)
    Information,
}

/// A multiplicative prefix such as `kilo` or `kibi`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prefix {
    /// Canonical name, e.g. "kilo"
    pub name: String,
    /// Output symbol first, then accepted spellings
    pub aliases: Vec<String>,
    pub factor: f64,
    pub scope: PrefixScope,
}

impl Prefix {
    /// Symbol used when rendering units
    pub fn symbol(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or(&self.name)
    }

    /// Check if this prefix may be attached to `unit`
    pub fn applies_to(&self, unit: &Unit) -> bool {
        if !unit.prefixable {
            return false;
        }
        match self.scope {
            PrefixScope::Any => true,
            PrefixScope::Information => unit.kind == "information",
        }
    }
}

/// A unit definition
///
/// Base units break down to themselves. Derived units carry a factor and the
/// base units they expand to, e.g. newton = 1 kilogram·meter/second².
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    /// Canonical name, e.g. "meter", "temp-C"
    pub name: String,
    /// Output symbol first, then accepted spellings
    pub aliases: Vec<String>,
    /// Kind label of the definition, e.g. "length"
    pub kind: String,
    /// Factor to the base breakdown
    pub scalar: f64,
    /// Base units in the numerator of the breakdown
    pub numerator: Vec<UnitId>,
    /// Base units in the denominator of the breakdown
    pub denominator: Vec<UnitId>,
    /// Set for irreducible units
    pub base: bool,
    /// Signature of the fully reduced unit
    pub dimension: Dimension,
    /// Temperature family, if any
    pub thermal: Option<Thermal>,
    /// Whether prefixes may be attached
    pub prefixable: bool,
}

impl Unit {
    /// Symbol used when rendering units
    pub fn symbol(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or(&self.name)
    }

    /// Check if this unit is one of the absolute temperature scales
    pub fn is_absolute_temperature(&self) -> bool {
        matches!(self.thermal, Some(Thermal::Absolute(_)))
    }
}

/// One unit factor of a quantity: a unit definition with an optional prefix
///
/// Atoms compare by identity of the prefix and unit, so `cm` and `mm` are
/// different atoms even though both are lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom {
    pub(crate) prefix: Option<PrefixId>,
    pub(crate) unit: UnitId,
}

impl Atom {
    /// The dimensionless placeholder atom
    pub const ONE: Atom = Atom {
        prefix: None,
        unit: UnitId(0),
    };

    pub(crate) fn new(prefix: Option<PrefixId>, unit: UnitId) -> Self {
        Atom { prefix, unit }
    }

    pub fn unit(&self) -> &'static Unit {
        UNITS.unit(self.unit)
    }

    pub fn prefix(&self) -> Option<&'static Prefix> {
        self.prefix.map(|id| UNITS.prefix(id))
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit
    }

    pub fn is_one(&self) -> bool {
        *self == Atom::ONE
    }

    /// Rendered symbol, prefix included ("cm", "ug", "minch")
    pub fn symbol(&self) -> String {
        match self.prefix {
            Some(prefix) => UNITS.prefixed_symbol(prefix, self.unit).unwrap_or_else(|| {
                format!("{}{}", UNITS.prefix(prefix).symbol(), self.unit().symbol())
            }),
            None => self.unit().symbol().to_string(),
        }
    }

    /// Check if this atom is an unprefixed base unit
    pub fn is_base(&self) -> bool {
        self.prefix.is_none() && self.unit().base
    }

    pub fn thermal(&self) -> Option<Thermal> {
        self.unit().thermal
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.prefix() {
            write!(f, "<{}>", prefix.name)?;
        }
        write!(f, "<{}>", self.unit().name)
    }
}
