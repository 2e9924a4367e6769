//! Quantity arithmetic and comparison
//!
//! Operands may be quantities, quantity text or plain numbers. Add and
//! subtract follow the temperature decision table in [`crate::temperature`];
//! multiply and divide combine unit atoms and cancel matching pairs.

use std::borrow::Cow;
use std::cmp::Ordering;

use quanta_core::{mul_safe, QuantityError, Result};

use crate::dimension::Dimension;
use crate::parse::normalize;
use crate::quantity::Quantity;
use crate::temperature::{additive_plan, check_multiplicative, AddOp, Family, MulOp, Plan, Side};
use crate::unit::Atom;
use crate::units::UNITS;

/// Right-hand side of an operation
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Quantity(&'a Quantity),
    Text(&'a str),
    Number(f64),
}

impl<'a> From<&'a Quantity> for Operand<'a> {
    fn from(quantity: &'a Quantity) -> Self {
        Operand::Quantity(quantity)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(text: &'a str) -> Self {
        Operand::Text(text)
    }
}

impl<'a> From<&'a String> for Operand<'a> {
    fn from(text: &'a String) -> Self {
        Operand::Text(text.as_str())
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Number(value)
    }
}

impl From<i32> for Operand<'_> {
    fn from(value: i32) -> Self {
        Operand::Number(f64::from(value))
    }
}

impl<'a> Operand<'a> {
    pub(crate) fn resolve(self) -> Result<Cow<'a, Quantity>> {
        match self {
            Operand::Quantity(quantity) => Ok(Cow::Borrowed(quantity)),
            Operand::Text(text) => Quantity::parse(text).map(Cow::Owned),
            Operand::Number(value) => Quantity::from_number(value).map(Cow::Owned),
        }
    }
}

/// Cancel atoms that appear on both sides, one pair at a time
///
/// Surviving atoms keep their order.
pub(crate) fn clean_terms(numerator: Vec<Atom>, denominator: Vec<Atom>) -> (Vec<Atom>, Vec<Atom>) {
    let mut denominator: Vec<Atom> = denominator.into_iter().filter(|a| !a.is_one()).collect();
    let mut kept = Vec::with_capacity(numerator.len());
    for atom in numerator.into_iter().filter(|a| !a.is_one()) {
        match denominator.iter().position(|d| *d == atom) {
            Some(index) => {
                denominator.remove(index);
            }
            None => kept.push(atom),
        }
    }
    (normalize(kept), normalize(denominator))
}

impl Quantity {
    /// Sum of two compatible quantities, in the receiver's units
    ///
    /// Adding a degree interval to an absolute temperature shifts the
    /// temperature; adding two absolute temperatures fails.
    pub fn add<'o>(&self, other: impl Into<Operand<'o>>) -> Result<Quantity> {
        self.additive(AddOp::Add, other.into())
    }

    /// Difference of two compatible quantities, in the receiver's units
    ///
    /// The difference of two absolute temperatures is a degree interval on
    /// the receiver's scale.
    pub fn sub<'o>(&self, other: impl Into<Operand<'o>>) -> Result<Quantity> {
        self.additive(AddOp::Sub, other.into())
    }

    fn additive(&self, op: AddOp, other: Operand<'_>) -> Result<Quantity> {
        let other = other.resolve()?;
        if !self.is_compatible_with(&other) {
            return Err(QuantityError::incompatible(self.units(), other.units()));
        }
        let sign = match op {
            AddOp::Add => 1.0,
            AddOp::Sub => -1.0,
        };

        match additive_plan(op, self.family(), other.family())? {
            Plan::Linear => {
                let rhs = other.to(self)?;
                self.with_scalar(self.scalar() + sign * rhs.scalar())
            }
            Plan::Shift(Side::Left) => shift(self, &other, sign),
            Plan::Shift(Side::Right) => shift(&other, self, sign),
            Plan::Difference => {
                let Family::Absolute(scale) = self.family() else {
                    return Err(QuantityError::incompatible(self.units(), other.units()));
                };
                let rhs = other.to(self)?;
                let degree = Atom::new(None, UNITS.degree_unit(scale));
                Quantity::new(self.scalar() - rhs.scalar(), vec![degree], vec![Atom::ONE])
            }
        }
    }

    /// Product of two quantities, or scaling by a plain number
    ///
    /// A compatible right operand is first expressed in the receiver's units
    /// so that `2.5 m * 3 cm` gives square meters.
    pub fn mul<'o>(&self, other: impl Into<Operand<'o>>) -> Result<Quantity> {
        let other: Operand<'o> = other.into();
        if let Operand::Number(factor) = other {
            return self.with_scalar(mul_safe(self.scalar(), finite(factor)?));
        }

        let other = other.resolve()?;
        check_multiplicative(
            MulOp::Mul,
            self.family(),
            other.family(),
            self.is_unitless(),
            other.is_unitless(),
        )?;
        let other = self.aligned(other)?;

        let mut numerator = self.numerator().to_vec();
        numerator.extend_from_slice(other.numerator());
        let mut denominator = self.denominator().to_vec();
        denominator.extend_from_slice(other.denominator());
        let (numerator, denominator) = clean_terms(numerator, denominator);

        Quantity::new(mul_safe(self.scalar(), other.scalar()), numerator, denominator)
    }

    /// Quotient of two quantities, or division by a plain number
    ///
    /// Dividing a nonzero quantity by zero fails with `DivideByZero`; a zero
    /// dividend gives zero.
    pub fn div<'o>(&self, other: impl Into<Operand<'o>>) -> Result<Quantity> {
        let other: Operand<'o> = other.into();
        if let Operand::Number(divisor) = other {
            return self.with_scalar(quotient(self.scalar(), finite(divisor)?)?);
        }

        let other = other.resolve()?;
        if other.scalar() == 0.0 && self.scalar() != 0.0 {
            return Err(QuantityError::DivideByZero);
        }
        check_multiplicative(
            MulOp::Div,
            self.family(),
            other.family(),
            self.is_unitless(),
            other.is_unitless(),
        )?;
        let other = self.aligned(other)?;

        let mut numerator = self.numerator().to_vec();
        numerator.extend_from_slice(other.denominator());
        let mut denominator = self.denominator().to_vec();
        denominator.extend_from_slice(other.numerator());
        let (numerator, denominator) = clean_terms(numerator, denominator);

        Quantity::new(quotient(self.scalar(), other.scalar())?, numerator, denominator)
    }

    /// Reciprocal quantity (`1 / self`)
    pub fn inverse(&self) -> Result<Quantity> {
        Quantity::from_number(1.0)?.div(self)
    }

    /// Express a compatible operand in this quantity's units, leaving
    /// temperature-dimension operands untouched
    fn aligned<'a>(&self, other: Cow<'a, Quantity>) -> Result<Cow<'a, Quantity>> {
        if self.is_compatible_with(&other) && self.dimension() != Dimension::TEMPERATURE {
            let converted = other.to(self)?.into_owned();
            Ok(Cow::Owned(converted))
        } else {
            Ok(other)
        }
    }

    // ========== Comparison with operands ==========

    /// Check if `other` is compatible; unparsable text is never compatible
    pub fn is_compatible<'o>(&self, other: impl Into<Operand<'o>>) -> bool {
        let other: Operand<'o> = other.into();
        match other.resolve() {
            Ok(other) => self.is_compatible_with(&other),
            Err(_) => false,
        }
    }

    /// Three-way comparison against any operand
    pub fn compare_to<'o>(&self, other: impl Into<Operand<'o>>) -> Result<Ordering> {
        let other: Operand<'o> = other.into();
        let other = other.resolve()?;
        self.compare(&other)
    }

    pub fn equals<'o>(&self, other: impl Into<Operand<'o>>) -> Result<bool> {
        Ok(self.compare_to(other)? == Ordering::Equal)
    }

    pub fn less_than<'o>(&self, other: impl Into<Operand<'o>>) -> Result<bool> {
        Ok(self.compare_to(other)? == Ordering::Less)
    }

    pub fn less_or_equal<'o>(&self, other: impl Into<Operand<'o>>) -> Result<bool> {
        Ok(self.compare_to(other)? != Ordering::Greater)
    }

    pub fn greater_than<'o>(&self, other: impl Into<Operand<'o>>) -> Result<bool> {
        Ok(self.compare_to(other)? == Ordering::Greater)
    }

    pub fn greater_or_equal<'o>(&self, other: impl Into<Operand<'o>>) -> Result<bool> {
        Ok(self.compare_to(other)? != Ordering::Less)
    }
}

/// Move an absolute temperature by a compatible interval
fn shift(temperature: &Quantity, delta: &Quantity, sign: f64) -> Result<Quantity> {
    let Family::Absolute(scale) = temperature.family() else {
        return Err(QuantityError::incompatible(temperature.units(), delta.units()));
    };
    let interval = delta.to(scale.degree_units())?;
    temperature.with_scalar(temperature.scalar() + sign * interval.scalar())
}

fn quotient(dividend: f64, divisor: f64) -> Result<f64> {
    if divisor == 0.0 {
        if dividend == 0.0 {
            return Ok(0.0);
        }
        return Err(QuantityError::DivideByZero);
    }
    Ok(dividend / divisor)
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(QuantityError::InvalidInitializationValue(value.to_string()))
    }
}
