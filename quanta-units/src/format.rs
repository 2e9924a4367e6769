//! Rendering quantities as text
//!
//! A formatter turns a numeric scalar and a units string into text. The
//! process-wide default can be replaced at any time; calls read it when they
//! render, so the last write wins.

use std::sync::{Arc, LazyLock, RwLock};

use quanta_core::{format_scalar, mul_safe, round_half_up, round_to, QuantityError, Result};
use tracing::debug;

use crate::convert::Target;
use crate::ops::Operand;
use crate::quantity::Quantity;

/// Renders a scalar and units string
pub type Formatter = Arc<dyn Fn(f64, &str) -> String + Send + Sync>;

static DEFAULT_FORMATTER: LazyLock<RwLock<Formatter>> = LazyLock::new(|| RwLock::new(builtin()));

/// `"<scalar> <units>"`, trimmed so unitless quantities print the number alone
pub fn plain_text(scalar: f64, units: &str) -> String {
    format!("{} {}", format_scalar(scalar), units).trim().to_string()
}

fn builtin() -> Formatter {
    Arc::new(plain_text)
}

/// Current process-wide formatter
pub fn default_formatter() -> Formatter {
    match DEFAULT_FORMATTER.read() {
        Ok(formatter) => Arc::clone(&formatter),
        Err(poisoned) => Arc::clone(&poisoned.into_inner()),
    }
}

/// Replace the process-wide formatter
pub fn set_default_formatter(formatter: Formatter) {
    debug!("default formatter replaced");
    match DEFAULT_FORMATTER.write() {
        Ok(mut current) => *current = formatter,
        Err(poisoned) => *poisoned.into_inner() = formatter,
    }
}

/// Restore the built-in formatter
pub fn reset_default_formatter() {
    set_default_formatter(builtin());
}

/// Render with the process-wide formatter
pub(crate) fn render(scalar: f64, units: &str) -> String {
    let formatter = default_formatter();
    formatter(scalar, units)
}

impl Quantity {
    /// Render with the default formatter in the current units
    pub fn format(&self) -> String {
        render(self.scalar(), self.units())
    }

    /// Render with an explicit formatter in the current units
    pub fn format_with(&self, formatter: &dyn Fn(f64, &str) -> String) -> String {
        formatter(self.scalar(), self.units())
    }

    /// Convert, then render with `formatter` or the default one
    pub fn format_in<'t>(
        &self,
        target: impl Into<Target<'t>>,
        formatter: Option<&Formatter>,
    ) -> Result<String> {
        let converted = self.to(target)?;
        Ok(match formatter {
            Some(formatter) => formatter(converted.scalar(), converted.units()),
            None => render(converted.scalar(), converted.units()),
        })
    }

    /// Same units, scalar rounded half-up to `max_decimals`
    pub fn rounded(&self, max_decimals: u32) -> Result<Quantity> {
        self.with_scalar(round_to(self.scalar(), max_decimals))
    }

    /// Render in the current units, rounded half-up to `max_decimals`
    pub fn to_string_rounded(&self, max_decimals: u32) -> String {
        render(round_to(self.scalar(), max_decimals), self.units())
    }

    /// Convert, then render optionally rounded to `max_decimals`
    ///
    /// `"88.2 km/h"` for `24.5 m/s` with one decimal.
    pub fn to_string_in<'t>(
        &self,
        target: impl Into<Target<'t>>,
        max_decimals: Option<u32>,
    ) -> Result<String> {
        let converted = self.to(target)?;
        let scalar = match max_decimals {
            Some(decimals) => round_to(converted.scalar(), decimals),
            None => converted.scalar(),
        };
        Ok(render(scalar, converted.units()))
    }

    /// Round to a multiple of `precision`, keeping the current units
    ///
    /// A plain number means that many of the receiver's units, so
    /// `to_prec(0.5)` on feet rounds to half feet.
    pub fn to_prec<'o>(&self, precision: impl Into<Operand<'o>>) -> Result<Quantity> {
        let precision: Operand<'o> = precision.into();
        let precision = match precision {
            Operand::Number(step) => self.with_scalar(step)?,
            other => other.resolve()?.into_owned(),
        };

        let step = if self.is_unitless() {
            if !precision.is_unitless() {
                return Err(QuantityError::incompatible(self.units(), precision.units()));
            }
            precision.scalar()
        } else {
            precision.to(self)?.scalar()
        };
        if step == 0.0 {
            return Err(QuantityError::DivideByZero);
        }

        let rounded = mul_safe(round_half_up(self.scalar() / step), step);
        self.with_scalar(rounded)
    }

    /// [`Quantity::to_prec`] followed by rendering
    pub fn to_string_prec<'o>(&self, precision: impl Into<Operand<'o>>) -> Result<String> {
        Ok(self.to_prec(precision)?.format())
    }
}
