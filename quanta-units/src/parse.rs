//! Quantity string parsing - parse expressions like "2.5 m/s^2" or "-  1m"

use quanta_core::{QuantityError, Result};

use crate::unit::Atom;
use crate::units::UNITS;

/// Largest accepted power of a single unit
pub const MAX_EXPONENT: i32 = 64;

/// Scalar and unit atoms read from quantity text
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity {
    pub scalar: f64,
    pub numerator: Vec<Atom>,
    pub denominator: Vec<Atom>,
}

/// Parse a quantity string
///
/// Supported formats:
/// - Unit only: "m" (scalar defaults to 1)
/// - Scalar only: "1.5", "-2e3", ".5", "5."
/// - Signs with spacing: "-  1m"
/// - Powers: "m^2", "m**2", "m2", "s^-1", "s-1"
/// - Products: "N*m", "kg m"
/// - Quotients: "m/s", "/s", "1/s", "kg/m^2*s"
///
/// Everything after the `/` belongs to the denominator. Powers are limited
/// to [`MAX_EXPONENT`] in absolute value.
pub fn parse_quantity(text: &str) -> Result<ParsedQuantity> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(QuantityError::unit_not_recognized(text));
    }

    let (scalar, rest) = split_scalar(trimmed)?;
    let (numerator, denominator) = parse_units(rest)?;

    Ok(ParsedQuantity {
        scalar: scalar.unwrap_or(1.0),
        numerator,
        denominator,
    })
}

/// Parse a unit expression into numerator and denominator atoms
///
/// Empty sides hold the dimensionless placeholder.
pub fn parse_units(text: &str) -> Result<(Vec<Atom>, Vec<Atom>)> {
    let text = text.trim();
    let (top, bottom) = match text.split_once('/') {
        Some((top, bottom)) => (top, bottom),
        None => (text, ""),
    };
    if bottom.contains('/') {
        return Err(QuantityError::unit_not_recognized(text));
    }

    let (mut numerator, moved_down) = parse_product(top)?;
    let (mut denominator, moved_up) = parse_product(bottom)?;
    numerator.extend(moved_up);
    denominator.extend(moved_down);

    Ok((normalize(numerator), normalize(denominator)))
}

/// Drop placeholders from a list of atoms, keeping a single one when
/// nothing else is left
pub(crate) fn normalize(atoms: Vec<Atom>) -> Vec<Atom> {
    let atoms: Vec<Atom> = atoms.into_iter().filter(|a| !a.is_one()).collect();
    if atoms.is_empty() {
        vec![Atom::ONE]
    } else {
        atoms
    }
}

/// Read an optional leading scalar, returning it with the unit text after it
fn split_scalar(text: &str) -> Result<(Option<f64>, &str)> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut literal = String::new();

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        literal.push(bytes[0] as char);
        pos = 1;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
    }

    let start = pos;
    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        // "5." is a complete number, a lone "." is not
        if frac_digits > 0 || int_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        if literal.is_empty() {
            return Ok((None, text));
        }
        // A sign must be followed by a number
        return Err(QuantityError::unit_not_recognized(text));
    }

    // Exponent only when digits follow ("2erg" is two ergs)
    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        let mut probe = pos + 1;
        if matches!(bytes.get(probe), Some(b'+') | Some(b'-')) {
            probe += 1;
        }
        let exp_digits = count_digits(&bytes[probe.min(bytes.len())..]);
        if exp_digits > 0 {
            pos = probe + exp_digits;
        }
    }

    literal.push_str(&text[start..pos]);
    let scalar: f64 = literal
        .parse()
        .map_err(|_| QuantityError::unit_not_recognized(text))?;
    if !scalar.is_finite() {
        return Err(QuantityError::InvalidInitializationValue(literal));
    }

    Ok((Some(scalar), &text[pos..]))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parse a product of terms like "kg*m" or "m^2 s-2"
///
/// Returns the atoms that stay on this side and the atoms that a negative
/// exponent moves to the other side.
fn parse_product(text: &str) -> Result<(Vec<Atom>, Vec<Atom>)> {
    let text = text.replace("**", "^");
    let mut same_side = Vec::new();
    let mut other_side = Vec::new();

    let terms = text
        .split(|c: char| c == '*' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    for term in terms {
        let (atom, exponent) = parse_power(term)?;
        let target = if exponent < 0 {
            &mut other_side
        } else {
            &mut same_side
        };
        for _ in 0..exponent.unsigned_abs() {
            target.push(atom);
        }
    }

    Ok((same_side, other_side))
}

/// Parse a unit with optional power like "m^2", "s^-1", "cm3" or "m-2"
fn parse_power(term: &str) -> Result<(Atom, i32)> {
    let (base, exponent) = match term.split_once('^') {
        Some((base, exp_str)) => {
            let exponent = exp_str
                .parse::<i32>()
                .map_err(|_| QuantityError::unit_not_recognized(term))?;
            (base, exponent)
        }
        None => split_digit_suffix(term)?,
    };
    if exponent.unsigned_abs() > MAX_EXPONENT.unsigned_abs() {
        return Err(QuantityError::unit_not_recognized(term));
    }

    // The unit is validated even when the exponent cancels it
    let atom = lookup_atom(base)?;
    Ok((atom, exponent))
}

/// Split "cm3" into ("cm", 3) and "m-2" into ("m", -2)
fn split_digit_suffix(term: &str) -> Result<(&str, i32)> {
    let stem = term.trim_end_matches(|c: char| c.is_ascii_digit());
    if stem.len() == term.len() || stem.is_empty() {
        return Ok((term, 1));
    }
    let (base, signed) = match stem.strip_suffix('-') {
        Some(base) if !base.is_empty() => (base, &term[base.len()..]),
        _ => (stem, &term[stem.len()..]),
    };
    let exponent = signed
        .parse::<i32>()
        .map_err(|_| QuantityError::unit_not_recognized(term))?;
    Ok((base, exponent))
}

/// Look up a unit token, prefixes included
fn lookup_atom(token: &str) -> Result<Atom> {
    UNITS
        .resolve(token)
        .ok_or_else(|| QuantityError::unit_not_recognized(token))
}
