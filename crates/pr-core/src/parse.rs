//! Unit-aware text input for temperatures and pressures.
//!
//! Values are entered as a number followed by an optional unit tag
//! (`"150 K"`, `"-20C"`, `"14.7 psia"`, `"10 bar"`) and converted to the
//! canonical SI value the engine works in: Kelvin and absolute Pascal.
//! A bare number is taken as already canonical.

use crate::units::constants::{ATM_PA, PSI_PA};
use thiserror::Error;

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unit not recognized for this quantity
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit {
        unit: String,
        quantity: &'static str,
    },

    /// Value out of physical range (e.g., negative absolute temperature)
    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },
}

/// Parse temperature in various units, return Kelvin.
pub fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let kelvin = match unit.to_lowercase().as_str() {
        "" | "k" | "kelvin" => value,
        "c" | "°c" | "celsius" => value + 273.15,
        "f" | "°f" | "fahrenheit" => (value + 459.67) * 5.0 / 9.0,
        "r" | "°r" | "rankine" => value * 5.0 / 9.0,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: "Temperature",
            });
        }
    };

    if !kelvin.is_finite() || kelvin <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: kelvin,
            reason: "Absolute temperature must be > 0 K",
        });
    }

    Ok(kelvin)
}

/// Parse pressure in various units, return absolute Pa.
///
/// Gauge units are referenced to one standard atmosphere. A plain `psi`
/// is read as absolute.
pub fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let pa = match unit.to_lowercase().as_str() {
        "" | "pa" | "pascal" => value,
        "kpa" => value * 1e3,
        "mpa" => value * 1e6,
        "bar" => value * 1e5,
        "mbar" | "millibar" => value * 100.0,
        "atm" => value * ATM_PA,
        "torr" | "mmhg" => value * ATM_PA / 760.0,
        "psi" | "psia" => value * PSI_PA,
        "psig" => value * PSI_PA + ATM_PA,
        "barg" => value * 1e5 + ATM_PA,
        "kpag" => value * 1e3 + ATM_PA,
        "mpag" => value * 1e6 + ATM_PA,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: "Pressure",
            });
        }
    };

    if !pa.is_finite() || pa <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: pa,
            reason: "Absolute pressure must be > 0 Pa",
        });
    }

    Ok(pa)
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// Examples:
/// - "70F" -> (70.0, "F")
/// - "14.7 psia" -> (14.7, "psia")
/// - "1.2e6" -> (1.2e6, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    let split_idx = numeric_prefix_len(trimmed);
    let (num_part, unit_part) = trimmed.split_at(split_idx);

    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
    })?;

    Ok((value, unit_part.trim().to_string()))
}

/// Length of the leading float literal, exponent included.
///
/// An `e`/`E` only counts when a digit (optionally signed) follows it, so
/// unit tags are never swallowed into the number.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        let c = bytes[idx];
        match c {
            b'0'..=b'9' | b'.' => idx += 1,
            b'+' | b'-' if idx == 0 => idx += 1,
            b'e' | b'E' if idx > 0 => {
                let mut next = idx + 1;
                if matches!(bytes.get(next), Some(b'+') | Some(b'-')) {
                    next += 1;
                }
                if bytes.get(next).is_some_and(|b| b.is_ascii_digit()) {
                    idx = next;
                } else {
                    break;
                }
            }
            _ => break,
        }
    }
    idx
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn celsius_and_kelvin_agree(c in -270.0_f64..2000.0) {
            let from_c = parse_temperature(&format!("{c} C")).unwrap();
            let from_k = parse_temperature(&format!("{} K", c + 273.15)).unwrap();
            prop_assert!((from_c - from_k).abs() < 1e-9);
        }

        #[test]
        fn bar_is_1e5_pa(value in 1e-3_f64..1e3) {
            let pa = parse_pressure(&format!("{value} bar")).unwrap();
            prop_assert!((pa - value * 1e5).abs() <= 1e-9 * pa);
        }
    }
}
