//! Numeric magnitude of a quantity
//!
//! A magnitude is either a signed integer or a floating-point number.
//! Integral inputs keep their integer-ness ("45" stays `Int(45)`),
//! anything with a fractional part becomes `Float`. Arithmetic always
//! happens in `f64`; there is no arbitrary precision.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Error type for magnitude parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MagnitudeError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Not a number: {0}")]
    NotANumber(String),
}

/// Signed integer or floating-point magnitude
#[derive(Debug, Clone, Copy)]
pub enum Magnitude {
    Int(i64),
    Float(f64),
}

impl Magnitude {
    // ========== Construction ==========

    /// Create from a string representation
    /// Supports: "45", "-45", "45.0", ".5", "1e3", "+7"
    ///
    /// Strings without a fraction or exponent that fit an `i64` become `Int`.
    pub fn from_str(s: &str) -> Result<Self, MagnitudeError> {
        let s = s.trim();

        if !looks_numeric(s) {
            return Err(MagnitudeError::ParseError(s.to_string()));
        }

        let integral = !s.contains(['.', 'e', 'E']);
        if integral {
            if let Ok(i) = s.parse::<i64>() {
                return Ok(Magnitude::Int(i));
            }
        }

        s.parse::<f64>()
            .map(Magnitude::Float)
            .map_err(|_| MagnitudeError::ParseError(s.to_string()))
    }

    /// Create from a JSON value (number or numeric string)
    pub fn from_json(value: &serde_json::Value) -> Result<Self, MagnitudeError> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Magnitude::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Magnitude::Float(f))
                } else {
                    Err(MagnitudeError::NotANumber(n.to_string()))
                }
            }
            serde_json::Value::String(s) => Self::from_str(s),
            other => Err(MagnitudeError::NotANumber(other.to_string())),
        }
    }

    // ========== Conversion ==========

    pub fn as_f64(&self) -> f64 {
        match *self {
            Magnitude::Int(i) => i as f64,
            Magnitude::Float(f) => f,
        }
    }

    /// Truncate toward zero (saturating at the `i64` bounds)
    pub fn truncate(&self) -> i64 {
        match *self {
            Magnitude::Int(i) => i,
            Magnitude::Float(f) => f.trunc() as i64,
        }
    }

    // ========== Predicates ==========

    pub fn is_integer(&self) -> bool {
        matches!(self, Magnitude::Int(_))
    }

    pub fn is_negative(&self) -> bool {
        match *self {
            Magnitude::Int(i) => i < 0,
            Magnitude::Float(f) => f < 0.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_f64() == 0.0
    }

    // ========== Arithmetic ==========

    /// Integer-preserving addition; falls back to float on overflow
    pub fn add(&self, other: &Magnitude) -> Magnitude {
        match (*self, *other) {
            (Magnitude::Int(a), Magnitude::Int(b)) => a
                .checked_add(b)
                .map(Magnitude::Int)
                .unwrap_or(Magnitude::Float(a as f64 + b as f64)),
            (a, b) => Magnitude::Float(a.as_f64() + b.as_f64()),
        }
    }

    /// Integer-preserving subtraction; falls back to float on overflow
    pub fn sub(&self, other: &Magnitude) -> Magnitude {
        match (*self, *other) {
            (Magnitude::Int(a), Magnitude::Int(b)) => a
                .checked_sub(b)
                .map(Magnitude::Int)
                .unwrap_or(Magnitude::Float(a as f64 - b as f64)),
            (a, b) => Magnitude::Float(a.as_f64() - b.as_f64()),
        }
    }
}

/// Strict numeric shape check: optional sign, digits with an optional
/// fraction, optional exponent. Rejects "inf", "NaN" and grouping commas.
pub fn looks_numeric(s: &str) -> bool {
    let s = s.trim();
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };

    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }

    match exponent {
        None => true,
        Some(e) => {
            let e = e.strip_prefix(['-', '+']).unwrap_or(e);
            !e.is_empty() && all_digits(e)
        }
    }
}

impl PartialEq for Magnitude {
    /// Numeric equality across variants: `Int(5) == Float(5.0)`
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Magnitude::Int(a), Magnitude::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl PartialOrd for Magnitude {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Magnitude::Int(a), Magnitude::Int(b)) => a.partial_cmp(b),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl Default for Magnitude {
    fn default() -> Self {
        Magnitude::Int(0)
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Magnitude::Int(i) => write!(f, "{}", i),
            Magnitude::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<i64> for Magnitude {
    fn from(i: i64) -> Self {
        Magnitude::Int(i)
    }
}

impl From<i32> for Magnitude {
    fn from(i: i32) -> Self {
        Magnitude::Int(i as i64)
    }
}

impl From<u32> for Magnitude {
    fn from(i: u32) -> Self {
        Magnitude::Int(i as i64)
    }
}

impl From<u64> for Magnitude {
    fn from(i: u64) -> Self {
        i64::try_from(i)
            .map(Magnitude::Int)
            .unwrap_or(Magnitude::Float(i as f64))
    }
}

impl From<f64> for Magnitude {
    fn from(f: f64) -> Self {
        Magnitude::Float(f)
    }
}

impl Serialize for Magnitude {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Magnitude::Int(i) => serializer.serialize_i64(i),
            Magnitude::Float(f) => serializer.serialize_f64(f),
        }
    }
}

impl<'de> Deserialize<'de> for Magnitude {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Magnitude::from_json(&value).map_err(serde::de::Error::custom)
    }
}
