//! Unit representation with conversion functions

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Shared conversion closure
pub type ConversionFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// How a unit maps onto its category's native unit
#[derive(Clone)]
pub enum Mapping {
    /// `native = value * factor`
    Linear { factor: f64 },
    /// Arbitrary invertible pair, for offset scales such as temperature
    Affine {
        to_native: ConversionFn,
        from_native: ConversionFn,
    },
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mapping::Linear { factor } => f.debug_struct("Linear").field("factor", factor).finish(),
            Mapping::Affine { .. } => f.write_str("Affine"),
        }
    }
}

/// A named, invertible mapping between one unit and its category's native unit
#[derive(Debug, Clone)]
pub struct Unit {
    /// Canonical name (e.g. "m", "kB", "C")
    name: String,
    mapping: Mapping,
}

impl Unit {
    /// Create a unit with a linear conversion factor.
    ///
    /// Think of `factor` as the number you multiply a value in this unit by
    /// to get the value in the native unit: 0.3048 meters in a foot, so
    /// `Unit::linear("ft", 0.3048)`. Offset scales (Celsius, Fahrenheit)
    /// cannot be expressed this way and use [`Unit::affine`].
    pub fn linear(name: impl Into<String>, factor: f64) -> Self {
        Unit {
            name: name.into(),
            mapping: Mapping::Linear { factor },
        }
    }

    /// The category's reference unit; by definition its factor is 1
    pub fn native(name: impl Into<String>) -> Self {
        Self::linear(name, 1.0)
    }

    /// Create a unit from an explicit pair of conversion functions
    pub fn affine<T, F>(name: impl Into<String>, to_native: T, from_native: F) -> Self
    where
        T: Fn(f64) -> f64 + Send + Sync + 'static,
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Unit {
            name: name.into(),
            mapping: Mapping::Affine {
                to_native: Arc::new(to_native),
                from_native: Arc::new(from_native),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Linear factor, if this unit has one
    pub fn factor(&self) -> Option<f64> {
        match self.mapping {
            Mapping::Linear { factor } => Some(factor),
            Mapping::Affine { .. } => None,
        }
    }

    /// Check if this is a native (factor 1) unit
    pub fn is_native(&self) -> bool {
        self.factor() == Some(1.0)
    }

    /// Convert a value in this unit to the native unit
    pub fn to_native(&self, quantity: f64) -> f64 {
        match &self.mapping {
            Mapping::Linear { factor } => quantity * factor,
            Mapping::Affine { to_native, .. } => to_native(quantity),
        }
    }

    /// Convert a value in the native unit to this unit
    pub fn from_native(&self, quantity: f64) -> f64 {
        match &self.mapping {
            Mapping::Linear { factor } => quantity / factor,
            Mapping::Affine { from_native, .. } => from_native(quantity),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A symbol is not part of a category's vocabulary
///
/// This is the "not my category" signal: the dispatcher treats it as a cue
/// to try the next category and never reports it to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unit \"{unit}\" not registered for \"{category}\".")]
pub struct UnitNotRegistered {
    pub unit: String,
    pub category: &'static str,
}
