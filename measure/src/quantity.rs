//! The quantity value type

use crate::kind::{DurationKind, Generic, InformationKind, Kind};
use crate::parse::{self, Input};
use measure_core::{Formatters, Magnitude, MeasureError, NumberFormatter};
use measure_units::{ChainConverter, Comparison, Operand};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A magnitude paired with a unit symbol
///
/// Immutable: conversions and arithmetic return new values. The category is
/// not stored; it is discovered by the converter that accepts the unit.
#[derive(Debug, Clone)]
pub struct Quantity<K: Kind = Generic> {
    magnitude: Magnitude,
    unit: String,
    kind: K,
}

/// Elapsed time in any duration unit
pub type Duration = Quantity<DurationKind>;

/// Digital information in any byte or bit unit
pub type Information = Quantity<InformationKind>;

impl<K: Kind> Quantity<K> {
    /// Create a quantity, trimming the unit and applying the kind's validation
    pub fn new(magnitude: impl Into<Magnitude>, unit: impl AsRef<str>) -> Result<Self, MeasureError> {
        let (magnitude, unit) = K::normalize(magnitude.into(), unit.as_ref().trim())?;
        Ok(Quantity {
            magnitude,
            unit,
            kind: K::default(),
        })
    }

    /// Parse anything accepted by [`Input`]
    pub fn parse(value: impl Into<Input<K>>) -> Result<Self, MeasureError> {
        parse::parse(value.into())
    }

    pub fn magnitude(&self) -> Magnitude {
        self.magnitude
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub(crate) fn with_kind(mut self, kind: K) -> Self {
        self.kind = kind;
        self
    }

    /// `(magnitude, unit)`, the structured form
    pub fn to_pair(&self) -> (Magnitude, String) {
        (self.magnitude, self.unit.clone())
    }

    pub fn from_pair(pair: (Magnitude, String)) -> Result<Self, MeasureError> {
        Self::new(pair.0, pair.1)
    }

    /// Render with an explicit formatter instead of the process default
    pub fn format_with(&self, formatter: &NumberFormatter) -> String {
        format!("{} {}", formatter.format(&self.magnitude), self.unit)
    }

    pub(crate) fn operand(&self) -> Operand<'_> {
        Operand::new(self.magnitude, &self.unit)
    }

    // ========== Conversion ==========

    /// Convert to `unit`; converting to the current unit returns `self` untouched
    pub fn convert_to(self, unit: &str) -> Result<Self, MeasureError> {
        self.convert_with(K::converter(), unit)
    }

    pub fn convert_with(self, converter: &ChainConverter, unit: &str) -> Result<Self, MeasureError> {
        let unit = unit.trim();
        if unit == self.unit {
            return Ok(self);
        }

        let magnitude = converter.convert(self.magnitude, &self.unit, unit)?;
        Self::new(magnitude, unit)
    }

    /// Re-wrap as another kind, running that kind's validation
    pub fn cast<K2: Kind>(self) -> Result<Quantity<K2>, MeasureError> {
        Quantity::<K2>::new(self.magnitude, self.unit)
    }

    // ========== Comparison ==========

    fn compare(&self, other: impl Into<Input<K>>, comparison: Comparison) -> Result<bool, MeasureError> {
        let other = Self::parse(other)?;
        K::converter().compare(self.operand(), other.operand(), comparison)
    }

    pub fn is_equal_to(&self, other: impl Into<Input<K>>) -> Result<bool, MeasureError> {
        self.compare(other, Comparison::Equal)
    }

    pub fn is_larger_than(&self, other: impl Into<Input<K>>) -> Result<bool, MeasureError> {
        self.compare(other, Comparison::Larger)
    }

    pub fn is_larger_than_or_equal_to(&self, other: impl Into<Input<K>>) -> Result<bool, MeasureError> {
        self.compare(other, Comparison::LargerOrEqual)
    }

    pub fn is_smaller_than(&self, other: impl Into<Input<K>>) -> Result<bool, MeasureError> {
        self.compare(other, Comparison::Smaller)
    }

    pub fn is_smaller_than_or_equal_to(&self, other: impl Into<Input<K>>) -> Result<bool, MeasureError> {
        self.compare(other, Comparison::SmallerOrEqual)
    }

    /// Between `min` and `max`; bounds count when `inclusive`
    pub fn is_within(
        &self,
        min: impl Into<Input<K>>,
        max: impl Into<Input<K>>,
        inclusive: bool,
    ) -> Result<bool, MeasureError> {
        if inclusive {
            Ok(self.is_larger_than_or_equal_to(min)? && self.is_smaller_than_or_equal_to(max)?)
        } else {
            Ok(self.is_larger_than(min)? && self.is_smaller_than(max)?)
        }
    }

    /// Below `min` or above `max`; landing on a bound counts when `inclusive`
    pub fn is_outside(
        &self,
        min: impl Into<Input<K>>,
        max: impl Into<Input<K>>,
        inclusive: bool,
    ) -> Result<bool, MeasureError> {
        if inclusive {
            Ok(self.is_smaller_than_or_equal_to(min)? || self.is_larger_than_or_equal_to(max)?)
        } else {
            Ok(self.is_smaller_than(min)? || self.is_larger_than(max)?)
        }
    }

    // ========== Arithmetic ==========

    /// Sum in this quantity's unit
    pub fn add(&self, other: impl Into<Input<K>>) -> Result<Self, MeasureError> {
        let other = Self::parse(other)?;
        let magnitude = K::converter().sum(self.operand(), other.operand())?;
        Self::new(magnitude, &self.unit)
    }

    /// Difference in this quantity's unit
    pub fn subtract(&self, other: impl Into<Input<K>>) -> Result<Self, MeasureError> {
        let other = Self::parse(other)?;
        let magnitude = K::converter().subtract(self.operand(), other.operand())?;
        Self::new(magnitude, &self.unit)
    }
}

impl<K: Kind> PartialEq for Quantity<K> {
    /// Same magnitude and unit; kind state such as an information system is ignored
    fn eq(&self, other: &Self) -> bool {
        self.magnitude == other.magnitude && self.unit == other.unit
    }
}

impl<K: Kind> fmt::Display for Quantity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(&Formatters::shared().current()))
    }
}

impl<K: Kind> FromStr for Quantity<K> {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K: Kind> Serialize for Quantity<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.magnitude, &self.unit).serialize(serializer)
    }
}

impl<'de, K: Kind> Deserialize<'de> for Quantity<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (magnitude, unit) = <(Magnitude, String)>::deserialize(deserializer)?;
        Quantity::new(magnitude, unit).map_err(D::Error::custom)
    }
}
