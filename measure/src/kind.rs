//! Quantity kinds
//!
//! A kind decides which converter a quantity dispatches to, how its unit is
//! normalized, and which extra input shapes the parser accepts for it.

use measure_core::{Magnitude, MeasureError};
use measure_units::{ChainConverter, Duration as DurationCategory, Information as InformationCategory, UnitRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Behavior shared by every quantity kind
pub trait Kind: Clone + Default + fmt::Debug + Send + Sync + 'static {
    /// Kind name, used for filters and diagnostics
    const NAME: &'static str;

    /// Dispatcher used by conversions and comparisons of this kind
    fn converter() -> &'static ChainConverter;

    /// Validate a magnitude/unit pair, returning the canonical unit
    fn normalize(magnitude: Magnitude, unit: &str) -> Result<(Magnitude, String), MeasureError> {
        Ok((magnitude, unit.to_string()))
    }

    /// Unit given to bare numbers, if the kind accepts them
    fn bare_unit() -> Option<&'static str> {
        None
    }

    /// Whether calendar intervals are accepted (as elapsed seconds)
    fn accepts_intervals() -> bool {
        false
    }
}

/// Any category; the unit decides at conversion time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generic;

impl Kind for Generic {
    const NAME: &'static str = "dimension";

    fn converter() -> &'static ChainConverter {
        ChainConverter::shared()
    }
}

/// Elapsed time, never negative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationKind;

static DURATION_CONVERTER: LazyLock<ChainConverter> = LazyLock::new(|| {
    ChainConverter::for_categories(UnitRegistry::shared(), vec![Box::new(DurationCategory)])
});

impl Kind for DurationKind {
    const NAME: &'static str = "duration";

    fn converter() -> &'static ChainConverter {
        &DURATION_CONVERTER
    }

    fn normalize(magnitude: Magnitude, unit: &str) -> Result<(Magnitude, String), MeasureError> {
        if magnitude.is_negative() {
            return Err(MeasureError::invalid_input_because(
                format!("{} {}", magnitude, unit),
                "Quantity cannot be less than zero.",
            ));
        }
        Ok((magnitude, unit.to_string()))
    }

    fn bare_unit() -> Option<&'static str> {
        Some("s")
    }

    fn accepts_intervals() -> bool {
        true
    }
}

/// Base for displaying information sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    /// Powers of 1000 (kB, MB, ...)
    Decimal,
    /// Powers of 1024 (KiB, MiB, ...)
    Binary,
}

impl System {
    pub fn factor(&self) -> i64 {
        match self {
            System::Decimal => 1000,
            System::Binary => 1024,
        }
    }

    /// Units from bytes upward
    pub fn units(&self) -> &'static [&'static str] {
        match self {
            System::Decimal => &DECIMAL_UNITS,
            System::Binary => &BINARY_UNITS,
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            System::Decimal => write!(f, "decimal"),
            System::Binary => write!(f, "binary"),
        }
    }
}

pub(crate) const DECIMAL_UNITS: [&str; 9] = ["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
pub(crate) const BINARY_UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Lowercase spelling to canonical unit
const INFORMATION_SPELLINGS: &[(&str, &str)] = &[
    ("b", "B"),
    ("byte", "B"),
    ("bytes", "B"),
    ("k", "kB"),
    ("bit", "bit"),
    ("bits", "bit"),
    ("kb", "kB"),
    ("mb", "MB"),
    ("gb", "GB"),
    ("tb", "TB"),
    ("pb", "PB"),
    ("eb", "EB"),
    ("zb", "ZB"),
    ("yb", "YB"),
    ("kib", "KiB"),
    ("mib", "MiB"),
    ("gib", "GiB"),
    ("tib", "TiB"),
    ("pib", "PiB"),
    ("eib", "EiB"),
    ("zib", "ZiB"),
    ("yib", "YiB"),
    ("kilobyte", "kB"),
    ("kilobytes", "kB"),
    ("megabyte", "MB"),
    ("megabytes", "MB"),
    ("gigabyte", "GB"),
    ("gigabytes", "GB"),
    ("terabyte", "TB"),
    ("terabytes", "TB"),
    ("petabyte", "PB"),
    ("petabytes", "PB"),
    ("exabyte", "EB"),
    ("exabytes", "EB"),
    ("zettabyte", "ZB"),
    ("zettabytes", "ZB"),
    ("yottabyte", "YB"),
    ("yottabytes", "YB"),
    ("kibibyte", "KiB"),
    ("kibibytes", "KiB"),
    ("mebibyte", "MiB"),
    ("mebibytes", "MiB"),
    ("gibibyte", "GiB"),
    ("gibibytes", "GiB"),
    ("tebibyte", "TiB"),
    ("tebibytes", "TiB"),
    ("pebibyte", "PiB"),
    ("pebibytes", "PiB"),
    ("exbibyte", "EiB"),
    ("exbibytes", "EiB"),
    ("zebibyte", "ZiB"),
    ("zebibytes", "ZiB"),
    ("yobibyte", "YiB"),
    ("yobibytes", "YiB"),
];

/// Digital information, optionally pinned to a display system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InformationKind {
    pub system: Option<System>,
}

static INFORMATION_CONVERTER: LazyLock<ChainConverter> = LazyLock::new(|| {
    ChainConverter::for_categories(UnitRegistry::shared(), vec![Box::new(InformationCategory)])
});

impl InformationKind {
    /// Canonical spelling of an information unit (case-insensitive)
    pub fn canonical_unit(unit: &str) -> Option<&'static str> {
        let lower = unit.to_lowercase();
        INFORMATION_SPELLINGS
            .iter()
            .find(|(spelling, _)| *spelling == lower)
            .map(|(_, canonical)| *canonical)
    }
}

impl Kind for InformationKind {
    const NAME: &'static str = "information";

    fn converter() -> &'static ChainConverter {
        &INFORMATION_CONVERTER
    }

    fn normalize(magnitude: Magnitude, unit: &str) -> Result<(Magnitude, String), MeasureError> {
        match Self::canonical_unit(unit) {
            Some(canonical) => Ok((magnitude, canonical.to_string())),
            None => {
                let mut valid: Vec<&str> = DECIMAL_UNITS.to_vec();
                valid.extend_from_slice(&BINARY_UNITS[1..]);
                Err(MeasureError::invalid_input_because(
                    unit,
                    format!("Not an informational unit. Valid units: {}.", valid.join(", ")),
                ))
            }
        }
    }

    fn bare_unit() -> Option<&'static str> {
        Some("B")
    }
}
