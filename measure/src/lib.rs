//! Measure - Typed quantities with unit conversion
//!
//! Parses human-readable measurements ("1.2 GB", "66.6543 K", "45,000mm"),
//! keeps the magnitude with its unit, and converts or compares within a
//! category through `measure_units::ChainConverter`.
//!
//! Three kinds of quantity share one value type:
//! - `Quantity` (any category)
//! - `Information` (bytes; binary/decimal humanization)
//! - `Duration` (seconds; never negative; accepts calendar intervals)

mod duration;
mod filter;
mod information;
mod kind;
mod parse;
mod quantity;

pub use filter::{load_filters, FilterError, FilterMeta, FilterPlugin, FilterRegistry, Filtered, ParseFilter};
pub use information::convert_shorthand;
pub use kind::{DurationKind, Generic, InformationKind, Kind, System};
pub use parse::Input;
pub use quantity::{Duration, Information, Quantity};

pub use measure_core::{CalendarInterval, FormatConfig, Formatters, Locale, Magnitude, MeasureError, NumberFormatter};
pub use measure_units::{ChainConverter, Comparison, UnitRegistry};

/// Parse a quantity of any category
pub fn parse(value: impl Into<Input<Generic>>) -> Result<Quantity, MeasureError> {
    Quantity::parse(value)
}
