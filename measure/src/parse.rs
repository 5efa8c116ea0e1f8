//! Quantity parser
//!
//! Accepted shapes, tried in order:
//! - an existing quantity (re-validated when it comes from another kind)
//! - a `(magnitude, unit)` pair
//! - text such as `"45,000mm"`, `"1.2 GB"` or `"45 - mm"`
//! - a JSON array or object (`[45,"mm"]`, `{"quantity":45,"unit":"mm"}`)
//! - kind fallbacks: bare numbers for durations and information,
//!   calendar intervals for durations

use crate::kind::{DurationKind, Generic, InformationKind, Kind};
use crate::quantity::Quantity;
use measure_core::{looks_numeric, CalendarInterval, Magnitude, MeasureError};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

/// Optional minus, digits with grouping commas, optional fraction, optional
/// separator run, then the unit
static QUANTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?[0-9,]+(?:\.[0-9,]+)?)[\s\-_]*(.+)$").expect("quantity pattern is valid")
});

/// Anything that can become a `Quantity<K>`
#[derive(Debug, Clone)]
pub enum Input<K: Kind = Generic> {
    Quantity(Quantity<K>),
    Pair(Magnitude, String),
    Text(String),
    Number(Magnitude),
    Json(Value),
    Interval(CalendarInterval),
    Elapsed(std::time::Duration),
}

impl<K: Kind> fmt::Display for Input<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Quantity(q) => write!(f, "{}", q),
            Input::Pair(m, u) => write!(f, "[{}, {}]", m, u),
            Input::Text(s) => write!(f, "{}", s),
            Input::Number(m) => write!(f, "{}", m),
            Input::Json(v) => write!(f, "{}", v),
            Input::Interval(i) => write!(f, "{}", i),
            Input::Elapsed(d) => write!(f, "{:?}", d),
        }
    }
}

pub(crate) fn parse<K: Kind>(input: Input<K>) -> Result<Quantity<K>, MeasureError> {
    match input {
        Input::Quantity(q) => Ok(q),
        Input::Pair(magnitude, unit) => Quantity::new(magnitude, unit),
        Input::Text(text) => parse_text(&text),
        Input::Json(value) => parse_json(&value, &value.to_string()),
        Input::Number(magnitude) => bare(magnitude, &magnitude.to_string()),
        Input::Interval(interval) => parse_interval(&interval),
        Input::Elapsed(elapsed) => {
            if !K::accepts_intervals() {
                return Err(MeasureError::invalid_input(format!("{:?}", elapsed)));
            }
            bare(Magnitude::from(elapsed.as_secs()), &format!("{:?}", elapsed))
        }
    }
}

fn parse_text<K: Kind>(text: &str) -> Result<Quantity<K>, MeasureError> {
    let trimmed = text.trim();

    if !looks_numeric(trimmed) {
        if let Some(caps) = QUANTITY_PATTERN.captures(trimmed) {
            let digits = caps[1].replace(',', "");
            let magnitude = Magnitude::from_str(&digits)
                .map_err(|_| MeasureError::invalid_input(text))?;
            return Quantity::new(magnitude, &caps[2]);
        }
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if value.is_array() || value.is_object() {
            return parse_json(&value, text);
        }
    }

    if looks_numeric(trimmed) {
        if let Ok(magnitude) = Magnitude::from_str(trimmed) {
            return bare(magnitude, text);
        }
    }

    if K::accepts_intervals() {
        if let Ok(interval) = trimmed.parse::<CalendarInterval>() {
            return parse_interval(&interval);
        }
    }

    tracing::debug!(kind = K::NAME, value = text, "no input shape matched");
    Err(MeasureError::invalid_input(text))
}

fn parse_json<K: Kind>(value: &Value, original: &str) -> Result<Quantity<K>, MeasureError> {
    let invalid = || MeasureError::invalid_input(original);

    match value {
        Value::Array(items) if items.len() == 2 => pair_from_json(&items[0], &items[1]).ok_or_else(invalid)?,
        Value::Object(map) if map.len() == 2 => {
            let magnitude = map.get("quantity").or_else(|| map.get("magnitude")).ok_or_else(invalid)?;
            let unit = map.get("unit").ok_or_else(invalid)?;
            pair_from_json(magnitude, unit).ok_or_else(invalid)?
        }
        Value::String(text) => parse_text(text),
        Value::Number(_) => {
            let magnitude = Magnitude::from_json(value).map_err(|_| invalid())?;
            bare(magnitude, original)
        }
        _ => Err(invalid()),
    }
}

/// Type-checked pair: a number (or numeric string) and a string unit
fn pair_from_json<K: Kind>(magnitude: &Value, unit: &Value) -> Option<Result<Quantity<K>, MeasureError>> {
    let magnitude = Magnitude::from_json(magnitude).ok()?;
    let unit = unit.as_str()?;
    Some(Quantity::new(magnitude, unit))
}

/// A number without a unit, accepted only by kinds with a base unit
fn bare<K: Kind>(magnitude: Magnitude, original: &str) -> Result<Quantity<K>, MeasureError> {
    match K::bare_unit() {
        Some(unit) => Quantity::new(Magnitude::Int(magnitude.truncate()), unit),
        None => Err(MeasureError::invalid_input(original)),
    }
}

fn parse_interval<K: Kind>(interval: &CalendarInterval) -> Result<Quantity<K>, MeasureError> {
    if !K::accepts_intervals() {
        return Err(MeasureError::invalid_input(interval.to_string()));
    }
    bare(Magnitude::Int(interval.elapsed_seconds()), &interval.to_string())
}

// ============================================================================
// Conversions into Input
// ============================================================================

impl<K: Kind> From<Quantity<K>> for Input<K> {
    fn from(q: Quantity<K>) -> Self {
        Input::Quantity(q)
    }
}

impl<K: Kind> From<&Quantity<K>> for Input<K> {
    fn from(q: &Quantity<K>) -> Self {
        Input::Quantity(q.clone())
    }
}

impl<K: Kind> From<&str> for Input<K> {
    fn from(s: &str) -> Self {
        Input::Text(s.to_string())
    }
}

impl<K: Kind> From<String> for Input<K> {
    fn from(s: String) -> Self {
        Input::Text(s)
    }
}

impl<K: Kind> From<&String> for Input<K> {
    fn from(s: &String) -> Self {
        Input::Text(s.clone())
    }
}

impl<K: Kind> From<Magnitude> for Input<K> {
    fn from(m: Magnitude) -> Self {
        Input::Number(m)
    }
}

macro_rules! number_input {
    ($($t:ty),*) => {
        $(
            impl<K: Kind> From<$t> for Input<K> {
                fn from(n: $t) -> Self {
                    Input::Number(Magnitude::from(n))
                }
            }
        )*
    };
}

number_input!(i32, i64, u32, u64, f64);

impl<K: Kind, M: Into<Magnitude>, U: Into<String>> From<(M, U)> for Input<K> {
    fn from((magnitude, unit): (M, U)) -> Self {
        Input::Pair(magnitude.into(), unit.into())
    }
}

impl<K: Kind> From<Value> for Input<K> {
    fn from(value: Value) -> Self {
        Input::Json(value)
    }
}

impl<K: Kind> From<CalendarInterval> for Input<K> {
    fn from(interval: CalendarInterval) -> Self {
        Input::Interval(interval)
    }
}

impl<K: Kind> From<std::time::Duration> for Input<K> {
    fn from(elapsed: std::time::Duration) -> Self {
        Input::Elapsed(elapsed)
    }
}

/// A quantity of another kind is re-wrapped through the target kind's validation
macro_rules! cross_kind_input {
    ($($from:ty => $to:ty),* $(,)?) => {
        $(
            impl From<Quantity<$from>> for Input<$to> {
                fn from(q: Quantity<$from>) -> Self {
                    let (magnitude, unit) = q.to_pair();
                    Input::Pair(magnitude, unit)
                }
            }
        )*
    };
}

cross_kind_input!(
    Generic => DurationKind,
    Generic => InformationKind,
    DurationKind => Generic,
    DurationKind => InformationKind,
    InformationKind => Generic,
    InformationKind => DurationKind,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::{Duration, Information};
    use serde_json::json;

    fn parsed(value: impl Into<Input>) -> (Magnitude, String) {
        Quantity::<Generic>::parse(value).unwrap().to_pair()
    }

    fn assert_parses(value: impl Into<Input>, magnitude: Magnitude, unit: &str) {
        let (m, u) = parsed(value);
        assert_eq!(u, unit);
        assert_eq!(m, magnitude);
        assert_eq!(m.is_integer(), magnitude.is_integer());
    }

    #[test]
    fn test_text_shapes() {
        assert_parses("45000mm", Magnitude::Int(45000), "mm");
        assert_parses("45,000mm", Magnitude::Int(45000), "mm");
        assert_parses("-45,000.000,001C", Magnitude::Float(-45000.000001), "C");
        assert_parses("45mm", Magnitude::Int(45), "mm");
        assert_parses("45 mm", Magnitude::Int(45), "mm");
        assert_parses("45    - mm", Magnitude::Int(45), "mm");
        assert_parses("45_mm", Magnitude::Int(45), "mm");
        assert_parses("45.0mm", Magnitude::Float(45.0), "mm");
        assert_parses("45.0546 mm", Magnitude::Float(45.0546), "mm");
        assert_parses("  1.2 GB  ", Magnitude::Float(1.2), "GB");
        assert_parses("72.18 feet", Magnitude::Float(72.18), "feet");
        assert_parses("1 nautical mile", Magnitude::Int(1), "nautical mile");
    }

    #[test]
    fn test_structured_shapes() {
        let existing: Quantity = Quantity::new(45, "mm").unwrap();
        assert_parses(existing, Magnitude::Int(45), "mm");
        assert_parses(json!({"quantity": 45, "unit": "mm"}), Magnitude::Int(45), "mm");
        assert_parses(json!({"magnitude": 45, "unit": "mm"}), Magnitude::Int(45), "mm");
        assert_parses(json!([45.0, "mm"]), Magnitude::Float(45.0), "mm");
        assert_parses(json!(["45.0", "mm"]), Magnitude::Float(45.0), "mm");
        assert_parses((45, "mm"), Magnitude::Int(45), "mm");
        assert_parses("[45,\"mm\"]", Magnitude::Int(45), "mm");
    }

    #[test]
    fn test_invalid_inputs() {
        for value in ["blah", "[]", "60", "", "{}", "[45]", "[\"mm\", 45]", "-,mm"] {
            let err = Quantity::<Generic>::parse(value).unwrap_err();
            assert!(err.is_invalid_input(), "{:?}", value);
        }
        assert!(Quantity::<Generic>::parse(json!([])).is_err());
        assert!(Quantity::<Generic>::parse(json!([45, 7])).is_err());
        // objects need named keys; entry order is not significant
        assert!(Quantity::<Generic>::parse(json!({"a": 45, "b": "mm"})).unwrap_err().is_invalid_input());
        assert!(Quantity::<Generic>::parse(60).is_err());
        assert!(Quantity::<Generic>::parse(CalendarInterval::new().days(1)).is_err());
    }

    #[test]
    fn test_invalid_message_names_value() {
        let err = Quantity::<Generic>::parse("blah").unwrap_err();
        assert_eq!(err.to_string(), "\"blah\" is an invalid dimensional value.");
    }

    #[test]
    fn test_text_round_trip() {
        for original in ["45 mm", "45,000.5 mm", "-3.25 kg", "0.13 bytes"] {
            let q: Quantity = original.parse().unwrap();
            assert_eq!(q.to_string(), original);
            assert_eq!(q.to_string().parse::<Quantity>().unwrap(), q);
        }
    }

    #[test]
    fn test_bare_numbers_for_kinds() {
        let d = Duration::parse(10).unwrap();
        assert_eq!(d.to_pair(), (Magnitude::Int(10), "s".to_string()));

        let d = Duration::parse(0.3).unwrap();
        assert_eq!(d.magnitude(), Magnitude::Int(0));

        let d = Duration::parse("90").unwrap();
        assert_eq!(d.to_string(), "90 s");

        let i = Information::parse("400").unwrap();
        assert_eq!(i.to_pair(), (Magnitude::Int(400), "B".to_string()));

        let i = Information::parse(json!(400)).unwrap();
        assert_eq!(i.unit(), "B");
    }

    #[test]
    fn test_intervals_for_durations() {
        let d = Duration::parse("P1W2D".parse::<CalendarInterval>().unwrap()).unwrap();
        assert_eq!(d.to_string(), "777,600 s");

        let d = Duration::parse("PT1H30M").unwrap();
        assert_eq!(d.magnitude(), Magnitude::Int(5400));

        let d = Duration::parse(std::time::Duration::from_millis(90_500)).unwrap();
        assert_eq!(d.magnitude(), Magnitude::Int(90));

        assert!(Duration::parse(CalendarInterval::new().days(1).inverted()).is_err());
        assert!(Information::parse(CalendarInterval::new().days(1)).is_err());
        assert!(Information::parse(std::time::Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_cross_kind_rewrap() {
        let generic: Quantity = "2 kb".parse().unwrap();
        let info = Information::parse(generic).unwrap();
        assert_eq!(info.unit(), "kB");

        let back = Quantity::<Generic>::parse(info).unwrap();
        assert_eq!(back.unit(), "kB");

        let negative: Quantity = "-2 s".parse().unwrap();
        assert!(Duration::parse(negative).is_err());
    }
}
