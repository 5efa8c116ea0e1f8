//! Elapsed time

use crate::kind::DurationKind;
use crate::quantity::Quantity;
use measure_core::{Magnitude, MeasureError};

/// (lower bound in seconds, label, divisor); no divisor means a count of one
const HUMANIZE_STEPS: [(i64, &str, Option<i64>); 8] = [
    (1, "sec", None),
    (2, "secs", Some(1)),
    (60, "min", None),
    (120, "mins", Some(60)),
    (3_600, "hr", None),
    (7_200, "hrs", Some(3_600)),
    (86_400, "day", None),
    (172_800, "days", Some(86_400)),
];

impl Quantity<DurationKind> {
    /// Coarse, human-readable rendering ("2 mins", "1 day")
    pub fn humanize(&self) -> Result<Self, MeasureError> {
        let seconds = self.clone().convert_to("s")?.magnitude().as_f64();

        if seconds < 1.0 {
            return Self::new(0, "secs");
        }

        let step = HUMANIZE_STEPS
            .iter()
            .rev()
            .find(|(lower, _, _)| seconds >= *lower as f64);

        match step {
            Some((_, label, Some(divisor))) => {
                let count = (seconds / *divisor as f64).floor();
                Self::new(Magnitude::Int(count as i64), *label)
            }
            Some((_, label, None)) => Self::new(1, *label),
            None => Self::new(0, "secs"),
        }
    }

    /// As a standard library duration (whole and fractional seconds)
    pub fn to_std(&self) -> Result<std::time::Duration, MeasureError> {
        let seconds = self.clone().convert_to("s")?.magnitude().as_f64();
        std::time::Duration::try_from_secs_f64(seconds)
            .map_err(|e| MeasureError::invalid_input_because(self.to_string(), e.to_string()))
    }

    pub fn seconds(self) -> Result<Self, MeasureError> {
        self.convert_to("s")
    }

    pub fn minutes(self) -> Result<Self, MeasureError> {
        self.convert_to("m")
    }

    pub fn hours(self) -> Result<Self, MeasureError> {
        self.convert_to("h")
    }

    pub fn days(self) -> Result<Self, MeasureError> {
        self.convert_to("d")
    }

    pub fn weeks(self) -> Result<Self, MeasureError> {
        self.convert_to("w")
    }

    pub fn years(self) -> Result<Self, MeasureError> {
        self.convert_to("y")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Input;
    use crate::quantity::Duration;
    use measure_core::CalendarInterval;

    fn humanized(value: impl Into<Input<DurationKind>>) -> String {
        Duration::parse(value).unwrap().humanize().unwrap().to_string()
    }

    #[test]
    fn test_from_seconds() {
        assert_eq!(Duration::parse(10).unwrap().to_string(), "10 s");
    }

    #[test]
    fn test_from_interval() {
        let interval: CalendarInterval = "P1W2D".parse().unwrap();
        assert_eq!(Duration::parse(interval).unwrap().to_string(), "777,600 s");
    }

    #[test]
    fn test_cannot_be_negative() {
        assert!(Duration::parse(-10).is_err());
        assert!(Duration::parse("-10 s").is_err());
        assert!(Duration::new(-0.5, "h").is_err());
        assert!(Duration::parse("5 m").unwrap().subtract("10 m").is_err());
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanized(0), "0 secs");
        assert_eq!(humanized(0.3), "0 secs");
        assert_eq!(humanized(1), "1 sec");
        assert_eq!(humanized(2), "2 secs");
        assert_eq!(humanized(59), "59 secs");
        assert_eq!(humanized(60), "1 min");
        assert_eq!(humanized("1m"), "1 min");
        assert_eq!(humanized(61), "1 min");
        assert_eq!(humanized(119), "1 min");
        assert_eq!(humanized(120), "2 mins");
        assert_eq!(humanized(121), "2 mins");
        assert_eq!(humanized(3599), "59 mins");
        assert_eq!(humanized(3600), "1 hr");
        assert_eq!(humanized(7199), "1 hr");
        assert_eq!(humanized(7200), "2 hrs");
        assert_eq!(humanized(7201), "2 hrs");
        assert_eq!(humanized(86399), "23 hrs");
        assert_eq!(humanized(86400), "1 day");
        assert_eq!(humanized(86401), "1 day");
        assert_eq!(humanized(172799), "1 day");
        assert_eq!(humanized(172800), "2 days");
        assert_eq!(humanized(172801), "2 days");
        assert_eq!(humanized("400 days"), "400 days");
    }

    #[test]
    fn test_humanize_fractional_units() {
        assert_eq!(humanized("1.5 h"), "1 hr");
        assert_eq!(humanized("500 ms"), "0 secs");
    }

    #[test]
    fn test_shorthands() {
        let d = Duration::parse(7200).unwrap();
        assert_eq!(d.clone().hours().unwrap().to_string(), "2 h");
        assert_eq!(d.clone().minutes().unwrap().to_string(), "120 m");
        assert_eq!(d.clone().seconds().unwrap().to_string(), "7,200 s");
        assert_eq!(Duration::parse("2 w").unwrap().days().unwrap().to_string(), "14 d");
        assert_eq!(Duration::parse("14 d").unwrap().weeks().unwrap().to_string(), "2 w");
        assert_eq!(Duration::parse("32w").unwrap().years().unwrap().to_string(), "0.61 y");
    }

    #[test]
    fn test_duration_converter_only_knows_time() {
        // "m" is a minute here, never a meter
        let d = Duration::parse("1m").unwrap().seconds().unwrap();
        assert_eq!(d.to_string(), "60 s");
        assert!(Duration::parse("1 km").unwrap().seconds().is_err());
    }

    #[test]
    fn test_to_std() {
        let d = Duration::parse("1.5 min").unwrap();
        assert_eq!(d.to_std().unwrap(), std::time::Duration::from_secs(90));
    }
}
