//! Calendar intervals
//!
//! A `CalendarInterval` is a bag of calendar components ("1 year, 2 months,
//! 3 days") rather than a fixed number of seconds. Its elapsed length is
//! measured by applying it to the Unix epoch on the proleptic Gregorian
//! calendar, so "P1M" is 31 days (January 1970) and "P2M" is 59 days.
//!
//! Design principles:
//! - No external datetime crates
//! - Integer arithmetic only, never panics

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Days from 0000-03-01 to 1970-01-01
const UNIX_EPOCH_DAYS: i64 = 719_468;

/// Error type for interval parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("Invalid ISO 8601 duration: {0}")]
    ParseError(String),

    #[error("Interval component out of range: {0}")]
    Overflow(String),
}

/// Calendar/elapsed-time interval (the components of an ISO 8601 duration)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarInterval {
    pub years: u32,
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// Interval points backwards in time
    #[serde(default)]
    pub negative: bool,
}

impl CalendarInterval {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn years(mut self, years: u32) -> Self {
        self.years = years;
        self
    }

    pub fn months(mut self, months: u32) -> Self {
        self.months = months;
        self
    }

    pub fn weeks(mut self, weeks: u32) -> Self {
        self.weeks = weeks;
        self
    }

    pub fn days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn hours(mut self, hours: u32) -> Self {
        self.hours = hours;
        self
    }

    pub fn minutes(mut self, minutes: u32) -> Self {
        self.minutes = minutes;
        self
    }

    pub fn seconds(mut self, seconds: u32) -> Self {
        self.seconds = seconds;
        self
    }

    pub fn inverted(mut self) -> Self {
        self.negative = !self.negative;
        self
    }

    /// Signed number of seconds between the epoch and the epoch shifted by this interval
    pub fn elapsed_seconds(&self) -> i64 {
        let sign: i64 = if self.negative { -1 } else { 1 };

        // Calendar part first (years, months), then fixed-length parts
        let total_months = 1970 * 12 + sign * (self.years as i64 * 12 + self.months as i64);
        let year = total_months.div_euclid(12);
        let month = (total_months.rem_euclid(12) + 1) as u32;

        let days = days_from_civil(year, month, 1)
            + sign * (self.weeks as i64 * 7 + self.days as i64);

        let clock = self.hours as i64 * SECONDS_PER_HOUR
            + self.minutes as i64 * SECONDS_PER_MINUTE
            + self.seconds as i64;

        days * SECONDS_PER_DAY + sign * clock
    }
}

impl FromStr for CalendarInterval {
    type Err = IntervalError;

    /// Parse "P1Y2M3W4DT5H6M7S" (any subset, leading '-' inverts)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let body = rest
            .strip_prefix(['P', 'p'])
            .ok_or_else(|| IntervalError::ParseError(s.to_string()))?;

        let (date_part, time_part) = match body.split_once(['T', 't']) {
            Some((d, t)) => {
                if t.is_empty() {
                    return Err(IntervalError::ParseError(s.to_string()));
                }
                (d, Some(t))
            }
            None => (body, None),
        };

        if date_part.is_empty() && time_part.is_none() {
            return Err(IntervalError::ParseError(s.to_string()));
        }

        let mut interval = CalendarInterval {
            negative,
            ..Default::default()
        };

        for (value, designator) in components(date_part, s)? {
            match designator {
                'Y' => interval.years = value,
                'M' => interval.months = value,
                'W' => interval.weeks = value,
                'D' => interval.days = value,
                _ => return Err(IntervalError::ParseError(s.to_string())),
            }
        }

        if let Some(time_part) = time_part {
            for (value, designator) in components(time_part, s)? {
                match designator {
                    'H' => interval.hours = value,
                    'M' => interval.minutes = value,
                    'S' => interval.seconds = value,
                    _ => return Err(IntervalError::ParseError(s.to_string())),
                }
            }
        }

        Ok(interval)
    }
}

/// Split "1Y2M" into [(1, 'Y'), (2, 'M')]
fn components(part: &str, original: &str) -> Result<Vec<(u32, char)>, IntervalError> {
    let mut out = Vec::new();
    let mut digits = String::new();

    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            if digits.is_empty() {
                return Err(IntervalError::ParseError(original.to_string()));
            }
            let value = digits
                .parse::<u32>()
                .map_err(|_| IntervalError::Overflow(digits.clone()))?;
            out.push((value, c.to_ascii_uppercase()));
            digits.clear();
        }
    }

    if !digits.is_empty() {
        return Err(IntervalError::ParseError(original.to_string()));
    }

    Ok(out)
}

impl fmt::Display for CalendarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        let date = [(self.years, 'Y'), (self.months, 'M'), (self.weeks, 'W'), (self.days, 'D')];
        let time = [(self.hours, 'H'), (self.minutes, 'M'), (self.seconds, 'S')];

        for (value, designator) in date.iter().filter(|(v, _)| *v > 0) {
            write!(f, "{}{}", value, designator)?;
        }
        if time.iter().any(|(v, _)| *v > 0) {
            write!(f, "T")?;
            for (value, designator) in time.iter().filter(|(v, _)| *v > 0) {
                write!(f, "{}{}", value, designator)?;
            }
        } else if date.iter().all(|(v, _)| *v == 0) {
            write!(f, "T0S")?;
        }
        Ok(())
    }
}

// ============================================================================
// Calendar helpers
// ============================================================================

/// Convert civil date to days since Unix epoch
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // [0, 399]
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as i64 - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * 146097 + doe - UNIX_EPOCH_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weeks_and_days() {
        let interval: CalendarInterval = "P1W2D".parse().unwrap();
        assert_eq!(interval.weeks, 1);
        assert_eq!(interval.days, 2);
        assert_eq!(interval.elapsed_seconds(), 777_600);
    }

    #[test]
    fn test_time_components() {
        let interval: CalendarInterval = "PT1H30M5S".parse().unwrap();
        assert_eq!(interval.elapsed_seconds(), 3600 + 1800 + 5);
    }

    #[test]
    fn test_months_follow_the_calendar() {
        // January 1970 has 31 days, February 28
        assert_eq!(CalendarInterval::new().months(1).elapsed_seconds(), 31 * 86_400);
        assert_eq!(CalendarInterval::new().months(2).elapsed_seconds(), 59 * 86_400);
    }

    #[test]
    fn test_years_follow_the_calendar() {
        // 1970 and 1971 are common years, 1972 is a leap year
        assert_eq!(CalendarInterval::new().years(1).elapsed_seconds(), 365 * 86_400);
        assert_eq!(CalendarInterval::new().years(3).elapsed_seconds(), 1096 * 86_400);
    }

    #[test]
    fn test_negative_interval() {
        let interval: CalendarInterval = "-P1D".parse().unwrap();
        assert!(interval.negative);
        assert_eq!(interval.elapsed_seconds(), -86_400);

        // December 1969 has 31 days
        assert_eq!(CalendarInterval::new().months(1).inverted().elapsed_seconds(), -31 * 86_400);
    }

    #[test]
    fn test_full_form() {
        let interval: CalendarInterval = "P1Y2M3DT4H5M6S".parse().unwrap();
        assert_eq!(interval.years, 1);
        assert_eq!(interval.months, 2);
        assert_eq!(interval.days, 3);
        assert_eq!(interval.hours, 4);
        assert_eq!(interval.minutes, 5);
        assert_eq!(interval.seconds, 6);
        assert_eq!(interval.to_string(), "P1Y2M3DT4H5M6S");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("".parse::<CalendarInterval>().is_err());
        assert!("P".parse::<CalendarInterval>().is_err());
        assert!("PT".parse::<CalendarInterval>().is_err());
        assert!("1D".parse::<CalendarInterval>().is_err());
        assert!("P1".parse::<CalendarInterval>().is_err());
        assert!("P1H".parse::<CalendarInterval>().is_err());
        assert!("PD".parse::<CalendarInterval>().is_err());
        assert!(matches!("P99999999999D".parse::<CalendarInterval>(), Err(IntervalError::Overflow(_))));
    }

    #[test]
    fn test_empty_interval_display() {
        assert_eq!(CalendarInterval::new().to_string(), "PT0S");
        assert_eq!(CalendarInterval::new().elapsed_seconds(), 0);
    }
}
