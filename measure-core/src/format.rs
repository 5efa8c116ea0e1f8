//! Locale-aware number formatting
//!
//! Magnitudes are grouped with the locale's thousands separator and rounded
//! half-up (away from zero) to at most `max_fraction_digits` digits. Rounding
//! works on the shortest decimal representation of the `f64`, so `1.005`
//! rounds to `1.01` as a human would expect.

use crate::{FormatConfig, Magnitude};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    English,
    German,
    French,
    Spanish,
    Italian,
    Swiss,
}

impl Locale {
    /// Parse a POSIX or BCP-47 style tag ("de_DE.UTF-8", "fr-CH", "en")
    ///
    /// Only the language subtag matters, except for Swiss German.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let tag = tag.split(['.', '@']).next().unwrap_or("").to_lowercase();
        let mut parts = tag.split(['_', '-']);
        let language = parts.next().unwrap_or("");
        let region = parts.next().unwrap_or("");

        match (language, region) {
            ("de", "ch") => Some(Locale::Swiss),
            ("en", _) | ("c", _) | ("posix", _) => Some(Locale::English),
            ("de", _) => Some(Locale::German),
            ("fr", _) => Some(Locale::French),
            ("es", _) => Some(Locale::Spanish),
            ("it", _) => Some(Locale::Italian),
            _ => None,
        }
    }

    pub fn grouping_separator(&self) -> &'static str {
        match self {
            Locale::English => ",",
            Locale::German | Locale::Spanish | Locale::Italian => ".",
            Locale::French => "\u{202f}",
            Locale::Swiss => "\u{2019}",
        }
    }

    pub fn decimal_separator(&self) -> &'static str {
        match self {
            Locale::English | Locale::Swiss => ".",
            Locale::German | Locale::French | Locale::Spanish | Locale::Italian => ",",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::German => "de",
            Locale::French => "fr",
            Locale::Spanish => "es",
            Locale::Italian => "it",
            Locale::Swiss => "de_CH",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Decimal formatter for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormatter {
    locale: Locale,
    max_fraction_digits: u32,
}

impl NumberFormatter {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            max_fraction_digits: 2,
        }
    }

    pub fn from_config(config: &FormatConfig) -> Self {
        Self {
            locale: config.locale,
            max_fraction_digits: config.max_fraction_digits,
        }
    }

    pub fn with_max_fraction_digits(mut self, digits: u32) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn format(&self, magnitude: &Magnitude) -> String {
        match *magnitude {
            Magnitude::Int(i) => {
                let digits = i.unsigned_abs().to_string();
                let sign = if i < 0 { "-" } else { "" };
                format!("{}{}", sign, self.group(&digits))
            }
            Magnitude::Float(f) => self.format_float(f),
        }
    }

    fn format_float(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value < 0.0 { "-∞".to_string() } else { "∞".to_string() };
        }

        // `{}` never uses exponent notation and yields the shortest round-trip digits
        let repr = format!("{}", value.abs());
        let (int_digits, frac_digits) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
        let (int_digits, frac_digits) = round_half_up(int_digits, frac_digits, self.max_fraction_digits as usize);

        let negative = value < 0.0 && (int_digits.bytes().any(|b| b != b'0') || !frac_digits.is_empty());
        let sign = if negative { "-" } else { "" };

        if frac_digits.is_empty() {
            format!("{}{}", sign, self.group(&int_digits))
        } else {
            format!(
                "{}{}{}{}",
                sign,
                self.group(&int_digits),
                self.locale.decimal_separator(),
                frac_digits
            )
        }
    }

    /// Insert grouping separators every three digits from the right
    fn group(&self, digits: &str) -> String {
        let separator = self.locale.grouping_separator();
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3 * separator.len());

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push_str(separator);
            }
            out.push(ch);
        }
        out
    }
}

/// Round a decimal digit string half-up, trimming trailing fraction zeros
fn round_half_up(int_digits: &str, frac_digits: &str, max_fraction: usize) -> (String, String) {
    if frac_digits.len() <= max_fraction {
        return (int_digits.to_string(), frac_digits.trim_end_matches('0').to_string());
    }

    let round_up = frac_digits.as_bytes()[max_fraction] >= b'5';
    let mut digits: Vec<u8> = int_digits
        .bytes()
        .chain(frac_digits.bytes().take(max_fraction))
        .collect();

    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if !carry {
                break;
            }
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - max_fraction;
    let int_part = String::from_utf8_lossy(&digits[..split]).into_owned();
    let frac_part = String::from_utf8_lossy(&digits[split..])
        .trim_end_matches('0')
        .to_string();

    (int_part, frac_part)
}

static SHARED: LazyLock<Formatters> = LazyLock::new(Formatters::new);

/// Write-once-read-many cache of formatters, keyed by locale
///
/// Also holds the default locale used when a quantity is displayed without
/// an explicit formatter.
#[derive(Debug)]
pub struct Formatters {
    cache: RwLock<HashMap<Locale, Arc<NumberFormatter>>>,
    default_locale: RwLock<Locale>,
}

impl Formatters {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            default_locale: RwLock::new(Locale::default()),
        }
    }

    /// Process-wide instance used by `Display` implementations
    pub fn shared() -> &'static Formatters {
        &SHARED
    }

    /// Get the formatter for `locale`, building it on first use
    pub fn get(&self, locale: Locale) -> Arc<NumberFormatter> {
        {
            let read_guard = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(formatter) = read_guard.get(&locale) {
                return Arc::clone(formatter);
            }
        }

        let mut write_guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let formatter = write_guard.entry(locale).or_insert_with(|| {
            tracing::debug!(locale = %locale, "creating number formatter");
            Arc::new(NumberFormatter::new(locale))
        });
        Arc::clone(formatter)
    }

    pub fn default_locale(&self) -> Locale {
        *self.default_locale.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_default_locale(&self, locale: Locale) {
        *self.default_locale.write().unwrap_or_else(PoisonError::into_inner) = locale;
    }

    /// Formatter for the current default locale
    pub fn current(&self) -> Arc<NumberFormatter> {
        self.get(self.default_locale())
    }
}

impl Default for Formatters {
    fn default() -> Self {
        Self::new()
    }
}
