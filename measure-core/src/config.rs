//! Display configuration

use crate::Locale;
use std::env;

/// Environment variable consulted first by [`FormatConfig::from_env`]
pub const LOCALE_ENV: &str = "MEASURE_LOCALE";

/// How quantities are rendered as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    pub locale: Locale,
    pub max_fraction_digits: u32,
}

impl FormatConfig {
    pub fn new() -> Self {
        Self {
            locale: Locale::default(),
            max_fraction_digits: 2,
        }
    }

    /// Read the locale from `MEASURE_LOCALE`, `LC_ALL` or `LANG` (first hit wins)
    pub fn from_env() -> Self {
        let locale = [LOCALE_ENV, "LC_ALL", "LANG"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| Self::locale_from(&value))
            .unwrap_or_default();

        Self::new().with_locale(locale)
    }

    fn locale_from(value: &str) -> Option<Locale> {
        let locale = Locale::from_tag(value);
        if locale.is_none() {
            tracing::debug!(value, "unrecognized locale, falling back to English");
        }
        locale
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_max_fraction_digits(mut self, digits: u32) -> Self {
        self.max_fraction_digits = digits;
        self
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormatConfig::default();
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.max_fraction_digits, 2);
    }

    #[test]
    fn test_builder() {
        let config = FormatConfig::new()
            .with_locale(Locale::French)
            .with_max_fraction_digits(3);
        assert_eq!(config.locale, Locale::French);
        assert_eq!(config.max_fraction_digits, 3);
    }
}
