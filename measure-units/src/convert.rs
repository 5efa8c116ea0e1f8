//! Category converters and the chain that dispatches between them

use crate::registry::UnitRegistry;
use crate::unit::UnitNotRegistered;
use crate::units::{default_categories, Category};
use measure_core::{Magnitude, MeasureError};
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Ordered comparison between two quantities of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Equal,
    Larger,
    LargerOrEqual,
    Smaller,
    SmallerOrEqual,
}

impl Comparison {
    /// Compare two native-unit values.
    ///
    /// Equality is exact: values that differ only by floating-point noise
    /// compare unequal.
    #[allow(clippy::float_cmp)]
    pub fn apply(&self, first: f64, second: f64) -> bool {
        match self {
            Comparison::Equal => first == second,
            Comparison::Larger => first > second,
            Comparison::LargerOrEqual => first >= second,
            Comparison::Smaller => first < second,
            Comparison::SmallerOrEqual => first <= second,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Equal => "==",
            Comparison::Larger => ">",
            Comparison::LargerOrEqual => ">=",
            Comparison::Smaller => "<",
            Comparison::SmallerOrEqual => "<=",
        }
    }
}

/// Borrowed view of a quantity handed to converters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operand<'a> {
    pub magnitude: Magnitude,
    pub unit: &'a str,
}

impl<'a> Operand<'a> {
    pub fn new(magnitude: impl Into<Magnitude>, unit: &'a str) -> Self {
        Operand {
            magnitude: magnitude.into(),
            unit,
        }
    }
}

/// Plain digits, no locale grouping, so error text never depends on the display locale
impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

/// Conversion and comparison within a single category
///
/// A miss is reported as [`UnitNotRegistered`] so a dispatcher can move on to
/// the next category.
pub trait Converter: Send + Sync {
    /// Name of the category this converter serves
    fn category(&self) -> &'static str;

    /// Whether `unit` belongs to this converter's category
    fn recognizes(&self, unit: &str) -> bool;

    /// Convert `magnitude` from unit `from` to unit `to`
    fn convert(&self, magnitude: Magnitude, from: &str, to: &str) -> Result<Magnitude, UnitNotRegistered>;

    /// Compare two operands in native units
    fn compare(
        &self,
        first: Operand<'_>,
        second: Operand<'_>,
        comparison: Comparison,
    ) -> Result<bool, UnitNotRegistered>;
}

/// Converter backed by one category's memoized unit table
pub struct CategoryConverter {
    registry: Arc<UnitRegistry>,
    category: Box<dyn Category>,
}

impl CategoryConverter {
    pub fn new(registry: Arc<UnitRegistry>, category: Box<dyn Category>) -> Self {
        CategoryConverter { registry, category }
    }

    fn native(&self, operand: &Operand<'_>) -> Result<f64, UnitNotRegistered> {
        let table = self.registry.table(self.category.as_ref());
        let unit = table.resolve(operand.unit)?;
        Ok(unit.to_native(operand.magnitude.as_f64()))
    }
}

impl fmt::Debug for CategoryConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryConverter")
            .field("category", &self.category.name())
            .finish()
    }
}

impl Converter for CategoryConverter {
    fn category(&self) -> &'static str {
        self.category.name()
    }

    fn recognizes(&self, unit: &str) -> bool {
        self.registry.table(self.category.as_ref()).contains(unit)
    }

    fn convert(&self, magnitude: Magnitude, from: &str, to: &str) -> Result<Magnitude, UnitNotRegistered> {
        if from == to {
            return Ok(magnitude);
        }

        let table = self.registry.table(self.category.as_ref());
        let source = table.resolve(from)?;
        let target = table.resolve(to)?;

        let native = source.to_native(magnitude.as_f64());
        Ok(Magnitude::Float(target.from_native(native)))
    }

    fn compare(
        &self,
        first: Operand<'_>,
        second: Operand<'_>,
        comparison: Comparison,
    ) -> Result<bool, UnitNotRegistered> {
        let first = self.native(&first)?;
        let second = self.native(&second)?;
        Ok(comparison.apply(first, second))
    }
}

static SHARED: LazyLock<ChainConverter> = LazyLock::new(ChainConverter::default);

/// Tries each converter in order until one recognizes both units
///
/// Category misses are swallowed; only the final failure reaches callers. When
/// custom categories share a symbol, the first converter in the chain wins.
pub struct ChainConverter {
    converters: Vec<Box<dyn Converter>>,
}

impl ChainConverter {
    /// Empty chain; every request fails until converters are added
    pub fn new() -> Self {
        ChainConverter { converters: Vec::new() }
    }

    /// Process-wide chain over the built-in categories
    pub fn shared() -> &'static ChainConverter {
        &SHARED
    }

    /// Built-in categories backed by `registry`
    pub fn with_registry(registry: Arc<UnitRegistry>) -> Self {
        Self::for_categories(registry, default_categories())
    }

    pub fn for_categories(registry: Arc<UnitRegistry>, categories: Vec<Box<dyn Category>>) -> Self {
        let converters = categories
            .into_iter()
            .map(|category| {
                Box::new(CategoryConverter::new(Arc::clone(&registry), category)) as Box<dyn Converter>
            })
            .collect();
        ChainConverter { converters }
    }

    /// Append a converter; it is tried after the existing ones
    pub fn with_converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converters.push(Box::new(converter));
        self
    }

    /// Category names in dispatch order
    pub fn categories(&self) -> Vec<&'static str> {
        self.converters.iter().map(|c| c.category()).collect()
    }

    /// First category that knows `unit`
    pub fn category_of(&self, unit: &str) -> Option<&'static str> {
        self.converters
            .iter()
            .find(|c| c.recognizes(unit))
            .map(|c| c.category())
    }

    pub fn convert(&self, magnitude: Magnitude, from: &str, to: &str) -> Result<Magnitude, MeasureError> {
        for converter in &self.converters {
            match converter.convert(magnitude, from, to) {
                Ok(result) => return Ok(result),
                Err(miss) => tracing::trace!(category = converter.category(), %miss, "category miss"),
            }
        }

        tracing::debug!(from, to, "no converter accepted conversion");
        Err(MeasureError::conversion(from, to))
    }

    pub fn compare(
        &self,
        first: Operand<'_>,
        second: Operand<'_>,
        comparison: Comparison,
    ) -> Result<bool, MeasureError> {
        for converter in &self.converters {
            match converter.compare(first, second, comparison) {
                Ok(result) => return Ok(result),
                Err(miss) => tracing::trace!(category = converter.category(), %miss, "category miss"),
            }
        }

        tracing::debug!(%first, %second, op = comparison.symbol(), "no converter accepted comparison");
        Err(MeasureError::comparison(first.to_string(), second.to_string()))
    }

    pub fn is_equal_to(&self, first: Operand<'_>, second: Operand<'_>) -> Result<bool, MeasureError> {
        self.compare(first, second, Comparison::Equal)
    }

    pub fn is_larger_than(&self, first: Operand<'_>, second: Operand<'_>) -> Result<bool, MeasureError> {
        self.compare(first, second, Comparison::Larger)
    }

    pub fn is_larger_than_or_equal_to(&self, first: Operand<'_>, second: Operand<'_>) -> Result<bool, MeasureError> {
        self.compare(first, second, Comparison::LargerOrEqual)
    }

    pub fn is_smaller_than(&self, first: Operand<'_>, second: Operand<'_>) -> Result<bool, MeasureError> {
        self.compare(first, second, Comparison::Smaller)
    }

    pub fn is_smaller_than_or_equal_to(&self, first: Operand<'_>, second: Operand<'_>) -> Result<bool, MeasureError> {
        self.compare(first, second, Comparison::SmallerOrEqual)
    }

    /// `first + second`, expressed in `first`'s unit
    pub fn sum(&self, first: Operand<'_>, second: Operand<'_>) -> Result<Magnitude, MeasureError> {
        let other = self.operand_in(&first, &second, "add")?;
        Ok(first.magnitude.add(&other))
    }

    /// `first - second`, expressed in `first`'s unit
    pub fn subtract(&self, first: Operand<'_>, second: Operand<'_>) -> Result<Magnitude, MeasureError> {
        let other = self.operand_in(&first, &second, "subtract")?;
        Ok(first.magnitude.sub(&other))
    }

    /// `second` converted into `first`'s unit
    fn operand_in(
        &self,
        first: &Operand<'_>,
        second: &Operand<'_>,
        operation: &'static str,
    ) -> Result<Magnitude, MeasureError> {
        self.convert(second.magnitude, second.unit, first.unit)
            .map_err(|_| MeasureError::operation(operation, first.to_string(), second.to_string()))
    }
}

impl Default for ChainConverter {
    /// Length, Mass, Temperature, Information, Duration on the shared registry
    fn default() -> Self {
        Self::with_registry(UnitRegistry::shared())
    }
}

impl fmt::Debug for ChainConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConverter")
            .field("categories", &self.categories())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::UnitTable;
    use crate::unit::Unit;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn chain() -> ChainConverter {
        ChainConverter::with_registry(Arc::new(UnitRegistry::new()))
    }

    fn convert(value: f64, from: &str, to: &str) -> f64 {
        chain().convert(Magnitude::Float(value), from, to).unwrap().as_f64()
    }

    struct Angle;

    impl Category for Angle {
        fn name(&self) -> &'static str {
            "angle"
        }

        fn build(&self, table: &mut UnitTable) {
            table.add(Unit::native("rad"), &["radian", "radians"]);
            table.add(Unit::linear("deg", std::f64::consts::PI / 180.0), &["degree", "degrees"]);
        }
    }

    #[test]
    fn test_convert_within_categories() {
        assert!(approx(convert(1.0, "in", "mm"), 25.4));
        assert!(approx(convert(22.0, "m", "ft"), 72.17847769028872));
        assert!(approx(convert(66.6543, "K", "F"), -339.69226));
        assert!(approx(convert(4250.0, "celsius", "kilokelvin"), 4.52315));
        assert!(approx(convert(12.0, "MiB", "MB"), 12.582912));
        assert!(approx(convert(1.0, "KiB", "kB"), 1.024));
    }

    #[test]
    fn test_dispatch_falls_through_to_later_categories() {
        // "m" is meters to Length, which lacks "s"; Duration knows both
        assert!(approx(convert(1.0, "m", "s"), 60.0));
        assert!(approx(convert(22.0, "s", "m"), 22.0 / 60.0));
        assert!(approx(convert(6.0, "\"", "'"), 0.5));
        assert!(approx(convert(1.0, "bit", "bytes"), 0.125));
    }

    #[test]
    fn test_identity_keeps_magnitude() {
        let result = chain().convert(Magnitude::Int(45), "mm", "mm").unwrap();
        assert_eq!(result, Magnitude::Int(45));
        assert!(result.is_integer());
    }

    #[test]
    fn test_round_trip_within_category() {
        let registry = Arc::new(UnitRegistry::new());
        for category in default_categories() {
            let names: Vec<String> = registry.table(category.as_ref()).names().map(str::to_string).collect();
            let converter = CategoryConverter::new(Arc::clone(&registry), category);
            for a in &names {
                for b in &names {
                    let there = converter.convert(Magnitude::Float(123.456), a, b).unwrap();
                    let back = converter.convert(there, b, a).unwrap();
                    assert!(approx(back.as_f64(), 123.456), "{} -> {} -> {}", a, b, a);
                }
            }
        }
    }

    #[test]
    fn test_cross_category_failure() {
        // "m" alone would be a minute to Duration; "meter" is Length only
        let err = chain().convert(Magnitude::Int(22), "s", "meter").unwrap_err();
        assert_eq!(err.to_string(), "No converter registered to convert \"s\" to \"meter\".");

        assert!(chain().convert(Magnitude::Int(1), "foo", "m").is_err());
        assert!(chain().convert(Magnitude::Int(1), "m", "foo").is_err());
        assert!(matches!(
            chain().convert(Magnitude::Int(1), "kg", "C"),
            Err(MeasureError::ConversionNotPossible { .. })
        ));
    }

    #[test]
    fn test_comparisons() {
        let chain = chain();
        assert!(chain.is_larger_than(Operand::new(10, "m"), Operand::new(5, "m")).unwrap());
        assert!(chain.is_equal_to(Operand::new(1, "km"), Operand::new(1000, "m")).unwrap());
        assert!(chain.is_smaller_than(Operand::new(1, "GB"), Operand::new(1, "GiB")).unwrap());
        assert!(chain
            .is_larger_than_or_equal_to(Operand::new(1.5, "GiB"), Operand::new(1.3, "GB"))
            .unwrap());
        assert!(chain
            .is_smaller_than_or_equal_to(Operand::new(60, "s"), Operand::new(1, "min"))
            .unwrap());
    }

    #[test]
    fn test_comparison_failure_names_operands() {
        let err = chain()
            .is_equal_to(Operand::new(5, "m"), Operand::new(3, "kg"))
            .unwrap_err();
        assert_eq!(err.to_string(), "No converter registered to compare \"5 m\" with \"3 kg\".");
    }

    #[test]
    fn test_failure_text_ignores_display_locale() {
        measure_core::Formatters::shared().set_default_locale(measure_core::Locale::German);
        let err = chain()
            .is_equal_to(Operand::new(12_000.5, "m"), Operand::new(3_000, "kg"))
            .unwrap_err();
        measure_core::Formatters::shared().set_default_locale(measure_core::Locale::English);
        assert_eq!(err.to_string(), "No converter registered to compare \"12000.5 m\" with \"3000 kg\".");
    }

    #[test]
    fn test_sum_and_subtract() {
        let chain = chain();
        let sum = chain.sum(Operand::new(1, "km"), Operand::new(500, "m")).unwrap();
        assert!(approx(sum.as_f64(), 1.5));

        let diff = chain.subtract(Operand::new(2, "h"), Operand::new(30, "min")).unwrap();
        assert!(approx(diff.as_f64(), 1.5));

        let err = chain.sum(Operand::new(5, "m"), Operand::new(3, "kg")).unwrap_err();
        assert_eq!(err.to_string(), "No converter registered to add \"3 kg\" to \"5 m\".");
    }

    #[test]
    fn test_custom_converter_is_appended() {
        let registry = Arc::new(UnitRegistry::new());
        let chain = ChainConverter::with_registry(Arc::clone(&registry))
            .with_converter(CategoryConverter::new(registry, Box::new(Angle)));

        assert_eq!(chain.categories().last(), Some(&"angle"));
        assert!(approx(
            chain.convert(Magnitude::Int(180), "deg", "rad").unwrap().as_f64(),
            std::f64::consts::PI
        ));
        assert_eq!(chain.category_of("radians"), Some("angle"));
    }

    #[test]
    fn test_first_category_wins_on_shared_symbol() {
        let chain = chain();
        assert_eq!(chain.category_of("m"), Some("length"));
        assert_eq!(chain.category_of("K"), Some("temperature"));
        assert_eq!(chain.category_of("min"), Some("duration"));
        assert_eq!(chain.category_of("foo"), None);
    }

    #[test]
    fn test_empty_chain_always_fails() {
        let chain = ChainConverter::new();
        assert!(chain.convert(Magnitude::Int(1), "m", "km").is_err());
        assert!(chain.is_equal_to(Operand::new(1, "m"), Operand::new(1, "m")).is_err());
    }
}
