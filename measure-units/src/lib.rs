//! Measure Units - Unit registry and conversion engine
//!
//! Units are grouped into categories, each with one native unit that every
//! conversion passes through:
//! - Length (m, SI prefixed, ft, in, mi, yd, M, mil, AU)
//! - Mass (g, SI prefixed, t, lb, oz, st)
//! - Temperature (K, SI prefixed, C, F)
//! - Information (B, bit, kB..YB, KiB..YiB)
//! - Duration (s, SI prefixed, m, h, d, w, y, jyr)
//!
//! `ChainConverter` tries each category in turn and reports a single error
//! when none of them knows both units.

mod convert;
mod registry;
mod table;
mod unit;
mod units;

pub use convert::{CategoryConverter, ChainConverter, Comparison, Converter, Operand};
pub use registry::UnitRegistry;
pub use table::{SiPrefix, UnitTable, SI_PREFIXES};
pub use unit::{ConversionFn, Mapping, Unit, UnitNotRegistered};
pub use units::{default_categories, Category, Duration, Information, Length, Mass, Temperature};

#[cfg(test)]
mod tests {
    use super::*;
    use measure_core::Magnitude;
    use std::sync::Arc;

    fn chain() -> ChainConverter {
        ChainConverter::with_registry(Arc::new(UnitRegistry::new()))
    }

    mod si_tests {
        use super::*;

        /// Prefixed symbols taken over by a later unit, with an alias that still
        /// reaches the prefixed one
        const SHADOWED: [(&str, &str); 1] = [("nm", "nanometer")];

        #[test]
        fn test_si_bases_expand_in_every_category() {
            let chain = chain();
            for base in ["m", "g", "K", "s"] {
                for prefix in &SI_PREFIXES {
                    let symbol = format!("{}{}", prefix.abbr, base);
                    let lookup = SHADOWED
                        .iter()
                        .find(|(shadowed, _)| *shadowed == symbol)
                        .map_or(symbol.as_str(), |(_, alias)| *alias);
                    let native = chain.convert(Magnitude::Int(1), lookup, base).unwrap();
                    let expected = prefix.factor;
                    assert!(
                        (native.as_f64() - expected).abs() <= expected * 1e-12,
                        "1 {} should be {} {}",
                        lookup,
                        expected,
                        base
                    );
                }
            }
        }

        #[test]
        fn test_shadowed_prefix_resolves_to_later_unit() {
            let chain = chain();
            assert_eq!(chain.convert(Magnitude::Int(1), "nm", "M").unwrap().as_f64(), 1.0);
            assert_eq!(chain.convert(Magnitude::Int(1), "nm", "m").unwrap().as_f64(), 1852.0);
            assert_eq!(chain.convert(Magnitude::Int(1), "nanometer", "nm").unwrap().as_f64(), 1e-9 / 1852.0);
        }

        #[test]
        fn test_prefixed_literals() {
            let chain = chain();
            assert_eq!(chain.convert(Magnitude::Int(1), "km", "m").unwrap().as_f64(), 1000.0);
            assert_eq!(chain.convert(Magnitude::Int(1), "mg", "g").unwrap().as_f64(), 0.001);
        }
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn test_chain_builds_tables_lazily() {
            let registry = Arc::new(UnitRegistry::new());
            let chain = ChainConverter::with_registry(Arc::clone(&registry));
            assert!(!registry.is_built("length"));

            chain.convert(Magnitude::Int(1), "km", "m").unwrap();
            assert!(registry.is_built("length"));
            assert!(!registry.is_built("duration"));
        }

        #[test]
        fn test_shared_chain_uses_default_order() {
            assert_eq!(
                ChainConverter::shared().categories(),
                ["length", "mass", "temperature", "information", "duration"]
            );
        }
    }
}
