//! Per-category unit tables and SI prefix expansion

use crate::unit::{Unit, UnitNotRegistered};
use std::collections::HashMap;
use std::sync::Arc;

/// Metric prefix applied to an SI base unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiPrefix {
    /// Symbol prepended to the unit name ("k", "µ", "da")
    pub abbr: &'static str,
    /// Word prepended to each alias ("kilo", "micro", "deca")
    pub long: &'static str,
    pub factor: f64,
}

/// All 20 SI prefixes, yotta to yocto
pub const SI_PREFIXES: [SiPrefix; 20] = [
    SiPrefix { abbr: "Y", long: "yotta", factor: 1e24 },
    SiPrefix { abbr: "Z", long: "zetta", factor: 1e21 },
    SiPrefix { abbr: "E", long: "exa", factor: 1e18 },
    SiPrefix { abbr: "P", long: "peta", factor: 1e15 },
    SiPrefix { abbr: "T", long: "tera", factor: 1e12 },
    SiPrefix { abbr: "G", long: "giga", factor: 1e9 },
    SiPrefix { abbr: "M", long: "mega", factor: 1e6 },
    SiPrefix { abbr: "k", long: "kilo", factor: 1e3 },
    SiPrefix { abbr: "h", long: "hecto", factor: 1e2 },
    SiPrefix { abbr: "da", long: "deca", factor: 1e1 },
    SiPrefix { abbr: "d", long: "deci", factor: 1e-1 },
    SiPrefix { abbr: "c", long: "centi", factor: 1e-2 },
    SiPrefix { abbr: "m", long: "milli", factor: 1e-3 },
    SiPrefix { abbr: "\u{b5}", long: "micro", factor: 1e-6 },
    SiPrefix { abbr: "n", long: "nano", factor: 1e-9 },
    SiPrefix { abbr: "p", long: "pico", factor: 1e-12 },
    SiPrefix { abbr: "f", long: "femto", factor: 1e-15 },
    SiPrefix { abbr: "a", long: "atto", factor: 1e-18 },
    SiPrefix { abbr: "z", long: "zepto", factor: 1e-21 },
    SiPrefix { abbr: "y", long: "yocto", factor: 1e-24 },
];

/// Symbol and alias lookup for one category
///
/// Many symbols may share one `Unit`. Registering a symbol that is already
/// present replaces it, so registration order decides collisions.
#[derive(Debug, Clone)]
pub struct UnitTable {
    category: &'static str,
    units: HashMap<String, Arc<Unit>>,
    /// Canonical names in registration order
    names: Vec<String>,
}

impl UnitTable {
    pub fn new(category: &'static str) -> Self {
        UnitTable {
            category,
            units: HashMap::new(),
            names: Vec::new(),
        }
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    /// Register a unit under its name and every alias
    pub fn add(&mut self, unit: Unit, aliases: &[&str]) {
        let unit = Arc::new(unit);
        if !self.names.iter().any(|n| n == unit.name()) {
            self.names.push(unit.name().to_string());
        }
        self.units.insert(unit.name().to_string(), Arc::clone(&unit));
        for alias in aliases {
            self.units.insert((*alias).to_string(), Arc::clone(&unit));
        }
    }

    /// Register an SI base unit plus its 20 prefixed variants
    ///
    /// A prefixed unit scales by the prefix factor alone, so the base must be
    /// the native unit.
    pub fn add_si(&mut self, unit: Unit, aliases: &[&str]) {
        let base = unit.name().to_string();
        self.add(unit, aliases);

        for prefix in &SI_PREFIXES {
            let prefixed: Vec<String> = aliases
                .iter()
                .map(|alias| format!("{}{}", prefix.long, alias))
                .collect();
            let prefixed: Vec<&str> = prefixed.iter().map(String::as_str).collect();
            self.add(
                Unit::linear(format!("{}{}", prefix.abbr, base), prefix.factor),
                &prefixed,
            );
        }
    }

    /// Look up a unit by symbol or alias (exact, case-sensitive)
    pub fn resolve(&self, symbol: &str) -> Result<Arc<Unit>, UnitNotRegistered> {
        self.units
            .get(symbol)
            .cloned()
            .ok_or_else(|| UnitNotRegistered {
                unit: symbol.to_string(),
                category: self.category,
            })
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.units.contains_key(symbol)
    }

    /// Canonical unit names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of distinct symbols (names and aliases)
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
