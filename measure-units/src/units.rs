//! Built-in measurement categories
//!
//! Each category owns the full vocabulary of one measurement domain. Symbol
//! spellings (plurals, abbreviations, `'` and `"`) are what the parser hands
//! through, so they are kept stable.

use crate::table::UnitTable;
use crate::unit::Unit;

/// A measurement domain with a single native unit
pub trait Category: Send + Sync {
    /// Stable name, also the registry cache key
    fn name(&self) -> &'static str;

    /// Register every unit of the category, in a fixed order
    fn build(&self, table: &mut UnitTable);
}

/// Meters
#[derive(Debug, Clone, Copy, Default)]
pub struct Length;

/// Grams
#[derive(Debug, Clone, Copy, Default)]
pub struct Mass;

/// Kelvin
#[derive(Debug, Clone, Copy, Default)]
pub struct Temperature;

/// Bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct Information;

/// Seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct Duration;

const POUND: f64 = 453.59237;

impl Category for Length {
    fn name(&self) -> &'static str {
        "length"
    }

    fn build(&self, table: &mut UnitTable) {
        table.add_si(Unit::native("m"), &["meter", "meters", "metre", "metres"]);
        table.add(Unit::linear("ft", 0.3048), &["feet", "foot", "'"]);
        table.add(Unit::linear("in", 0.0254), &["inch", "inches", "\""]);
        table.add(Unit::linear("mi", 1609.344), &["mile", "miles"]);
        table.add(Unit::linear("yd", 0.9144), &["yard", "yards"]);
        // Nautical mile; takes "nm" over the nanometre
        table.add(Unit::linear("M", 1852.0), &["nautical mile", "nm", "NM"]);
        // Scandinavian mil
        table.add(Unit::linear("mil", 10_000.0), &[]);
        table.add(
            Unit::linear("AU", 149_597_870_700.0),
            &["au", "astronomical unit", "astronomical units"],
        );
    }
}

impl Category for Mass {
    fn name(&self) -> &'static str {
        "mass"
    }

    fn build(&self, table: &mut UnitTable) {
        table.add_si(Unit::native("g"), &["gram", "grams"]);
        table.add(Unit::linear("t", 1e6), &["ton", "tons", "tonne", "tonnes"]);
        table.add(Unit::linear("lb", POUND), &["lbs", "pound", "pounds"]);
        table.add(Unit::linear("oz", POUND / 16.0), &["ounce", "ounces"]);
        table.add(Unit::linear("st", POUND * 14.0), &["stone", "stones"]);
    }
}

impl Category for Temperature {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn build(&self, table: &mut UnitTable) {
        table.add_si(Unit::native("K"), &["\u{b0}K", "kelvin"]);
        table.add(
            Unit::affine("C", |x| x + 273.15, |x| x - 273.15),
            &["\u{b0}C", "celsius"],
        );
        table.add(
            Unit::affine("F", |x| (x + 459.67) * 5.0 / 9.0, |x| x * 9.0 / 5.0 - 459.67),
            &["\u{b0}F", "fahrenheit"],
        );
    }
}

impl Category for Information {
    fn name(&self) -> &'static str {
        "information"
    }

    fn build(&self, table: &mut UnitTable) {
        table.add(Unit::native("B"), &["byte", "bytes"]);
        table.add(Unit::linear("bit", 1.0 / 8.0), &["bits"]);

        for (power, decimal, binary) in INFORMATION_FAMILIES {
            table.add(
                Unit::linear(decimal.symbol, 1000f64.powi(power)),
                decimal.aliases,
            );
            table.add(
                Unit::linear(binary.symbol, 1024f64.powi(power)),
                binary.aliases,
            );
        }
    }
}

impl Category for Duration {
    fn name(&self) -> &'static str {
        "duration"
    }

    fn build(&self, table: &mut UnitTable) {
        table.add_si(Unit::native("s"), &["sec", "secs", "second", "seconds"]);
        table.add(Unit::linear("m", 60.0), &["min", "mins", "minute", "minutes"]);
        table.add(Unit::linear("h", 3600.0), &["hr", "hrs", "hour", "hours"]);
        table.add(Unit::linear("d", 86_400.0), &["day", "days"]);
        table.add(Unit::linear("w", 604_800.0), &["wk", "wks", "week", "weeks"]);
        // Gregorian year, 365.2425 days
        table.add(Unit::linear("y", 31_556_952.0), &["yr", "yrs", "year", "years"]);
        // Julian year, 365.25 days
        table.add(Unit::linear("jyr", 31_557_600.0), &["julian year", "julian years"]);
    }
}

struct InformationUnit {
    symbol: &'static str,
    aliases: &'static [&'static str],
}

/// (power, decimal unit, binary unit) for kilo through yotta
const INFORMATION_FAMILIES: [(i32, InformationUnit, InformationUnit); 8] = [
    (
        1,
        InformationUnit { symbol: "kB", aliases: &["kilobyte", "kilobytes", "kb", "K"] },
        InformationUnit { symbol: "KiB", aliases: &["kibibyte", "kibibytes", "kib"] },
    ),
    (
        2,
        InformationUnit { symbol: "MB", aliases: &["megabyte", "megabytes", "mb"] },
        InformationUnit { symbol: "MiB", aliases: &["mebibyte", "mebibytes", "mib"] },
    ),
    (
        3,
        InformationUnit { symbol: "GB", aliases: &["gigabyte", "gigabytes", "gb"] },
        InformationUnit { symbol: "GiB", aliases: &["gibibyte", "gibibytes", "gib"] },
    ),
    (
        4,
        InformationUnit { symbol: "TB", aliases: &["terabyte", "terabytes", "tb"] },
        InformationUnit { symbol: "TiB", aliases: &["tebibyte", "tebibytes", "tib"] },
    ),
    (
        5,
        InformationUnit { symbol: "PB", aliases: &["petabyte", "petabytes", "pb"] },
        InformationUnit { symbol: "PiB", aliases: &["pebibyte", "pebibytes", "pib"] },
    ),
    (
        6,
        InformationUnit { symbol: "EB", aliases: &["exabyte", "exabytes", "eb"] },
        InformationUnit { symbol: "EiB", aliases: &["exbibyte", "exbibytes", "eib"] },
    ),
    (
        7,
        InformationUnit { symbol: "ZB", aliases: &["zettabyte", "zettabytes", "zb"] },
        InformationUnit { symbol: "ZiB", aliases: &["zebibyte", "zebibytes", "zib"] },
    ),
    (
        8,
        InformationUnit { symbol: "YB", aliases: &["yottabyte", "yottabytes", "yb"] },
        InformationUnit { symbol: "YiB", aliases: &["yobibyte", "yobibytes", "yib"] },
    ),
];

/// The built-in categories in dispatch order
pub fn default_categories() -> Vec<Box<dyn Category>> {
    vec![
        Box::new(Length),
        Box::new(Mass),
        Box::new(Temperature),
        Box::new(Information),
        Box::new(Duration),
    ]
}
