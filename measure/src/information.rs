//! Digital information sizes

use crate::kind::{InformationKind, System, DECIMAL_UNITS};
use crate::parse::Input;
use crate::quantity::{Information, Quantity};
use measure_core::{Magnitude, MeasureError};

impl Quantity<InformationKind> {
    /// Parse and pin to the binary system (KiB, MiB, ...)
    pub fn binary(value: impl Into<Input<InformationKind>>) -> Result<Self, MeasureError> {
        Ok(Self::parse(value)?.as_binary())
    }

    /// Parse and pin to the decimal system (kB, MB, ...)
    pub fn decimal(value: impl Into<Input<InformationKind>>) -> Result<Self, MeasureError> {
        Ok(Self::parse(value)?.as_decimal())
    }

    pub fn as_binary(self) -> Self {
        self.with_kind(InformationKind { system: Some(System::Binary) })
    }

    pub fn as_decimal(self) -> Self {
        self.with_kind(InformationKind { system: Some(System::Decimal) })
    }

    /// The pinned system, or the one implied by the unit
    pub fn system(&self) -> System {
        self.kind().system.unwrap_or_else(|| {
            if DECIMAL_UNITS.contains(&self.unit()) {
                System::Decimal
            } else {
                System::Binary
            }
        })
    }

    /// Whole bytes, truncated
    pub fn bytes(&self) -> Result<i64, MeasureError> {
        let bytes = self.clone().convert_to("B")?;
        Ok(bytes.magnitude().truncate())
    }

    pub fn bits(&self) -> Result<i64, MeasureError> {
        Ok(self.bytes()?.saturating_mul(8))
    }

    /// Largest unit of the system that keeps the magnitude at or above one
    ///
    /// `binary(1024)` is "1 KiB", `decimal(1024)` is "1.02 kB".
    pub fn humanize(&self) -> Result<Self, MeasureError> {
        let system = self.system();
        let units = system.units();
        let factor = system.factor() as f64;

        let mut magnitude = Magnitude::Int(self.bytes()?);
        let mut index = 0;
        while magnitude.as_f64() / factor >= 1.0 && index < units.len() - 1 {
            magnitude = Magnitude::Float(magnitude.as_f64() / factor);
            index += 1;
        }

        Ok(Self::new(magnitude, units[index])?.with_kind(InformationKind { system: Some(system) }))
    }
}

macro_rules! information_shorthands {
    ($($method:ident => $unit:literal),* $(,)?) => {
        const SHORTHANDS: &[(&str, &str)] = &[$((stringify!($method), $unit)),*];

        impl Quantity<InformationKind> {
            $(
                #[doc = concat!("Convert to ", $unit)]
                pub fn $method(self) -> Result<Self, MeasureError> {
                    self.convert_to($unit)
                }
            )*

            /// Unit behind a shorthand accessor name
            pub fn shorthand(name: &str) -> Option<&'static str> {
                SHORTHANDS.iter().find(|(n, _)| *n == name).map(|(_, unit)| *unit)
            }
        }
    };
}

information_shorthands!(
    b => "B",
    kb => "kB",
    mb => "MB",
    gb => "GB",
    tb => "TB",
    pb => "PB",
    eb => "EB",
    zb => "ZB",
    yb => "YB",
    kib => "KiB",
    mib => "MiB",
    gib => "GiB",
    tib => "TiB",
    pib => "PiB",
    eib => "EiB",
    zib => "ZiB",
    yib => "YiB",
);

/// Convert through a shorthand name ("mib"), rejecting unknown names
pub fn convert_shorthand(information: Information, name: &str) -> Result<Information, MeasureError> {
    match Information::shorthand(name) {
        Some(unit) => information.convert_to(unit),
        None => Err(MeasureError::conversion(information.unit().to_string(), name)),
    }
}
