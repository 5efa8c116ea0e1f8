//! Filter bridge for templating hosts
//!
//! A host looks filters up by name and applies them to whatever JSON value
//! its template hands over. Each built-in filter is `parse(value)` for one
//! quantity kind.

use crate::kind::{DurationKind, Generic, InformationKind, Kind};
use crate::quantity::{Duration, Information, Quantity};
use measure_core::MeasureError;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Metadata describing a filter
#[derive(Debug, Clone, Serialize)]
pub struct FilterMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub examples: &'static [&'static str],
}

/// Result of applying a filter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Filtered {
    Dimension(Quantity),
    Information(Information),
    Duration(Duration),
}

impl fmt::Display for Filtered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filtered::Dimension(q) => write!(f, "{}", q),
            Filtered::Information(q) => write!(f, "{}", q),
            Filtered::Duration(q) => write!(f, "{}", q),
        }
    }
}

impl From<Quantity> for Filtered {
    fn from(q: Quantity) -> Self {
        Filtered::Dimension(q)
    }
}

impl From<Information> for Filtered {
    fn from(q: Information) -> Self {
        Filtered::Information(q)
    }
}

impl From<Duration> for Filtered {
    fn from(q: Duration) -> Self {
        Filtered::Duration(q)
    }
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error(transparent)]
    Measure(#[from] MeasureError),
}

/// Single-argument filter
pub trait FilterPlugin: Send + Sync {
    fn meta(&self) -> FilterMeta;
    fn apply(&self, value: &Value) -> Result<Filtered, MeasureError>;
}

/// Filter that parses its argument as a quantity of kind `K`
#[derive(Debug)]
pub struct ParseFilter<K: Kind> {
    description: &'static str,
    examples: &'static [&'static str],
    kind: std::marker::PhantomData<K>,
}

impl<K: Kind> ParseFilter<K> {
    pub const fn new(description: &'static str, examples: &'static [&'static str]) -> Self {
        ParseFilter {
            description,
            examples,
            kind: std::marker::PhantomData,
        }
    }
}

impl<K: Kind> FilterPlugin for ParseFilter<K>
where
    Quantity<K>: Into<Filtered>,
{
    fn meta(&self) -> FilterMeta {
        FilterMeta {
            name: K::NAME,
            description: self.description,
            examples: self.examples,
        }
    }

    fn apply(&self, value: &Value) -> Result<Filtered, MeasureError> {
        Quantity::<K>::parse(value.clone()).map(Into::into)
    }
}

/// Filters by lowercase name
#[derive(Default)]
pub struct FilterRegistry {
    filters: HashMap<String, Arc<dyn FilterPlugin>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter<F: FilterPlugin + 'static>(mut self, filter: F) -> Self {
        let name = filter.meta().name.to_lowercase();
        self.filters.insert(name, Arc::new(filter));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn FilterPlugin> {
        self.filters.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    pub fn apply(&self, name: &str, value: &Value) -> Result<Filtered, FilterError> {
        let filter = self
            .get(name)
            .ok_or_else(|| FilterError::UnknownFilter(name.to_string()))?;
        Ok(filter.apply(value)?)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn metas(&self) -> Vec<FilterMeta> {
        let mut metas: Vec<FilterMeta> = self.filters.values().map(|f| f.meta()).collect();
        metas.sort_by_key(|m| m.name);
        metas
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry").field("filters", &self.names()).finish()
    }
}

static DIMENSION_EXAMPLES: [&str; 2] = ["\"45,000mm\" | dimension → 45,000 mm", "[45, \"mm\"] | dimension → 45 mm"];
static INFORMATION_EXAMPLES: [&str; 2] = ["\"4.2 mb\" | information → 4.2 MB", "400 | information → 400 B"];
static DURATION_EXAMPLES: [&str; 2] = ["90 | duration → 90 s", "\"P1W2D\" | duration → 777,600 s"];

/// Register the `dimension`, `information` and `duration` filters
pub fn load_filters(registry: FilterRegistry) -> FilterRegistry {
    registry
        .with_filter(ParseFilter::<Generic>::new(
            "Parse a value into a quantity of any category",
            &DIMENSION_EXAMPLES,
        ))
        .with_filter(ParseFilter::<InformationKind>::new(
            "Parse a value into an information size (bare numbers are bytes)",
            &INFORMATION_EXAMPLES,
        ))
        .with_filter(ParseFilter::<DurationKind>::new(
            "Parse a value into a duration (bare numbers are seconds)",
            &DURATION_EXAMPLES,
        ))
}
