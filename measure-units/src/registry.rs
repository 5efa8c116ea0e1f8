//! Memoized category tables

use crate::table::UnitTable;
use crate::units::Category;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

static SHARED: LazyLock<Arc<UnitRegistry>> = LazyLock::new(|| Arc::new(UnitRegistry::new()));

/// Write-once-read-many cache of unit tables, keyed by category name
///
/// A table is built outside the lock and published whole; if two threads race
/// to build the same category, the first insert wins and the loser's table is
/// dropped. Readers never see a partially built table.
#[derive(Debug, Default)]
pub struct UnitRegistry {
    tables: RwLock<HashMap<&'static str, Arc<UnitTable>>>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry used by the default converters
    pub fn shared() -> Arc<UnitRegistry> {
        Arc::clone(&SHARED)
    }

    /// Table for `category`, building it on first use
    pub fn table(&self, category: &dyn Category) -> Arc<UnitTable> {
        let name = category.name();
        {
            let read_guard = self.tables.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(table) = read_guard.get(name) {
                return Arc::clone(table);
            }
        }

        let mut table = UnitTable::new(name);
        category.build(&mut table);
        tracing::debug!(category = name, symbols = table.len(), "built unit table");

        let mut write_guard = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let table = write_guard.entry(name).or_insert_with(|| Arc::new(table));
        Arc::clone(table)
    }

    /// Whether `category` has been built already
    pub fn is_built(&self, category: &str) -> bool {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(category)
    }
}
