//! Session state: the single current table
//!
//! Every write replaces the whole table behind an `Arc`, so readers either see
//! the old table or the new one, never a mix.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use crate::error::{SheetError, SheetResult};
use crate::excel::ExcelImporter;
use crate::replace::ReplaceRule;
use crate::types::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Loaded,
}

#[derive(Debug, Default)]
pub struct Session {
    current: RwLock<Option<Arc<Table>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match *self.current.read().unwrap_or_else(PoisonError::into_inner) {
            Some(_) => SessionState::Loaded,
            None => SessionState::Empty,
        }
    }

    /// Replace the current table wholesale
    pub fn load(&self, table: Table) -> Arc<Table> {
        let table = Arc::new(table);
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&table));
        info!(
            columns = table.column_count(),
            rows = table.row_count(),
            "Table loaded"
        );
        table
    }

    /// Parse an upload and make it current. A parse failure leaves the
    /// previous table in place.
    pub fn ingest(&self, bytes: &[u8]) -> SheetResult<Arc<Table>> {
        let table = ExcelImporter::from_bytes(bytes)?;
        Ok(self.load(table))
    }

    /// Snapshot of the current table
    pub fn current(&self) -> SheetResult<Arc<Table>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(SheetError::NoData)
    }

    /// Apply a rule, swap in the result and return how many cells changed.
    ///
    /// The write lock is held from read to swap so concurrent replaces are
    /// serialized; on any error the current table is untouched.
    pub fn apply(&self, rule: &ReplaceRule) -> SheetResult<usize> {
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let table = slot.as_ref().ok_or(SheetError::NoData)?;

        let replacement = rule.apply(table)?;
        let replaced = replacement.replaced;
        *slot = Some(Arc::new(replacement.table));

        debug!(
            mode = rule.mode().as_str(),
            column = rule.column().unwrap_or("*"),
            replaced,
            "Replace applied"
        );
        Ok(replaced)
    }
}
