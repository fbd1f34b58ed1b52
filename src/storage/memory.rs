//! In-memory storage backend.
//!
//! This is the reference implementation of `StorageBackend`.
//! It uses ordered maps protected by RwLock.
//!
//! ## Limitations
//!
//! - **No persistence**: everything lives in process memory.
//! - **Per-call atomicity only**: each column or counter operation takes the
//!   lock once. Multi-row edge writes interleave freely with other callers,
//!   exactly as they would against a distributed store.
//!
//! Use this backend for:
//! - Testing the edge codec, counters and neighbor scans
//! - Embedding the hypergraph in applications that don't need persistence
//! - Injecting backend failures (`fail_scans`, `fail_writes`) in tests

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Column, ColumnFamily, Composite, SliceRange, StorageBackend};
use crate::{Error, Result};

type Rows = HashMap<String, BTreeMap<Composite, Vec<u8>>>;
type CounterRows = HashMap<String, HashMap<String, i64>>;

// ============================================================================
// MemoryBackend
// ============================================================================

/// In-memory wide-column storage. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    columns: RwLock<HashMap<ColumnFamily, Rows>>,
    counters: RwLock<HashMap<ColumnFamily, CounterRows>>,
    fail_scans: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `slice` call fail with `Error::Storage`.
    pub fn fail_scans(&self, fail: bool) {
        self.inner.fail_scans.store(fail, Ordering::Relaxed);
    }

    /// Make every subsequent mutation fail with `Error::Storage`.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Number of columns stored in a row.
    pub fn column_count(&self, cf: ColumnFamily, row: &str) -> usize {
        self.inner.columns.read()
            .get(&cf)
            .and_then(|rows| rows.get(row))
            .map_or(0, |cols| cols.len())
    }

    fn check_writable(&self) -> Result<()> {
        if self.inner.fail_writes.load(Ordering::Relaxed) {
            return Err(Error::StorageError("memory backend: writes disabled".into()));
        }
        Ok(())
    }
}

// ============================================================================
// StorageBackend impl
// ============================================================================

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn shutdown(&self) -> Result<()> { Ok(()) }

    // ========================================================================
    // Columns
    // ========================================================================

    async fn insert_column(
        &self,
        cf: ColumnFamily,
        row: &str,
        name: Composite,
        value: Vec<u8>,
    ) -> Result<()> {
        self.check_writable()?;
        self.inner.columns.write()
            .entry(cf)
            .or_default()
            .entry(row.to_string())
            .or_default()
            .insert(name, value);
        Ok(())
    }

    async fn get_column(
        &self,
        cf: ColumnFamily,
        row: &str,
        name: &Composite,
    ) -> Result<Option<Vec<u8>>> {
        Ok(self.inner.columns.read()
            .get(&cf)
            .and_then(|rows| rows.get(row))
            .and_then(|cols| cols.get(name))
            .cloned())
    }

    async fn delete_column(&self, cf: ColumnFamily, row: &str, name: &Composite) -> Result<bool> {
        self.check_writable()?;
        let mut columns = self.inner.columns.write();
        let Some(rows) = columns.get_mut(&cf) else { return Ok(false) };
        let Some(cols) = rows.get_mut(row) else { return Ok(false) };
        let removed = cols.remove(name).is_some();
        // Drop empty rows so row_keys only reports live rows
        if cols.is_empty() {
            rows.remove(row);
        }
        Ok(removed)
    }

    async fn slice(&self, cf: ColumnFamily, row: &str, range: &SliceRange) -> Result<Vec<Column>> {
        if self.inner.fail_scans.load(Ordering::Relaxed) {
            return Err(Error::StorageError(format!("memory backend: slice on {cf}/{row} failed")));
        }
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let columns = self.inner.columns.read();
        let Some(cols) = columns.get(&cf).and_then(|rows| rows.get(row)) else {
            return Ok(Vec::new());
        };

        let limit = range.limit.unwrap_or(usize::MAX);
        let iter = cols.range((range.start.clone(), range.finish.clone()));
        let to_column = |(name, value): (&Composite, &Vec<u8>)| Column {
            name: name.clone(),
            value: value.clone(),
        };

        let result = if range.reversed {
            iter.rev().take(limit).map(to_column).collect()
        } else {
            iter.take(limit).map(to_column).collect()
        };
        Ok(result)
    }

    // ========================================================================
    // Rows
    // ========================================================================

    async fn delete_row(&self, cf: ColumnFamily, row: &str) -> Result<bool> {
        self.check_writable()?;
        let had_columns = self.inner.columns.write()
            .get_mut(&cf)
            .and_then(|rows| rows.remove(row))
            .is_some();
        let had_counters = self.inner.counters.write()
            .get_mut(&cf)
            .and_then(|rows| rows.remove(row))
            .is_some();
        Ok(had_columns || had_counters)
    }

    async fn row_keys(&self, cf: ColumnFamily) -> Result<Vec<String>> {
        let mut keys = BTreeSet::new();
        if let Some(rows) = self.inner.columns.read().get(&cf) {
            keys.extend(rows.keys().cloned());
        }
        if let Some(rows) = self.inner.counters.read().get(&cf) {
            keys.extend(rows.keys().cloned());
        }
        Ok(keys.into_iter().collect())
    }

    // ========================================================================
    // Counters
    // ========================================================================

    async fn add_counter(&self, cf: ColumnFamily, row: &str, name: &str, delta: i64) -> Result<()> {
        self.check_writable()?;
        *self.inner.counters.write()
            .entry(cf)
            .or_default()
            .entry(row.to_string())
            .or_default()
            .entry(name.to_string())
            .or_insert(0) += delta;
        Ok(())
    }

    async fn get_counter(&self, cf: ColumnFamily, row: &str, name: &str) -> Result<Option<i64>> {
        Ok(self.inner.counters.read()
            .get(&cf)
            .and_then(|rows| rows.get(row))
            .and_then(|counters| counters.get(name))
            .copied())
    }

    async fn delete_counter(&self, cf: ColumnFamily, row: &str, name: &str) -> Result<bool> {
        self.check_writable()?;
        let mut counters = self.inner.counters.write();
        let Some(rows) = counters.get_mut(&cf) else { return Ok(false) };
        let Some(row_counters) = rows.get_mut(row) else { return Ok(false) };
        let removed = row_counters.remove(name).is_some();
        if row_counters.is_empty() {
            rows.remove(row);
        }
        Ok(removed)
    }
}

// ============================================================================
// Tests
// ============================================================================
