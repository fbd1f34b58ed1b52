//! # Storage Backend Trait
//!
//! The contract between the hypergraph layer and a wide-column store.
//! A backend offers row-keyed column families with ordered composite
//! columns, slice queries over a row, and counter columns with atomic add.
//!
//! Nothing here is transactional across rows: a single column insert or
//! delete and a single counter add are atomic, nothing more.
//!
//! ## Implementations
//!
//! | Backend | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryBackend` | `memory` | In-memory for testing/embedding |

pub mod composite;
pub mod memory;

use std::ops::Bound;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

pub use composite::{Component, Composite, STR_MAX, STR_MIN};
pub use memory::MemoryBackend;

// ============================================================================
// Backend Configuration
// ============================================================================

/// Configuration for connecting to a storage backend.
#[derive(Debug, Clone, Default)]
pub enum BackendConfig {
    /// In-memory (no persistence)
    #[default]
    Memory,
}

// ============================================================================
// Column families
// ============================================================================

/// Named column families of the keyspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnFamily {
    /// Global text, URL, rule and source vertices.
    Global,
    /// Vertices living inside a user's space.
    UserSpace,
    /// User vertices.
    User,
    /// Edge type vertices.
    EdgeType,
    /// Edge entries, one row per participant.
    Edges,
    /// Per-vertex positional relation counters.
    VertexEdgeType,
    /// Per-vertex degree counter.
    Degrees,
    /// Per-edge-type instance counter.
    Instances,
}

impl ColumnFamily {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnFamily::Global => "global",
            ColumnFamily::UserSpace => "userspace",
            ColumnFamily::User => "user",
            ColumnFamily::EdgeType => "edgetype",
            ColumnFamily::Edges => "edges",
            ColumnFamily::VertexEdgeType => "vertexedgetype",
            ColumnFamily::Degrees => "degrees",
            ColumnFamily::Instances => "instances",
        }
    }
}

impl std::fmt::Display for ColumnFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Columns and slices
// ============================================================================

/// A column read back from a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: Composite,
    pub value: Vec<u8>,
}

/// Bounds of a slice query over one row.
///
/// `start` and `finish` are always the low and high ends in column order;
/// `reversed` only changes the direction results are returned in (and
/// therefore which end `limit` keeps).
#[derive(Debug, Clone)]
pub struct SliceRange {
    pub start: Bound<Composite>,
    pub finish: Bound<Composite>,
    pub reversed: bool,
    pub limit: Option<usize>,
}

impl SliceRange {
    /// Inclusive range `[start, finish]`.
    pub fn new(start: Composite, finish: Composite) -> Self {
        Self {
            start: Bound::Included(start),
            finish: Bound::Included(finish),
            reversed: false,
            limit: None,
        }
    }

    /// Every column of the row.
    pub fn all() -> Self {
        Self {
            start: Bound::Unbounded,
            finish: Bound::Unbounded,
            reversed: false,
            limit: None,
        }
    }

    /// Restart the range just after `key` (exclusive).
    pub fn after(mut self, key: Composite) -> Self {
        self.start = Bound::Excluded(key);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// True when no key can fall inside the bounds.
    pub fn is_empty(&self) -> bool {
        match (&self.start, &self.finish) {
            (Bound::Included(s), Bound::Included(f)) => s > f,
            (Bound::Included(s), Bound::Excluded(f))
            | (Bound::Excluded(s), Bound::Included(f))
            | (Bound::Excluded(s), Bound::Excluded(f)) => s >= f,
            _ => false,
        }
    }
}

// ============================================================================
// StorageBackend Trait
// ============================================================================

/// The wide-column storage contract.
///
/// Rows are addressed by `(column family, row key)`. Column writes are
/// upserts; deletes of absent columns are not errors and report `false`.
/// Counter columns live beside regular columns and are addressed by
/// `(column family, row key, counter name)`.
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Shut down the backend, flushing any pending writes.
    async fn shutdown(&self) -> Result<()>;

    // ========================================================================
    // Columns
    // ========================================================================

    /// Insert or overwrite a column.
    async fn insert_column(
        &self,
        cf: ColumnFamily,
        row: &str,
        name: Composite,
        value: Vec<u8>,
    ) -> Result<()>;

    /// Point read of one column.
    async fn get_column(
        &self,
        cf: ColumnFamily,
        row: &str,
        name: &Composite,
    ) -> Result<Option<Vec<u8>>>;

    /// Delete one column by exact name. Returns true if it existed.
    async fn delete_column(&self, cf: ColumnFamily, row: &str, name: &Composite) -> Result<bool>;

    /// Ordered read of the columns of a row within `range`.
    async fn slice(&self, cf: ColumnFamily, row: &str, range: &SliceRange) -> Result<Vec<Column>>;

    // ========================================================================
    // Rows
    // ========================================================================

    /// Delete a whole row, columns and counters. Returns true if it existed.
    async fn delete_row(&self, cf: ColumnFamily, row: &str) -> Result<bool>;

    /// Keys of every row present in a column family, in key order.
    async fn row_keys(&self, cf: ColumnFamily) -> Result<Vec<String>>;

    // ========================================================================
    // Counters
    // ========================================================================

    /// Atomically add `delta` to a counter, creating it at zero if absent.
    async fn add_counter(&self, cf: ColumnFamily, row: &str, name: &str, delta: i64) -> Result<()>;

    /// Current value of a counter, `None` if absent.
    async fn get_counter(&self, cf: ColumnFamily, row: &str, name: &str) -> Result<Option<i64>>;

    /// Delete a counter. Returns true if it existed.
    async fn delete_counter(&self, cf: ColumnFamily, row: &str, name: &str) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_range_emptiness() {
        let a = Composite::single("a");
        let b = Composite::single("b");
        assert!(!SliceRange::new(a.clone(), b.clone()).is_empty());
        assert!(SliceRange::new(b.clone(), a.clone()).is_empty());
        assert!(!SliceRange::new(a.clone(), a.clone()).is_empty());
        assert!(SliceRange::new(a.clone(), a.clone()).after(a.clone()).is_empty());
        assert!(!SliceRange::all().is_empty());
    }

    #[test]
    fn test_column_family_names() {
        assert_eq!(ColumnFamily::Edges.to_string(), "edges");
        assert_eq!(ColumnFamily::VertexEdgeType.name(), "vertexedgetype");
    }
}
