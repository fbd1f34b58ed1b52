//! Counter ledger.
//!
//! Three counter families kept beside the edge entries:
//!
//! | Counter | Row | Column family | Name |
//! |---------|-----|---------------|------|
//! | degree | vertex id | `degrees` | `degree` |
//! | instances | edge type | `instances` | `instances` |
//! | vertex edge type | vertex id | `vertexedgetype` | relationship id |
//!
//! A counter that would reach zero is deleted instead, so a present counter
//! is always strictly positive and doubles as an existence flag.

use std::sync::Arc;

use tracing::debug;

use crate::model::relationship_id;
use crate::storage::{ColumnFamily, StorageBackend};
use crate::Result;

const DEGREE: &str = "degree";
const INSTANCES: &str = "instances";

/// Address of one counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey {
    pub cf: ColumnFamily,
    pub row: String,
    pub name: String,
}

impl CounterKey {
    /// Incidence count of a vertex.
    pub fn degree(vertex_id: &str) -> Self {
        Self { cf: ColumnFamily::Degrees, row: vertex_id.to_string(), name: DEGREE.to_string() }
    }

    /// Live edge count of an edge type.
    pub fn instances(edge_type: &str) -> Self {
        Self { cf: ColumnFamily::Instances, row: edge_type.to_string(), name: INSTANCES.to_string() }
    }

    /// Count of `edge_type` edges with `vertex_id` at `position`.
    pub fn vertex_edge_type(vertex_id: &str, edge_type: &str, position: usize) -> Self {
        Self {
            cf: ColumnFamily::VertexEdgeType,
            row: vertex_id.to_string(),
            name: relationship_id(edge_type, position),
        }
    }
}

impl std::fmt::Display for CounterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}][{}]", self.cf, self.row, self.name)
    }
}

/// Increment, decrement-or-delete and delete over counter columns.
pub struct CounterLedger<B: StorageBackend> {
    backend: Arc<B>,
}

impl<B: StorageBackend> Clone for CounterLedger<B> {
    fn clone(&self) -> Self {
        Self { backend: Arc::clone(&self.backend) }
    }
}

impl<B: StorageBackend> CounterLedger<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn get(&self, key: &CounterKey) -> Result<Option<i64>> {
        self.backend.get_counter(key.cf, &key.row, &key.name).await
    }

    pub async fn increment(&self, key: &CounterKey) -> Result<()> {
        debug!(counter = %key, "increment");
        self.backend.add_counter(key.cf, &key.row, &key.name, 1).await
    }

    /// Decrement by one, deleting the counter instead of writing zero.
    ///
    /// Returns `false` when there was no counter to decrement.
    pub async fn decrement(&self, key: &CounterKey) -> Result<bool> {
        debug!(counter = %key, "decrement");
        let Some(count) = self.get(key).await? else {
            return Ok(false);
        };

        if count <= 1 {
            self.backend.delete_counter(key.cf, &key.row, &key.name).await?;
        } else {
            self.backend.add_counter(key.cf, &key.row, &key.name, -1).await?;
        }
        Ok(true)
    }

    /// Delete the counter outright. Returns true if it existed.
    pub async fn delete(&self, key: &CounterKey) -> Result<bool> {
        debug!(counter = %key, "delete");
        self.backend.delete_counter(key.cf, &key.row, &key.name).await
    }
}
