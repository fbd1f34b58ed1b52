//! Relationship index.
//!
//! Keeps edge entries and their counters in step on every participant row.
//!
//! Presence is weak: an edge exists if *any* participant's row carries its
//! entry. Writes are a plain sequence of per-row column and counter
//! operations with no cross-row transaction, so a failure part way through
//! leaves the edge visible on some participants only. Nothing here detects
//! or repairs that; callers only see `rel_exists`, `addrel` and `delrel`, so
//! the presence rule can change behind this type without touching them.

use std::sync::Arc;

use tracing::debug;

use super::codec;
use super::counters::{CounterKey, CounterLedger};
use crate::model::Edge;
use crate::storage::{ColumnFamily, StorageBackend};
use crate::Result;

pub struct RelationshipIndex<B: StorageBackend> {
    backend: Arc<B>,
    counters: CounterLedger<B>,
}

impl<B: StorageBackend> Clone for RelationshipIndex<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            counters: self.counters.clone(),
        }
    }
}

impl<B: StorageBackend> RelationshipIndex<B> {
    pub fn new(backend: Arc<B>, counters: CounterLedger<B>) -> Self {
        Self { backend, counters }
    }

    /// Point lookup of `vertex_id`'s entry for `edge`.
    ///
    /// A vertex that is not a participant never carries the edge.
    pub async fn rel_exists_on_vertex(&self, vertex_id: &str, edge: &Edge) -> Result<bool> {
        debug!(vertex = vertex_id, %edge, "rel_exists_on_vertex");
        let Some(key) = codec::entry_key(vertex_id, edge) else {
            return Ok(false);
        };
        let found = self.backend.get_column(ColumnFamily::Edges, vertex_id, &key).await?;
        Ok(found.is_some())
    }

    /// True if any participant carries the edge. Stops at the first hit.
    pub async fn rel_exists(&self, edge: &Edge) -> Result<bool> {
        for p in &edge.participants {
            if self.rel_exists_on_vertex(p, edge).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Add an edge. Returns `false` if it already existed.
    pub async fn addrel(&self, edge: &Edge) -> Result<bool> {
        debug!(%edge, "addrel");
        if self.rel_exists(edge).await? {
            return Ok(false);
        }

        self.counters.increment(&CounterKey::instances(&edge.edge_type)).await?;
        for (pos, p) in edge.participants.iter().enumerate() {
            let key = codec::entry_key_at(edge, pos);
            self.backend.insert_column(ColumnFamily::Edges, p, key, Vec::new()).await?;
            self.counters.increment(&CounterKey::vertex_edge_type(p, &edge.edge_type, pos)).await?;
            self.counters.increment(&CounterKey::degree(p)).await?;
        }
        Ok(true)
    }

    /// Remove an edge. Returns `false` if it did not exist.
    pub async fn delrel(&self, edge: &Edge) -> Result<bool> {
        debug!(%edge, "delrel");
        if !self.rel_exists(edge).await? {
            return Ok(false);
        }

        self.counters.decrement(&CounterKey::instances(&edge.edge_type)).await?;
        for (pos, p) in edge.participants.iter().enumerate() {
            let key = codec::entry_key_at(edge, pos);
            self.backend.delete_column(ColumnFamily::Edges, p, &key).await?;
            self.counters.decrement(&CounterKey::vertex_edge_type(p, &edge.edge_type, pos)).await?;
            self.counters.decrement(&CounterKey::degree(p)).await?;
        }
        Ok(true)
    }
}
