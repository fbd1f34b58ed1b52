//! Vertex directory.
//!
//! Vertex CRUD over the partition column families, plus the cascade that
//! strips a vertex's edges and counters before its row is deleted.

use std::sync::Arc;

use tracing::debug;

use super::counters::{CounterKey, CounterLedger};
use super::relations::RelationshipIndex;
use super::router::{vertex_column, vertex_column_family, Router};
use super::scanner::{edges_of_type, NeighborScanner};
use crate::model::{Edge, SourceNode, Vertex, VertexKind};
use crate::storage::StorageBackend;
use crate::{Error, Result};

pub struct VertexDirectory<B: StorageBackend> {
    backend: Arc<B>,
    router: Router<B>,
    relations: RelationshipIndex<B>,
    counters: CounterLedger<B>,
    scanner: NeighborScanner<B>,
}

impl<B: StorageBackend> VertexDirectory<B> {
    pub fn new(
        backend: Arc<B>,
        router: Router<B>,
        relations: RelationshipIndex<B>,
        counters: CounterLedger<B>,
        scanner: NeighborScanner<B>,
    ) -> Self {
        Self { backend, router, relations, counters, scanner }
    }

    pub async fn get(&self, id: &str) -> Result<Vertex> {
        self.router.resolve(id).await
    }

    /// Like `get`, with not-found mapped to `None`. Backend errors still
    /// propagate.
    pub async fn get_or_null(&self, id: &str) -> Result<Option<Vertex>> {
        match self.router.resolve(id).await {
            Ok(v) => Ok(Some(v)),
            Err(Error::NotFound(_)) => {
                debug!(id, "not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.get_or_null(id).await?.is_some())
    }

    /// Fetch a vertex that must be a source node.
    pub async fn get_source_node(&self, id: &str) -> Result<SourceNode> {
        match self.get(id).await? {
            Vertex::Source(s) => Ok(s),
            other => Err(Error::WrongVertexKind {
                id: id.to_string(),
                expected: VertexKind::Source,
                got: other.kind(),
            }),
        }
    }

    /// Upsert a vertex into its partition row.
    pub async fn put(&self, vertex: &Vertex) -> Result<()> {
        debug!(id = vertex.id(), kind = %vertex.kind(), "put");
        let bytes = serde_json::to_vec(vertex)?;
        self.backend
            .insert_column(vertex_column_family(vertex), vertex.id(), vertex_column(), bytes)
            .await
    }

    /// Delete a vertex with everything hanging off it.
    ///
    /// Order: degree counter, incident edges, every edge of the type (edge
    /// type vertices only) and its instance counter, then the partition row.
    pub async fn remove(&self, vertex: &Vertex) -> Result<()> {
        let id = vertex.id();
        debug!(id, kind = %vertex.kind(), "remove");

        self.counters.delete(&CounterKey::degree(id)).await?;

        let incident = self.scanner.neighbor_edges(id, None, None).await;
        for edge in &incident.edges {
            self.relations.delrel(edge).await?;
        }

        if let Vertex::EdgeType(_) = vertex {
            for edge in &edges_of_type(self.backend.as_ref(), id).await? {
                self.relations.delrel(edge).await?;
            }
            self.counters.delete(&CounterKey::instances(id)).await?;
        }

        self.backend.delete_row(vertex_column_family(vertex), id).await?;
        Ok(())
    }

    /// Put every participant that does not exist yet, then link them all
    /// with one edge in the given order.
    pub async fn create_and_connect_vertices(
        &self,
        edge_type: &str,
        participants: &[Vertex],
    ) -> Result<Edge> {
        debug!(edge_type, n = participants.len(), "create_and_connect_vertices");
        for v in participants {
            if !self.exists(v.id()).await? {
                self.put(v).await?;
            }
        }

        let edge = Edge::new(edge_type, participants.iter().map(|v| v.id()))?;
        self.relations.addrel(&edge).await?;
        Ok(edge)
    }
}
