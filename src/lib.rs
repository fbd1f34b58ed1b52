//! # hypergraph-rs — Hypergraph Layer over a Wide-Column Store
//!
//! Vertices plus N-ary, typed, positional edges, stored in a backend that
//! only knows row-keyed column families, ordered composite columns, slice
//! scans and counters.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `StorageBackend` is the contract between the graph layer and storage
//! 2. **Edges live on their participants**: one composite-key column per participant row
//! 3. **Counters are existence flags**: a counter reaching zero is deleted, never stored
//! 4. **Scans stay available**: a failed neighbor scan reads as empty, marked degraded
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hypergraph_rs::{Graph, UserNode, UrlNode, Vertex};
//!
//! # async fn example() -> hypergraph_rs::Result<()> {
//! let graph = Graph::open_memory().await?;
//!
//! let alice: Vertex = UserNode::new("user/alice", "alice").into();
//! let page: Vertex = UrlNode::new("url/42", "https://example.org").into();
//! graph.create_and_connect_vertices("likes", &[alice, page]).await?;
//!
//! for edge in graph.neighbor_edges("user/alice", None, None).await {
//!     println!("{edge}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | Memory | (default) | In-memory wide-column store for testing/embedding |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod graph;

use std::sync::Arc;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Edge, EdgeSet, Family, Vertex, VertexKind,
    TextNode, UrlNode, UserNode, EdgeType, SourceNode, RuleNode, ContextNode,
};

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use storage::{StorageBackend, BackendConfig, ColumnFamily, Composite, MemoryBackend};

// ============================================================================
// Re-exports: Graph components
// ============================================================================

pub use graph::{CounterKey, EdgeScan, ScanStatus};

use graph::{CounterLedger, NeighborScanner, RelationshipIndex, Router, VertexDirectory};

// ============================================================================
// Configuration
// ============================================================================

/// Tunables of a [`Graph`] handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Columns fetched per slice while scanning an `edges` row.
    pub scan_page_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { scan_page_size: 100 }
    }
}

// ============================================================================
// Top-level Graph handle
// ============================================================================

/// The primary entry point. A `Graph` wraps a storage backend and exposes
/// vertex and edge operations over it.
pub struct Graph<B: StorageBackend> {
    backend: Arc<B>,
    config: GraphConfig,
    directory: VertexDirectory<B>,
    relations: RelationshipIndex<B>,
    counters: CounterLedger<B>,
    scanner: NeighborScanner<B>,
}

impl<B: StorageBackend> Graph<B> {
    /// Create a Graph with the given backend and default configuration.
    pub fn with_backend(backend: B) -> Self {
        Self::with_config(backend, GraphConfig::default())
    }

    pub fn with_config(backend: B, config: GraphConfig) -> Self {
        let backend = Arc::new(backend);
        let counters = CounterLedger::new(Arc::clone(&backend));
        let relations = RelationshipIndex::new(Arc::clone(&backend), counters.clone());
        let scanner = NeighborScanner::new(Arc::clone(&backend), config.scan_page_size);
        let directory = VertexDirectory::new(
            Arc::clone(&backend),
            Router::new(Arc::clone(&backend)),
            relations.clone(),
            counters.clone(),
            scanner.clone(),
        );
        Self { backend, config, directory, relations, counters, scanner }
    }

    /// Access the underlying backend (for advanced use).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.backend.shutdown().await
    }

    // ========================================================================
    // Vertices
    // ========================================================================

    /// Fetch a vertex. Fails with [`Error::NotFound`].
    pub async fn get(&self, id: &str) -> Result<Vertex> {
        self.directory.get(id).await
    }

    pub async fn get_or_null(&self, id: &str) -> Result<Option<Vertex>> {
        self.directory.get_or_null(id).await
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        self.directory.exists(id).await
    }

    pub async fn get_source_node(&self, id: &str) -> Result<SourceNode> {
        self.directory.get_source_node(id).await
    }

    pub async fn put(&self, vertex: &Vertex) -> Result<()> {
        self.directory.put(vertex).await
    }

    /// Same as [`Graph::put`].
    pub async fn update(&self, vertex: &Vertex) -> Result<()> {
        self.directory.put(vertex).await
    }

    /// Delete a vertex, its degree counter and every incident edge.
    pub async fn remove(&self, vertex: &Vertex) -> Result<()> {
        self.directory.remove(vertex).await
    }

    /// Resolve `id` and remove the vertex it names.
    pub async fn remove_id(&self, id: &str) -> Result<Vertex> {
        let vertex = self.directory.get(id).await?;
        self.directory.remove(&vertex).await?;
        Ok(vertex)
    }

    /// Put missing participants, then link them with one edge.
    pub async fn create_and_connect_vertices(
        &self,
        edge_type: &str,
        participants: &[Vertex],
    ) -> Result<Edge> {
        self.directory.create_and_connect_vertices(edge_type, participants).await
    }

    // ========================================================================
    // Edges
    // ========================================================================

    /// Add an edge. Returns `false` if it already existed.
    pub async fn addrel(&self, edge: &Edge) -> Result<bool> {
        self.relations.addrel(edge).await
    }

    /// Build an edge from parts and add it.
    pub async fn addrel_with(&self, edge_type: &str, participants: &[&str]) -> Result<Edge> {
        let edge = Edge::new(edge_type, participants.iter().copied())?;
        self.relations.addrel(&edge).await?;
        Ok(edge)
    }

    /// Remove an edge. Returns `false` if it did not exist.
    pub async fn delrel(&self, edge: &Edge) -> Result<bool> {
        self.relations.delrel(edge).await
    }

    /// Build an edge from parts and remove it.
    pub async fn delrel_with(&self, edge_type: &str, participants: &[&str]) -> Result<bool> {
        let edge = Edge::new(edge_type, participants.iter().copied())?;
        self.relations.delrel(&edge).await
    }

    pub async fn rel_exists(&self, edge: &Edge) -> Result<bool> {
        self.relations.rel_exists(edge).await
    }

    pub async fn rel_exists_on_vertex(&self, vertex_id: &str, edge: &Edge) -> Result<bool> {
        self.relations.rel_exists_on_vertex(vertex_id, edge).await
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Edges incident to `vertex_id`, empty on backend failure.
    ///
    /// `exclude_position` drops edges where the vertex sits at that
    /// position.
    pub async fn neighbor_edges(
        &self,
        vertex_id: &str,
        edge_type: Option<&str>,
        exclude_position: Option<u32>,
    ) -> EdgeSet {
        self.scanner.neighbor_edges(vertex_id, edge_type, exclude_position).await.into_edges()
    }

    /// Like [`Graph::neighbor_edges`], keeping whether the scan degraded.
    pub async fn scan_neighbor_edges(
        &self,
        vertex_id: &str,
        edge_type: Option<&str>,
        exclude_position: Option<u32>,
    ) -> EdgeScan {
        self.scanner.neighbor_edges(vertex_id, edge_type, exclude_position).await
    }

    /// `vertex_id` plus every participant of its incident edges.
    pub async fn neighbors(&self, vertex_id: &str) -> HashSet<String> {
        self.scanner.neighbors(vertex_id).await
    }

    // ========================================================================
    // Counters
    // ========================================================================

    pub async fn degree(&self, vertex_id: &str) -> Result<Option<i64>> {
        self.counters.get(&CounterKey::degree(vertex_id)).await
    }

    pub async fn instances(&self, edge_type: &str) -> Result<Option<i64>> {
        self.counters.get(&CounterKey::instances(edge_type)).await
    }

    pub async fn vertex_edge_type_count(
        &self,
        vertex_id: &str,
        edge_type: &str,
        position: usize,
    ) -> Result<Option<i64>> {
        self.counters.get(&CounterKey::vertex_edge_type(vertex_id, edge_type, position)).await
    }
}

/// In-memory graph for testing and embedding.
impl Graph<MemoryBackend> {
    pub async fn open_memory() -> Result<Self> {
        Self::open(BackendConfig::Memory).await
    }

    pub async fn open(config: BackendConfig) -> Result<Self> {
        match config {
            BackendConfig::Memory => Ok(Self::with_backend(MemoryBackend::new())),
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Wrong vertex kind on {id}: expected {expected}, got {got}")]
    WrongVertexKind { id: String, expected: VertexKind, got: VertexKind },

    #[error("Invalid edge: {0}")]
    InvalidEdge(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
