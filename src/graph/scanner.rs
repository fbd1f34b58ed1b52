//! Neighbor scanner.
//!
//! Reads a vertex's `edges` row with bounded slices and decodes every entry
//! back into an edge. A backend failure during the scan yields an empty
//! result marked as degraded rather than an error, so traversals stay
//! available when the store is not.

use std::sync::Arc;

use hashbrown::HashSet;
use tracing::{debug, warn};

use super::codec;
use crate::model::{nodes_from_edge_set, EdgeSet};
use crate::storage::{ColumnFamily, Composite, SliceRange, StorageBackend, STR_MAX, STR_MIN};
use crate::Result;

/// How a scan ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    /// Every page was read.
    Complete,
    /// The backend failed; the edge set was emptied.
    Degraded { reason: String },
}

/// Result of a neighbor scan.
#[derive(Debug, Clone)]
pub struct EdgeScan {
    pub edges: EdgeSet,
    pub status: ScanStatus,
}

impl EdgeScan {
    fn degraded(reason: String) -> Self {
        Self { edges: EdgeSet::new(), status: ScanStatus::Degraded { reason } }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, ScanStatus::Degraded { .. })
    }

    pub fn into_edges(self) -> EdgeSet {
        self.edges
    }
}

pub struct NeighborScanner<B: StorageBackend> {
    backend: Arc<B>,
    page_size: usize,
}

impl<B: StorageBackend> Clone for NeighborScanner<B> {
    fn clone(&self) -> Self {
        Self { backend: Arc::clone(&self.backend), page_size: self.page_size }
    }
}

impl<B: StorageBackend> NeighborScanner<B> {
    pub fn new(backend: Arc<B>, page_size: usize) -> Self {
        Self { backend, page_size: page_size.max(1) }
    }

    /// Edges incident to `vertex_id`.
    ///
    /// `edge_type` narrows the slice to one type. `exclude_position` drops
    /// entries where the vertex sits at that position; it is an exclusion
    /// filter, not a match.
    pub async fn neighbor_edges(
        &self,
        vertex_id: &str,
        edge_type: Option<&str>,
        exclude_position: Option<u32>,
    ) -> EdgeScan {
        debug!(vertex = vertex_id, ?edge_type, ?exclude_position, "neighbor_edges");
        match self.collect(vertex_id, edge_type, exclude_position).await {
            Ok(edges) => EdgeScan { edges, status: ScanStatus::Complete },
            Err(e) => {
                warn!(vertex = vertex_id, error = %e, "edge scan failed, returning no edges");
                EdgeScan::degraded(e.to_string())
            }
        }
    }

    /// `vertex_id` plus every participant of its incident edges.
    pub async fn neighbors(&self, vertex_id: &str) -> HashSet<String> {
        let scan = self.neighbor_edges(vertex_id, None, None).await;
        let mut nodes = nodes_from_edge_set(&scan.edges);
        nodes.insert(vertex_id.to_string());
        nodes
    }

    async fn collect(
        &self,
        vertex_id: &str,
        edge_type: Option<&str>,
        exclude_position: Option<u32>,
    ) -> Result<EdgeSet> {
        let (start, finish) = scan_bounds(edge_type);
        let excluded = exclude_position.and_then(|p| i32::try_from(p).ok());

        let mut edges = EdgeSet::new();
        let mut last: Option<Composite> = None;
        loop {
            let mut range = SliceRange::new(start.clone(), finish.clone()).limit(self.page_size);
            if let Some(key) = last.take() {
                range = range.after(key);
            }

            let page = self.backend.slice(ColumnFamily::Edges, vertex_id, &range).await?;
            let full_page = page.len() == self.page_size;

            for column in &page {
                let Some((pos, edge)) = codec::decode_entry(vertex_id, &column.name) else {
                    continue;
                };
                if excluded != Some(pos) {
                    edges.insert(edge);
                }
            }

            if !full_page {
                break;
            }
            last = page.into_iter().last().map(|c| c.name);
        }
        Ok(edges)
    }
}

/// Sentinel slice bounds, narrowed to one edge type when given.
fn scan_bounds(edge_type: Option<&str>) -> (Composite, Composite) {
    let (low_type, high_type) = match edge_type {
        Some(t) => (t, t),
        None => (STR_MIN, STR_MAX),
    };
    let start = Composite::new()
        .with_str(low_type)
        .with_int(i32::MIN)
        .with_str(STR_MIN)
        .with_str(STR_MIN)
        .with_str(STR_MIN);
    let finish = Composite::new()
        .with_str(high_type)
        .with_int(i32::MAX)
        .with_str(STR_MAX)
        .with_str(STR_MAX)
        .with_str(STR_MAX);
    (start, finish)
}

/// Collect edges of one type across every row of the `edges` family.
///
/// Unlike [`NeighborScanner::neighbor_edges`] this propagates backend
/// failures: it feeds deletions, where a silent miss would leak entries.
pub(crate) async fn edges_of_type<B: StorageBackend>(
    backend: &B,
    edge_type: &str,
) -> Result<EdgeSet> {
    let (start, finish) = scan_bounds(Some(edge_type));
    let range = SliceRange::new(start, finish);
    let mut edges = EdgeSet::new();
    for row in backend.row_keys(ColumnFamily::Edges).await? {
        for column in backend.slice(ColumnFamily::Edges, &row, &range).await? {
            if let Some((_, edge)) = codec::decode_entry(&row, &column.name) {
                edges.insert(edge);
            }
        }
    }
    Ok(edges)
}
