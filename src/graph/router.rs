//! Identifier router.
//!
//! Maps an identifier's family onto one of the four vertex lookups and reads
//! the vertex row from the matching column family. Vertex rows hold the
//! serialized vertex in a single `vertex` column.

use std::sync::Arc;

use tracing::debug;

use crate::model::{family, is_in_user_space, Family, Vertex};
use crate::storage::{ColumnFamily, Composite, StorageBackend};
use crate::{Error, Result};

const VERTEX_COLUMN: &str = "vertex";

/// The four vertex lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Text nodes, global or user-space.
    Text,
    User,
    EdgeType,
    /// URL nodes, global or user-space.
    Url,
}

impl Partition {
    /// Lookup serving `family`. Context, rule and source ids have none.
    pub fn for_family(family: Family) -> Option<Self> {
        match family {
            Family::Global | Family::UserSpace => Some(Partition::Text),
            Family::User => Some(Partition::User),
            Family::EType => Some(Partition::EdgeType),
            Family::Url | Family::UserUrl => Some(Partition::Url),
            Family::Context | Family::Rule | Family::Source => None,
        }
    }

    /// Column family holding `id` within this partition.
    pub fn column_family(&self, id: &str) -> ColumnFamily {
        match self {
            Partition::Text | Partition::Url => split_by_space(id),
            Partition::User => ColumnFamily::User,
            Partition::EdgeType => ColumnFamily::EdgeType,
        }
    }
}

/// Column family a vertex is written to and deleted from.
pub fn vertex_column_family(vertex: &Vertex) -> ColumnFamily {
    match vertex {
        Vertex::Text(_) | Vertex::Url(_) => split_by_space(vertex.id()),
        Vertex::Rule(_) | Vertex::Source(_) => ColumnFamily::Global,
        Vertex::User(_) => ColumnFamily::User,
        Vertex::Context(_) => ColumnFamily::UserSpace,
        Vertex::EdgeType(_) => ColumnFamily::EdgeType,
    }
}

fn split_by_space(id: &str) -> ColumnFamily {
    if is_in_user_space(id) { ColumnFamily::UserSpace } else { ColumnFamily::Global }
}

pub(crate) fn vertex_column() -> Composite {
    Composite::single(VERTEX_COLUMN)
}

pub struct Router<B: StorageBackend> {
    backend: Arc<B>,
}

impl<B: StorageBackend> Clone for Router<B> {
    fn clone(&self) -> Self {
        Self { backend: Arc::clone(&self.backend) }
    }
}

impl<B: StorageBackend> Router<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Resolve an id to its vertex. Fails with `NotFound` when the family
    /// has no lookup or the lookup finds no row.
    pub async fn resolve(&self, id: &str) -> Result<Vertex> {
        let family = family(id);
        debug!(id, %family, "resolve");

        let Some(partition) = Partition::for_family(family) else {
            return Err(not_found(id));
        };

        let cf = partition.column_family(id);
        let Some(bytes) = self.backend.get_column(cf, id, &vertex_column()).await? else {
            return Err(not_found(id));
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn not_found(id: &str) -> Error {
    Error::NotFound(format!("vertex with key: {id} not found."))
}
