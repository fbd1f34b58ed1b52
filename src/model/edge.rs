//! N-ary, typed, positional edges.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A set of edges, as returned by neighbor scans.
pub type EdgeSet = HashSet<Edge>;

/// A hyperedge: an edge type plus an ordered list of participant ids.
///
/// Position in `participants` is a role index and is part of the edge's
/// identity. Edges have no id of their own; two edges are the same edge iff
/// type and participant sequence are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub edge_type: String,
    pub participants: Vec<String>,
}

impl Edge {
    /// Build an edge, replacing spaces in the edge type with underscores.
    ///
    /// Fails with [`Error::InvalidEdge`] for fewer than two participants.
    pub fn new<I, S>(edge_type: &str, participants: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let participants: Vec<String> = participants.into_iter().map(Into::into).collect();
        if participants.len() < 2 {
            return Err(Error::InvalidEdge(format!(
                "edge '{edge_type}' needs at least 2 participants, got {}",
                participants.len()
            )));
        }
        Ok(Self {
            edge_type: edge_type.replace(' ', "_"),
            participants,
        })
    }

    pub fn arity(&self) -> usize {
        self.participants.len()
    }

    /// Position of the first occurrence of `id` among the participants.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.participants.iter().position(|p| p == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}", self.edge_type)?;
        for p in &self.participants {
            write!(f, " {p}")?;
        }
        f.write_str(")")
    }
}

/// Every participant id across a set of edges.
pub fn nodes_from_edge_set<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> HashSet<String> {
    edges
        .into_iter()
        .flat_map(|e| e.participants.iter().cloned())
        .collect()
}
