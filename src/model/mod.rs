//! # Hypergraph Model
//!
//! Plain DTOs shared by every layer: identifiers, vertices and N-ary edges.
//!
//! Design rule: no storage types here. This module is pure data — no I/O,
//! no state, no async.

pub mod id;
pub mod vertex;
pub mod edge;

pub use id::{Family, family, is_in_user_space, relationship_id};
pub use vertex::{
    Vertex, VertexKind,
    TextNode, UrlNode, UserNode, EdgeType, SourceNode, RuleNode, ContextNode,
};
pub use edge::{Edge, EdgeSet, nodes_from_edge_set};
