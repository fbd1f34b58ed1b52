//! Edge codec.
//!
//! An edge is stored once per participant, as a column in that
//! participant's `edges` row. The column name is a 5-component composite:
//!
//! ```text
//! (edge_type, position, other_0, other_1, rest)
//! ```
//!
//! `position` is where the owning participant sits in the edge. The others
//! are the remaining participants in order; unused slots are empty strings
//! and participants past the second are space-joined into `rest`.
//!
//! Participant ids must be non-empty and contain no spaces for the entry to
//! decode back to the same edge.

use crate::model::Edge;
use crate::storage::Composite;

/// Number of components in an edge entry.
pub const ENTRY_COMPONENTS: usize = 5;

/// Entry key for the participant at `position`.
///
/// Only that slot is removed from the others, so an edge naming the same
/// vertex twice still round-trips.
///
/// # Panics
///
/// Panics if `position` is out of range for the edge.
pub fn entry_key_at(edge: &Edge, position: usize) -> Composite {
    assert!(position < edge.arity(), "position {position} out of range for {edge}");

    let others: Vec<&str> = edge.participants.iter()
        .enumerate()
        .filter(|(i, _)| *i != position)
        .map(|(_, p)| p.as_str())
        .collect();

    let other_0 = others.first().copied().unwrap_or_default();
    let other_1 = others.get(1).copied().unwrap_or_default();
    let rest = if others.len() > 2 { others[2..].join(" ") } else { String::new() };

    Composite::new()
        .with_str(edge.edge_type.as_str())
        .with_int(position_component(position))
        .with_str(other_0)
        .with_str(other_1)
        .with_str(rest)
}

/// Entry key for `owner`'s view of `edge`. `None` if `owner` is not a
/// participant.
pub fn entry_key(owner: &str, edge: &Edge) -> Option<Composite> {
    edge.position_of(owner).map(|pos| entry_key_at(edge, pos))
}

/// Rebuild the full edge from `owner` and the decoded components.
pub fn decode(
    owner: &str,
    edge_type: &str,
    position: i32,
    other_0: &str,
    other_1: &str,
    rest: &str,
) -> Edge {
    let mut participants: Vec<String> = [other_0, other_1]
        .into_iter()
        .chain(rest.split(' '))
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    let position = usize::try_from(position).unwrap_or(0).min(participants.len());
    participants.insert(position, owner.to_string());

    Edge {
        edge_type: edge_type.to_string(),
        participants,
    }
}

/// Decode an entry column read from `owner`'s row.
///
/// Returns the stored position alongside the edge, or `None` when the
/// column does not have the entry shape.
pub fn decode_entry(owner: &str, name: &Composite) -> Option<(i32, Edge)> {
    if name.len() != ENTRY_COMPONENTS {
        return None;
    }
    let edge_type = name.get_str(0)?;
    let position = name.get_int(1)?;
    let edge = decode(
        owner,
        edge_type,
        position,
        name.get_str(2)?,
        name.get_str(3)?,
        name.get_str(4)?,
    );
    Some((position, edge))
}

fn position_component(position: usize) -> i32 {
    i32::try_from(position).unwrap_or(i32::MAX)
}
