//! Composite column names.
//!
//! A composite is a fixed sequence of typed components compared
//! component-by-component, first component major. Edge entries use
//! `(str, int, str, str, str)`; counters and vertex rows use a single string.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Smallest string component. Sorts before every other string.
pub const STR_MIN: &str = "";

/// Largest single-character string component.
pub const STR_MAX: &str = "\u{10FFFF}";

/// One typed component of a [`Composite`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Component {
    Str(String),
    Int(i32),
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Component::Str(s) => write!(f, "{s:?}"),
            Component::Int(i) => write!(f, "{i}"),
        }
    }
}

/// Ordered composite key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Composite(SmallVec<[Component; 5]>);

impl Composite {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Single string component. Used for plain named columns.
    pub fn single(name: impl Into<String>) -> Self {
        Self::new().with_str(name)
    }

    pub fn with_str(mut self, s: impl Into<String>) -> Self {
        self.0.push(Component::Str(s.into()));
        self
    }

    pub fn with_int(mut self, i: i32) -> Self {
        self.0.push(Component::Int(i));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn components(&self) -> &[Component] {
        &self.0
    }

    /// String component at `idx`, or `None` if absent or not a string.
    pub fn get_str(&self, idx: usize) -> Option<&str> {
        match self.0.get(idx) {
            Some(Component::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Integer component at `idx`, or `None` if absent or not an integer.
    pub fn get_int(&self, idx: usize) -> Option<i32> {
        match self.0.get(idx) {
            Some(Component::Int(i)) => Some(*i),
            _ => None,
        }
    }
}

impl std::fmt::Display for Composite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(")")
    }
}
