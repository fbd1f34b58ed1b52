//! Identifier families.
//!
//! An identifier is a plain `/`-separated string. Its family is read off the
//! shape of the string and decides which partition a vertex lives in:
//!
//! | Shape | Family |
//! |-------|--------|
//! | `user/<name>` | `User` |
//! | `user/<name>/url/...` | `UserUrl` |
//! | `user/<name>/context/...` | `Context` |
//! | `user/<name>/...` | `UserSpace` |
//! | `url/...` | `Url` |
//! | `rtype/...` | `EType` |
//! | `rule/...` | `Rule` |
//! | `src/...` | `Source` |
//! | anything else | `Global` |

use serde::{Deserialize, Serialize};

/// Partition class of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Global,
    UserSpace,
    User,
    EType,
    Url,
    UserUrl,
    Context,
    Rule,
    Source,
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Family::Global => "global",
            Family::UserSpace => "userspace",
            Family::User => "user",
            Family::EType => "etype",
            Family::Url => "url",
            Family::UserUrl => "userurl",
            Family::Context => "context",
            Family::Rule => "rule",
            Family::Source => "source",
        };
        f.write_str(name)
    }
}

/// Classify an identifier. Total and pure.
pub fn family(id: &str) -> Family {
    let parts: Vec<&str> = id.split('/').collect();
    match parts.as_slice() {
        ["user", name] if !name.is_empty() => Family::User,
        ["user", _, "url", _, ..] => Family::UserUrl,
        ["user", _, "context", _, ..] => Family::Context,
        ["user", _, _, ..] => Family::UserSpace,
        ["url", _, ..] => Family::Url,
        ["rtype", _, ..] => Family::EType,
        ["rule", _, ..] => Family::Rule,
        ["src", _, ..] => Family::Source,
        _ => Family::Global,
    }
}

/// True for identifiers owned by a user's private space.
pub fn is_in_user_space(id: &str) -> bool {
    matches!(family(id), Family::UserSpace | Family::UserUrl | Family::Context)
}

/// Key of the positional relation counter for `edge_type` at `position`.
///
/// The position goes first so that edge types containing `/` stay
/// unambiguous.
pub fn relationship_id(edge_type: &str, position: usize) -> String {
    format!("rel/{position}/{edge_type}")
}
