//! Vertices of the hypergraph.
//!
//! Every vertex kind carries its identifier plus a small payload. The payload
//! is opaque to the edge layer; only the identifier and the kind matter there.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discriminant of a [`Vertex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexKind {
    Text,
    Url,
    User,
    EdgeType,
    Source,
    Rule,
    Context,
}

impl std::fmt::Display for VertexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VertexKind::Text => "TextNode",
            VertexKind::Url => "URLNode",
            VertexKind::User => "UserNode",
            VertexKind::EdgeType => "EdgeType",
            VertexKind::Source => "SourceNode",
            VertexKind::Rule => "RuleNode",
            VertexKind::Context => "ContextNode",
        };
        f.write_str(name)
    }
}

/// A vertex in the hypergraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Vertex {
    Text(TextNode),
    Url(UrlNode),
    User(UserNode),
    EdgeType(EdgeType),
    Source(SourceNode),
    Rule(RuleNode),
    Context(ContextNode),
}

impl Vertex {
    pub fn id(&self) -> &str {
        match self {
            Vertex::Text(v) => &v.id,
            Vertex::Url(v) => &v.id,
            Vertex::User(v) => &v.id,
            Vertex::EdgeType(v) => &v.id,
            Vertex::Source(v) => &v.id,
            Vertex::Rule(v) => &v.id,
            Vertex::Context(v) => &v.id,
        }
    }

    pub fn kind(&self) -> VertexKind {
        match self {
            Vertex::Text(_) => VertexKind::Text,
            Vertex::Url(_) => VertexKind::Url,
            Vertex::User(_) => VertexKind::User,
            Vertex::EdgeType(_) => VertexKind::EdgeType,
            Vertex::Source(_) => VertexKind::Source,
            Vertex::Rule(_) => VertexKind::Rule,
            Vertex::Context(_) => VertexKind::Context,
        }
    }
}

/// Free text, global or inside a user's space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub id: String,
    pub text: String,
    pub summary: String,
}

impl TextNode {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), summary: String::new() }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlNode {
    pub id: String,
    pub url: String,
    pub title: String,
}

impl UrlNode {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self { id: id.into(), url: url.into(), title: String::new() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserNode {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub session_ts: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl UserNode {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            name: String::new(),
            email: String::new(),
            role: String::new(),
            session_ts: None,
            last_seen: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Stamp `last_seen` with the current time.
    pub fn touch(&mut self) {
        self.last_seen = Some(Utc::now());
    }
}

/// A vertex naming an edge type. Owns the type's instance counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeType {
    pub id: String,
    pub label: String,
}

impl EdgeType {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    pub id: String,
}

impl SourceNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleNode {
    pub id: String,
    pub rule: String,
}

impl RuleNode {
    pub fn new(id: impl Into<String>, rule: impl Into<String>) -> Self {
        Self { id: id.into(), rule: rule.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextNode {
    pub id: String,
    pub name: String,
}

impl ContextNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

macro_rules! impl_into_vertex {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Vertex {
                fn from(v: $ty) -> Self {
                    Vertex::$variant(v)
                }
            }
        )*
    };
}

impl_into_vertex! {
    TextNode => Text,
    UrlNode => Url,
    UserNode => User,
    EdgeType => EdgeType,
    SourceNode => Source,
    RuleNode => Rule,
    ContextNode => Context,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_and_kind() {
        let v: Vertex = UserNode::new("user/alice", "alice").into();
        assert_eq!(v.id(), "user/alice");
        assert_eq!(v.kind(), VertexKind::User);

        let v: Vertex = EdgeType::new("rtype/likes", "likes").into();
        assert_eq!(v.kind(), VertexKind::EdgeType);
        assert_eq!(v.kind().to_string(), "EdgeType");
    }

    #[test]
    fn test_serde_roundtrip_keeps_kind() {
        let v: Vertex = UrlNode::new("url/42", "https://example.org").with_title("Example").into();
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"kind\":\"Url\""));
        let back: Vertex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
