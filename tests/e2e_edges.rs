//! End-to-end integration tests for edge insertion, deletion and counters.
//!
//! Each test drives the public `Graph` API against MemoryBackend and checks
//! edge presence together with the degree, instance and positional counters.

use hypergraph_rs::{Edge, Graph, MemoryBackend};
use pretty_assertions::assert_eq;

async fn graph() -> Graph<MemoryBackend> {
    Graph::open_memory().await.unwrap()
}

fn likes() -> Edge {
    Edge::new("likes", ["user/alice", "url/42"]).unwrap()
}

// ============================================================================
// 1. Single binary edge
// ============================================================================

#[tokio::test]
async fn test_addrel_binary_edge() {
    let graph = graph().await;
    graph.addrel_with("likes", &["user/alice", "url/42"]).await.unwrap();

    let edges = graph.neighbor_edges("user/alice", None, None).await;
    assert_eq!(edges.len(), 1);
    assert!(edges.contains(&likes()));

    assert_eq!(graph.degree("user/alice").await.unwrap(), Some(1));
    assert_eq!(graph.degree("url/42").await.unwrap(), Some(1));
    assert_eq!(graph.instances("likes").await.unwrap(), Some(1));
    assert_eq!(graph.vertex_edge_type_count("user/alice", "likes", 0).await.unwrap(), Some(1));
    assert_eq!(graph.vertex_edge_type_count("url/42", "likes", 1).await.unwrap(), Some(1));
}

// ============================================================================
// 2. Presence lifecycle: absent → present → absent
// ============================================================================

#[tokio::test]
async fn test_rel_exists_lifecycle() {
    let graph = graph().await;
    let e = likes();

    assert!(!graph.rel_exists(&e).await.unwrap());
    assert!(graph.addrel(&e).await.unwrap());
    assert!(graph.rel_exists(&e).await.unwrap());
    assert!(graph.delrel(&e).await.unwrap());
    assert!(!graph.rel_exists(&e).await.unwrap());
}

// ============================================================================
// 3. Idempotent addrel, single delrel clears everything
// ============================================================================

#[tokio::test]
async fn test_double_addrel_single_delrel() {
    let graph = graph().await;

    graph.addrel_with("likes", &["user/alice", "url/42"]).await.unwrap();
    graph.addrel_with("likes", &["user/alice", "url/42"]).await.unwrap();
    assert_eq!(graph.instances("likes").await.unwrap(), Some(1));
    assert_eq!(graph.degree("user/alice").await.unwrap(), Some(1));

    assert!(graph.delrel_with("likes", &["user/alice", "url/42"]).await.unwrap());
    assert!(!graph.rel_exists(&likes()).await.unwrap());
    assert_eq!(graph.instances("likes").await.unwrap(), None);
    assert_eq!(graph.degree("user/alice").await.unwrap(), None);
    assert_eq!(graph.degree("url/42").await.unwrap(), None);
    assert_eq!(graph.vertex_edge_type_count("url/42", "likes", 1).await.unwrap(), None);
}

// ============================================================================
// 4. delrel restores pre-addrel counters exactly
// ============================================================================

#[tokio::test]
async fn test_delrel_restores_prior_counters() {
    let graph = graph().await;
    graph.addrel_with("likes", &["user/alice", "url/1"]).await.unwrap();
    graph.addrel_with("likes", &["user/bob", "url/42"]).await.unwrap();

    let before = (
        graph.degree("user/alice").await.unwrap(),
        graph.degree("url/42").await.unwrap(),
        graph.instances("likes").await.unwrap(),
        graph.vertex_edge_type_count("user/alice", "likes", 0).await.unwrap(),
        graph.vertex_edge_type_count("url/42", "likes", 1).await.unwrap(),
    );

    let e = likes();
    graph.addrel(&e).await.unwrap();
    graph.delrel(&e).await.unwrap();

    let after = (
        graph.degree("user/alice").await.unwrap(),
        graph.degree("url/42").await.unwrap(),
        graph.instances("likes").await.unwrap(),
        graph.vertex_edge_type_count("user/alice", "likes", 0).await.unwrap(),
        graph.vertex_edge_type_count("url/42", "likes", 1).await.unwrap(),
    );
    assert_eq!(before, after);
    assert_eq!(after, (Some(1), Some(1), Some(2), Some(1), Some(1)));
}

// ============================================================================
// 5. delrel of an absent edge touches nothing
// ============================================================================

#[tokio::test]
async fn test_delrel_absent_is_noop() {
    let graph = graph().await;
    graph.addrel_with("likes", &["user/alice", "url/1"]).await.unwrap();

    assert!(!graph.delrel(&likes()).await.unwrap());
    assert_eq!(graph.degree("user/alice").await.unwrap(), Some(1));
    assert_eq!(graph.instances("likes").await.unwrap(), Some(1));
}

// ============================================================================
// 6. Arity-4 edge
// ============================================================================

#[tokio::test]
async fn test_arity_four_edge() {
    let graph = graph().await;
    let e = graph.addrel_with("meeting", &["a", "b", "c", "d"]).await.unwrap();

    for p in ["a", "b", "c", "d"] {
        assert!(graph.rel_exists_on_vertex(p, &e).await.unwrap());
        let edges = graph.neighbor_edges(p, None, None).await;
        assert_eq!(edges.into_iter().collect::<Vec<_>>(), vec![e.clone()]);
        assert_eq!(graph.degree(p).await.unwrap(), Some(1));
    }
    assert_eq!(graph.vertex_edge_type_count("b", "meeting", 1).await.unwrap(), Some(1));
    assert_eq!(graph.vertex_edge_type_count("b", "meeting", 0).await.unwrap(), None);
    assert!(!graph.rel_exists_on_vertex("e", &e).await.unwrap());
}

// ============================================================================
// 7. Degree counts incidences, not distinct edges
// ============================================================================

#[tokio::test]
async fn test_degree_counts_incidences() {
    let graph = graph().await;
    graph.addrel_with("likes", &["user/alice", "url/1"]).await.unwrap();
    graph.addrel_with("likes", &["user/alice", "url/2"]).await.unwrap();
    graph.addrel_with("knows", &["user/bob", "user/alice"]).await.unwrap();

    assert_eq!(graph.degree("user/alice").await.unwrap(), Some(3));
    assert_eq!(graph.instances("likes").await.unwrap(), Some(2));
    assert_eq!(graph.instances("knows").await.unwrap(), Some(1));
    assert_eq!(graph.vertex_edge_type_count("user/alice", "likes", 0).await.unwrap(), Some(2));
    assert_eq!(graph.vertex_edge_type_count("user/alice", "knows", 1).await.unwrap(), Some(1));
}

// ============================================================================
// 8. Edge construction errors and normalization
// ============================================================================

#[tokio::test]
async fn test_convenience_form_normalizes_and_validates() {
    let graph = graph().await;
    let e = graph.addrel_with("is a", &["graphbrain/1", "great/1"]).await.unwrap();
    assert_eq!(e.edge_type, "is_a");
    assert_eq!(graph.instances("is_a").await.unwrap(), Some(1));

    assert!(graph.addrel_with("says", &["mary/1"]).await.is_err());
}

// ============================================================================
// 9. Point write failures propagate
// ============================================================================

#[tokio::test]
async fn test_write_failure_surfaces() {
    let graph = graph().await;
    graph.backend().fail_writes(true);
    assert!(graph.addrel(&likes()).await.is_err());
    graph.backend().fail_writes(false);
    assert!(!graph.rel_exists(&likes()).await.unwrap());
}
