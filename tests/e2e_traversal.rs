//! End-to-end integration tests for neighbor scans.
//!
//! Exercises edge-type narrowing, the position exclusion filter, paging and
//! the degraded-scan policy through the public `Graph` API.

use hashbrown::HashSet;
use hypergraph_rs::{Edge, EdgeSet, Graph, GraphConfig, MemoryBackend, ScanStatus};
use pretty_assertions::assert_eq;

/// A small social graph:
/// alice likes url/1, bob likes alice's url/1, alice/bob/carol meet.
async fn setup_social(config: GraphConfig) -> (Graph<MemoryBackend>, Vec<Edge>) {
    let graph = Graph::with_config(MemoryBackend::new(), config);
    let edges = vec![
        graph.addrel_with("likes", &["user/alice", "url/1"]).await.unwrap(),
        graph.addrel_with("likes", &["user/bob", "url/1"]).await.unwrap(),
        graph.addrel_with("knows", &["user/bob", "user/alice"]).await.unwrap(),
        graph.addrel_with("meeting", &["user/alice", "user/bob", "user/carol", "url/9"]).await.unwrap(),
    ];
    (graph, edges)
}

fn set(edges: &[&Edge]) -> EdgeSet {
    edges.iter().map(|e| (*e).clone()).collect()
}

fn ids(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// 1. All incident edges, whatever the position
// ============================================================================

#[tokio::test]
async fn test_neighbor_edges_all_positions() {
    let (graph, e) = setup_social(GraphConfig::default()).await;

    let alice = graph.neighbor_edges("user/alice", None, None).await;
    assert_eq!(alice, set(&[&e[0], &e[2], &e[3]]));

    let url = graph.neighbor_edges("url/1", None, None).await;
    assert_eq!(url, set(&[&e[0], &e[1]]));
}

// ============================================================================
// 2. Edge type narrowing
// ============================================================================

#[tokio::test]
async fn test_neighbor_edges_by_type() {
    let (graph, e) = setup_social(GraphConfig::default()).await;

    assert_eq!(graph.neighbor_edges("user/bob", Some("likes"), None).await, set(&[&e[1]]));
    assert_eq!(graph.neighbor_edges("user/bob", Some("knows"), None).await, set(&[&e[2]]));
    assert!(graph.neighbor_edges("user/bob", Some("hates"), None).await.is_empty());
}

// ============================================================================
// 3. Position filter excludes, it does not select
// ============================================================================

#[tokio::test]
async fn test_position_filter_is_exclusion() {
    let (graph, e) = setup_social(GraphConfig::default()).await;

    // alice is at position 0 in likes and meeting, 1 in knows
    let not_first = graph.neighbor_edges("user/alice", None, Some(0)).await;
    assert_eq!(not_first, set(&[&e[2]]));

    let not_second = graph.neighbor_edges("user/alice", None, Some(1)).await;
    assert_eq!(not_second, set(&[&e[0], &e[3]]));

    let combined = graph.neighbor_edges("user/alice", Some("likes"), Some(1)).await;
    assert_eq!(combined, set(&[&e[0]]));
}

// ============================================================================
// 4. neighbors() includes the vertex itself
// ============================================================================

#[tokio::test]
async fn test_neighbors() {
    let (graph, _e) = setup_social(GraphConfig::default()).await;

    assert_eq!(
        graph.neighbors("user/carol").await,
        ids(&["user/carol", "user/alice", "user/bob", "url/9"]),
    );
    assert_eq!(
        graph.neighbors("url/1").await,
        ids(&["url/1", "user/alice", "user/bob"]),
    );
    assert_eq!(graph.neighbors("user/nobody").await, ids(&["user/nobody"]));
}

// ============================================================================
// 5. Tiny pages read the same as one big page
// ============================================================================

#[tokio::test]
async fn test_paging_is_transparent() {
    let (small, _) = setup_social(GraphConfig { scan_page_size: 1 }).await;
    let (large, _) = setup_social(GraphConfig::default()).await;
    assert_eq!(small.config().scan_page_size, 1);

    for v in ["user/alice", "user/bob", "url/1", "url/9"] {
        assert_eq!(
            small.neighbor_edges(v, None, None).await,
            large.neighbor_edges(v, None, None).await,
        );
    }
}

// ============================================================================
// 6. Backend failure degrades scans, reported as such
// ============================================================================

#[tokio::test]
async fn test_degraded_scan_is_reported() {
    let (graph, e) = setup_social(GraphConfig::default()).await;
    graph.backend().fail_scans(true);

    let scan = graph.scan_neighbor_edges("user/alice", None, None).await;
    assert!(scan.is_degraded());
    assert!(scan.edges.is_empty());
    assert!(graph.neighbor_edges("user/alice", None, None).await.is_empty());
    assert_eq!(graph.neighbors("user/alice").await, ids(&["user/alice"]));

    // Point reads are unaffected
    assert!(graph.rel_exists(&e[0]).await.unwrap());

    graph.backend().fail_scans(false);
    let scan = graph.scan_neighbor_edges("user/alice", None, None).await;
    assert_eq!(scan.status, ScanStatus::Complete);
    assert_eq!(scan.edges.len(), 3);
}

// ============================================================================
// 7. Config deserializes with defaults
// ============================================================================

#[test]
fn test_graph_config_defaults() {
    let config: GraphConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, GraphConfig::default());
    let config: GraphConfig = serde_json::from_str(r#"{"scan_page_size": 8}"#).unwrap();
    assert_eq!(config.scan_page_size, 8);
}
