use futures::stream::{self, StreamExt};
use rdf_chain_common::error::{SourceError, StorageError};
use rdf_chain_common::CardinalityKind;
use rdf_chain_model::{any_quad_pattern, GraphName, NamedNode, Quad, TermPattern};
use rdf_chain_storage::ImplicitFactStore;
use std::time::Duration;

fn quad(subject: &str, predicate: &str, object: &str) -> Quad {
    Quad::new(
        NamedNode::new_unchecked(subject),
        NamedNode::new_unchecked(predicate),
        NamedNode::new_unchecked(object),
        GraphName::DefaultGraph,
    )
}

#[test]
fn append_deduplicates() {
    let store = ImplicitFactStore::new();

    assert!(store.append(quad("s", "p", "o")).unwrap());
    assert!(!store.append(quad("s", "p", "o")).unwrap());
    assert_eq!(store.len(), 1);
}

#[test]
fn append_after_seal_fails() {
    let store = ImplicitFactStore::new();
    store.seal();

    let result = store.append(quad("s", "p", "o"));
    assert!(matches!(result, Err(StorageError::SealedStoreWrite)));
    assert!(store.is_empty());
}

#[test]
fn seal_is_idempotent() {
    let store = ImplicitFactStore::new();
    store.seal();
    store.seal();
    assert!(store.is_sealed());
}

#[tokio::test]
async fn import_counts_new_quads() {
    let store = ImplicitFactStore::new();
    let quads = vec![
        Ok(quad("s", "p", "o")),
        Ok(quad("s", "p", "o2")),
        Ok(quad("s", "p", "o")),
    ];

    let added = store.import(stream::iter(quads).boxed()).await.unwrap();
    assert_eq!(added, 2);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn import_propagates_stream_errors() {
    let store = ImplicitFactStore::new();
    let quads: Vec<Result<Quad, SourceError>> = vec![
        Ok(quad("s", "p", "o")),
        Err(SourceError::source("inner source failed")),
    ];

    let result = store.import(stream::iter(quads).boxed()).await;
    assert!(result.is_err());
    // The quads before the error were stored.
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn pattern_streams_observe_later_appends() {
    let store = ImplicitFactStore::new();
    store.append(quad("s", "p", "o1")).unwrap();

    let results = store.match_pattern(&any_quad_pattern());
    let collector = tokio::spawn(results.collect::<Vec<Quad>>());

    // Give the collector a chance to drain the current content and park.
    tokio::time::sleep(Duration::from_millis(10)).await;
    store.append(quad("s", "p", "o2")).unwrap();
    store.seal();

    let collected = tokio::time::timeout(Duration::from_secs(5), collector)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(collected, [quad("s", "p", "o1"), quad("s", "p", "o2")]);
}

#[tokio::test]
async fn pattern_streams_filter_by_pattern() {
    let store = ImplicitFactStore::new();
    store.append(quad("a", "p", "o")).unwrap();
    store.append(quad("b", "p", "o")).unwrap();
    store.seal();

    let mut pattern = any_quad_pattern();
    pattern.subject = TermPattern::NamedNode(NamedNode::new_unchecked("a"));

    let collected: Vec<Quad> = store.match_pattern(&pattern).collect().await;
    assert_eq!(collected, [quad("a", "p", "o")]);
}

#[tokio::test]
async fn dropping_a_pattern_stream_keeps_the_store_usable() {
    let store = ImplicitFactStore::new();
    let results = store.match_pattern(&any_quad_pattern());
    drop(results);

    store.append(quad("s", "p", "o")).unwrap();
    store.seal();
    let collected: Vec<Quad> = store.match_pattern(&any_quad_pattern()).collect().await;
    assert_eq!(collected.len(), 1);
}

#[test]
fn pattern_metadata_tracks_the_lifecycle() {
    let store = ImplicitFactStore::new();
    store.append(quad("s", "p", "o")).unwrap();

    let open = store.pattern_metadata(&any_quad_pattern());
    assert_eq!(open.cardinality.kind, CardinalityKind::Estimate);
    assert_eq!(open.cardinality.value, 1.0);

    store.seal();
    let sealed = store.pattern_metadata(&any_quad_pattern());
    assert_eq!(sealed.cardinality.kind, CardinalityKind::Exact);
    assert_eq!(sealed.cardinality.value, 1.0);
}

#[test]
fn contains_match_reflects_current_content() {
    let store = ImplicitFactStore::new();
    assert!(!store.contains_match(&any_quad_pattern()));

    store.append(quad("s", "p", "o")).unwrap();
    assert!(store.contains_match(&any_quad_pattern()));
}
