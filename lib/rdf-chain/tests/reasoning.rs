#![cfg(test)]

use futures::TryStreamExt;
use rdf_chain::api::{
    CardinalityAccumulator, CardinalityKind, QuadSource, SourceOperation,
};
use rdf_chain::model::vocab::owl;
use rdf_chain::model::{any_quad_pattern, GraphName, NamedNode, Quad, Triple};
use rdf_chain::rules::{RuleScope, ScopedRules};
use rdf_chain::source::{MemoryQuadSource, ReasoningSource};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

const DATA: &[(&str, &str, &str)] = &[
    ("http://example.com/paris", "http://example.com/locatedIn", "http://example.com/france"),
    ("http://example.com/lyon", "http://example.com/locatedIn", "http://example.com/france"),
];

fn quad(subject: &str, predicate: &str, object: &str) -> Quad {
    Quad::new(
        NamedNode::new_unchecked(subject),
        NamedNode::new_unchecked(predicate),
        NamedNode::new_unchecked(object),
        GraphName::DefaultGraph,
    )
}

#[tokio::test]
async fn derived_facts_surface_through_the_facade() {
    let mut rules = ScopedRules::new();
    rules.add_scope(
        RuleScope::Wildcard,
        vec![Triple::new(
            NamedNode::new_unchecked("http://example.com/france"),
            owl::SAME_AS.into_owned(),
            NamedNode::new_unchecked("http://dbpedia.org/resource/France"),
        )],
    );

    let quads = DATA.iter().map(|(s, p, o)| quad(s, p, o)).collect();
    let source = ReasoningSource::new(
        Arc::new(MemoryQuadSource::with_url(quads, "http://example.com/data")),
        None,
        &rules,
        Arc::new(CardinalityAccumulator),
    );

    let results = source
        .query_quads(&SourceOperation::Pattern(any_quad_pattern()), None)
        .await
        .unwrap();
    let collected: HashSet<Quad> =
        tokio::time::timeout(Duration::from_secs(5), results.quads.try_collect::<Vec<_>>())
            .await
            .unwrap()
            .unwrap()
            .into_iter()
            .collect();

    let mut expected: HashSet<Quad> = DATA.iter().map(|(s, p, o)| quad(s, p, o)).collect();
    expected.insert(quad(
        "http://example.com/paris",
        "http://example.com/locatedIn",
        "http://dbpedia.org/resource/France",
    ));
    expected.insert(quad(
        "http://example.com/lyon",
        "http://example.com/locatedIn",
        "http://dbpedia.org/resource/France",
    ));
    assert_eq!(collected, expected);

    let metadata = source
        .query_quads(&SourceOperation::Pattern(any_quad_pattern()), None)
        .await
        .unwrap()
        .metadata;
    assert_eq!(metadata.cardinality.kind, CardinalityKind::Exact);
    assert_eq!(metadata.cardinality.value, 4.0);
}
