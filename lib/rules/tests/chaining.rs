use futures::stream::{self, StreamExt, TryStreamExt};
use rdf_chain_model::{GraphName, Literal, NamedNode, Quad};
use rdf_chain_rules::{chain_reasoning, generate_implicit_quads, RelationKind, Rule, RuleGraph};

fn iri(value: &str) -> NamedNode {
    NamedNode::new_unchecked(value)
}

fn quad(subject: &str, predicate: &str, object: &str) -> Quad {
    Quad::new(iri(subject), iri(predicate), iri(object), GraphName::DefaultGraph)
}

fn same_as(premise: &str, conclusion: &str) -> Rule {
    Rule::new(iri(premise), RelationKind::SameAs, iri(conclusion))
}

#[test]
fn empty_rule_set_derives_nothing() {
    let rules = RuleGraph::default();
    assert!(chain_reasoning(&rules, quad("s", "p", "o").as_ref()).is_empty());
}

#[test]
fn unrelated_rule_derives_nothing() {
    let rules = RuleGraph::new(vec![same_as("foo", "c")]);
    assert!(chain_reasoning(&rules, quad("s", "p", "o").as_ref()).is_empty());
}

#[test]
fn single_rule_substitutes_the_subject() {
    let rules = RuleGraph::new(vec![same_as("s", "c")]);
    assert_eq!(
        chain_reasoning(&rules, quad("s", "p", "o").as_ref()),
        [quad("c", "p", "o")]
    );
}

#[test]
fn chained_rules_derive_in_discovery_order() {
    let rules = RuleGraph::new(vec![
        same_as("s", "c"),
        same_as("c", "c1"),
        same_as("c1", "c2"),
    ]);
    assert_eq!(
        chain_reasoning(&rules, quad("s", "p", "o").as_ref()),
        [quad("c", "p", "o"), quad("c1", "p", "o"), quad("c2", "p", "o")]
    );
}

#[test]
fn branching_rules_explore_every_chain() {
    let rules = RuleGraph::new(vec![
        same_as("s", "c"),
        same_as("s", "a"),
        same_as("a", "b"),
        same_as("c", "c1"),
        same_as("bar", "c1"),
        same_as("c1", "c2"),
    ]);
    assert_eq!(
        chain_reasoning(&rules, quad("s", "p", "o").as_ref()),
        [
            quad("c", "p", "o"),
            quad("a", "p", "o"),
            quad("b", "p", "o"),
            quad("c1", "p", "o"),
            quad("c2", "p", "o"),
        ]
    );
}

#[test]
fn substitution_covers_every_position() {
    let rules = RuleGraph::new(vec![same_as("x", "y")]);

    assert_eq!(
        chain_reasoning(&rules, quad("x", "p", "o").as_ref()),
        [quad("y", "p", "o")]
    );
    assert_eq!(
        chain_reasoning(&rules, quad("s", "x", "o").as_ref()),
        [quad("s", "y", "o")]
    );
    assert_eq!(
        chain_reasoning(&rules, quad("s", "p", "x").as_ref()),
        [quad("s", "p", "y")]
    );

    let in_graph = Quad::new(iri("s"), iri("p"), iri("o"), iri("x"));
    assert_eq!(
        chain_reasoning(&rules, in_graph.as_ref()),
        [Quad::new(iri("s"), iri("p"), iri("o"), iri("y"))]
    );
}

#[test]
fn literal_conclusions_never_reach_iri_positions() {
    let rule = Rule::new(iri("x"), RelationKind::SameAs, Literal::new_simple_literal("v"));
    let rules = RuleGraph::new(vec![rule]);

    // Subject, predicate and graph positions reject the literal.
    assert!(chain_reasoning(&rules, quad("x", "p", "o").as_ref()).is_empty());
    assert!(chain_reasoning(&rules, quad("s", "x", "o").as_ref()).is_empty());
    let in_graph = Quad::new(iri("s"), iri("p"), iri("o"), iri("x"));
    assert!(chain_reasoning(&rules, in_graph.as_ref()).is_empty());

    // The object position accepts it.
    assert_eq!(
        chain_reasoning(&rules, quad("s", "p", "x").as_ref()),
        [Quad::new(
            iri("s"),
            iri("p"),
            Literal::new_simple_literal("v"),
            GraphName::DefaultGraph
        )]
    );
}

#[test]
fn blocked_position_falls_through_to_a_later_match() {
    // The premise occurs as subject and object; the literal conclusion can
    // only be placed in the object position.
    let rule = Rule::new(iri("x"), RelationKind::SameAs, Literal::new_simple_literal("v"));
    let rules = RuleGraph::new(vec![rule]);
    assert_eq!(
        chain_reasoning(&rules, quad("x", "p", "x").as_ref()),
        [Quad::new(
            iri("x"),
            iri("p"),
            Literal::new_simple_literal("v"),
            GraphName::DefaultGraph
        )]
    );
}

#[test]
fn cyclic_rules_terminate() {
    let rules = RuleGraph::new(vec![same_as("a", "b"), same_as("b", "a")]);
    assert_eq!(
        chain_reasoning(&rules, quad("a", "p", "o").as_ref()),
        [quad("b", "p", "o")]
    );
}

#[test]
fn all_relation_kinds_share_substitution_semantics() {
    for kind in RelationKind::ALL {
        let rules = RuleGraph::new(vec![Rule::new(iri("s"), kind, iri("c"))]);
        assert_eq!(
            chain_reasoning(&rules, quad("s", "p", "o").as_ref()),
            [quad("c", "p", "o")],
            "unexpected derivation for {kind}"
        );
    }
}

#[tokio::test]
async fn generate_implicit_quads_flattens_per_quad_derivations() {
    let rules = RuleGraph::new(vec![same_as("s", "c"), same_as("c", "c1")]);
    let input = stream::iter(vec![Ok(quad("s", "p", "o")), Ok(quad("unrelated", "p", "o"))]);

    let derived: Vec<Quad> = generate_implicit_quads(rules, input.boxed())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(derived, [quad("c", "p", "o"), quad("c1", "p", "o")]);
}

#[tokio::test]
async fn generate_implicit_quads_handles_empty_streams() {
    let rules = RuleGraph::new(vec![same_as("s", "c")]);
    let derived: Vec<Quad> = generate_implicit_quads(rules, stream::empty().boxed())
        .try_collect()
        .await
        .unwrap();
    assert!(derived.is_empty());
}
