use oxrdf::{GraphNameRef, NamedNodeRef, QuadRef, TermRef, Variable};
use spargebra::term::{GraphNamePattern, NamedNodePattern, QuadPattern, TermPattern};

/// Returns the quad pattern with every position unbound.
///
/// Matching this pattern against a store enumerates all of its quads,
/// including those in named graphs.
pub fn any_quad_pattern() -> QuadPattern {
    QuadPattern {
        subject: TermPattern::Variable(Variable::new_unchecked("s")),
        predicate: NamedNodePattern::Variable(Variable::new_unchecked("p")),
        object: TermPattern::Variable(Variable::new_unchecked("o")),
        graph_name: GraphNamePattern::Variable(Variable::new_unchecked("g")),
    }
}

/// Checks whether `quad` is an instance of `pattern`.
///
/// Variables act as independent wildcards. Repeated occurrences of the same
/// variable are *not* required to bind to the same term; join filtering is the
/// responsibility of the surrounding query engine.
pub fn quad_matches_pattern(quad: QuadRef<'_>, pattern: &QuadPattern) -> bool {
    term_matches_pattern(&pattern.subject, quad.subject.into())
        && named_node_matches_pattern(&pattern.predicate, quad.predicate)
        && term_matches_pattern(&pattern.object, quad.object)
        && graph_name_matches_pattern(&pattern.graph_name, quad.graph_name)
}

/// Checks whether `term` is an instance of `pattern`.
pub fn term_matches_pattern(pattern: &TermPattern, term: TermRef<'_>) -> bool {
    match pattern {
        TermPattern::NamedNode(node) => TermRef::NamedNode(node.as_ref()) == term,
        TermPattern::BlankNode(node) => TermRef::BlankNode(node.as_ref()) == term,
        TermPattern::Literal(literal) => TermRef::Literal(literal.as_ref()) == term,
        TermPattern::Variable(_) => true,
    }
}

/// Checks whether `node` is an instance of `pattern`.
pub fn named_node_matches_pattern(pattern: &NamedNodePattern, node: NamedNodeRef<'_>) -> bool {
    match pattern {
        NamedNodePattern::NamedNode(expected) => expected.as_ref() == node,
        NamedNodePattern::Variable(_) => true,
    }
}

/// Checks whether `graph_name` is an instance of `pattern`.
///
/// An unbound graph position matches named graphs and the default graph alike.
pub fn graph_name_matches_pattern(pattern: &GraphNamePattern, graph_name: GraphNameRef<'_>) -> bool {
    match pattern {
        GraphNamePattern::NamedNode(expected) => {
            graph_name == GraphNameRef::NamedNode(expected.as_ref())
        }
        GraphNamePattern::DefaultGraph => graph_name == GraphNameRef::DefaultGraph,
        GraphNamePattern::Variable(_) => true,
    }
}
