use crate::RelationKind;
use rdf_chain_model::{
    GraphName, GraphNameRef, NamedNode, NamedOrBlankNode, Quad, QuadRef, Subject, Term, TermRef,
    Triple,
};
use std::fmt;

/// A single premise → conclusion substitution.
///
/// Applying a rule to a quad replaces an occurrence of the premise by the
/// conclusion, producing at most one new quad per application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    premise: NamedOrBlankNode,
    relation: RelationKind,
    conclusion: Term,
}

impl Rule {
    /// Creates a new [Rule].
    pub fn new(
        premise: impl Into<NamedOrBlankNode>,
        relation: RelationKind,
        conclusion: impl Into<Term>,
    ) -> Self {
        Self {
            premise: premise.into(),
            relation,
            conclusion: conclusion.into(),
        }
    }

    /// The term this rule replaces.
    pub fn premise(&self) -> &NamedOrBlankNode {
        &self.premise
    }

    /// The relation kind this rule was parsed from.
    pub fn relation(&self) -> RelationKind {
        self.relation
    }

    /// The term this rule substitutes for the premise.
    pub fn conclusion(&self) -> &Term {
        &self.conclusion
    }

    /// Applies this rule to `quad`.
    ///
    /// Positions are tested in fixed priority order: subject, predicate,
    /// object, graph. The first position that holds the premise *and* can
    /// legally hold the conclusion wins; a position that cannot (a literal or
    /// blank node conclusion in a position restricted to IRIs) falls through
    /// to the next one. At most one substituted quad is produced; positions
    /// are never combined.
    pub fn forward_chaining(&self, quad: QuadRef<'_>) -> Option<Quad> {
        let premise = self.premise_term();

        if TermRef::from(quad.subject) == premise {
            if let Some(subject) = self.conclusion_as_subject() {
                return Some(Quad::new(
                    subject,
                    quad.predicate,
                    quad.object,
                    quad.graph_name,
                ));
            }
        }

        if TermRef::from(quad.predicate) == premise {
            if let Some(predicate) = self.conclusion_as_named_node() {
                return Some(Quad::new(
                    quad.subject,
                    predicate,
                    quad.object,
                    quad.graph_name,
                ));
            }
        }

        if quad.object == premise {
            return Some(Quad::new(
                quad.subject,
                quad.predicate,
                self.conclusion.clone(),
                quad.graph_name,
            ));
        }

        if self.graph_name_holds_premise(quad.graph_name) {
            if let Some(graph_name) = self.conclusion_as_graph_name() {
                return Some(Quad::new(
                    quad.subject,
                    quad.predicate,
                    quad.object,
                    graph_name,
                ));
            }
        }

        None
    }

    fn premise_term(&self) -> TermRef<'_> {
        match &self.premise {
            NamedOrBlankNode::NamedNode(node) => TermRef::NamedNode(node.as_ref()),
            NamedOrBlankNode::BlankNode(node) => TermRef::BlankNode(node.as_ref()),
        }
    }

    fn graph_name_holds_premise(&self, graph_name: GraphNameRef<'_>) -> bool {
        match graph_name {
            GraphNameRef::NamedNode(node) => TermRef::NamedNode(node) == self.premise_term(),
            GraphNameRef::BlankNode(node) => TermRef::BlankNode(node) == self.premise_term(),
            GraphNameRef::DefaultGraph => false,
        }
    }

    fn conclusion_as_subject(&self) -> Option<Subject> {
        match &self.conclusion {
            Term::NamedNode(node) => Some(node.clone().into()),
            Term::BlankNode(node) => Some(node.clone().into()),
            Term::Literal(_) => None,
        }
    }

    fn conclusion_as_named_node(&self) -> Option<NamedNode> {
        match &self.conclusion {
            Term::NamedNode(node) => Some(node.clone()),
            Term::BlankNode(_) | Term::Literal(_) => None,
        }
    }

    fn conclusion_as_graph_name(&self) -> Option<GraphName> {
        match &self.conclusion {
            Term::NamedNode(node) => Some(node.clone().into()),
            Term::BlankNode(node) => Some(node.clone().into()),
            Term::Literal(_) => None,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.premise, self.relation, self.conclusion
        )
    }
}

/// An ordered collection of [Rule]s scoped to one data source.
///
/// A rule graph is resolved once per source at attach time and immutable
/// afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleGraph {
    rules: Vec<Rule>,
}

impl RuleGraph {
    /// Creates a new [RuleGraph] from `rules`, keeping their order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The rules of this graph in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The number of rules in this graph.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether this graph contains no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn extend(&mut self, other: Self) {
        self.rules.extend(other.rules);
    }
}

/// Parses raw rule triples into a [RuleGraph].
///
/// A triple becomes a rule iff its predicate is a [RelationKind] IRI, its
/// subject is an IRI, and its object is an IRI or a literal. Non-conforming
/// triples are dropped silently: rule metadata is frequently imperfect and
/// reasoning stays best-effort.
pub fn parse_rules(triples: &[Triple]) -> RuleGraph {
    let mut rules = Vec::new();
    for triple in triples {
        let Subject::NamedNode(premise) = &triple.subject else {
            continue;
        };
        let Some(relation) = RelationKind::from_iri(triple.predicate.as_ref()) else {
            continue;
        };
        match &triple.object {
            Term::NamedNode(_) | Term::Literal(_) => {}
            Term::BlankNode(_) => {
                tracing::trace!(triple = %triple, "dropping rule triple with blank node object");
                continue;
            }
        }
        rules.push(Rule::new(
            premise.clone(),
            relation,
            triple.object.clone(),
        ));
    }
    RuleGraph::new(rules)
}
