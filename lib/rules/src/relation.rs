use rdf_chain_model::vocab::{owl, rdfs, skos};
use rdf_chain_model::NamedNodeRef;
use std::fmt;

/// The closed set of relation predicates that activate forward chaining.
///
/// All kinds share the same substitution semantics; they differ only in which
/// predicate IRI selects them while parsing rule triples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// `owl:sameAs`
    SameAs,
    /// `owl:equivalentClass`
    EquivalentClass,
    /// `owl:equivalentProperty`
    EquivalentProperty,
    /// `rdfs:subClassOf`
    SubClassOf,
    /// `rdfs:subPropertyOf`
    SubPropertyOf,
    /// `skos:relatedMatch`
    RelatedMatch,
    /// `skos:closeMatch`
    CloseMatch,
    /// `skos:exactMatch`
    ExactMatch,
    /// `skos:narrowMatch`
    NarrowMatch,
    /// `skos:broadMatch`
    BroadMatch,
}

impl RelationKind {
    /// All relation kinds in a stable order.
    pub const ALL: [Self; 10] = [
        Self::SameAs,
        Self::EquivalentClass,
        Self::EquivalentProperty,
        Self::SubClassOf,
        Self::SubPropertyOf,
        Self::RelatedMatch,
        Self::CloseMatch,
        Self::ExactMatch,
        Self::NarrowMatch,
        Self::BroadMatch,
    ];

    /// The IRI that selects this relation kind during rule parsing.
    pub fn iri(self) -> NamedNodeRef<'static> {
        match self {
            Self::SameAs => owl::SAME_AS,
            Self::EquivalentClass => owl::EQUIVALENT_CLASS,
            Self::EquivalentProperty => owl::EQUIVALENT_PROPERTY,
            Self::SubClassOf => rdfs::SUB_CLASS_OF,
            Self::SubPropertyOf => rdfs::SUB_PROPERTY_OF,
            Self::RelatedMatch => skos::RELATED_MATCH,
            Self::CloseMatch => skos::CLOSE_MATCH,
            Self::ExactMatch => skos::EXACT_MATCH,
            Self::NarrowMatch => skos::NARROW_MATCH,
            Self::BroadMatch => skos::BROAD_MATCH,
        }
    }

    /// Looks up the relation kind bound to `iri`, if any.
    pub fn from_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.iri() == iri)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iri().as_str())
    }
}
