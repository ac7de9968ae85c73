//! Data model of RDF Chain.
//!
//! This crate re-exports the parts of oxigraph's data model that the reasoning
//! layer is built on and adds the vocabulary and pattern helpers shared by the
//! other crates.

mod pattern;
pub mod vocab;

pub use pattern::*;

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::{
    BlankNode, BlankNodeRef, GraphName, GraphNameRef, IriParseError, Literal, LiteralRef,
    NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad, QuadRef, Subject,
    SubjectRef, Term, TermParseError, TermRef, Triple, TripleRef, Variable,
    VariableNameParseError, VariableRef,
};

// Re-export the pattern types of spargebra.
pub use spargebra::term::{
    GraphNamePattern, NamedNodePattern, QuadPattern, TermPattern, TriplePattern,
};
