//! RDF Chain is a streaming forward-chaining reasoning layer for pull-based
//! RDF quad sources.
//!
//! Wrapping a source in a [ReasoningSource](source::ReasoningSource)
//! materializes every fact its scoped equivalence/hierarchy rules entail
//! into an append-only
//! [ImplicitFactStore](storage::ImplicitFactStore) and answers quad pattern
//! queries with the union of explicit and derived results, including merged
//! cardinality metadata. Sources discovered during traversal can be folded
//! into a running wrapper through
//! [MultiSourceReasoningSource](source::MultiSourceReasoningSource).

pub mod api {
    //! The capability contracts the reasoning layer consumes and exposes.
    pub use rdf_chain_common::*;
}

pub mod model {
    //! The RDF data model, vocabulary, and pattern helpers.
    pub use rdf_chain_model::*;
}

pub mod rules {
    //! Rule parsing, scoping, and the forward-chaining reasoner.
    pub use rdf_chain_rules::*;
}

pub mod storage {
    //! The append-only store for derived facts.
    pub use rdf_chain_storage::*;
}

pub mod source {
    //! The reasoning wrappers around quad sources.
    pub use rdf_chain_source::*;
}
