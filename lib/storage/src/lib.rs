//! Storage layer of RDF Chain: the append-only store for derived facts.

mod fact_store;

pub use fact_store::*;
