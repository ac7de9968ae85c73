//! Reasoning wrappers around pull-based quad sources.
//!
//! [ReasoningSource] wraps a single inner source: it scans the source once,
//! materializes every fact its rule graph entails into an
//! [ImplicitFactStore](rdf_chain_storage::ImplicitFactStore), and answers
//! pattern queries with the union of explicit and derived results.
//! [MultiSourceReasoningSource] extends this to sources discovered
//! incrementally, coordinating the store lifecycle across all in-flight
//! imports. [MemoryQuadSource] exposes plain quad collections as sources.

mod memory;
mod multi;
mod reasoning;

pub use memory::*;
pub use multi::*;
pub use reasoning::*;
