use crate::error::SourceError;
use crate::{QueryOptions, ResultMetadata, SelectorShape, SourceOperation, SourceReference};
use async_trait::async_trait;
use futures::stream::BoxStream;
use rdf_chain_model::Quad;
use std::fmt;

/// A fallible stream of quads.
pub type QuadStream = BoxStream<'static, Result<Quad, SourceError>>;

/// The answer to a quad query: the result stream plus its metadata.
pub struct QuadResults {
    /// Metadata describing the stream, resolved before consumption.
    pub metadata: ResultMetadata,
    /// The matching quads. The order is unspecified and duplicates are
    /// permitted.
    pub quads: QuadStream,
}

/// A pull-based source of RDF quads.
///
/// This is the capability the reasoning layer consumes from the surrounding
/// query engine and exposes back to it. A full scan of a source is a
/// [SourceOperation::Pattern] query with the all-unbound pattern
/// ([any_quad_pattern](rdf_chain_model::any_quad_pattern)).
///
/// The `Display` implementation is the identity surface of a source: a stable
/// textual representation that upstream code uses in error messages and to
/// tell wrappers apart from plain sources.
#[async_trait]
pub trait QuadSource: fmt::Display + Send + Sync {
    /// The reference this source was created from, used for rule scoping.
    fn reference_value(&self) -> SourceReference;

    /// Declares the operation shapes [query_quads](Self::query_quads)
    /// accepts.
    fn selector_shape(&self) -> SelectorShape;

    /// Answers `operation` with a stream of quads.
    async fn query_quads(
        &self,
        operation: &SourceOperation,
        options: Option<&QueryOptions>,
    ) -> Result<QuadResults, SourceError>;

    /// Answers an [SourceOperation::Ask] operation.
    async fn query_boolean(&self, operation: &SourceOperation) -> Result<bool, SourceError>;

    /// Executes a result-less operation, e.g. an update.
    async fn query_void(&self, operation: &SourceOperation) -> Result<(), SourceError>;

    /// Whether this source already wraps another source with reasoning.
    ///
    /// Upstream code checks this before wrapping to avoid reasoning over
    /// already materialized inferences.
    fn is_reasoning_source(&self) -> bool {
        false
    }
}
