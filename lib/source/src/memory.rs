use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use rdf_chain_common::error::SourceError;
use rdf_chain_common::{
    Cardinality, QuadResults, QuadSource, QueryOptions, ResultMetadata, SelectorShape,
    SourceHandle, SourceOperation, SourceReference,
};
use rdf_chain_model::{quad_matches_pattern, Quad};
use std::fmt;

/// Exposes an in-memory quad collection as a [QuadSource].
///
/// Pattern queries answer with exact cardinalities; all other operation
/// shapes are rejected. The quads are fixed at construction.
pub struct MemoryQuadSource {
    quads: Vec<Quad>,
    reference: SourceReference,
}

impl MemoryQuadSource {
    /// Creates a source over `quads`, referenced by a freshly minted handle.
    pub fn new(quads: Vec<Quad>) -> Self {
        Self {
            quads,
            reference: SourceReference::Handle(SourceHandle::new()),
        }
    }

    /// Creates a source over `quads` that pretends to live at `url`.
    pub fn with_url(quads: Vec<Quad>, url: impl Into<String>) -> Self {
        Self {
            quads,
            reference: SourceReference::Url(url.into()),
        }
    }
}

#[async_trait]
impl QuadSource for MemoryQuadSource {
    fn reference_value(&self) -> SourceReference {
        self.reference.clone()
    }

    fn selector_shape(&self) -> SelectorShape {
        SelectorShape::QuadPattern
    }

    async fn query_quads(
        &self,
        operation: &SourceOperation,
        _options: Option<&QueryOptions>,
    ) -> Result<QuadResults, SourceError> {
        let SourceOperation::Pattern(pattern) = operation else {
            return Err(SourceError::UnsupportedOperation {
                operation: operation.kind(),
                source_name: self.to_string(),
            });
        };

        let matches: Vec<Quad> = self
            .quads
            .iter()
            .filter(|quad| quad_matches_pattern(quad.as_ref(), pattern))
            .cloned()
            .collect();
        let metadata = ResultMetadata::new(Cardinality::exact(matches.len()));
        Ok(QuadResults {
            metadata,
            quads: stream::iter(matches.into_iter().map(Ok)).boxed(),
        })
    }

    async fn query_boolean(&self, operation: &SourceOperation) -> Result<bool, SourceError> {
        let SourceOperation::Ask(pattern) = operation else {
            return Err(SourceError::UnsupportedOperation {
                operation: operation.kind(),
                source_name: self.to_string(),
            });
        };
        Ok(self
            .quads
            .iter()
            .any(|quad| quad_matches_pattern(quad.as_ref(), pattern)))
    }

    async fn query_void(&self, operation: &SourceOperation) -> Result<(), SourceError> {
        Err(SourceError::UnsupportedOperation {
            operation: operation.kind(),
            source_name: self.to_string(),
        })
    }
}

impl fmt::Display for MemoryQuadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryQuadSource({})", self.reference)
    }
}
