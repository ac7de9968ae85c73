use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use rdf_chain_common::error::SourceError;
use rdf_chain_common::{
    MetadataAccumulate, QuadResults, QuadSource, QueryOptions, SelectorShape, SourceOperation,
    SourceReference,
};
use rdf_chain_model::any_quad_pattern;
use rdf_chain_rules::{generate_implicit_quads, select_rules, RuleGraph, ScopedRules};
use rdf_chain_storage::ImplicitFactStore;
use std::fmt;
use std::sync::Arc;

/// Shared state and query logic of the reasoning wrappers.
#[derive(Clone)]
pub(crate) struct ReasoningCore {
    pub(crate) inner: Arc<dyn QuadSource>,
    pub(crate) source_id: Option<String>,
    pub(crate) rule_graph: RuleGraph,
    pub(crate) store: ImplicitFactStore,
    pub(crate) accumulator: Arc<dyn MetadataAccumulate>,
}

impl ReasoningCore {
    pub(crate) fn new(
        inner: Arc<dyn QuadSource>,
        source_id: Option<String>,
        rules: &ScopedRules,
        accumulator: Arc<dyn MetadataAccumulate>,
    ) -> Self {
        let rule_graph = select_rules(rules, &inner.reference_value());
        Self {
            inner,
            source_id,
            rule_graph,
            store: ImplicitFactStore::new(),
            accumulator,
        }
    }

    /// Scans the inner source and imports everything the rule graph entails
    /// into the store. Returns once the import is finished.
    pub(crate) async fn run_initial_import(&self) {
        let scan = SourceOperation::Pattern(any_quad_pattern());
        match self.inner.query_quads(&scan, None).await {
            Ok(results) => {
                let implicit = generate_implicit_quads(self.rule_graph.clone(), results.quads);
                match self.store.import(implicit).await {
                    Ok(added) => {
                        tracing::debug!(source = %self.inner, added, "initial import finished");
                    }
                    Err(error) => {
                        tracing::warn!(source = %self.inner, %error, "initial import failed");
                    }
                }
            }
            Err(error) => {
                tracing::warn!(source = %self.inner, %error, "scanning the inner source failed");
            }
        }
    }

    pub(crate) async fn query_quads(
        &self,
        operation: &SourceOperation,
        options: Option<&QueryOptions>,
        identity: &(dyn fmt::Display + Sync),
    ) -> Result<QuadResults, SourceError> {
        if options.is_some() {
            return Err(SourceError::UnsupportedOptions(identity.to_string()));
        }
        let SourceOperation::Pattern(pattern) = operation else {
            return Err(unsupported_operation(operation, identity));
        };

        let explicit = self.inner.query_quads(operation, None).await?;
        let implicit_metadata = self.store.pattern_metadata(pattern);

        let initial = self.accumulator.initialize();
        let metadata = self.accumulator.accumulate(&initial, &explicit.metadata)?;
        let metadata = self.accumulator.accumulate(&metadata, &implicit_metadata)?;

        let implicit = self.store.match_pattern(pattern).map(Ok);
        let quads = stream::select(explicit.quads, implicit).boxed();
        Ok(QuadResults { metadata, quads })
    }

    pub(crate) async fn query_boolean(
        &self,
        operation: &SourceOperation,
        identity: &(dyn fmt::Display + Sync),
    ) -> Result<bool, SourceError> {
        let SourceOperation::Ask(pattern) = operation else {
            return Err(unsupported_operation(operation, identity));
        };
        if self.inner.query_boolean(operation).await? {
            return Ok(true);
        }
        Ok(self.store.contains_match(pattern))
    }

}

/// The error every unsupported operation shape is rejected with.
pub(crate) fn unsupported_operation(
    operation: &SourceOperation,
    identity: &(dyn fmt::Display + Sync),
) -> SourceError {
    SourceError::UnsupportedOperation {
        operation: operation.kind(),
        source_name: identity.to_string(),
    }
}

/// A reasoning wrapper around a single quad source.
///
/// Construction resolves the effective rule graph for the inner source's
/// reference and starts a background import: the inner source is scanned
/// once, every scanned quad is expanded through the rule graph, and the
/// derivations are accumulated in an implicit fact store that is sealed when
/// the scan completes.
///
/// Pattern queries answer with the union of the inner source's results and
/// the store's results; the merged metadata is produced by the injected
/// [MetadataAccumulate] capability. Updates are rejected.
pub struct ReasoningSource {
    core: ReasoningCore,
}

impl ReasoningSource {
    /// Wraps `inner`, deriving facts with the rules that
    /// [select_rules] resolves for its reference from `rules`.
    ///
    /// Must be called within a Tokio runtime: the initial scan runs as a
    /// spawned task.
    pub fn new(
        inner: Arc<dyn QuadSource>,
        source_id: Option<String>,
        rules: &ScopedRules,
        accumulator: Arc<dyn MetadataAccumulate>,
    ) -> Self {
        let core = ReasoningCore::new(inner, source_id, rules, accumulator);
        let import = core.clone();
        tokio::spawn(async move {
            import.run_initial_import().await;
            import.store.seal();
        });
        Self { core }
    }

    /// ID of the inner source, assigned by the surrounding engine.
    pub fn source_id(&self) -> Option<&str> {
        self.core.source_id.as_deref()
    }

    /// The rule graph resolved for the inner source at construction.
    pub fn rule_graph(&self) -> &RuleGraph {
        &self.core.rule_graph
    }
}

#[async_trait]
impl QuadSource for ReasoningSource {
    fn reference_value(&self) -> SourceReference {
        self.core.inner.reference_value()
    }

    fn selector_shape(&self) -> SelectorShape {
        SelectorShape::QuadPattern
    }

    async fn query_quads(
        &self,
        operation: &SourceOperation,
        options: Option<&QueryOptions>,
    ) -> Result<QuadResults, SourceError> {
        self.core.query_quads(operation, options, self).await
    }

    async fn query_boolean(&self, operation: &SourceOperation) -> Result<bool, SourceError> {
        self.core.query_boolean(operation, self).await
    }

    async fn query_void(&self, operation: &SourceOperation) -> Result<(), SourceError> {
        Err(unsupported_operation(operation, self))
    }

    fn is_reasoning_source(&self) -> bool {
        true
    }
}

impl fmt::Display for ReasoningSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReasoningSource({})", self.core.inner)
    }
}
