use crate::reasoning::ReasoningCore;
use async_trait::async_trait;
use rdf_chain_common::error::{AttachError, SourceError};
use rdf_chain_common::{
    MetadataAccumulate, QuadResults, QuadSource, QuadStream, QueryOptions, SelectorShape,
    SourceOperation, SourceReference,
};
use rdf_chain_rules::{generate_implicit_quads, select_rules, ScopedRules};
use rdf_chain_storage::ImplicitFactStore;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// A reasoning wrapper that accepts additional sources after construction.
///
/// Paginated and hypermedia interfaces reveal their member sources only
/// during traversal; this wrapper lets each discovered source be
/// [attached](Self::attach_source) while queries are already running. All
/// imports funnel into one shared implicit fact store, which is sealed only
/// after [close](Self::close) was requested *and* every in-flight import has
/// finished.
pub struct MultiSourceReasoningSource {
    core: ReasoningCore,
    tally: Arc<ImportTally>,
}

impl MultiSourceReasoningSource {
    /// Wraps `inner` like [ReasoningSource::new](crate::ReasoningSource::new),
    /// but keeps the implicit fact store open for attached sources.
    ///
    /// `close_signal` is the externally supplied close trigger: when it
    /// resolves (e.g. because an upstream aggregation store finished
    /// discovering sources), [close](Self::close) runs. The initial scan of
    /// `inner` is registered in the import tally like an attached source, so
    /// an early close cannot seal the store under it.
    ///
    /// Must be called within a Tokio runtime.
    pub fn new(
        inner: Arc<dyn QuadSource>,
        source_id: Option<String>,
        rules: &ScopedRules,
        accumulator: Arc<dyn MetadataAccumulate>,
        close_signal: impl Future<Output = ()> + Send + 'static,
    ) -> Self {
        let core = ReasoningCore::new(inner, source_id, rules, accumulator);
        let tally = Arc::new(ImportTally::default());

        tally.register();
        let import = core.clone();
        let import_tally = Arc::clone(&tally);
        tokio::spawn(async move {
            import.run_initial_import().await;
            import_tally.release();
        });

        let trigger_tally = Arc::clone(&tally);
        let trigger_store = core.store.clone();
        tokio::spawn(async move {
            close_signal.await;
            trigger_tally.request_close(&trigger_store);
        });

        Self { core, tally }
    }

    /// Feeds another source's quads through the rule machinery into the
    /// shared store.
    ///
    /// The rules for `reference` are resolved from `rules`; passing `None`
    /// fails with [AttachError::MissingRuleConfig]. Attaching after
    /// [close](Self::close) fails with [AttachError::SourceClosed]. In both
    /// cases the import tally is updated before the failure is detected and
    /// released before this returns, so concurrent closes always observe an
    /// accurate in-flight count and never wait for an import that will not
    /// happen.
    ///
    /// On success the import runs as a background task; its completion
    /// participates in the deferred-sealing handshake.
    pub fn attach_source(
        &self,
        quads: QuadStream,
        reference: SourceReference,
        rules: Option<&ScopedRules>,
    ) -> Result<(), AttachError> {
        let closed = self.tally.register();
        if closed {
            self.tally.release();
            return Err(AttachError::SourceClosed);
        }
        let Some(rules) = rules else {
            self.tally.release();
            return Err(AttachError::MissingRuleConfig);
        };

        let rule_graph = select_rules(rules, &reference);
        let implicit = generate_implicit_quads(rule_graph, quads);
        let store = self.core.store.clone();
        let tally = Arc::clone(&self.tally);
        tracing::debug!(%reference, "attaching source to reasoning wrapper");
        tokio::spawn(async move {
            match store.import(implicit).await {
                Ok(added) => tracing::debug!(%reference, added, "attached import finished"),
                Err(error) => tracing::warn!(%reference, %error, "attached import failed"),
            }
            tally.release();
        });
        Ok(())
    }

    /// Requests closing of the shared store.
    ///
    /// If no import is in flight the store is sealed immediately; otherwise
    /// sealing is deferred until the last import drains. Idempotent.
    pub fn close(&self) {
        self.tally.request_close(&self.core.store);
    }

    /// Whether closing has been requested.
    pub fn closed(&self) -> bool {
        self.tally.closed()
    }

    /// ID of the inner source, assigned by the surrounding engine.
    pub fn source_id(&self) -> Option<&str> {
        self.core.source_id.as_deref()
    }
}

#[async_trait]
impl QuadSource for MultiSourceReasoningSource {
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
        Err(crate::reasoning::unsupported_operation(operation, self))
    }

    fn is_reasoning_source(&self) -> bool {
        true
    }
}

impl fmt::Display for MultiSourceReasoningSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiSourceReasoningSource({})", self.core.inner)
    }
}

/// Tracks the in-flight imports of a [MultiSourceReasoningSource].
///
/// The counter, the close flag and the drained waiter live behind one mutex
/// so that the decrement and the zero check are atomic: a close requested
/// between an import's decrement and its zero check cannot miss the drained
/// signal.
#[derive(Default)]
struct ImportTally {
    state: Mutex<TallyState>,
}

#[derive(Default)]
struct TallyState {
    in_flight: usize,
    close_requested: bool,
    drained: Option<oneshot::Sender<()>>,
}

impl ImportTally {
    /// Counts a new import. Returns whether closing was already requested.
    fn register(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        state.in_flight += 1;
        state.close_requested
    }

    /// Counts an import as finished, firing the drained signal if it was the
    /// last one.
    fn release(&self) {
        let mut state = self.state.lock().unwrap();
        state.in_flight -= 1;
        if state.in_flight == 0 {
            if let Some(drained) = state.drained.take() {
                drained.send(()).ok();
            }
        }
    }

    /// Marks the tally as closed and seals `store`, immediately when no
    /// import is in flight, otherwise once the drained signal fires.
    fn request_close(&self, store: &ImplicitFactStore) {
        let mut state = self.state.lock().unwrap();
        if state.close_requested {
            return;
        }
        state.close_requested = true;

        if state.in_flight == 0 {
            drop(state);
            store.seal();
            return;
        }

        let (sender, receiver) = oneshot::channel();
        state.drained = Some(sender);
        drop(state);

        let store = store.clone();
        tokio::spawn(async move {
            if receiver.await.is_ok() {
                // The store may need another tick to finish the bookkeeping
                // of the final import.
                tokio::task::yield_now().await;
                store.seal();
            }
        });
    }

    fn closed(&self) -> bool {
        self.state.lock().unwrap().close_requested
    }
}
