use futures::{Stream, StreamExt};
use rdf_chain_common::error::{SourceError, StorageError};
use rdf_chain_common::{Cardinality, QuadStream, ResultMetadata};
use rdf_chain_model::{quad_matches_pattern, Quad, QuadPattern};
use rustc_hash::FxHashSet;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

/// An append-only quad store for derived facts.
///
/// The store has two lifecycle states. While *open* it accepts imports and
/// can be queried concurrently: pattern streams yield what has been stored so
/// far and stay pending for facts that are still arriving. Once *sealed* no
/// further writes are accepted and every pattern stream observes a final,
/// bounded result set.
///
/// Cloning is shallow; all clones share the same store. The store is owned by
/// exactly one reasoning source, which is the only component that writes to
/// it.
#[derive(Clone, Debug, Default)]
pub struct ImplicitFactStore {
    shared: Arc<Mutex<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    log: Vec<Quad>,
    dedup: FxHashSet<Quad>,
    sealed: bool,
    wakers: Vec<Waker>,
}

impl StoreState {
    fn wake_streams(&mut self) {
        for waker in self.wakers.drain(..) {
            waker.wake();
        }
    }
}

impl ImplicitFactStore {
    /// Creates a new, open and empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `quad` unless it is already present.
    ///
    /// Returns whether the quad was new. Fails once the store is sealed.
    pub fn append(&self, quad: Quad) -> Result<bool, StorageError> {
        let mut state = self.shared.lock().unwrap();
        if state.sealed {
            return Err(StorageError::SealedStoreWrite);
        }
        if !state.dedup.insert(quad.clone()) {
            return Ok(false);
        }
        state.log.push(quad);
        state.wake_streams();
        Ok(true)
    }

    /// Appends every quad of `quads` to the store.
    ///
    /// Returns the number of quads that were new. Pattern streams opened
    /// before or during the import observe the appended quads as they
    /// arrive; the import itself is independent of any query lifecycle.
    pub async fn import(&self, mut quads: QuadStream) -> Result<usize, SourceError> {
        let mut added = 0;
        while let Some(quad) = quads.next().await {
            if self.append(quad?)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Seals the store: no further writes are accepted and all pattern
    /// streams terminate after draining. Idempotent.
    pub fn seal(&self) {
        let mut state = self.shared.lock().unwrap();
        if state.sealed {
            return;
        }
        state.sealed = true;
        tracing::debug!(quads = state.log.len(), "implicit fact store sealed");
        state.wake_streams();
    }

    /// Whether the store has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.shared.lock().unwrap().sealed
    }

    /// The number of quads currently stored.
    pub fn len(&self) -> usize {
        self.shared.lock().unwrap().log.len()
    }

    /// Whether the store currently holds no quads.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a stream over the stored quads matching `pattern`.
    ///
    /// While the store is open the stream also yields matching quads that are
    /// appended after it was created; it terminates once the store is sealed
    /// and all matches have been drained.
    pub fn match_pattern(&self, pattern: &QuadPattern) -> FactStream {
        FactStream {
            shared: Arc::clone(&self.shared),
            pattern: pattern.clone(),
            cursor: 0,
        }
    }

    /// Whether at least one currently stored quad matches `pattern`.
    pub fn contains_match(&self, pattern: &QuadPattern) -> bool {
        let state = self.shared.lock().unwrap();
        state
            .log
            .iter()
            .any(|quad| quad_matches_pattern(quad.as_ref(), pattern))
    }

    /// Result metadata for a [match_pattern](Self::match_pattern) stream:
    /// an exact cardinality once the store is sealed, an estimate based on
    /// the current tally while facts are still arriving.
    pub fn pattern_metadata(&self, pattern: &QuadPattern) -> ResultMetadata {
        let state = self.shared.lock().unwrap();
        let count = state
            .log
            .iter()
            .filter(|quad| quad_matches_pattern(quad.as_ref(), pattern))
            .count();
        let cardinality = if state.sealed {
            Cardinality::exact(count)
        } else {
            Cardinality::estimate_of(count)
        };
        ResultMetadata::new(cardinality)
    }
}

/// A live stream over the quads of an [ImplicitFactStore] that match one
/// pattern.
///
/// Dropping the stream cancels the query without affecting the store or any
/// in-flight import.
pub struct FactStream {
    shared: Arc<Mutex<StoreState>>,
    pattern: QuadPattern,
    cursor: usize,
}

impl Stream for FactStream {
    type Item = Quad;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Quad>> {
        let this = self.get_mut();
        let mut state = this.shared.lock().unwrap();

        while this.cursor < state.log.len() {
            let quad = &state.log[this.cursor];
            this.cursor += 1;
            if quad_matches_pattern(quad.as_ref(), &this.pattern) {
                return Poll::Ready(Some(quad.clone()));
            }
        }

        if state.sealed {
            return Poll::Ready(None);
        }
        if !state.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
            state.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}
