use crate::error::MetadataError;
use std::time::Duration;

/// States whether a [Cardinality] is an exact count or an estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardinalityKind {
    /// The value is the exact number of results.
    Exact,
    /// The value is an estimate, possibly infinite.
    Estimate,
}

/// The number of results a stream is expected to produce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cardinality {
    /// Whether the value is exact or estimated.
    pub kind: CardinalityKind,
    /// The (estimated) number of results.
    pub value: f64,
}

impl Cardinality {
    /// An exact count of `value` results.
    pub fn exact(value: usize) -> Self {
        Self {
            kind: CardinalityKind::Exact,
            value: approximate(value),
        }
    }

    /// An estimate of `value` results.
    pub fn estimate(value: f64) -> Self {
        Self {
            kind: CardinalityKind::Estimate,
            value,
        }
    }

    /// An estimate based on a concrete tally that may still grow.
    pub fn estimate_of(value: usize) -> Self {
        Self::estimate(approximate(value))
    }

    /// An unbounded estimate.
    pub fn infinite() -> Self {
        Self::estimate(f64::INFINITY)
    }

    /// Whether this cardinality is an exact, finite count.
    pub fn is_exact(&self) -> bool {
        self.kind == CardinalityKind::Exact && self.value.is_finite()
    }
}

#[allow(clippy::cast_precision_loss)]
fn approximate(value: usize) -> f64 {
    value as f64
}

/// Metadata attached to a result stream before it is consumed.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultMetadata {
    /// The expected number of results.
    pub cardinality: Cardinality,
    /// Accumulated time spent requesting the underlying documents.
    pub request_time: Option<Duration>,
    /// Page size of the underlying paginated interface.
    pub page_size: Option<u64>,
}

impl ResultMetadata {
    /// Creates a new [ResultMetadata] with the given `cardinality` and no
    /// optional fields.
    pub fn new(cardinality: Cardinality) -> Self {
        Self {
            cardinality,
            request_time: None,
            page_size: None,
        }
    }
}

/// Capability for merging the metadata of multiple result streams into one
/// record.
///
/// Implementations are injected into reasoning sources so the surrounding
/// engine can keep a single metadata policy across all of its operators.
pub trait MetadataAccumulate: Send + Sync {
    /// Returns the metadata that represents "no results yet".
    fn initialize(&self) -> ResultMetadata;

    /// Merges `appending` into `accumulated`.
    fn accumulate(
        &self,
        accumulated: &ResultMetadata,
        appending: &ResultMetadata,
    ) -> Result<ResultMetadata, MetadataError>;
}

/// The default [MetadataAccumulate] implementation.
///
/// Cardinalities are summed; the result stays exact only if both sides are
/// exact and finite. `request_time` and `page_size` are summed when present
/// on either side, treating an absent value as zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct CardinalityAccumulator;

impl MetadataAccumulate for CardinalityAccumulator {
    fn initialize(&self) -> ResultMetadata {
        ResultMetadata::new(Cardinality::exact(0))
    }

    fn accumulate(
        &self,
        accumulated: &ResultMetadata,
        appending: &ResultMetadata,
    ) -> Result<ResultMetadata, MetadataError> {
        let kind = if accumulated.cardinality.is_exact() && appending.cardinality.is_exact() {
            CardinalityKind::Exact
        } else {
            CardinalityKind::Estimate
        };
        let cardinality = Cardinality {
            kind,
            value: accumulated.cardinality.value + appending.cardinality.value,
        };
        Ok(ResultMetadata {
            cardinality,
            request_time: merge_option(accumulated.request_time, appending.request_time, |a, b| {
                a + b
            }),
            page_size: merge_option(accumulated.page_size, appending.page_size, |a, b| a + b),
        })
    }
}

fn merge_option<T: Default>(
    accumulated: Option<T>,
    appending: Option<T>,
    merge: impl FnOnce(T, T) -> T,
) -> Option<T> {
    match (accumulated, appending) {
        (None, None) => None,
        (accumulated, appending) => Some(merge(
            accumulated.unwrap_or_default(),
            appending.unwrap_or_default(),
        )),
    }
}
