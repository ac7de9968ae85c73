use std::error::Error;

/// An error raised while answering a query against a quad source.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The source cannot answer this operation shape.
    #[error("attempted to pass unsupported operation '{operation}' to {source_name}")]
    UnsupportedOperation {
        /// Short name of the rejected operation.
        operation: &'static str,
        /// Identity of the rejecting source.
        source_name: String,
    },
    /// The source does not accept per-query options.
    #[error("query options are not supported by {0}")]
    UnsupportedOptions(String),
    /// Merging the metadata of two result streams failed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    /// The implicit fact store rejected an operation.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Error raised by the underlying source implementation.
    #[error("{0}")]
    Source(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl SourceError {
    /// Wraps an error of an underlying source implementation.
    #[inline]
    pub fn source(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self::Source(error.into())
    }
}

/// An error related to the implicit fact store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    /// A write arrived after the store was sealed.
    #[error("the implicit fact store is sealed")]
    SealedStoreWrite,
}

/// An error raised when the metadata of two result streams cannot be merged.
///
/// Queries must fail with this error instead of reporting a cardinality that
/// is known to be wrong.
#[derive(Debug, thiserror::Error)]
#[error("cannot merge result metadata: {0}")]
pub struct MetadataError(String);

impl MetadataError {
    /// Builds an error from a printable error message.
    #[inline]
    pub fn msg(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// An error raised when attaching a source to a multi-source reasoning
/// wrapper.
///
/// These errors are recoverable: the caller may drop the source or create a
/// fresh reasoning wrapper. The import tally has already been updated and
/// released when this error is returned.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AttachError {
    /// The reasoning source was already asked to close.
    #[error("the reasoning source is closed")]
    SourceClosed,
    /// No scoped rule configuration was supplied for the attachment.
    #[error("no scoped rule configuration is available")]
    MissingRuleConfig,
}
