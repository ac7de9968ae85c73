use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(0);

/// Identifies a source that has no dereferenceable URL.
///
/// Handles compare by identity: two handles are equal only if one was copied
/// from the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceHandle(u64);

impl SourceHandle {
    /// Mints a handle distinct from every handle minted before.
    pub fn new() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SourceHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source:{}", self.0)
    }
}

/// The reference a source was created from.
///
/// References scope reasoning rules to sources: URL references participate in
/// URI template matching, handle references only in exact lookups.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceReference {
    /// The URL the source was discovered at.
    Url(String),
    /// An opaque handle for sources without a URL, e.g. in-memory stores.
    Handle(SourceHandle),
}

impl From<&str> for SourceReference {
    fn from(url: &str) -> Self {
        Self::Url(url.to_owned())
    }
}

impl From<String> for SourceReference {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<SourceHandle> for SourceReference {
    fn from(handle: SourceHandle) -> Self {
        Self::Handle(handle)
    }
}

impl fmt::Display for SourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Handle(handle) => handle.fmt(f),
        }
    }
}
