//! Error types for the hotspot index.

/// Result type defaulting to [`HotspotError`].
pub type Result<T, E = HotspotError> = std::result::Result<T, E>;

/// Errors raised by the index operations.
///
/// Arguments are checked before the index is touched, so an error never leaves
/// a partially indexed password behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotspotError {
    /// A caller supplied an absent string or an unusable n-gram range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl HotspotError {
    pub(crate) fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
