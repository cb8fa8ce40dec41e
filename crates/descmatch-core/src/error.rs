/// Unified error type covering all failure modes across descmatch.
///
/// Every variant includes an actionable error message guiding the consumer
/// toward resolution. All variants are caller contract violations detected
/// up front: an index that constructs successfully cannot fail mid-scan, and
/// an empty index is a defined, sentinel-bearing case rather than an error.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The descriptor dimension was zero at index construction.
    #[error(
        "Descriptor dimension must be positive; got {dimensions}. Build the index with the descriptor width produced by your feature extractor."
    )]
    InvalidDimension {
        /// The rejected dimension.
        dimensions: usize,
    },

    /// The descriptor buffer does not hold a whole number of descriptors.
    #[error(
        "Descriptor buffer holds {buffer_len} values, which is not a whole number of {dimensions}-dimensional descriptors. Check the element count and any alignment padding."
    )]
    BufferSizeMismatch {
        /// Length of the supplied buffer in elements.
        buffer_len: usize,
        /// The declared descriptor dimension.
        dimensions: usize,
    },

    /// Query vector dimension does not match the index dimension.
    #[error(
        "Dimension mismatch: index has {expected}-dim descriptors, query has {found}-dim. Use descriptors from the same extractor configuration."
    )]
    DimensionMismatch {
        /// Dimension the index was built with.
        expected: usize,
        /// Dimension of the query vector.
        found: usize,
    },
}

/// Convenience alias used throughout the descmatch crate hierarchy.
pub type MatchResult<T> = Result<T, MatchError>;
