//! descmatch: exhaustive best/second-best descriptor matching for Rust.
//!
//! Builds an immutable index over a borrowed buffer of fixed-dimension
//! descriptor vectors and answers `find` queries with the best and
//! second-best candidate, so a downstream ratio test can reject ambiguous
//! feature correspondences. Deliberately brute-force: every query scans the
//! whole collection with SIMD-friendly sequential memory access, with a
//! scalar reference kernel that ranks identically.
//!
//! Two element types are supported:
//!
//! - `i16`: components quantized into `[-127, 127]`, reporting quantized
//!   squared distances in `[0, 32258]`.
//! - `f32`: components pre-normalized to unit L2 norm, reporting squared
//!   distances clamped to `[0.0, 1.0]`.
//!
//! # Example
//!
//! ```
//! use descmatch::prelude::*;
//!
//! let descriptors: Vec<i16> = vec![
//!     127, 0, 0, 0, 0, 0, 0, 0, // descriptor 0
//!     0, 127, 0, 0, 0, 0, 0, 0, // descriptor 1
//! ];
//! let index = DescriptorIndex::new(&descriptors, 8)?;
//! let pair = index.find(&[127, 0, 0, 0, 0, 0, 0, 0])?;
//! assert_eq!(pair.best_index, 0);
//! assert_eq!(pair.best_distance, 0);
//! # Ok::<(), MatchError>(())
//! ```

pub use descmatch_core as core;
pub use descmatch_search as search;

pub use descmatch_core::{KernelConfig, MatchError, MatchResult, NearestPair};
pub use descmatch_search::{DescriptorElement, DescriptorIndex, Kernel};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use descmatch_core::{KernelConfig, MatchError, MatchResult, NearestPair};
    pub use descmatch_search::{DescriptorElement, DescriptorIndex, Kernel};
}
