//! Immutable descriptor index with exhaustive best/second-best search.

use descmatch_core::tracing_config::TARGET_PREFIX;
use descmatch_core::{KernelConfig, MatchError, MatchResult, NearestPair};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::element::DescriptorElement;

/// The dot-product implementation an index selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    /// Per-dimension multiply-accumulate loop; correct for any dimension.
    Scalar,
    /// 128-bit lane multiply-accumulate with horizontal reduction.
    Simd,
}

impl std::fmt::Display for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Simd => write!(f, "simd"),
        }
    }
}

/// An immutable view over N fixed-dimension descriptors, searchable for the
/// best and second-best match to a query.
///
/// The index borrows the caller's contiguous buffer of `N * dimensions`
/// values and never copies or mutates it. Construction validates the buffer
/// shape and selects the dot-product kernel once; every subsequent
/// [`find`](Self::find) is a pure read-only scan, so one index can serve any
/// number of threads without coordination.
///
/// # Examples
///
/// ```
/// use descmatch_search::DescriptorIndex;
///
/// let descriptors: Vec<f32> = vec![
///     1.0, 0.0, 0.0, 0.0, // descriptor 0
///     0.0, 1.0, 0.0, 0.0, // descriptor 1
/// ];
/// let index = DescriptorIndex::new(&descriptors, 4)?;
/// let pair = index.find(&[1.0, 0.0, 0.0, 0.0])?;
/// assert_eq!(pair.best_index, 0);
/// # Ok::<(), descmatch_core::MatchError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DescriptorIndex<'a, E: DescriptorElement> {
    elements: &'a [E],
    dimensions: usize,
    num_descriptors: usize,
    kernel: Kernel,
}

impl<'a, E: DescriptorElement> DescriptorIndex<'a, E> {
    /// Build an index over `elements` with [`KernelConfig::default()`]
    /// (acceleration attempted for both element families).
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidDimension`] when `dimensions` is zero and
    /// [`MatchError::BufferSizeMismatch`] when `elements.len()` is not a
    /// whole multiple of `dimensions`.
    pub fn new(elements: &'a [E], dimensions: usize) -> MatchResult<Self> {
        Self::with_config(elements, dimensions, KernelConfig::default())
    }

    /// Build an index with an explicit kernel configuration.
    ///
    /// The kernel is selected here, once: the SIMD kernel when the config
    /// enables acceleration for `E` and `dimensions` is divisible by
    /// [`E::LANE_WIDTH`](DescriptorElement::LANE_WIDTH), the scalar kernel
    /// otherwise. Falling back is silent and never an error; the selection
    /// is observable via [`kernel`](Self::kernel).
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidDimension`] when `dimensions` is zero and
    /// [`MatchError::BufferSizeMismatch`] when `elements.len()` is not a
    /// whole multiple of `dimensions`.
    pub fn with_config(
        elements: &'a [E],
        dimensions: usize,
        config: KernelConfig,
    ) -> MatchResult<Self> {
        if dimensions == 0 {
            return Err(MatchError::InvalidDimension { dimensions });
        }
        if elements.len() % dimensions != 0 {
            return Err(MatchError::BufferSizeMismatch {
                buffer_len: elements.len(),
                dimensions,
            });
        }
        let num_descriptors = elements.len() / dimensions;

        let kernel = if E::accel_enabled(&config) && dimensions % E::LANE_WIDTH == 0 {
            Kernel::Simd
        } else {
            Kernel::Scalar
        };
        debug!(
            target: TARGET_PREFIX,
            num_descriptors,
            dimensions,
            kernel = %kernel,
            lane_width = E::LANE_WIDTH,
            "descriptor index built"
        );

        Ok(Self {
            elements,
            dimensions,
            num_descriptors,
            kernel,
        })
    }

    /// Number of descriptors in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.num_descriptors
    }

    /// Whether the index holds no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_descriptors == 0
    }

    /// The descriptor dimension this index was built with.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The dot-product kernel selected at construction.
    #[must_use]
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Scan every descriptor and return the best and second-best match.
    ///
    /// Candidates are ranked by inner product; a later candidate displaces a
    /// held slot only when its score is *strictly* greater, so among exact
    /// ties the lowest index wins. The two best scores are then converted to
    /// squared distances by the element type's clamped transform.
    ///
    /// Over an empty index both indices are 0 and both distances are
    /// [`E::NO_MATCH_DISTANCE`](DescriptorElement::NO_MATCH_DISTANCE); with a
    /// single descriptor the runner-up slot keeps those defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::DimensionMismatch`] when the query length
    /// differs from the index dimension.
    pub fn find(&self, query: &[E]) -> MatchResult<NearestPair<E>> {
        if query.len() != self.dimensions {
            return Err(MatchError::DimensionMismatch {
                expected: self.dimensions,
                found: query.len(),
            });
        }

        let dot = match self.kernel {
            Kernel::Scalar => E::dot_scalar,
            Kernel::Simd => E::dot_simd,
        };

        let mut best_index = 0_usize;
        let mut second_index = 0_usize;
        let mut best_score = E::SCORE_FLOOR;
        let mut second_score = E::SCORE_FLOOR;

        for (candidate_index, candidate) in self.elements.chunks_exact(self.dimensions).enumerate()
        {
            let score = dot(query, candidate);
            if score > second_score {
                if score > best_score {
                    second_index = best_index;
                    second_score = best_score;
                    best_index = candidate_index;
                    best_score = score;
                } else {
                    second_index = candidate_index;
                    second_score = score;
                }
            }
        }

        Ok(NearestPair {
            best_index,
            best_distance: E::score_to_distance(best_score),
            second_index,
            second_distance: E::score_to_distance(second_score),
        })
    }

    /// Run many independent queries across a Rayon pool.
    ///
    /// Results come back in query order. Queries against one index share no
    /// mutable state, so this is a plain parallel map; the first dimension
    /// mismatch among the queries fails the whole batch.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::DimensionMismatch`] when any query length
    /// differs from the index dimension.
    pub fn find_batch<Q>(&self, queries: &[Q]) -> MatchResult<Vec<NearestPair<E>>>
    where
        Q: AsRef<[E]> + Sync,
    {
        let span = tracing::debug_span!(
            target: TARGET_PREFIX,
            "descmatch::find_batch",
            query_count = queries.len(),
            kernel = %self.kernel,
        );
        let _guard = span.enter();

        queries
            .par_iter()
            .map(|query| self.find(query.as_ref()))
            .collect()
    }
}
