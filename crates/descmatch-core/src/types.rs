use serde::{Deserialize, Serialize};

/// The best and second-best match for one query, as produced by a completed
/// exhaustive scan.
///
/// Distances are squared distances in the element type's natural units:
/// `i16` descriptors report quantized squared distances in `[0, 32258]`,
/// `f32` descriptors report unit-vector squared distances clamped to
/// `[0.0, 1.0]`.
///
/// After a scan over a non-empty index, `best_distance <= second_distance`
/// holds, and the two indices are distinct whenever the index holds at least
/// two descriptors. Over an empty index both indices are 0 and both distances
/// carry the element type's no-match sentinel (the maximal distance value).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestPair<D> {
    /// Index of the closest descriptor (0 when the index was empty).
    pub best_index: usize,
    /// Squared distance to the closest descriptor.
    pub best_distance: D,
    /// Index of the runner-up (0 when fewer than two candidates existed).
    pub second_index: usize,
    /// Squared distance to the runner-up (sentinel when no runner-up existed).
    pub second_distance: D,
}

impl<D: Copy + Into<f32>> NearestPair<D> {
    /// The squared-distance ratio `best / second` consumed by the downstream
    /// ratio test.
    ///
    /// A second-best distance of zero means the query matched two candidates
    /// exactly; the ratio is defined as 1.0 (fully ambiguous) in that case.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        let best: f32 = self.best_distance.into();
        let second: f32 = self.second_distance.into();
        if second <= 0.0 {
            return 1.0;
        }
        best / second
    }
}
