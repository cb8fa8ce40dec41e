//! Per-element-type scoring and distance-transform strategies.
//!
//! The exhaustive scan and its top-2 bookkeeping are written once, generic
//! over [`DescriptorElement`]. Each element type supplies the pieces that
//! differ: the accumulator type, the SIMD lane width, the score floor used to
//! initialize the best-score slots, and the clamped score-to-distance
//! transform.

use descmatch_core::KernelConfig;

use crate::simd;

/// Largest inner product a pair of well-formed quantized descriptors can
/// produce per the `[-127, 127]` component bound: `127 * 127`.
pub const MAX_QUANTIZED_INNER_PRODUCT: i32 = 16129;

/// Largest quantized squared distance: `2 * 127^2`.
pub const MAX_QUANTIZED_DISTANCE: i16 = 32258;

mod sealed {
    pub trait Sealed {}
    impl Sealed for i16 {}
    impl Sealed for f32 {}
}

/// Element-type strategy for descriptor search.
///
/// Implemented for `i16` (components quantized into `[-127, 127]`, widened to
/// 16 bits to keep multiply-accumulate overflow-free) and `f32` (components
/// pre-normalized to unit L2 norm). Sealed: the score accumulation, clamp
/// bounds, and distance transforms are coupled invariants, not extension
/// points.
pub trait DescriptorElement: sealed::Sealed + Copy + PartialEq + Send + Sync + 'static {
    /// Accumulator type for inner products.
    type Score: Copy + PartialOrd + Send + Sync;

    /// Elements processed per SIMD step under 128-bit registers.
    const LANE_WIDTH: usize;

    /// Initial value of both best-score slots. Below every reachable score,
    /// so the first candidate always displaces it; transforming it yields
    /// [`Self::NO_MATCH_DISTANCE`].
    const SCORE_FLOOR: Self::Score;

    /// Maximal distance in this type's natural units, reported for slots no
    /// candidate ever filled.
    const NO_MATCH_DISTANCE: Self;

    /// Scalar reference inner product. Correct for any dimension.
    fn dot_scalar(a: &[Self], b: &[Self]) -> Self::Score;

    /// SIMD inner product. Requires the dimension to be divisible by
    /// [`Self::LANE_WIDTH`]; ranks identically to [`Self::dot_scalar`].
    fn dot_simd(a: &[Self], b: &[Self]) -> Self::Score;

    /// Whether `config` enables the SIMD kernel for this element family.
    fn accel_enabled(config: &KernelConfig) -> bool;

    /// Convert a final best score into the reported squared distance,
    /// clamping as specified for the type.
    fn score_to_distance(score: Self::Score) -> Self;
}

impl DescriptorElement for i16 {
    type Score = i32;

    const LANE_WIDTH: usize = 8;
    const SCORE_FLOOR: i32 = i32::MIN;
    const NO_MATCH_DISTANCE: i16 = MAX_QUANTIZED_DISTANCE;

    fn dot_scalar(a: &[i16], b: &[i16]) -> i32 {
        simd::dot_i16_scalar(a, b)
    }

    fn dot_simd(a: &[i16], b: &[i16]) -> i32 {
        simd::dot_i16_simd(a, b)
    }

    fn accel_enabled(config: &KernelConfig) -> bool {
        config.accel_i16
    }

    /// `distance = 2 * 127^2 - 2 * ip`, with the inner product clamped into
    /// `[0, 16129]` *before* the formula. Components outside `[-127, 127]`
    /// can push the accumulated inner product outside the valid range;
    /// clamping the input keeps the distance in `[0, 32258]`. Clamping the
    /// output instead would accept the out-of-range product and land on a
    /// different boundary value.
    #[allow(clippy::cast_possible_truncation)]
    fn score_to_distance(score: i32) -> i16 {
        let inner_product = score.clamp(0, MAX_QUANTIZED_INNER_PRODUCT);
        (i32::from(MAX_QUANTIZED_DISTANCE) - 2 * inner_product) as i16
    }
}

impl DescriptorElement for f32 {
    type Score = f32;

    const LANE_WIDTH: usize = 4;
    const SCORE_FLOOR: f32 = f32::MIN;
    const NO_MATCH_DISTANCE: f32 = 1.0;

    fn dot_scalar(a: &[f32], b: &[f32]) -> f32 {
        simd::dot_f32_scalar(a, b)
    }

    fn dot_simd(a: &[f32], b: &[f32]) -> f32 {
        simd::dot_f32_simd(a, b)
    }

    fn accel_enabled(config: &KernelConfig) -> bool {
        config.accel_f32
    }

    /// `distance = 2 - 2 * cos`, clamped into `[0.0, 1.0]` *after* the
    /// formula. There is no overflow concern on this path, so clamping the
    /// result is sufficient. Orthogonal unit vectors (cosine 0) produce a
    /// raw 2.0 which this clamp deliberately caps at 1.0.
    fn score_to_distance(score: f32) -> f32 {
        (2.0 - 2.0 * score).clamp(0.0, 1.0)
    }
}
