//! Portable SIMD dot-product kernels for descriptor search.
//!
//! Each element type gets a scalar reference kernel and a `wide`-based
//! accelerated kernel over 128-bit lanes (8 `i16` lanes, 4 `f32` lanes).
//! The `i16` kernels accumulate in `i32` on both paths, so their results are
//! bit-identical; the `f32` kernels may differ by reassociation rounding.

use wide::{f32x4, i32x4};

/// Scalar inner product of two quantized descriptors.
///
/// Accumulates in `i32`; component products are bounded by `127^2` so the
/// sum cannot wrap for any realistic descriptor dimension.
///
/// # Panics
///
/// Panics in debug mode if the slices have different lengths.
#[must_use]
pub fn dot_i16_scalar(a: &[i16], b: &[i16]) -> i32 {
    debug_assert_eq!(a.len(), b.len(), "descriptors must have same dimension");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| i32::from(*x) * i32::from(*y))
        .sum()
}

/// SIMD inner product of two quantized descriptors.
///
/// Loads 8 `i16` lanes at a time and widens each lane to `i32` before the
/// multiply; the lane accumulators therefore hold exactly the partial sums
/// the scalar kernel would, and integer addition is associative, so the
/// result is bit-identical to [`dot_i16_scalar`]. Trailing elements past the
/// last full 8-lane chunk are folded in scalar.
///
/// # Panics
///
/// Panics in debug mode if the slices have different lengths.
#[must_use]
pub fn dot_i16_simd(a: &[i16], b: &[i16]) -> i32 {
    debug_assert_eq!(a.len(), b.len(), "descriptors must have same dimension");

    let mut acc_lo = i32x4::splat(0);
    let mut acc_hi = i32x4::splat(0);
    let mut a_chunks = a.chunks_exact(8);
    let mut b_chunks = b.chunks_exact(8);

    for (a_chunk, b_chunk) in a_chunks.by_ref().zip(b_chunks.by_ref()) {
        let a_lo = i32x4::from([
            i32::from(a_chunk[0]),
            i32::from(a_chunk[1]),
            i32::from(a_chunk[2]),
            i32::from(a_chunk[3]),
        ]);
        let a_hi = i32x4::from([
            i32::from(a_chunk[4]),
            i32::from(a_chunk[5]),
            i32::from(a_chunk[6]),
            i32::from(a_chunk[7]),
        ]);
        let b_lo = i32x4::from([
            i32::from(b_chunk[0]),
            i32::from(b_chunk[1]),
            i32::from(b_chunk[2]),
            i32::from(b_chunk[3]),
        ]);
        let b_hi = i32x4::from([
            i32::from(b_chunk[4]),
            i32::from(b_chunk[5]),
            i32::from(b_chunk[6]),
            i32::from(b_chunk[7]),
        ]);
        acc_lo += a_lo * b_lo;
        acc_hi += a_hi * b_hi;
    }

    let lanes = (acc_lo + acc_hi).to_array();
    let mut result = lanes[0] + lanes[1] + lanes[2] + lanes[3];
    for (x, y) in a_chunks.remainder().iter().zip(b_chunks.remainder()) {
        result += i32::from(*x) * i32::from(*y);
    }
    result
}

/// Scalar inner product of two `f32` descriptors.
///
/// # Panics
///
/// Panics in debug mode if the slices have different lengths.
#[must_use]
pub fn dot_f32_scalar(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "descriptors must have same dimension");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// SIMD inner product of two `f32` descriptors.
///
/// Processes 4 lanes per step with a horizontal reduction at the end, so the
/// summation order differs from [`dot_f32_scalar`]; results agree within
/// floating-point reassociation rounding, not bit-for-bit. Trailing elements
/// past the last full 4-lane chunk are folded in scalar.
///
/// # Panics
///
/// Panics in debug mode if the slices have different lengths.
#[must_use]
pub fn dot_f32_simd(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "descriptors must have same dimension");

    let mut sum = f32x4::splat(0.0);
    let mut a_chunks = a.chunks_exact(4);
    let mut b_chunks = b.chunks_exact(4);

    for (a_chunk, b_chunk) in a_chunks.by_ref().zip(b_chunks.by_ref()) {
        let a_lanes = f32x4::from([a_chunk[0], a_chunk[1], a_chunk[2], a_chunk[3]]);
        let b_lanes = f32x4::from([b_chunk[0], b_chunk[1], b_chunk[2], b_chunk[3]]);
        sum += a_lanes * b_lanes;
    }

    let mut result = sum.reduce_add();
    for (x, y) in a_chunks.remainder().iter().zip(b_chunks.remainder()) {
        result += x * y;
    }
    result
}
