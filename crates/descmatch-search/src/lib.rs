//! Exhaustive nearest-neighbor descriptor search for descmatch.
//!
//! This crate provides:
//! - **Dot-product kernels**: `wide` portable SIMD (8 `i16` lanes widened to
//!   `i32`, 4 `f32` lanes) across x86 SSE2/AVX2 and ARM NEON, with scalar
//!   reference kernels that rank identically.
//! - **Element strategies**: per-type score accumulation, clamping, and
//!   distance transforms for quantized `i16` and unit-normalized `f32`
//!   descriptors.
//! - **[`DescriptorIndex`]**: an immutable borrowed view over N fixed-dimension
//!   descriptors with best/second-best `find` and Rayon-parallel `find_batch`.

pub mod element;
pub mod index;
pub mod simd;

pub use element::DescriptorElement;
pub use index::{DescriptorIndex, Kernel};
