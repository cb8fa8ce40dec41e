//! Kernel capability configuration.
//!
//! One acceleration flag per element-type family, mirroring the build
//! switches of classic SSE matchers but decided at index construction rather
//! than compile time. Disabling a flag always falls back to the scalar
//! kernel for that element type; it never fails.

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`KernelConfig::accel_i16`].
pub const ACCEL_I16_ENV: &str = "DESCMATCH_ACCEL_I16";

/// Environment variable overriding [`KernelConfig::accel_f32`].
pub const ACCEL_F32_ENV: &str = "DESCMATCH_ACCEL_F32";

/// Controls whether the accelerated SIMD kernel is attempted per element type.
///
/// The flags gate *attempting* acceleration only. Output values for `i16`
/// descriptors are identical either way; `f32` results may differ within
/// floating-point reassociation rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Attempt the SIMD kernel for quantized `i16` descriptors.
    pub accel_i16: bool,
    /// Attempt the SIMD kernel for `f32` descriptors.
    pub accel_f32: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            accel_i16: true,
            accel_f32: true,
        }
    }
}

impl KernelConfig {
    /// A configuration that always selects the scalar reference kernel.
    #[must_use]
    pub const fn scalar_only() -> Self {
        Self {
            accel_i16: false,
            accel_f32: false,
        }
    }

    /// Builds the default configuration, then applies environment overrides
    /// from [`ACCEL_I16_ENV`] and [`ACCEL_F32_ENV`].
    ///
    /// Recognized values: `1`/`true`/`on`/`yes` and `0`/`false`/`off`/`no`
    /// (case-insensitive). Unrecognized values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(flag) = std::env::var(ACCEL_I16_ENV).ok().as_deref().and_then(parse_flag) {
            config.accel_i16 = flag;
        }
        if let Some(flag) = std::env::var(ACCEL_F32_ENV).ok().as_deref().and_then(parse_flag) {
            config.accel_f32 = flag;
        }
        config
    }
}

/// Parse a boolean capability flag (case-insensitive).
///
/// Returns `None` for unrecognized strings.
#[must_use]
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
