//! Core types, errors, and configuration for the descmatch matching library.
//!
//! This crate defines the match record ([`NearestPair`]), error types
//! ([`MatchError`]), kernel capability configuration ([`KernelConfig`]), and
//! the tracing conventions shared across all descmatch crates.
//!
//! It has minimal external dependencies and is intended to be depended on by
//! every other crate in the workspace.

pub mod config;
pub mod error;
pub mod tracing_config;
pub mod types;

pub use config::KernelConfig;
pub use error::{MatchError, MatchResult};
pub use types::NearestPair;
