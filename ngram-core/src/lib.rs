//! N-gram sequence generation library.
//!
//! This crate provides a token-level n-gram generation system including:
//! - Sentinel framing of training sequences
//! - Weighted random sampling over candidate counts
//! - Fixed-order n-gram models and highest-order-first backoff
//! - Next-token and key-constrained next-note generation
//! - Corpus loading, binary caching and diagnostic dumps
//!
//! Generation only depends on the [`model::frequency::FrequencyModel`]
//! capability, so any table that can answer "which candidates follow this
//! context" can drive the generators.

/// Error type shared by the whole crate.
pub mod error;

/// Core n-gram models and generation logic.
pub mod model;

/// I/O utilities (corpus loading, path helpers).
pub mod io;

pub use error::{GenError, Result};
