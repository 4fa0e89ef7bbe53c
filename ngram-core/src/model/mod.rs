//! Top-level module for the n-gram generation system.
//!
//! This module provides, leaf-first:
//! - Sequence symbols and their sentinels (`Symbol`, `MusicSymbol`, `Note`)
//! - Sentinel framing of training data (`framer`)
//! - Weighted random choice (`sampler`)
//! - Per-context candidate counts (`Candidates`)
//! - The context lookup capability consumed by generators (`FrequencyModel`)
//! - Fixed-order and backoff models (`NGramModel`, `BackoffModel`)
//! - Next-token / next-note generators and a sequence composer

/// Symbols a model is trained on, and the sentinels bounding each sequence.
pub mod symbol;

/// Notes, durations and the musical symbol alphabet.
pub mod note;

/// Wraps raw sequences with start/end sentinels before training.
pub mod framer;

/// Weighted random choice over ordered `(candidate, weight)` pairs.
pub mod sampler;

/// Candidate counts observed after a single context.
///
/// Tracks how often each symbol followed the context and supports
/// weighted random sampling.
pub mod candidates;

/// Context lookup capability consumed by the generators.
pub mod frequency;

/// Fixed-order n-gram model (`n >= 1`).
///
/// Handles sequence ingestion, candidate counting, merging and dumps.
pub mod ngram_model;

/// Highest-order-first stack of `NGramModel`s.
///
/// Supports loading from a corpus file, parallel training, caching
/// and merging.
pub mod backoff_model;

/// Single-step generators: `TokenGenerator` and `NoteGenerator`.
pub mod generator;

/// Generation parameters (length limits, seed, key signature).
pub mod generation_config;

/// Assembles full sentences or musical lines from repeated generator calls.
pub mod composer;
