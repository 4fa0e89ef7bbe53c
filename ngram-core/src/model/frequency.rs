use crate::error::Result;
use super::candidates::Candidates;
use super::symbol::Symbol;

/// Context lookup capability consumed by the generators.
///
/// A frequency model maps contexts (the trailing symbols of a sequence) to
/// the candidates observed after them. How long the context is, and how it
/// is sliced out of the sequence, is left to each implementation.
///
/// Trained models are read-only: both queries are pure, and calling
/// `candidates_for` twice with the same sequence returns equal tables.
pub trait FrequencyModel {
	type Item: Symbol;

	/// Number of symbols in an n-gram (context length + 1).
	fn order(&self) -> usize;

	/// Whether the trailing context of `sequence` is known and has at
	/// least one candidate.
	fn has_context(&self, sequence: &[Self::Item]) -> bool;

	/// Candidates observed after the trailing context of `sequence`.
	///
	/// # Errors
	/// Returns `NoSuchContext` when `has_context(sequence)` is false.
	fn candidates_for(&self, sequence: &[Self::Item]) -> Result<&Candidates<Self::Item>>;
}

/// Renders the last `len` symbols of `sequence`, for error messages and logs.
pub(crate) fn describe_context<T: Symbol>(sequence: &[T], len: usize) -> String {
	let start = sequence.len().saturating_sub(len);
	sequence[start..]
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(" ")
}
