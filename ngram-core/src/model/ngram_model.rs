use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use super::candidates::Candidates;
use super::frequency::{FrequencyModel, describe_context};
use super::symbol::Symbol;

/// Represents a fixed-order n-gram model over symbol sequences.
///
/// The `NGramModel` maps every context of `n-1` symbols seen during training
/// to the candidates that followed it, and answers context lookups for the
/// generators.
///
/// # Responsibilities
/// - Build the table from framed sequences (see `framer`)
/// - Accumulate candidate counts for each context
/// - Report whether a sequence's trailing context is known
/// - Merge with another n-gram model of the same order `n`
///
/// # Invariants
/// - `n` is always >= 1 (a unigram has the empty context)
/// - Each key in `contexts` has exactly `n-1` symbols
/// - Every stored context has at least one candidate with a count >= 1
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(bound = "T: Symbol")]
pub struct NGramModel<T: Symbol> {
	/// The order of the model (number of symbols in the n-gram)
	n: usize, // must be >= 1

	/// Mapping from a context (length n-1) to the candidates following it
	contexts: HashMap<Vec<T>, Candidates<T>>,
}

impl<T: Symbol> NGramModel<T> {
	/// Creates a new, untrained n-gram model of order `n`.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `n < 1`.
	pub fn new(n: usize) -> Result<Self> {
		if n < 1 {
			return Err(GenError::InvalidOrder(n));
		}
		Ok(Self { n, contexts: HashMap::new() })
	}

	pub fn unigram() -> Self {
		Self { n: 1, contexts: HashMap::new() }
	}

	pub fn bigram() -> Self {
		Self { n: 2, contexts: HashMap::new() }
	}

	pub fn trigram() -> Self {
		Self { n: 3, contexts: HashMap::new() }
	}

	/// Human-readable model name, used as the dump header.
	pub fn name(&self) -> String {
		match self.n {
			1 => "UnigramModel".to_owned(),
			2 => "BigramModel".to_owned(),
			3 => "TrigramModel".to_owned(),
			n => format!("{n}GramModel"),
		}
	}

	/// Number of known contexts.
	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// Returns the trailing `n-1` symbols of `sequence`, or `None` if the
	/// sequence is too short to hold a full context.
	pub fn context<'s>(&self, sequence: &'s [T]) -> Option<&'s [T]> {
		let k = self.n - 1;
		if sequence.len() < k {
			return None;
		}
		Some(&sequence[sequence.len() - k..])
	}

	/// Trains on a framed corpus.
	pub fn train(&mut self, framed: &[Vec<T>]) {
		for sequence in framed {
			self.add_sequence(sequence);
		}
	}

	/// Adds one framed sequence to the model.
	///
	/// Every symbol after the two start sentinels (the `END` sentinel
	/// included) is counted as a candidate of the `n-1` symbols before it.
	///
	/// # Notes
	/// - Positions that do not have `n-1` symbols before them are skipped,
	///   which only happens for orders above 3.
	pub fn add_sequence(&mut self, framed: &[T]) {
		let k = self.n - 1;
		for i in k.max(2)..framed.len() {
			self.contexts
				.entry(framed[i - k..i].to_vec())
				.or_default()
				.add(framed[i].clone());
		}
	}

	/// Merges another n-gram model into this one.
	///
	/// # Notes
	/// - Both models must have the same order `n`.
	/// - Counts for matching contexts and candidates are summed.
	///
	/// # Errors
	/// Returns `OrderMismatch` if the model orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.n != other.n {
			return Err(GenError::OrderMismatch(self.n, other.n));
		}

		for (context, candidates) in &other.contexts {
			if let Some(existing) = self.contexts.get_mut(context) {
				existing.merge(candidates);
			} else {
				self.contexts.insert(context.clone(), candidates.clone());
			}
		}

		Ok(())
	}

	/// Human-readable dump of the trained table, sorted by context.
	///
	/// Contexts are rendered as their symbols joined by spaces. This is a
	/// debugging aid, not a storage format.
	pub fn dump(&self) -> Result<String> {
		let table: BTreeMap<String, BTreeMap<String, u64>> = self
			.contexts
			.iter()
			.map(|(context, candidates)| (describe_context(context, context.len()), candidates.to_display_map()))
			.collect();
		Ok(format!("{}:\n{}", self.name(), serde_json::to_string_pretty(&table)?))
	}
}

impl<T: Symbol> FrequencyModel for NGramModel<T> {
	type Item = T;

	fn order(&self) -> usize {
		self.n
	}

	fn has_context(&self, sequence: &[T]) -> bool {
		self.context(sequence)
			.and_then(|context| self.contexts.get(context))
			.is_some_and(|candidates| !candidates.is_empty())
	}

	fn candidates_for(&self, sequence: &[T]) -> Result<&Candidates<T>> {
		self.context(sequence)
			.and_then(|context| self.contexts.get(context))
			.filter(|candidates| !candidates.is_empty())
			.ok_or_else(|| GenError::NoSuchContext(describe_context(sequence, self.n - 1)))
	}
}
