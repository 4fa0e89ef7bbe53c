use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use super::sampler;
use super::symbol::Symbol;

/// Candidate counts observed after one context.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate candidate occurrences during training
/// - Pick the next symbol using weighted random sampling
/// - Merge with counts from another partial model (ex. parallel training)
///
/// ## Invariants
/// - Each candidate count is strictly positive
/// - Iteration order is the symbol order, so sampling with a seeded
///   random source is reproducible
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(bound = "T: Symbol")]
pub struct Candidates<T: Symbol> {
	/// Number of times each candidate followed the context.
	/// Example: { "fox" => 42, "dog" => 3 }
	counts: BTreeMap<T, u64>,
}

impl<T: Symbol> Candidates<T> {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self { counts: BTreeMap::new() }
	}

	/// Records one occurrence of `candidate`.
	pub fn add(&mut self, candidate: T) {
		self.add_count(candidate, 1);
	}

	/// Records `count` occurrences of `candidate`. A zero count is ignored.
	pub fn add_count(&mut self, candidate: T, count: u64) {
		if count == 0 {
			return;
		}
		*self.counts.entry(candidate).or_insert(0) += count;
	}

	/// Number of times `candidate` was observed (0 if never).
	pub fn count(&self, candidate: &T) -> u64 {
		self.counts.get(candidate).copied().unwrap_or(0)
	}

	pub fn contains(&self, candidate: &T) -> bool {
		self.counts.contains_key(candidate)
	}

	/// Number of distinct candidates.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Sum of all counts.
	pub fn total(&self) -> u64 {
		self.counts.values().sum()
	}

	/// Ordered `(candidate, count)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&T, u64)> {
		self.counts.iter().map(|(candidate, count)| (candidate, *count))
	}

	/// Returns the candidates satisfying `keep`, with their counts.
	pub fn filtered<F>(&self, mut keep: F) -> Self
	where
		F: FnMut(&T) -> bool,
	{
		Self {
			counts: self
				.counts
				.iter()
				.filter(|(candidate, _)| keep(candidate))
				.map(|(candidate, count)| (candidate.clone(), *count))
				.collect(),
		}
	}

	/// Picks a candidate with probability proportional to its count.
	///
	/// # Errors
	/// Returns `InvalidDistribution` if the table is empty.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T> {
		sampler::sample(self.iter(), rng)
	}

	/// Adds every count of `other` to this table.
	pub fn merge(&mut self, other: &Self) {
		for (candidate, count) in other.iter() {
			self.add_count(candidate.clone(), count);
		}
	}

	/// Counts keyed by the display form of each candidate, for dumps.
	pub(crate) fn to_display_map(&self) -> BTreeMap<String, u64> {
		self.iter().map(|(candidate, count)| (candidate.to_string(), count)).collect()
	}
}

impl<T: Symbol> Default for Candidates<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Symbol> FromIterator<(T, u64)> for Candidates<T> {
	fn from_iter<I: IntoIterator<Item = (T, u64)>>(iter: I) -> Self {
		let mut candidates = Self::new();
		for (candidate, count) in iter {
			candidates.add_count(candidate, count);
		}
		candidates
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn table(entries: &[(&str, u64)]) -> Candidates<String> {
		entries.iter().map(|(t, c)| ((*t).to_owned(), *c)).collect()
	}

	#[test]
	fn accumulates_counts() {
		let mut candidates = Candidates::new();
		candidates.add("the".to_owned());
		candidates.add("the".to_owned());
		candidates.add("fox".to_owned());
		assert_eq!(candidates.count(&"the".to_owned()), 2);
		assert_eq!(candidates.count(&"fox".to_owned()), 1);
		assert_eq!(candidates.count(&"dog".to_owned()), 0);
		assert_eq!(candidates.total(), 3);
		assert_eq!(candidates.len(), 2);
	}

	#[test]
	fn zero_counts_are_not_stored() {
		let candidates = table(&[("a", 0), ("b", 2)]);
		assert!(!candidates.contains(&"a".to_owned()));
		assert_eq!(candidates.len(), 1);
	}

	#[test]
	fn iterates_in_symbol_order() {
		let candidates = table(&[("ham", 3), ("and", 3), ("green", 10)]);
		let order: Vec<&str> = candidates.iter().map(|(t, _)| t.as_str()).collect();
		assert_eq!(order, vec!["and", "green", "ham"]);
	}

	#[test]
	fn filter_keeps_counts() {
		let candidates = table(&[("a", 1), ("b", 2), ("c", 3)]);
		let kept = candidates.filtered(|t| t != "b");
		assert_eq!(kept, table(&[("a", 1), ("c", 3)]));
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = table(&[("a", 1), ("b", 2)]);
		left.merge(&table(&[("b", 5), ("c", 1)]));
		assert_eq!(left, table(&[("a", 1), ("b", 7), ("c", 1)]));
	}

	#[test]
	fn sampling_an_empty_table_fails() {
		let mut rng = StdRng::seed_from_u64(3);
		assert!(Candidates::<String>::new().sample(&mut rng).is_err());
		assert_eq!(table(&[("only", 4)]).sample(&mut rng).unwrap(), "only");
	}
}
