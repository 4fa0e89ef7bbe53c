use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::io::{build_output_path, read_corpus};
use super::candidates::Candidates;
use super::framer::frame;
use super::frequency::{FrequencyModel, describe_context};
use super::ngram_model::NGramModel;
use super::symbol::Symbol;

/// A stack of fixed-order models consulted from the highest order down.
///
/// This struct manages:
/// - `models`: one `NGramModel` per order, sorted by decreasing order
///
/// Generation asks the stack for candidates; the stack answers with the
/// highest order model that knows the trailing context of the sequence.
///
/// # Invariants
/// - `models` is never empty
/// - No two models share the same order
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(bound = "T: Symbol")]
pub struct BackoffModel<T: Symbol> {
	models: Vec<NGramModel<T>>,
}

impl<T: Symbol> BackoffModel<T> {
	/// Builds a stack from untrained or trained models.
	///
	/// # Errors
	/// Returns `InvalidConfig` if `models` is empty or two models share
	/// the same order.
	pub fn new(mut models: Vec<NGramModel<T>>) -> Result<Self> {
		if models.is_empty() {
			return Err(GenError::InvalidConfig("a backoff model needs at least one n-gram model".to_owned()));
		}
		models.sort_by_key(|model| std::cmp::Reverse(model.order()));
		if models.windows(2).any(|pair| pair[0].order() == pair[1].order()) {
			return Err(GenError::InvalidConfig("duplicate n-gram order".to_owned()));
		}
		Ok(Self { models })
	}

	/// Returns an untrained trigram / bigram / unigram stack.
	pub fn standard() -> Self {
		Self { models: vec![NGramModel::trigram(), NGramModel::bigram(), NGramModel::unigram()] }
	}

	/// Frames `sequences` and trains a trigram / bigram / unigram stack on them.
	pub fn from_sequences(sequences: &[Vec<T>]) -> Self {
		let mut model = Self::standard();
		model.train(&frame(sequences));
		model
	}

	/// Loads a stack from a cached binary if one exists next to the corpus,
	/// otherwise trains it from the corpus file and writes the cache.
	///
	/// - `filepath` is the corpus (one sequence per line).
	/// - The cache is `filepath` with a `bin` extension.
	/// - Uses `postcard` for compact serialization/deserialization.
	pub fn load_or_train<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let binary_data_path = build_output_path(&filepath, "bin")?;
		if binary_data_path.exists() {
			info!("Loading cached model from {}", binary_data_path.display());
			return Self::load(&binary_data_path);
		}

		let model = Self::train_file(&filepath)?;
		model.save(&binary_data_path)?;
		info!("Cached model to {}", binary_data_path.display());
		Ok(model)
	}

	/// Reads a corpus, splits its sequences into chunks, trains partial
	/// models in parallel and merges them into a standard stack.
	///
	/// # Behavior
	/// - Chunk count is based on CPU cores * factor.
	/// - Each thread frames and trains its own partial model.
	/// - Partial models are merged sequentially on the calling thread.
	pub fn train_file<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let sequences: Vec<Vec<T>> = read_corpus(&filepath)?;
		info!("Training on {} sequences from {}", sequences.len(), filepath.as_ref().display());
		Self::train_parallel(&sequences)
	}

	/// Trains a standard stack on raw (unframed) sequences using worker threads.
	pub fn train_parallel(sequences: &[Vec<T>]) -> Result<Self> {
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = sequences.len().div_ceil(chunks).max(1);

		let mut final_model = Self::standard();
		thread::scope(|scope| {
			let (tx, rx) = mpsc::channel();
			for chunk in sequences.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					// The receiver is only gone if merging already failed.
					let _ = tx.send(Self::from_sequences(chunk));
				});
			}
			drop(tx);

			for partial_model in rx.iter() {
				final_model.merge(&partial_model)?;
			}
			Ok::<(), GenError>(())
		})?;

		Ok(final_model)
	}

	/// Reads a stack previously written by `save`.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let bytes = std::fs::read(path)?;
		Ok(postcard::from_bytes(&bytes)?)
	}

	/// Writes the stack as a `postcard` binary.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(path, bytes)?;
		Ok(())
	}

	/// Trains every model of the stack on a framed corpus.
	pub fn train(&mut self, framed: &[Vec<T>]) {
		for model in &mut self.models {
			model.train(framed);
		}
	}

	/// Models of the stack, highest order first.
	pub fn models(&self) -> &[NGramModel<T>] {
		&self.models
	}

	/// Returns the highest order model that can continue `sequence`.
	pub fn select(&self, sequence: &[T]) -> Option<&NGramModel<T>> {
		let selected = self.models.iter().find(|model| model.has_context(sequence));
		if let Some(model) = selected {
			debug!("{} selected for [{}]", model.name(), describe_context(sequence, model.order() - 1));
		}
		selected
	}

	/// Merges another stack into this one.
	///
	/// # Behavior
	/// - Models of the same order are merged; orders missing here are cloned.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		for model in &other.models {
			match self.models.iter_mut().find(|existing| existing.order() == model.order()) {
				Some(existing) => existing.merge(model)?,
				None => self.models.push(model.clone()),
			}
		}
		self.models.sort_by_key(|model| std::cmp::Reverse(model.order()));
		Ok(())
	}

	/// Dumps every model of the stack, highest order first.
	pub fn dump(&self) -> Result<String> {
		let dumps = self.models.iter().map(NGramModel::dump).collect::<Result<Vec<_>>>()?;
		Ok(dumps.join("\n"))
	}
}

impl<T: Symbol> FrequencyModel for BackoffModel<T> {
	type Item = T;

	/// Order of the highest model in the stack.
	fn order(&self) -> usize {
		self.models.first().map_or(0, |model| model.order())
	}

	fn has_context(&self, sequence: &[T]) -> bool {
		self.models.iter().any(|model| model.has_context(sequence))
	}

	fn candidates_for(&self, sequence: &[T]) -> Result<&Candidates<T>> {
		match self.select(sequence) {
			Some(model) => model.candidates_for(sequence),
			None => Err(GenError::NoSuchContext(describe_context(sequence, self.order().saturating_sub(1)))),
		}
	}
}
