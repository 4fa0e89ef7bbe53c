use std::collections::BTreeSet;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Input parameters for composing sentences and musical lines.
///
/// # Responsibilities
/// - Bound the length of generated sequences (`max_tokens`, `max_notes`)
/// - Hold the key signature used for note generation
/// - Provide the random source (seeded for reproducible runs)
///
/// # Invariants
/// - `max_tokens` and `max_notes` are >= 1
/// - `possible_pitches` is never empty and holds no empty pitch class
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
	/// Seed of the random source. `None` seeds from the operating system.
	pub seed: Option<u64>,

	/// Maximum number of words in a composed sentence.
	max_tokens: usize,

	/// Maximum number of notes in a composed line.
	max_notes: usize,

	/// Pitch classes allowed in a composed line (the key signature).
	possible_pitches: BTreeSet<String>,
}

impl Default for GenerationConfig {
	/// 40 words, 64 notes, C major, unseeded.
	fn default() -> Self {
		Self {
			seed: None,
			max_tokens: 40,
			max_notes: 64,
			possible_pitches: ["C", "D", "E", "F", "G", "A", "B"].iter().map(|p| (*p).to_owned()).collect(),
		}
	}
}

impl GenerationConfig {
	/// Parses a configuration from JSON; missing fields take their default.
	///
	/// # Errors
	/// Returns `Json` on malformed input, `InvalidConfig` if a value breaks
	/// an invariant.
	pub fn from_json(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads a JSON configuration file.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		Self::from_json(&std::fs::read_to_string(path)?)
	}

	fn validate(&self) -> Result<()> {
		Self::check_length("max_tokens", self.max_tokens)?;
		Self::check_length("max_notes", self.max_notes)?;
		Self::check_pitches(&self.possible_pitches)
	}

	fn check_length(name: &str, value: usize) -> Result<()> {
		if value == 0 {
			return Err(GenError::InvalidConfig(format!("{name} must be >= 1")));
		}
		Ok(())
	}

	fn check_pitches(pitches: &BTreeSet<String>) -> Result<()> {
		if pitches.is_empty() {
			return Err(GenError::InvalidConfig("possible_pitches cannot be empty".to_owned()));
		}
		if pitches.iter().any(String::is_empty) {
			return Err(GenError::InvalidConfig("empty pitch class".to_owned()));
		}
		Ok(())
	}

	pub fn max_tokens(&self) -> usize {
		self.max_tokens
	}

	pub fn max_notes(&self) -> usize {
		self.max_notes
	}

	pub fn possible_pitches(&self) -> &BTreeSet<String> {
		&self.possible_pitches
	}

	/// Sets the maximum sentence length.
	///
	/// # Errors
	/// Returns an error if `max_tokens` is 0.
	pub fn set_max_tokens(&mut self, max_tokens: usize) -> Result<()> {
		Self::check_length("max_tokens", max_tokens)?;
		self.max_tokens = max_tokens;
		Ok(())
	}

	/// Sets the maximum line length.
	///
	/// # Errors
	/// Returns an error if `max_notes` is 0.
	pub fn set_max_notes(&mut self, max_notes: usize) -> Result<()> {
		Self::check_length("max_notes", max_notes)?;
		self.max_notes = max_notes;
		Ok(())
	}

	/// Replaces the key signature.
	///
	/// # Errors
	/// Returns an error if no pitch class is given or one of them is empty.
	pub fn set_possible_pitches<I, S>(&mut self, pitches: I) -> Result<()>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let pitches: BTreeSet<String> = pitches.into_iter().map(Into::into).collect();
		Self::check_pitches(&pitches)?;
		self.possible_pitches = pitches;
		Ok(())
	}

	/// Creates the random source for a run.
	pub fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::Rng;

	#[test]
	fn defaults_to_c_major() {
		let config = GenerationConfig::default();
		assert_eq!(config.max_tokens(), 40);
		assert_eq!(config.max_notes(), 64);
		assert_eq!(config.possible_pitches().len(), 7);
		assert!(config.possible_pitches().contains("F"));
	}

	#[test]
	fn setters_validate() {
		let mut config = GenerationConfig::default();
		assert!(config.set_max_tokens(0).is_err());
		assert!(config.set_max_notes(0).is_err());
		assert!(config.set_possible_pitches(Vec::<String>::new()).is_err());
		assert!(config.set_possible_pitches(["C", ""]).is_err());
		assert_eq!(config, GenerationConfig::default());

		config.set_max_tokens(3).unwrap();
		config.set_possible_pitches(["G", "D", "F#"]).unwrap();
		assert_eq!(config.max_tokens(), 3);
		assert_eq!(config.possible_pitches().iter().collect::<Vec<_>>(), vec!["D", "F#", "G"]);
	}

	#[test]
	fn json_fills_defaults_and_validates() {
		let config = GenerationConfig::from_json(r#"{ "seed": 7, "max_notes": 12 }"#).unwrap();
		assert_eq!(config.seed, Some(7));
		assert_eq!(config.max_notes(), 12);
		assert_eq!(config.max_tokens(), 40);

		assert!(matches!(
			GenerationConfig::from_json(r#"{ "possible_pitches": [] }"#),
			Err(GenError::InvalidConfig(_))
		));
		assert!(matches!(GenerationConfig::from_json("{ nope"), Err(GenError::Json(_))));
	}

	#[test]
	fn seeded_rng_is_reproducible() {
		let mut config = GenerationConfig::default();
		config.seed = Some(2024);
		let mut first = config.rng();
		let mut second = config.rng();
		let a: Vec<u32> = (0..8).map(|_| first.random()).collect();
		let b: Vec<u32> = (0..8).map(|_| second.random()).collect();
		assert_eq!(a, b);
	}
}
