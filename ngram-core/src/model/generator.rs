use std::collections::BTreeSet;

use log::debug;
use rand::Rng;

use crate::error::{GenError, Result};
use super::frequency::FrequencyModel;
use super::note::{Duration, FALLBACK_OCTAVE, MusicSymbol, Note};

/// Picks the next symbol of a sequence from a frequency model.
///
/// The generator only reads the model; the random source is passed to each
/// call so concurrent callers can each own theirs while sharing the model.
#[derive(Debug, Clone, Copy)]
pub struct TokenGenerator<'m, M> {
	model: &'m M,
}

impl<'m, M: FrequencyModel> TokenGenerator<'m, M> {
	pub fn new(model: &'m M) -> Self {
		Self { model }
	}

	/// Returns the next symbol to append to `sequence`, drawn with
	/// probability proportional to its count after the trailing context.
	///
	/// # Errors
	/// - `NoSuchContext` if the model cannot continue `sequence`
	///   (callers are expected to check `has_context` first)
	/// - `InvalidDistribution` if the candidates cannot be sampled
	pub fn next_token<R: Rng + ?Sized>(&self, sequence: &[M::Item], rng: &mut R) -> Result<M::Item> {
		Ok(self.model.candidates_for(sequence)?.sample(rng)?.clone())
	}
}

/// Picks the next note of a musical line, restricted to a key signature.
#[derive(Debug, Clone, Copy)]
pub struct NoteGenerator<'m, M> {
	model: &'m M,
}

impl<'m, M: FrequencyModel<Item = MusicSymbol>> NoteGenerator<'m, M> {
	pub fn new(model: &'m M) -> Self {
		Self { model }
	}

	/// Returns the next symbol of a musical line.
	///
	/// Candidates are kept when they are notes whose pitch class is in
	/// `possible_pitches`, or the `END_MUSIC` sentinel. If none survive, a
	/// random note is invented instead (see [`fallback_note`]), so a line
	/// can always be continued in key.
	///
	/// # Errors
	/// - `InvalidDistribution` if `possible_pitches` is empty
	/// - `NoSuchContext` if the model cannot continue `sequence`
	pub fn next_note<R: Rng + ?Sized>(
		&self,
		sequence: &[MusicSymbol],
		possible_pitches: &BTreeSet<String>,
		rng: &mut R,
	) -> Result<MusicSymbol> {
		if possible_pitches.is_empty() {
			return Err(GenError::InvalidDistribution("no possible pitches".to_owned()));
		}

		let all_candidates = self.model.candidates_for(sequence)?;
		let real_candidates = all_candidates.filtered(|candidate| match candidate {
			MusicSymbol::Note(note) => possible_pitches.contains(note.pitch_class()),
			MusicSymbol::EndMusic => true,
			_ => false,
		});

		if real_candidates.is_empty() {
			debug!("None of {} candidates fit the key, inventing a note", all_candidates.len());
			return Ok(fallback_note(possible_pitches, rng)?.into());
		}
		Ok(real_candidates.sample(rng)?.clone())
	}
}

/// Invents a note: a uniformly random pitch class of `possible_pitches` in
/// octave 4, with a uniformly random supported duration.
///
/// # Errors
/// Returns `InvalidDistribution` if `possible_pitches` is empty, and
/// `InvalidNote` if the chosen pitch class is empty.
pub fn fallback_note<R: Rng + ?Sized>(possible_pitches: &BTreeSet<String>, rng: &mut R) -> Result<Note> {
	if possible_pitches.is_empty() {
		return Err(GenError::InvalidDistribution("no possible pitches".to_owned()));
	}
	let index = rng.random_range(0..possible_pitches.len());
	let pitch_class = possible_pitches
		.iter()
		.nth(index)
		.ok_or_else(|| GenError::InvalidDistribution("no possible pitches".to_owned()))?;
	let duration = Duration::ALL[rng.random_range(0..Duration::ALL.len())];
	Note::new(format!("{pitch_class}{FALLBACK_OCTAVE}"), duration)
}
