use log::debug;
use rand::Rng;

use crate::error::Result;
use super::frequency::FrequencyModel;
use super::generation_config::GenerationConfig;
use super::generator::{NoteGenerator, TokenGenerator, fallback_note};
use super::note::{MusicSymbol, Note};
use super::symbol::Symbol;

/// Builds whole sequences by calling the generators until an end sentinel
/// is drawn or the configured length is reached.
///
/// # Responsibilities
/// - Start every sequence from `[START1, START2]`
/// - Stop on `END` (words) or `END_MUSIC` (notes), or at the length limit
/// - Strip sentinels from the result
#[derive(Debug, Clone)]
pub struct Composer<'m, M> {
	model: &'m M,
	config: GenerationConfig,
}

impl<'m, M: FrequencyModel> Composer<'m, M> {
	pub fn new(model: &'m M, config: GenerationConfig) -> Self {
		Self { model, config }
	}

	pub fn config(&self) -> &GenerationConfig {
		&self.config
	}

	/// Generates one sequence of at most `max_tokens` symbols.
	///
	/// Generation stops early when `END` is drawn or when the model cannot
	/// continue the sequence.
	pub fn compose_sentence<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<M::Item>> {
		let generator = TokenGenerator::new(self.model);
		let mut sentence = <M::Item as Symbol>::start_context();
		let mut produced = 0;

		while produced < self.config.max_tokens() {
			if !self.model.has_context(&sentence) {
				debug!("No context to continue after {produced} symbols");
				break;
			}
			let next = generator.next_token(&sentence, rng)?;
			if next == <M::Item as Symbol>::end() {
				break;
			}
			sentence.push(next);
			produced += 1;
		}

		Ok(sentence.into_iter().filter(|symbol| !symbol.is_sentinel()).collect())
	}

	/// Same as `compose_sentence`, joined by single spaces.
	pub fn compose_text<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
		Ok(self
			.compose_sentence(rng)?
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(" "))
	}
}

impl<'m, M: FrequencyModel<Item = MusicSymbol>> Composer<'m, M> {
	/// Generates one musical line of at most `max_notes` notes in the
	/// configured key.
	///
	/// When the model has no context at all for the line so far, a random
	/// note in key is invented so the line keeps going.
	pub fn compose_line<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Note>> {
		let generator = NoteGenerator::new(self.model);
		let pitches = self.config.possible_pitches();
		let mut line = MusicSymbol::start_context();
		let mut notes = Vec::new();

		while notes.len() < self.config.max_notes() {
			let next = if self.model.has_context(&line) {
				generator.next_note(&line, pitches, rng)?
			} else {
				debug!("No context after {} notes, inventing one", notes.len());
				fallback_note(pitches, rng)?.into()
			};

			match next {
				MusicSymbol::Note(note) => {
					notes.push(note.clone());
					line.push(MusicSymbol::Note(note));
				}
				_ => break,
			}
		}

		Ok(notes)
	}
}
