use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use super::symbol::{END, END_MUSIC, START1, START2, Symbol};

/// Octave given to notes invented by the fallback policy.
pub const FALLBACK_OCTAVE: &str = "4";

/// Supported note durations.
///
/// Values follow the PySynth convention: `4` is a quarter note, `8` an
/// eighth, and a negative value is the dotted version of its absolute value.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Duration {
	Whole,
	Half,
	Quarter,
	Eighth,
	Sixteenth,
	DottedHalf,
	DottedQuarter,
	DottedEighth,
}

impl Duration {
	/// Every supported duration, in declaration order.
	pub const ALL: [Duration; 8] = [
		Duration::Whole,
		Duration::Half,
		Duration::Quarter,
		Duration::Eighth,
		Duration::Sixteenth,
		Duration::DottedHalf,
		Duration::DottedQuarter,
		Duration::DottedEighth,
	];

	pub fn value(self) -> i8 {
		match self {
			Duration::Whole => 1,
			Duration::Half => 2,
			Duration::Quarter => 4,
			Duration::Eighth => 8,
			Duration::Sixteenth => 16,
			Duration::DottedHalf => -2,
			Duration::DottedQuarter => -4,
			Duration::DottedEighth => -8,
		}
	}
}

impl TryFrom<i8> for Duration {
	type Error = GenError;

	fn try_from(value: i8) -> Result<Self> {
		Duration::ALL
			.into_iter()
			.find(|d| d.value() == value)
			.ok_or_else(|| GenError::InvalidNote(format!("unsupported duration {value}")))
	}
}

impl fmt::Display for Duration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.value())
	}
}

/// A pitch-with-octave and a duration.
///
/// # Invariants
/// - `pitch` is `<PitchClass><Octave>` where the octave is a single
///   trailing ASCII digit and the pitch class is not empty (`"C4"`, `"F#5"`)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Note {
	pitch: String,
	duration: Duration,
}

impl Note {
	/// Creates a note.
	///
	/// # Errors
	/// Returns `InvalidNote` if `pitch` is not a pitch class followed by
	/// a one digit octave.
	pub fn new(pitch: impl Into<String>, duration: Duration) -> Result<Self> {
		let pitch = pitch.into();
		let mut chars = pitch.chars();
		let valid = matches!(chars.next_back(), Some(octave) if octave.is_ascii_digit())
			&& chars.next().is_some();
		if !valid {
			return Err(GenError::InvalidNote(pitch));
		}
		Ok(Self { pitch, duration })
	}

	/// Pitch with its octave, e.g. `"C#4"`.
	pub fn pitch(&self) -> &str {
		&self.pitch
	}

	/// Pitch without its trailing octave character, e.g. `"C#"`.
	pub fn pitch_class(&self) -> &str {
		let mut chars = self.pitch.chars();
		chars.next_back();
		chars.as_str()
	}

	pub fn duration(&self) -> Duration {
		self.duration
	}
}

impl fmt::Display for Note {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.pitch, self.duration)
	}
}

impl FromStr for Note {
	type Err = GenError;

	/// Parses `PITCH:DURATION`, e.g. `"E5:-4"`.
	fn from_str(s: &str) -> Result<Self> {
		let (pitch, duration) = s
			.rsplit_once(':')
			.ok_or_else(|| GenError::InvalidNote(s.to_owned()))?;
		let duration: i8 = duration
			.parse()
			.map_err(|_| GenError::InvalidNote(s.to_owned()))?;
		Note::new(pitch, Duration::try_from(duration)?)
	}
}

/// Alphabet of musical sequences: notes plus sentinels.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MusicSymbol {
	Start1,
	Start2,
	End,
	EndMusic,
	Note(Note),
}

impl MusicSymbol {
	pub fn as_note(&self) -> Option<&Note> {
		match self {
			MusicSymbol::Note(note) => Some(note),
			_ => None,
		}
	}

	/// Either end marker terminates a line.
	pub fn is_terminal(&self) -> bool {
		matches!(self, MusicSymbol::End | MusicSymbol::EndMusic)
	}
}

impl From<Note> for MusicSymbol {
	fn from(note: Note) -> Self {
		MusicSymbol::Note(note)
	}
}

impl fmt::Display for MusicSymbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MusicSymbol::Start1 => f.write_str(START1),
			MusicSymbol::Start2 => f.write_str(START2),
			MusicSymbol::End => f.write_str(END),
			MusicSymbol::EndMusic => f.write_str(END_MUSIC),
			MusicSymbol::Note(note) => write!(f, "{note}"),
		}
	}
}

impl FromStr for MusicSymbol {
	type Err = GenError;

	fn from_str(s: &str) -> Result<Self> {
		Ok(match s {
			START1 => MusicSymbol::Start1,
			START2 => MusicSymbol::Start2,
			END => MusicSymbol::End,
			END_MUSIC => MusicSymbol::EndMusic,
			_ => MusicSymbol::Note(s.parse()?),
		})
	}
}

impl Symbol for MusicSymbol {
	fn start1() -> Self {
		MusicSymbol::Start1
	}

	fn start2() -> Self {
		MusicSymbol::Start2
	}

	fn end() -> Self {
		MusicSymbol::End
	}

	fn parse(token: &str) -> Result<Self> {
		token.parse()
	}

	fn is_sentinel(&self) -> bool {
		!matches!(self, MusicSymbol::Note(_))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pitch_class_strips_octave() {
		let note = Note::new("C#4", Duration::Quarter).unwrap();
		assert_eq!(note.pitch(), "C#4");
		assert_eq!(note.pitch_class(), "C#");
		assert_eq!(Note::new("A5", Duration::Half).unwrap().pitch_class(), "A");
	}

	#[test]
	fn rejects_malformed_pitches() {
		assert!(Note::new("C", Duration::Quarter).is_err());
		assert!(Note::new("4", Duration::Quarter).is_err());
		assert!(Note::new("", Duration::Quarter).is_err());
	}

	#[test]
	fn duration_values() {
		for duration in Duration::ALL {
			assert_eq!(Duration::try_from(duration.value()).unwrap(), duration);
		}
		assert!(Duration::try_from(3).is_err());
	}

	#[test]
	fn parses_corpus_tokens() {
		let note: MusicSymbol = "E5:-4".parse().unwrap();
		assert_eq!(note, MusicSymbol::Note(Note::new("E5", Duration::DottedQuarter).unwrap()));
		assert_eq!(note.to_string(), "E5:-4");
		assert_eq!("$::$".parse::<MusicSymbol>().unwrap(), MusicSymbol::EndMusic);
		assert_eq!("$:::$".parse::<MusicSymbol>().unwrap(), MusicSymbol::End);
		assert!("E5".parse::<MusicSymbol>().is_err());
		assert!("E5:x".parse::<MusicSymbol>().is_err());
		assert!("E5:5".parse::<MusicSymbol>().is_err());
	}

	#[test]
	fn only_notes_are_not_sentinels() {
		assert!(MusicSymbol::EndMusic.is_sentinel());
		assert!(MusicSymbol::Start1.is_sentinel());
		assert!(!MusicSymbol::from(Note::new("G3", Duration::Whole).unwrap()).is_sentinel());
	}
}
