use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// First start sentinel, prefixed to every training sequence.
pub const START1: &str = "^::^";
/// Second start sentinel, follows `START1`.
pub const START2: &str = "^:::^";
/// End sentinel, appended to every training sequence.
pub const END: &str = "$:::$";
/// End of a musical line. Only note corpora contain it.
pub const END_MUSIC: &str = "$::$";

/// An element of a training or generated sequence.
///
/// Symbols are opaque to the models: they are only compared, hashed,
/// ordered (for stable sampling order and sorted dumps) and displayed.
/// Each symbol alphabet provides its own sentinels.
///
/// `Send + Sync` lets trained tables be shared between readers and built
/// by worker threads.
pub trait Symbol:
	Clone + Eq + Hash + Ord + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
	fn start1() -> Self;
	fn start2() -> Self;
	fn end() -> Self;

	/// Parses one whitespace-free corpus token.
	fn parse(token: &str) -> Result<Self>;

	/// True for the sentinels added by framing (and any alphabet specific
	/// ones such as `END_MUSIC`).
	fn is_sentinel(&self) -> bool {
		*self == Self::start1() || *self == Self::start2() || *self == Self::end()
	}

	/// Returns `[START1, START2]`, the prefix every generated sequence starts with.
	fn start_context() -> Vec<Self> {
		vec![Self::start1(), Self::start2()]
	}
}

/// Words (and punctuation) are plain strings.
impl Symbol for String {
	fn start1() -> Self {
		START1.to_owned()
	}

	fn start2() -> Self {
		START2.to_owned()
	}

	fn end() -> Self {
		END.to_owned()
	}

	fn parse(token: &str) -> Result<Self> {
		Ok(token.to_owned())
	}
}
