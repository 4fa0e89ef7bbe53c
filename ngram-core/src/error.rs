use thiserror::Error;

/// Every failure the crate can report.
///
/// `InvalidDistribution` and `NoSuchContext` are the two generation errors:
/// neither is retried internally, the caller decides whether to stop the
/// sequence or fall back to a lower order model.
#[derive(Debug, Error)]
pub enum GenError {
	/// Sampling over an empty, zero-total or overflowing set of weights,
	/// or a note request with an empty pitch set.
	#[error("invalid distribution: {0}")]
	InvalidDistribution(String),

	/// The trailing context of the sequence is unknown to the model.
	#[error("no such context: [{0}]")]
	NoSuchContext(String),

	#[error("n-gram order must be >= 1, got {0}")]
	InvalidOrder(usize),

	#[error("n-gram order mismatch: {0} != {1}")]
	OrderMismatch(usize, usize),

	#[error("invalid note `{0}`")]
	InvalidNote(String),

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Codec(#[from] postcard::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
