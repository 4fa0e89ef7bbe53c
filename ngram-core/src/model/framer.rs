use super::symbol::Symbol;

/// Returns a copy of `sequence` bounded by sentinels:
/// `[START1, START2] + sequence + [END]`.
pub fn frame_sequence<T: Symbol>(sequence: &[T]) -> Vec<T> {
	let mut framed = Vec::with_capacity(sequence.len() + 3);
	framed.push(T::start1());
	framed.push(T::start2());
	framed.extend_from_slice(sequence);
	framed.push(T::end());
	framed
}

/// Frames every sequence of a corpus.
///
/// The input is left untouched; empty sequences become
/// `[START1, START2, END]` and an empty corpus stays empty.
pub fn frame<T: Symbol>(sequences: &[Vec<T>]) -> Vec<Vec<T>> {
	sequences.iter().map(|sequence| frame_sequence(sequence)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::symbol::{END, START1, START2};

	fn words(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|t| (*t).to_owned()).collect()
	}

	#[test]
	fn adds_three_sentinels() {
		let corpus = vec![words(&["a", "b"])];
		assert_eq!(frame(&corpus), vec![words(&[START1, START2, "a", "b", END])]);
		// Input is not mutated.
		assert_eq!(corpus, vec![words(&["a", "b"])]);
	}

	#[test]
	fn empty_inputs() {
		let empty: Vec<Vec<String>> = Vec::new();
		assert!(frame(&empty).is_empty());
		assert_eq!(frame(&[Vec::<String>::new()]), vec![words(&[START1, START2, END])]);
	}

	#[test]
	fn keeps_order_of_every_sequence() {
		let corpus = vec![words(&["the", "quick", "brown", "fox"]), words(&["the", "lazy", "dog"])];
		let framed = frame(&corpus);
		assert_eq!(framed.len(), 2);
		for (raw, framed) in corpus.iter().zip(&framed) {
			assert_eq!(framed.len(), raw.len() + 3);
			assert_eq!(&framed[2..framed.len() - 1], raw.as_slice());
		}
	}
}
