use rand::Rng;

use crate::error::{GenError, Result};

/// Picks one candidate with probability `weight / total`.
///
/// Candidates are consumed in the given order to build the cumulative sum of
/// their weights; a random integer `r` is drawn in `[0, total)` and the first
/// candidate whose cumulative weight is strictly greater than `r` is returned.
/// Any fixed order gives the same distribution, a stable one makes seeded
/// runs reproducible.
///
/// The random source is supplied by the caller.
///
/// # Errors
/// Returns `InvalidDistribution` when there are no candidates, when all
/// weights are zero, or when the total does not fit in a `u64`.
pub fn sample<'a, T, I, R>(candidates: I, rng: &mut R) -> Result<&'a T>
where
	T: ?Sized,
	I: IntoIterator<Item = (&'a T, u64)>,
	R: Rng + ?Sized,
{
	let mut tokens = Vec::new();
	let mut cumulative = Vec::new();
	let mut total: u64 = 0;
	for (token, count) in candidates {
		// the previous total plus the current weight
		total = total
			.checked_add(count)
			.ok_or_else(|| GenError::InvalidDistribution("total weight overflows u64".to_owned()))?;
		tokens.push(token);
		cumulative.push(total);
	}

	if tokens.is_empty() {
		return Err(GenError::InvalidDistribution("no candidates".to_owned()));
	}
	if total == 0 {
		return Err(GenError::InvalidDistribution("total weight is zero".to_owned()));
	}

	let r = rng.random_range(0..total);
	// `cumulative` is non-decreasing and its last value is `total > r`.
	let index = cumulative.partition_point(|&c| c <= r);
	Ok(tokens[index])
}
