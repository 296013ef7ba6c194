// Copyright 2025 Irreducible Inc.

use ark_ff::FftField;

use crate::error::Error;

/// Base-2 logarithm of the multiplicative order of `root`, if that order is a power of two.
///
/// Returns `None` when `root` is not a root of unity of power-of-two order in `F`, which includes
/// zero and any element whose order exceeds `2^F::TWO_ADICITY`.
pub fn log_root_order<F: FftField>(root: F) -> Option<usize> {
	let mut power = root;
	for log_order in 0..=F::TWO_ADICITY as usize {
		if power.is_one() {
			return Some(log_order);
		}
		power.square_in_place();
	}
	None
}

/// Returns a primitive `n`-th root of unity of `F`.
///
/// `n` must be a power of two no larger than `2^F::TWO_ADICITY`.
pub fn get_root_of_unity<F: FftField>(n: u64) -> Result<F, Error> {
	if !n.is_power_of_two() || n.trailing_zeros() > F::TWO_ADICITY {
		return Err(Error::NoRootOfUnity { order: n });
	}
	F::get_root_of_unity(n).ok_or(Error::NoRootOfUnity { order: n })
}
