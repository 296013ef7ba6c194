// Copyright 2025 Irreducible Inc.

use zkntt_field::{FftField, TransformElement};
use zkntt_utils::checked_arithmetics::log2_strict;

use crate::{config::NTTDir, error::Error, permutation::Decimation};

/// A radix-2 butterfly network over the multiplicative subgroup generated by a root of unity.
///
/// The network transforms a single slice of power-of-two length no larger than the domain. The
/// element type is generic so the same network runs over scalars and over curve points. Neither
/// method scales the result: the inverse direction only swaps the root for its inverse.
pub trait RadixTwoNTT<F: FftField> {
	/// Base-2 logarithm of the largest supported transform size.
	fn log_domain_size(&self) -> usize;

	/// Twiddle factor `index` of butterfly stage `stage`, see
	/// [`TwiddleAccess`](crate::twiddle::TwiddleAccess).
	fn get_twiddle(&self, stage: usize, index: usize, dir: NTTDir) -> F;

	/// Gentleman-Sande network: natural-order input, bit-reversed output.
	fn decimate_in_frequency<E: TransformElement<F>>(
		&self,
		data: &mut [E],
		dir: NTTDir,
	) -> Result<(), Error>;

	/// Cooley-Tukey network: bit-reversed input, natural-order output.
	fn decimate_in_time<E: TransformElement<F>>(
		&self,
		data: &mut [E],
		dir: NTTDir,
	) -> Result<(), Error>;

	fn transform<E: TransformElement<F>>(
		&self,
		data: &mut [E],
		decimation: Decimation,
		dir: NTTDir,
	) -> Result<(), Error> {
		match decimation {
			Decimation::InFrequency => self.decimate_in_frequency(data, dir),
			Decimation::InTime => self.decimate_in_time(data, dir),
		}
	}
}

/// Checks that `data` is a single slice the domain can transform and returns its log length.
pub fn check_transform_input<E>(log_domain_size: usize, data: &[E]) -> Result<usize, Error> {
	match log2_strict(data.len()) {
		Some(log_len) if log_len <= log_domain_size => Ok(log_len),
		_ => Err(Error::SizeMismatch {
			size: data.len() as i64,
			capacity: 1 << log_domain_size,
		}),
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	#[test]
	fn test_check_transform_input() {
		assert_eq!(check_transform_input(4, &[0u8; 16]).unwrap(), 4);
		assert_eq!(check_transform_input(4, &[0u8; 1]).unwrap(), 0);
		assert_matches!(
			check_transform_input(4, &[0u8; 32]),
			Err(Error::SizeMismatch {
				size: 32,
				capacity: 16
			})
		);
		assert_matches!(check_transform_input(4, &[0u8; 6]), Err(Error::SizeMismatch { .. }));
		assert_matches!(check_transform_input::<u8>(4, &[]), Err(Error::SizeMismatch { .. }));
	}
}
