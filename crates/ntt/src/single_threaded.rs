// Copyright 2025 Irreducible Inc.

use std::{marker::PhantomData, ops::Range};

use zkntt_field::{log_root_order, FftField, TransformElement};

use super::{
	error::Error,
	radix_two_ntt::{check_transform_input, RadixTwoNTT},
	twiddle::{NaturalTwiddleAccess, StagedTwiddleAccess, TwiddleAccess},
};
use crate::config::NTTDir;

/// Implementation of `RadixTwoNTT` that performs the computation single-threaded.
#[derive(Debug)]
pub struct SingleThreadedNTT<F: FftField, TA: TwiddleAccess<F> = NaturalTwiddleAccess<F>> {
	twiddles: TA,
	_marker: PhantomData<F>,
}

impl<F: FftField> SingleThreadedNTT<F> {
	/// Constructs an NTT over the subgroup generated by `root`, which must have power-of-two
	/// order. The order of `root` is the domain size.
	pub fn new(root: F) -> Result<Self, Error> {
		let log_n = log_root_order(root).ok_or(Error::InvalidRoot)?;
		Ok(Self::with_twiddle_access(NaturalTwiddleAccess::generate(root, log_n)?))
	}

	/// Switches to the stage-major twiddle layout.
	pub fn fast_twiddles(&self) -> SingleThreadedNTT<F, StagedTwiddleAccess<F>> {
		SingleThreadedNTT::with_twiddle_access(self.twiddles.to_staged())
	}
}

impl<F: FftField, TA: TwiddleAccess<F>> SingleThreadedNTT<F, TA> {
	const fn with_twiddle_access(twiddles: TA) -> Self {
		Self {
			twiddles,
			_marker: PhantomData,
		}
	}

	pub fn twiddles(&self) -> &TA {
		&self.twiddles
	}
}

impl<F, TA> RadixTwoNTT<F> for SingleThreadedNTT<F, TA>
where
	F: FftField,
	TA: TwiddleAccess<F>,
{
	fn log_domain_size(&self) -> usize {
		self.twiddles.log_n()
	}

	fn get_twiddle(&self, stage: usize, index: usize, dir: NTTDir) -> F {
		self.twiddles.get(stage, index, dir)
	}

	fn decimate_in_frequency<E: TransformElement<F>>(
		&self,
		data: &mut [E],
		dir: NTTDir,
	) -> Result<(), Error> {
		let log_len = check_transform_input(self.log_domain_size(), data)?;
		decimate_in_frequency_stages(&self.twiddles, data, 0..log_len, dir);
		Ok(())
	}

	fn decimate_in_time<E: TransformElement<F>>(
		&self,
		data: &mut [E],
		dir: NTTDir,
	) -> Result<(), Error> {
		let log_len = check_transform_input(self.log_domain_size(), data)?;
		decimate_in_time_stages(&self.twiddles, data, 0..log_len, dir);
		Ok(())
	}
}

/// Gentleman-Sande butterfly: `(u, v) -> (u + v, (u - v) * t)`.
#[inline]
pub(crate) fn gs_butterfly<F: FftField, E: TransformElement<F>>(u: &mut E, v: &mut E, twiddle: F) {
	let (a, b) = (*u, *v);
	*u = a + b;
	*v = (a - b).scale(twiddle);
}

/// Cooley-Tukey butterfly: `(u, v) -> (u + v * t, u - v * t)`.
#[inline]
pub(crate) fn ct_butterfly<F: FftField, E: TransformElement<F>>(u: &mut E, v: &mut E, twiddle: F) {
	let a = *u;
	let b = v.scale(twiddle);
	*u = a + b;
	*v = a - b;
}

/// Runs the Gentleman-Sande `stages` over `data`, highest stage first.
///
/// Every stage in the range must fit within `data`, whose length is a multiple of
/// `2^stages.end`.
pub(crate) fn decimate_in_frequency_stages<F, E>(
	twiddles: &impl TwiddleAccess<F>,
	data: &mut [E],
	stages: Range<usize>,
	dir: NTTDir,
) where
	F: FftField,
	E: TransformElement<F>,
{
	for stage in stages.rev() {
		let half = 1 << stage;
		for block in data.chunks_exact_mut(2 * half) {
			let (lo, hi) = block.split_at_mut(half);
			for (index, (u, v)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
				gs_butterfly(u, v, twiddles.get(stage, index, dir));
			}
		}
	}
}

/// Runs the Cooley-Tukey `stages` over `data`, lowest stage first.
pub(crate) fn decimate_in_time_stages<F, E>(
	twiddles: &impl TwiddleAccess<F>,
	data: &mut [E],
	stages: Range<usize>,
	dir: NTTDir,
) where
	F: FftField,
	E: TransformElement<F>,
{
	for stage in stages {
		let half = 1 << stage;
		for block in data.chunks_exact_mut(2 * half) {
			let (lo, hi) = block.split_at_mut(half);
			for (index, (u, v)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
				ct_butterfly(u, v, twiddles.get(stage, index, dir));
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use zkntt_field::{get_root_of_unity, One, Zero};

	use super::*;

	type Fr = ark_bls12_381::Fr;

	#[test]
	fn test_domain_size_is_root_order() {
		let ntt = SingleThreadedNTT::new(get_root_of_unity::<Fr>(1 << 5).unwrap()).unwrap();
		assert_eq!(ntt.log_domain_size(), 5);
		assert_eq!(ntt.fast_twiddles().log_domain_size(), 5);

		let trivial = SingleThreadedNTT::new(Fr::one()).unwrap();
		assert_eq!(trivial.log_domain_size(), 0);
	}

	#[test]
	fn test_rejects_non_roots() {
		assert_matches!(SingleThreadedNTT::new(Fr::zero()), Err(Error::InvalidRoot));
		assert_matches!(SingleThreadedNTT::new(Fr::from(5u64)), Err(Error::InvalidRoot));
	}

	#[test]
	fn test_size_two_butterfly() {
		let ntt = SingleThreadedNTT::new(get_root_of_unity::<Fr>(4).unwrap()).unwrap();
		let (a, b) = (Fr::from(3u64), Fr::from(10u64));

		let mut data = [a, b];
		ntt.decimate_in_frequency(&mut data, NTTDir::Forward).unwrap();
		assert_eq!(data, [a + b, a - b]);

		let mut data = [a, b];
		ntt.decimate_in_time(&mut data, NTTDir::Inverse).unwrap();
		assert_eq!(data, [a + b, a - b]);
	}

	#[test]
	fn test_networks_are_inverse_up_to_scale() {
		let ntt = SingleThreadedNTT::new(get_root_of_unity::<Fr>(1 << 4).unwrap()).unwrap();
		let original = (0..16u64).map(Fr::from).collect::<Vec<_>>();

		let mut data = original.clone();
		ntt.decimate_in_frequency(&mut data, NTTDir::Forward).unwrap();
		ntt.decimate_in_time(&mut data, NTTDir::Inverse).unwrap();

		let scale = Fr::from(16u64);
		assert_eq!(data, original.iter().map(|x| *x * scale).collect::<Vec<_>>());
	}
}
