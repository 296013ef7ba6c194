// Copyright 2025 Irreducible Inc.

use std::fmt;

use zkntt_field::{field_inv, FftField, Field, One};

use crate::{
	dynamic_dispatch::{DynamicDispatchNTT, NttOptions},
	error::Error,
	radix_two_ntt::RadixTwoNTT,
};

/// The precomputed state of all transforms up to a maximum size: the twiddle tables derived
/// from a primitive root of unity and the inverse of every supported size.
///
/// A domain is immutable once built.
pub struct Domain<F: FftField> {
	root: F,
	ntt: DynamicDispatchNTT<F>,
	/// `size_inverses[k]` is `2^-k`.
	size_inverses: Vec<F>,
}

impl<F: FftField> Domain<F> {
	/// Builds the domain of the subgroup generated by `root`.
	///
	/// The capacity is the order of `root`, which must be a power of two.
	pub fn new(root: F, options: NttOptions) -> Result<Self, Error> {
		let ntt = DynamicDispatchNTT::new(root, options)?;
		let two_inv = field_inv(F::one().double())?;
		let size_inverses = std::iter::successors(Some(F::one()), |inv| Some(*inv * two_inv))
			.take(ntt.log_domain_size() + 1)
			.collect();
		Ok(Self {
			root,
			ntt,
			size_inverses,
		})
	}

	pub fn root(&self) -> F {
		self.root
	}

	pub fn log_capacity(&self) -> usize {
		self.ntt.log_domain_size()
	}

	/// The largest supported transform size.
	pub fn max_size(&self) -> usize {
		1 << self.log_capacity()
	}

	pub fn has_fast_twiddles(&self) -> bool {
		self.ntt.has_fast_twiddles()
	}

	pub fn ntt(&self) -> &DynamicDispatchNTT<F> {
		&self.ntt
	}

	/// The inverse of `2^log_len`.
	///
	/// Panics if `log_len` exceeds the capacity.
	pub fn size_inverse(&self, log_len: usize) -> F {
		self.size_inverses[log_len]
	}
}

impl<F: FftField> fmt::Debug for Domain<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Domain")
			.field("log_capacity", &self.log_capacity())
			.field("fast_twiddles", &self.has_fast_twiddles())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use zkntt_field::get_root_of_unity;

	use super::*;
	use crate::dynamic_dispatch::ThreadingSettings;

	type Fr = ark_bn254::Fr;

	#[test]
	fn test_capacity_and_inverses() {
		let root = get_root_of_unity::<Fr>(1 << 7).unwrap();
		let domain = Domain::new(root, NttOptions::default()).unwrap();
		assert_eq!(domain.root(), root);
		assert_eq!(domain.log_capacity(), 7);
		assert_eq!(domain.max_size(), 128);
		assert!(!domain.has_fast_twiddles());
		for log_len in 0..=7 {
			assert_eq!(domain.size_inverse(log_len) * Fr::from(1u64 << log_len), Fr::one());
		}
	}

	#[test]
	fn test_fast_twiddles_domain() {
		let root = get_root_of_unity::<Fr>(1 << 3).unwrap();
		let domain = Domain::new(
			root,
			NttOptions {
				fast_twiddles: true,
				thread_settings: ThreadingSettings::ExplicitThreadsCount { log_threads: 1 },
			},
		)
		.unwrap();
		assert!(domain.has_fast_twiddles());
		assert_eq!(domain.ntt().get_twiddle(2, 1, crate::NTTDir::Forward), root);
	}

	#[test]
	fn test_invalid_roots() {
		let non_root = Fr::from(7u64);
		assert!(non_root.pow([1u64 << 28]) != Fr::one());
		assert_matches!(Domain::new(non_root, NttOptions::default()), Err(Error::InvalidRoot));
	}
}
