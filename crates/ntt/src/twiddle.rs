// Copyright 2025 Irreducible Inc.

use auto_impl::auto_impl;
use rayon::prelude::*;
use zkntt_field::{field_inv, FftField, Field};

use crate::{config::NTTDir, error::Error};

/// Powers computed per parallel work item when expanding a root into a table.
const POWERS_CHUNK_LEN: usize = 1 << 12;

/// A trait for accessing the twiddle factors of the radix-2 butterfly network.
///
/// Butterfly stage `s` combines elements `2^s` apart and its `l`-th butterfly of a block uses the
/// twiddle $\omega_{2^{s+1}}^l$, where $\omega_{2^{s+1}}$ is the primitive root of unity of order
/// $2^{s+1}$ derived from the domain root, or its inverse for the inverse transform. Stage numbering
/// does not depend on the transform size, so a table built for a domain of size $2^k$ serves every
/// transform of size up to $2^k$.
///
/// The twiddles can be stored in natural power order (see [`NaturalTwiddleAccess`]), where stage
/// `s` reads a strided subsequence, or stage by stage (see [`StagedTwiddleAccess`]), where every
/// stage reads a contiguous run.
#[auto_impl(&)]
pub trait TwiddleAccess<F: Field> {
	/// Base-2 logarithm of the order of the domain root.
	fn log_n(&self) -> usize;

	/// Twiddle factor `index` of butterfly stage `stage`.
	///
	/// Panics if `stage` is not below `self.log_n()` or `index` is not below `1 << stage`.
	fn get(&self, stage: usize, index: usize, dir: NTTDir) -> F;
}

/// Twiddles stored as the natural powers $\omega^0, \ldots, \omega^{n-1}$ of the domain root and
/// of its inverse.
#[derive(Debug, Clone)]
pub struct NaturalTwiddleAccess<F> {
	log_n: usize,
	forward: Vec<F>,
	inverse: Vec<F>,
}

impl<F: FftField> NaturalTwiddleAccess<F> {
	/// Expands `root`, a root of unity of order `1 << log_n`, into its power tables.
	pub fn generate(root: F, log_n: usize) -> Result<Self, Error> {
		let root_inv = field_inv(root)?;
		Ok(Self {
			log_n,
			forward: expand_powers(root, 1 << log_n),
			inverse: expand_powers(root_inv, 1 << log_n),
		})
	}

	/// Rearranges the tables into the stage-major layout.
	pub fn to_staged(&self) -> StagedTwiddleAccess<F> {
		let len = (1 << self.log_n) - 1;
		let stage_major = |dir| {
			let mut table = Vec::with_capacity(len);
			for stage in 0..self.log_n {
				table.extend((0..1 << stage).map(|index| self.get(stage, index, dir)));
			}
			table
		};
		StagedTwiddleAccess {
			log_n: self.log_n,
			forward: stage_major(NTTDir::Forward),
			inverse: stage_major(NTTDir::Inverse),
		}
	}
}

impl<F: Field> TwiddleAccess<F> for NaturalTwiddleAccess<F> {
	#[inline]
	fn log_n(&self) -> usize {
		self.log_n
	}

	#[inline]
	fn get(&self, stage: usize, index: usize, dir: NTTDir) -> F {
		let table = match dir {
			NTTDir::Forward => &self.forward,
			NTTDir::Inverse => &self.inverse,
		};
		table[index << (self.log_n - stage - 1)]
	}
}

/// Twiddles stored stage by stage: the `2^s` twiddles of stage `s` are contiguous at offset
/// `2^s - 1`, for a total of `n - 1` entries per direction.
#[derive(Debug, Clone)]
pub struct StagedTwiddleAccess<F> {
	log_n: usize,
	forward: Vec<F>,
	inverse: Vec<F>,
}

impl<F: Field> TwiddleAccess<F> for StagedTwiddleAccess<F> {
	#[inline]
	fn log_n(&self) -> usize {
		self.log_n
	}

	#[inline]
	fn get(&self, stage: usize, index: usize, dir: NTTDir) -> F {
		debug_assert!(stage < self.log_n && index < 1 << stage);
		let table = match dir {
			NTTDir::Forward => &self.forward,
			NTTDir::Inverse => &self.inverse,
		};
		table[(1 << stage) - 1 + index]
	}
}

/// Computes `base^0, ..., base^(len - 1)`.
pub(crate) fn expand_powers<F: Field>(base: F, len: usize) -> Vec<F> {
	let mut powers = vec![F::zero(); len];
	powers
		.par_chunks_mut(POWERS_CHUNK_LEN)
		.enumerate()
		.for_each(|(chunk_index, chunk)| {
			let mut power = base.pow([(chunk_index * POWERS_CHUNK_LEN) as u64]);
			for entry in chunk {
				*entry = power;
				power *= base;
			}
		});
	powers
}

#[cfg(test)]
mod tests {
	use zkntt_field::{get_root_of_unity, One};

	use super::*;

	type Fr = ark_bn254::Fr;

	fn stage_root(stage: usize) -> Fr {
		get_root_of_unity::<Fr>(1 << (stage + 1)).unwrap()
	}

	#[test]
	fn test_expand_powers() {
		let base = Fr::from(3u64);
		let powers = expand_powers(base, POWERS_CHUNK_LEN + 5);
		assert_eq!(powers[0], Fr::one());
		assert_eq!(powers[1], base);
		for i in [2, POWERS_CHUNK_LEN - 1, POWERS_CHUNK_LEN, POWERS_CHUNK_LEN + 4] {
			assert_eq!(powers[i], base.pow([i as u64]));
		}
		assert!(expand_powers(base, 0).is_empty());
	}

	#[test]
	fn test_twiddles_are_stage_roots() {
		let log_n = 6;
		let natural =
			NaturalTwiddleAccess::generate(get_root_of_unity::<Fr>(1 << log_n).unwrap(), log_n)
				.unwrap();
		let staged = natural.to_staged();
		assert_eq!(staged.log_n(), log_n);

		for stage in 0..log_n {
			let root = stage_root(stage);
			let root_inv = root.inverse().unwrap();
			for index in 0..1 << stage {
				let expected = root.pow([index as u64]);
				assert_eq!(natural.get(stage, index, NTTDir::Forward), expected);
				assert_eq!(staged.get(stage, index, NTTDir::Forward), expected);
				let expected_inv = root_inv.pow([index as u64]);
				assert_eq!(natural.get(stage, index, NTTDir::Inverse), expected_inv);
				assert_eq!(staged.get(stage, index, NTTDir::Inverse), expected_inv);
			}
		}
		assert_eq!(staged.forward.len(), (1 << log_n) - 1);
		assert_eq!(staged.inverse.len(), (1 << log_n) - 1);
	}

	#[test]
	fn test_trivial_domain() {
		let natural = NaturalTwiddleAccess::generate(Fr::one(), 0).unwrap();
		assert_eq!(natural.forward, [Fr::one()]);
		assert!(natural.to_staged().forward.is_empty());
	}
}
