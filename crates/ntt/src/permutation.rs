// Copyright 2025 Irreducible Inc.

//! Bit-reversal permutations and the mapping from an [`Ordering`] to the butterfly network that
//! realizes it.

use rayon::prelude::*;
use zkntt_utils::checked_arithmetics::{log2_strict, reverse_bits};

use crate::config::Ordering;

/// Butterfly network flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decimation {
	/// Gentleman-Sande: natural-order input, bit-reversed output.
	InFrequency,
	/// Cooley-Tukey: bit-reversed input, natural-order output.
	InTime,
}

/// How a transform with a given [`Ordering`] is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformPlan {
	pub decimation: Decimation,
	/// Whether the kernel output has to be bit-reversed to reach the requested output order.
	pub permute_output: bool,
}

impl From<Ordering> for TransformPlan {
	fn from(ordering: Ordering) -> Self {
		// Each network consumes its input order as given; only the output order may need fixing.
		let (decimation, kernel_output_reversed) = if ordering.is_input_reversed() {
			(Decimation::InTime, false)
		} else {
			(Decimation::InFrequency, true)
		};
		Self {
			decimation,
			permute_output: kernel_output_reversed != ordering.is_output_reversed(),
		}
	}
}

/// The bit-reversal permutation of `1 << log_len` indices.
pub fn bit_reversal_permutation(log_len: usize) -> Vec<usize> {
	(0..1 << log_len).map(|i| reverse_bits(i, log_len)).collect()
}

/// Permutation applied to the kernel output for `ordering`: position `i` of the result takes
/// element `perm[i]` of the kernel output. `None` when no permutation is needed.
pub fn output_permutation(log_len: usize, ordering: Ordering) -> Option<Vec<usize>> {
	TransformPlan::from(ordering)
		.permute_output
		.then(|| bit_reversal_permutation(log_len))
}

/// Position of the `index`-th buffer element in natural order, given the buffer order.
#[inline]
pub fn natural_index(index: usize, log_len: usize, reversed: bool) -> usize {
	if reversed {
		reverse_bits(index, log_len)
	} else {
		index
	}
}

/// Reorders `data` into bit-reversed order in place.
///
/// Panics if the length of `data` is not a power of two.
pub fn bit_reverse_in_place<T>(data: &mut [T]) {
	let log_len = log2_strict(data.len()).expect("length is a power of two");
	for i in 0..data.len() {
		let j = reverse_bits(i, log_len);
		if i < j {
			data.swap(i, j);
		}
	}
}

/// Reorders every `1 << log_len` element slice of `data` into bit-reversed order.
pub fn bit_reverse_slices<T: Send>(data: &mut [T], log_len: usize) {
	data.par_chunks_mut(1 << log_len)
		.for_each(|slice| bit_reverse_in_place(slice));
}
