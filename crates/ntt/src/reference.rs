// Copyright 2025 Irreducible Inc.

//! Simple quadratic-time reference implementation of the transforms for testing.

use zkntt_field::{FftField, TransformElement, Zero};

use crate::config::NTTDir;

/// Evaluates the discrete Fourier transform of `input` directly from its definition.
///
/// `omega` is a primitive root of unity of order `input.len()`. Inputs and outputs are in
/// natural order. The forward transform computes
/// $X_k = \sum_i x_i g^i \omega^{ik}$, the inverse $x_i = n^{-1} g^{-i} \sum_k X_k \omega^{-ik}$.
pub fn naive_transform<F, E>(input: &[E], omega: F, coset_gen: F, dir: NTTDir) -> Vec<E>
where
	F: FftField,
	E: TransformElement<F>,
{
	let n = input.len();
	let (omega, coset) = match dir {
		NTTDir::Forward => (omega, coset_gen),
		NTTDir::Inverse => (
			omega.inverse().expect("root is non-zero"),
			coset_gen.inverse().expect("coset generator is non-zero"),
		),
	};

	let mut shifted = input.to_vec();
	if dir == NTTDir::Forward {
		scale_by_powers(&mut shifted, coset);
	}

	let mut output = (0..n)
		.map(|k| {
			let step = omega.pow([k as u64]);
			let mut twiddle = F::one();
			let mut acc = E::zero();
			for x in &shifted {
				acc = acc + x.scale(twiddle);
				twiddle *= step;
			}
			acc
		})
		.collect::<Vec<_>>();

	if dir == NTTDir::Inverse {
		let n_inv = F::from(n as u64).inverse().expect("size is non-zero");
		scale_by_powers(&mut output, coset);
		for x in &mut output {
			*x = x.scale(n_inv);
		}
	}
	output
}

fn scale_by_powers<F: FftField, E: TransformElement<F>>(data: &mut [E], base: F) {
	let mut power = F::one();
	for x in data {
		*x = x.scale(power);
		power *= base;
	}
}

#[cfg(test)]
mod tests {
	use zkntt_field::{get_root_of_unity, Field, One};

	use super::*;

	type Fr = ark_bn254::Fr;

	#[test]
	fn test_reference_roundtrip() {
		let omega = get_root_of_unity::<Fr>(8).unwrap();
		let coset = Fr::from(5u64);
		let input = (1..=8u64).map(Fr::from).collect::<Vec<_>>();

		let evals = naive_transform(&input, omega, coset, NTTDir::Forward);
		assert_eq!(evals[0], (1..=8u64).map(|i| Fr::from(i) * coset.pow([i - 1])).sum());
		assert_eq!(naive_transform(&evals, omega, coset, NTTDir::Inverse), input);

		let impulse = [Fr::one(), Fr::zero(), Fr::zero(), Fr::zero()];
		let omega4 = get_root_of_unity::<Fr>(4).unwrap();
		assert_eq!(naive_transform(&impulse, omega4, Fr::one(), NTTDir::Forward), [Fr::one(); 4]);
	}
}
