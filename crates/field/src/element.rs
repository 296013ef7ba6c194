// Copyright 2025 Irreducible Inc.

use std::{
	fmt::Debug,
	ops::{Add, Sub},
};

use ark_ec::short_weierstrass::{Projective, SWCurveConfig};
use ark_ff::{Field, Fp, FpConfig, One, Zero};

use crate::arithmetic::point_scalar_mul;

/// A value the butterfly network can operate on, with scalars from `F`.
///
/// The transforms only need an additive group with a scalar action: field elements act on
/// themselves by multiplication and on curve points by scalar multiplication. The additive
/// identity is [`Zero::zero`], which is the point at infinity for curve points.
pub trait TransformElement<F: Field>:
	Copy
	+ Send
	+ Sync
	+ Debug
	+ Default
	+ PartialEq
	+ Zero
	+ Add<Output = Self>
	+ Sub<Output = Self>
	+ 'static
{
	/// Multiplies the element by a scalar.
	fn scale(self, factor: F) -> Self;
}

impl<P: FpConfig<N>, const N: usize> TransformElement<Fp<P, N>> for Fp<P, N> {
	#[inline]
	fn scale(self, factor: Fp<P, N>) -> Self {
		self * factor
	}
}

impl<P: SWCurveConfig> TransformElement<P::ScalarField> for Projective<P> {
	#[inline]
	fn scale(self, factor: P::ScalarField) -> Self {
		// Twiddles of index zero and unscaled cosets are one; a full double-and-add is wasted there.
		if factor.is_one() {
			self
		} else if factor.is_zero() {
			Self::zero()
		} else {
			point_scalar_mul(self, factor)
		}
	}
}

#[cfg(test)]
mod tests {
	use ark_ec::Group;
	use ark_ff::UniformRand;
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;

	type G1 = ark_bls12_381::G1Projective;
	type Fr = ark_bls12_381::Fr;

	#[test]
	fn test_point_scale_matches_group_law() {
		let mut rng = StdRng::seed_from_u64(0);
		let p = G1::rand(&mut rng);
		let s = Fr::rand(&mut rng);

		assert_eq!(p.scale(Fr::one()), p);
		assert_eq!(p.scale(Fr::zero()), G1::zero());
		assert_eq!(p.scale(s), p * s);
		assert_eq!(p.scale(Fr::from(2u64)), p + p);
	}

	#[test]
	fn test_infinity_is_identity() {
		let g = G1::generator();
		assert_eq!(g + G1::zero(), g);
		assert_eq!(G1::zero().scale(Fr::from(7u64)), G1::zero());
	}

	#[test]
	fn test_scalar_scale_is_multiplication() {
		let mut rng = StdRng::seed_from_u64(1);
		let a = Fr::rand(&mut rng);
		let b = Fr::rand(&mut rng);
		assert_eq!(a.scale(b), a * b);
	}
}
