// Copyright 2025 Irreducible Inc.

//! Stable binary layout of scalars and points.
//!
//! A scalar is its canonical (non-Montgomery) integer value as little-endian `u64` limbs. A point
//! is the three projective coordinates `(X, Y, Z)`, each in the base-field limb layout.

use ark_ec::short_weierstrass::{Projective, SWCurveConfig};
use ark_ff::PrimeField;

use crate::error::Error;

/// Little-endian limbs of the canonical representative of `value`.
pub fn scalar_to_limbs<F: PrimeField>(value: &F) -> Vec<u64> {
	value.into_bigint().as_ref().to_vec()
}

/// Whether `limbs` encode an integer below the field modulus.
pub fn is_in_field<F: PrimeField>(limbs: &[u64]) -> bool {
	scalar_from_limbs::<F>(limbs).is_ok()
}

pub fn scalar_from_limbs<F: PrimeField>(limbs: &[u64]) -> Result<F, Error> {
	let mut repr = F::BigInt::default();
	let expected = repr.as_ref().len();
	if limbs.len() != expected {
		return Err(Error::LimbCountMismatch {
			expected,
			actual: limbs.len(),
		});
	}
	repr.as_mut().copy_from_slice(limbs);
	F::from_bigint(repr).ok_or(Error::NotInField)
}

pub fn point_to_limbs<P>(point: &Projective<P>) -> [Vec<u64>; 3]
where
	P: SWCurveConfig,
	P::BaseField: PrimeField,
{
	[
		scalar_to_limbs(&point.x),
		scalar_to_limbs(&point.y),
		scalar_to_limbs(&point.z),
	]
}

/// Decodes a projective point. Coordinates must be canonical base-field elements; curve
/// membership is not checked here.
pub fn point_from_limbs<P>(x: &[u64], y: &[u64], z: &[u64]) -> Result<Projective<P>, Error>
where
	P: SWCurveConfig,
	P::BaseField: PrimeField,
{
	Ok(Projective::new_unchecked(
		scalar_from_limbs(x)?,
		scalar_from_limbs(y)?,
		scalar_from_limbs(z)?,
	))
}
