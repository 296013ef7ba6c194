// Copyright 2025 Irreducible Inc.

//! The arithmetic operations the engine consumes from the backend.

use ark_ec::{
	short_weierstrass::{Projective, SWCurveConfig},
	CurveGroup,
};
use ark_ff::Field;

use crate::error::Error;

#[inline]
pub fn field_add<F: Field>(lhs: F, rhs: F) -> F {
	lhs + rhs
}

#[inline]
pub fn field_mul<F: Field>(lhs: F, rhs: F) -> F {
	lhs * rhs
}

pub fn field_inv<F: Field>(value: F) -> Result<F, Error> {
	value.inverse().ok_or(Error::ZeroInverse)
}

#[inline]
pub fn point_add<P: SWCurveConfig>(lhs: Projective<P>, rhs: Projective<P>) -> Projective<P> {
	lhs + rhs
}

#[inline]
pub fn point_scalar_mul<P: SWCurveConfig>(
	point: Projective<P>,
	scalar: P::ScalarField,
) -> Projective<P> {
	point * scalar
}

/// Curve membership check: the point satisfies the curve equation and lies in the prime-order
/// subgroup. The point at infinity is a member.
pub fn is_on_curve<P: SWCurveConfig>(point: &Projective<P>) -> bool {
	let affine = point.into_affine();
	affine.is_on_curve() && affine.is_in_correct_subgroup_assuming_on_curve()
}
