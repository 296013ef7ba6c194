// Copyright 2025 Irreducible Inc.

use std::fmt::Debug;

use ark_ec::{
	short_weierstrass::{Projective, SWCurveConfig},
	CurveConfig,
};
use ark_ff::PrimeField;

use crate::element::TransformElement;

/// A pairing-friendly curve whose scalar field and G1 group the transforms run over.
pub trait Curve: Debug + Send + Sync + 'static {
	/// Short name used in logs and entry point modules.
	const NAME: &'static str;

	/// Scalar field of the curve. The NTT runs over this field.
	type Scalar: PrimeField + TransformElement<Self::Scalar>;

	/// G1 curve parameters. The ECNTT runs over the projective points of this group.
	type Config: SWCurveConfig<ScalarField = Self::Scalar>;
}

pub type ScalarField<C> = <C as Curve>::Scalar;
pub type BaseField<C> = <<C as Curve>::Config as CurveConfig>::BaseField;
pub type ProjectivePoint<C> = Projective<<C as Curve>::Config>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bn254;

impl Curve for Bn254 {
	const NAME: &'static str = "bn254";
	type Scalar = ark_bn254::Fr;
	type Config = ark_bn254::g1::Config;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bls12_381;

impl Curve for Bls12_381 {
	const NAME: &'static str = "bls12_381";
	type Scalar = ark_bls12_381::Fr;
	type Config = ark_bls12_381::g1::Config;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bw6_761;

impl Curve for Bw6_761 {
	const NAME: &'static str = "bw6_761";
	type Scalar = ark_bw6_761::Fr;
	type Config = ark_bw6_761::g1::Config;
}

#[cfg(test)]
mod tests {
	use ark_ff::FftField;

	use super::*;

	fn two_adicity<C: Curve>() -> u32 {
		<C::Scalar as FftField>::TWO_ADICITY
	}

	#[test]
	fn test_scalar_fields_support_large_domains() {
		assert_eq!(two_adicity::<Bn254>(), 28);
		assert_eq!(two_adicity::<Bls12_381>(), 32);
		assert_eq!(two_adicity::<Bw6_761>(), 46);
	}
}
