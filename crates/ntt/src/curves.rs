// Copyright 2025 Irreducible Inc.

//! Entry points specialized to each supported curve.

macro_rules! impl_curve_entry_points {
	($module:ident, $curve:ty) => {
		pub mod $module {
			use zkntt_compute::{DeviceVec, HostOrDeviceSlice};

			use crate::{Error, NTTDir};

			pub type ScalarField = zkntt_field::ScalarField<$curve>;
			pub type G1Projective = zkntt_field::ProjectivePoint<$curve>;
			pub type ExecutionContext = crate::ExecutionContext<$curve>;
			pub type NTTConfig<'a> = crate::NTTConfig<'a, $curve>;

			pub fn initialize_domain(
				primitive_root: &ScalarField,
				ctx: &mut ExecutionContext,
				fast_twiddles: bool,
			) -> Result<(), Error> {
				ctx.initialize_domain(*primitive_root, fast_twiddles)
			}

			pub fn release_domain(ctx: &mut ExecutionContext) -> Result<(), Error> {
				ctx.release_domain()
			}

			/// Primitive `n`-th root of unity of the scalar field, for a power of two `n`.
			pub fn get_root_of_unity(n: u64) -> Result<ScalarField, Error> {
				Ok(zkntt_field::get_root_of_unity(n)?)
			}

			pub fn ntt(
				input: &(impl HostOrDeviceSlice<ScalarField> + ?Sized),
				size: i32,
				dir: NTTDir,
				cfg: &NTTConfig<'_>,
				output: &mut (impl HostOrDeviceSlice<ScalarField> + ?Sized),
			) -> Result<(), Error> {
				crate::ntt(input, size, dir, cfg, output)
			}

			pub fn ntt_inplace(
				inout: &mut DeviceVec<ScalarField>,
				size: i32,
				dir: NTTDir,
				cfg: &NTTConfig<'_>,
			) -> Result<(), Error> {
				crate::ntt_inplace(inout, size, dir, cfg)
			}

			pub fn ecntt(
				input: &(impl HostOrDeviceSlice<G1Projective> + ?Sized),
				size: i32,
				dir: NTTDir,
				cfg: &NTTConfig<'_>,
				output: &mut (impl HostOrDeviceSlice<G1Projective> + ?Sized),
			) -> Result<(), Error> {
				crate::ecntt(input, size, dir, cfg, output)
			}

			pub fn ecntt_inplace(
				inout: &mut DeviceVec<G1Projective>,
				size: i32,
				dir: NTTDir,
				cfg: &NTTConfig<'_>,
			) -> Result<(), Error> {
				crate::ecntt_inplace(inout, size, dir, cfg)
			}
		}
	};
}

impl_curve_entry_points!(bn254, zkntt_field::Bn254);
impl_curve_entry_points!(bls12_381, zkntt_field::Bls12_381);
impl_curve_entry_points!(bw6_761, zkntt_field::Bw6_761);
