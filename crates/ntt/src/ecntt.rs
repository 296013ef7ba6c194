// Copyright 2025 Irreducible Inc.

use ark_ec::short_weierstrass::{Projective, SWCurveConfig};
use rayon::prelude::*;
use tracing::instrument;
use zkntt_compute::{DeviceVec, HostOrDeviceSlice};
use zkntt_field::{is_on_curve, Curve, ProjectivePoint};

use crate::{
	config::{NTTConfig, NTTDir},
	dispatch::{dispatch, dispatch_in_place, ElementCheck},
	error::Error,
};

/// The transform of [`ntt`](crate::ntt) over G1 points in projective coordinates.
///
/// Twiddle multiplication is scalar multiplication and the point at infinity is the additive
/// identity. With `cfg.validate_points` every input point is checked to be on the curve first.
#[instrument(
	skip_all,
	name = "ecntt",
	fields(curve = C::NAME, size = size, dir = ?dir, batch_size = cfg.batch_size, ordering = ?cfg.ordering),
	level = "debug"
)]
pub fn ecntt<C, I, O>(
	input: &I,
	size: i32,
	dir: NTTDir,
	cfg: &NTTConfig<C>,
	output: &mut O,
) -> Result<(), Error>
where
	C: Curve,
	I: HostOrDeviceSlice<ProjectivePoint<C>> + ?Sized,
	O: HostOrDeviceSlice<ProjectivePoint<C>> + ?Sized,
{
	dispatch(input, size, dir, cfg, output, point_check(cfg))
}

/// [`ecntt`] over a device buffer that holds both the input and the output.
#[instrument(
	skip_all,
	name = "ecntt_inplace",
	fields(curve = C::NAME, size = size, dir = ?dir, batch_size = cfg.batch_size, ordering = ?cfg.ordering),
	level = "debug"
)]
pub fn ecntt_inplace<C: Curve>(
	inout: &mut DeviceVec<ProjectivePoint<C>>,
	size: i32,
	dir: NTTDir,
	cfg: &NTTConfig<C>,
) -> Result<(), Error> {
	dispatch_in_place(inout, size, dir, cfg, point_check(cfg))
}

fn point_check<C: Curve>(cfg: &NTTConfig<C>) -> Option<ElementCheck<ProjectivePoint<C>>> {
	cfg.validate_points
		.then_some(check_points::<C::Config> as ElementCheck<ProjectivePoint<C>>)
}

/// Fails with the position of the first point that is not on the curve.
pub fn check_points<P: SWCurveConfig>(points: &[Projective<P>]) -> Result<(), Error> {
	match points.par_iter().position_first(|point| !is_on_curve(point)) {
		Some(index) => Err(Error::InvalidPoint { index }),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use ark_ec::Group;
	use assert_matches::assert_matches;
	use zkntt_field::Zero;

	use super::*;

	type G1 = ark_bn254::G1Projective;

	#[test]
	fn test_check_points() {
		let g = G1::generator();
		let off_curve = G1::new_unchecked(g.x, g.y + g.y, g.z);

		check_points(&[g, G1::zero(), g + g]).unwrap();
		check_points::<ark_bn254::g1::Config>(&[]).unwrap();
		assert_matches!(
			check_points(&[g, g, off_curve, off_curve]),
			Err(Error::InvalidPoint { index: 2 })
		);
	}
}
