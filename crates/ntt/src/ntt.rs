// Copyright 2025 Irreducible Inc.

use tracing::instrument;
use zkntt_compute::{DeviceVec, HostOrDeviceSlice};
use zkntt_field::{Curve, ScalarField};

use crate::{
	config::{NTTConfig, NTTDir},
	dispatch::{dispatch, dispatch_in_place},
	error::Error,
};

/// Number-theoretic transform of `cfg.batch_size` vectors of `size` scalars each.
///
/// `input` and `output` hold the vectors back to back and must each be `size * batch_size`
/// elements long, placed as `cfg` declares. With `cfg.is_async` the call returns once the work is
/// queued and `output` is valid after the stream is synchronized.
#[instrument(
	skip_all,
	name = "ntt",
	fields(curve = C::NAME, size = size, dir = ?dir, batch_size = cfg.batch_size, ordering = ?cfg.ordering),
	level = "debug"
)]
pub fn ntt<C, I, O>(
	input: &I,
	size: i32,
	dir: NTTDir,
	cfg: &NTTConfig<C>,
	output: &mut O,
) -> Result<(), Error>
where
	C: Curve,
	I: HostOrDeviceSlice<ScalarField<C>> + ?Sized,
	O: HostOrDeviceSlice<ScalarField<C>> + ?Sized,
{
	dispatch(input, size, dir, cfg, output, None)
}

/// [`ntt`] over a device buffer that holds both the input and the output.
#[instrument(
	skip_all,
	name = "ntt_inplace",
	fields(curve = C::NAME, size = size, dir = ?dir, batch_size = cfg.batch_size, ordering = ?cfg.ordering),
	level = "debug"
)]
pub fn ntt_inplace<C: Curve>(
	inout: &mut DeviceVec<ScalarField<C>>,
	size: i32,
	dir: NTTDir,
	cfg: &NTTConfig<C>,
) -> Result<(), Error> {
	dispatch_in_place(inout, size, dir, cfg, None)
}
