// Copyright 2025 Irreducible Inc.

//! Validation of a transform call against its configuration and placement of the work on the
//! device, synchronously or through a stream.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::trace;
use zkntt_compute::{
	Device, DeviceVec, HostOrDeviceSlice, HostSlice, SharedDeviceBuffer, Stream, TaskError,
};
use zkntt_field::{field_inv, Curve, FftField, TransformElement, Zero};
use zkntt_utils::{bail, checked_arithmetics::log2_strict, ensure};

use crate::{
	config::{NTTConfig, NTTDir, Ordering},
	domain::Domain,
	error::Error,
	permutation::{bit_reverse_in_place, natural_index, TransformPlan},
	radix_two_ntt::RadixTwoNTT,
	twiddle::expand_powers,
};

/// Check run over the transform input before the butterflies, such as curve membership.
pub(crate) type ElementCheck<E> = fn(&[E]) -> Result<(), Error>;

/// The validated shape of a transform call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TransformParams<F> {
	pub log_len: usize,
	pub batch_size: usize,
	pub dir: NTTDir,
	pub ordering: Ordering,
	pub coset_gen: F,
}

impl<F> TransformParams<F> {
	pub fn total_len(&self) -> usize {
		self.batch_size << self.log_len
	}
}

/// Checks `size` and the batch settings of `cfg` against `domain`.
pub(crate) fn check_params<C: Curve>(
	domain: &Domain<C::Scalar>,
	size: i32,
	dir: NTTDir,
	cfg: &NTTConfig<C>,
) -> Result<TransformParams<C::Scalar>, Error> {
	let log_len = usize::try_from(size)
		.ok()
		.and_then(log2_strict)
		.filter(|&log_len| log_len <= domain.log_capacity())
		.ok_or(Error::SizeMismatch {
			size: size as i64,
			capacity: domain.max_size(),
		})?;
	ensure!(
		cfg.batch_size >= 1,
		Error::InvalidBatchSize {
			batch_size: cfg.batch_size
		}
	);
	let batch_size = cfg.batch_size as usize;
	ensure!(
		batch_size.checked_shl(log_len as u32).map(|total| total >> log_len) == Some(batch_size),
		Error::BatchTooLarge {
			size: 1 << log_len,
			batch_size
		}
	);
	ensure!(!cfg.coset_gen.is_zero(), Error::ZeroCosetGenerator);

	Ok(TransformParams {
		log_len,
		batch_size,
		dir,
		ordering: cfg.ordering,
		coset_gen: cfg.coset_gen,
	})
}

fn check_buffer<E>(
	name: &'static str,
	buffer: &(impl HostOrDeviceSlice<E> + ?Sized),
	expect_on_device: bool,
	expected_len: usize,
	device: &Device,
) -> Result<(), Error> {
	ensure!(
		buffer.is_on_device() == expect_on_device,
		Error::PlacementMismatch {
			buffer: name,
			on_device: buffer.is_on_device(),
		}
	);
	ensure!(
		buffer.len() == expected_len,
		Error::BufferLengthMismatch {
			buffer: name,
			expected: expected_len,
			actual: buffer.len(),
		}
	);
	if let Some(device_buffer) = buffer.as_device() {
		device.check_owns(device_buffer)?;
	}
	Ok(())
}

/// Resolves the domain, the transform shape and the stream of a call.
fn prepare<'a, C: Curve>(
	size: i32,
	dir: NTTDir,
	cfg: &NTTConfig<'a, C>,
) -> Result<(&'a Arc<Domain<C::Scalar>>, TransformParams<C::Scalar>, &'a Stream), Error> {
	let domain = cfg.ctx.domain()?;
	let params = check_params(domain, size, dir, cfg)?;
	let stream = cfg.stream();
	ensure!(
		stream.device_id() == cfg.ctx.device_id(),
		Error::ForeignStream {
			device_id: cfg.ctx.device_id(),
			stream_device: stream.device_id(),
		}
	);
	Ok((domain, params, stream))
}

/// Runs the transform described by `cfg` from `input` into `output`.
///
/// Host input is staged into device memory and host output is produced from a device scratch
/// buffer; the caller's input is never written. A synchronous call first drains the context's
/// stream and the configured one, so it observes the results of earlier asynchronous calls and
/// reports their failure. An asynchronous call requires device output.
pub(crate) fn dispatch<C, E, I, O>(
	input: &I,
	size: i32,
	dir: NTTDir,
	cfg: &NTTConfig<C>,
	output: &mut O,
	check: Option<ElementCheck<E>>,
) -> Result<(), Error>
where
	C: Curve,
	E: TransformElement<C::Scalar>,
	I: HostOrDeviceSlice<E> + ?Sized,
	O: HostOrDeviceSlice<E> + ?Sized,
{
	let (domain, params, stream) = prepare(size, dir, cfg)?;
	let device = cfg.ctx.device();
	check_buffer("input", input, cfg.are_inputs_on_device, params.total_len(), device)?;
	check_buffer("output", output, cfg.are_outputs_on_device, params.total_len(), device)?;

	if cfg.is_async {
		let Some(output) = output.as_device_mut() else {
			bail!(Error::AsyncRequiresDeviceOutput);
		};
		let source = if let Some(buffer) = input.as_device() {
			buffer.share()
		} else if let Some(host) = input.as_host() {
			if let Some(check) = check {
				device.install(|| check(host))?;
			}
			device.alloc_from_host(HostSlice::from_slice(host))?.share()
		} else {
			bail!(Error::PlacementMismatch {
				buffer: "input",
				on_device: false,
			});
		};
		// Host input was checked above; device input is only readable once earlier work is done.
		let check = if input.is_on_device() { check } else { None };
		return enqueue(stream, device, domain, source, output.share(), params, check);
	}

	drain_streams(cfg, stream)?;
	if let Some(buffer) = output.as_device_mut() {
		let mut data = buffer.write()?;
		load_input(input, &mut data)?;
		run_on_device(device, domain, &mut data, &params, check)
	} else if let Some(host) = output.as_host_mut() {
		let mut scratch = device.alloc::<E>(host.len())?;
		{
			let mut data = scratch.write()?;
			load_input(input, &mut data)?;
			run_on_device(device, domain, &mut data, &params, check)?;
		}
		scratch.copy_to_host(HostSlice::from_mut_slice(host))?;
		Ok(())
	} else {
		bail!(Error::PlacementMismatch {
			buffer: "output",
			on_device: false,
		});
	}
}

/// Runs the transform described by `cfg` over a device buffer in place.
pub(crate) fn dispatch_in_place<C, E>(
	inout: &mut DeviceVec<E>,
	size: i32,
	dir: NTTDir,
	cfg: &NTTConfig<C>,
	check: Option<ElementCheck<E>>,
) -> Result<(), Error>
where
	C: Curve,
	E: TransformElement<C::Scalar>,
{
	let (domain, params, stream) = prepare(size, dir, cfg)?;
	let device = cfg.ctx.device();
	check_buffer("input", &*inout, cfg.are_inputs_on_device, params.total_len(), device)?;
	check_buffer("output", &*inout, cfg.are_outputs_on_device, params.total_len(), device)?;

	if cfg.is_async {
		let buffer = inout.share();
		return enqueue(stream, device, domain, buffer.clone(), buffer, params, check);
	}

	drain_streams(cfg, stream)?;
	let mut data = inout.write()?;
	run_on_device(device, domain, &mut data, &params, check)
}

/// Waits for the context's stream and for `stream` when it is a different one.
fn drain_streams<C: Curve>(cfg: &NTTConfig<C>, stream: &Stream) -> Result<(), Error> {
	let ctx_stream = cfg.ctx.stream();
	ctx_stream.synchronize()?;
	if !std::ptr::eq(ctx_stream, stream) {
		stream.synchronize()?;
	}
	Ok(())
}

fn load_input<E: Copy>(
	input: &(impl HostOrDeviceSlice<E> + ?Sized),
	dst: &mut [E],
) -> Result<(), Error> {
	if let Some(buffer) = input.as_device() {
		dst.copy_from_slice(&buffer.read()?);
	} else if let Some(host) = input.as_host() {
		dst.copy_from_slice(host);
	} else {
		bail!(Error::PlacementMismatch {
			buffer: "input",
			on_device: false,
		});
	}
	Ok(())
}

fn enqueue<F, E>(
	stream: &Stream,
	device: &Device,
	domain: &Arc<Domain<F>>,
	input: SharedDeviceBuffer<E>,
	output: SharedDeviceBuffer<E>,
	params: TransformParams<F>,
	check: Option<ElementCheck<E>>,
) -> Result<(), Error>
where
	F: FftField,
	E: TransformElement<F>,
{
	let device = device.clone();
	let domain = Arc::clone(domain);
	stream.enqueue(move || {
		let run = || -> Result<(), Error> {
			let mut data = output.write()?;
			if !input.aliases(&output) {
				data.copy_from_slice(&input.read()?);
			}
			run_on_device(&device, &domain, &mut data, &params, check)
		};
		run().map_err(|err| Box::new(err) as TaskError)
	})?;
	trace!(log_len = params.log_len, batch_size = params.batch_size, "transform enqueued");
	Ok(())
}

fn run_on_device<F, E>(
	device: &Device,
	domain: &Domain<F>,
	data: &mut [E],
	params: &TransformParams<F>,
	check: Option<ElementCheck<E>>,
) -> Result<(), Error>
where
	F: FftField,
	E: TransformElement<F>,
{
	device.install(|| {
		if let Some(check) = check {
			check(data)?;
		}
		transform_in_place(domain, data, params)
	})
}

/// Scaling applied to every element of a slice, indexed by natural position.
enum Scaling<F> {
	Identity,
	Uniform(F),
	ByNaturalIndex(Vec<F>),
}

impl<F: FftField> Scaling<F> {
	fn apply<E: TransformElement<F>>(&self, slice: &mut [E], log_len: usize, reversed: bool) {
		match self {
			Scaling::Identity => {}
			Scaling::Uniform(factor) => slice.par_iter_mut().for_each(|x| *x = x.scale(*factor)),
			Scaling::ByNaturalIndex(factors) => {
				slice.par_iter_mut().enumerate().for_each(|(i, x)| {
					*x = x.scale(factors[natural_index(i, log_len, reversed)]);
				})
			}
		}
	}
}

/// Transforms every slice of `data` in place.
///
/// The forward direction multiplies input element `i` (natural index) by `coset_gen^i` before the
/// butterflies. The inverse direction multiplies output element `i` by
/// `size^-1 * coset_gen^-i` after them.
pub(crate) fn transform_in_place<F, E>(
	domain: &Domain<F>,
	data: &mut [E],
	params: &TransformParams<F>,
) -> Result<(), Error>
where
	F: FftField,
	E: TransformElement<F>,
{
	let TransformParams {
		log_len,
		dir,
		ordering,
		coset_gen,
		..
	} = *params;
	debug_assert_eq!(data.len(), params.total_len());

	let plan = TransformPlan::from(ordering);
	let has_coset = !coset_gen.is_one();
	let (pre, post) = match dir {
		NTTDir::Forward if has_coset => {
			(Scaling::ByNaturalIndex(expand_powers(coset_gen, 1 << log_len)), Scaling::Identity)
		}
		NTTDir::Forward => (Scaling::Identity, Scaling::Identity),
		NTTDir::Inverse if has_coset => {
			let size_inv = domain.size_inverse(log_len);
			let mut factors = expand_powers(field_inv(coset_gen)?, 1 << log_len);
			factors.par_iter_mut().for_each(|factor| *factor *= size_inv);
			(Scaling::Identity, Scaling::ByNaturalIndex(factors))
		}
		NTTDir::Inverse if log_len == 0 => (Scaling::Identity, Scaling::Identity),
		NTTDir::Inverse => (Scaling::Identity, Scaling::Uniform(domain.size_inverse(log_len))),
	};

	data.par_chunks_mut(1 << log_len)
		.enumerate()
		.try_for_each(|(index, slice)| -> Result<(), Error> {
			trace!(slice = index, log_len, "transforming slice");
			pre.apply(slice, log_len, ordering.is_input_reversed());
			domain.ntt().transform(slice, plan.decimation, dir)?;
			if plan.permute_output {
				bit_reverse_in_place(slice);
			}
			post.apply(slice, log_len, ordering.is_output_reversed());
			Ok(())
		})
}
