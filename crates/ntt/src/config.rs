// Copyright 2025 Irreducible Inc.

use std::fmt;

use zkntt_compute::Stream;
use zkntt_field::{Curve, One};
use zkntt_utils::env::boolean_env_flag_set;

use crate::context::ExecutionContext;

/// Direction of a transform.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NTTDir {
	/// Coefficients to evaluations.
	#[default]
	Forward,
	/// Evaluations to coefficients, scaled by `size^-1`.
	Inverse,
}

/// Order of the inputs and outputs of a transform.
///
/// The first letter is the input order, the second the output order: `N` is natural order
/// (`a_0, a_1, a_2, a_3, ...`) and `R` is bit-reversed order (`a_0, a_4, a_2, a_6, ...` for eight
/// elements). Decimation in time corresponds to [`Ordering::RN`] and decimation in frequency to
/// [`Ordering::NR`]; these two run without any permutation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordering {
	#[default]
	NN,
	NR,
	RN,
	RR,
}

impl Ordering {
	/// Cooley-Tukey butterflies, bit-reversed in, natural out.
	pub const DIT: Self = Self::RN;
	/// Gentleman-Sande butterflies, natural in, bit-reversed out.
	pub const DIF: Self = Self::NR;

	pub const fn new(input_reversed: bool, output_reversed: bool) -> Self {
		match (input_reversed, output_reversed) {
			(false, false) => Self::NN,
			(false, true) => Self::NR,
			(true, false) => Self::RN,
			(true, true) => Self::RR,
		}
	}

	pub const fn is_input_reversed(self) -> bool {
		matches!(self, Self::RN | Self::RR)
	}

	pub const fn is_output_reversed(self) -> bool {
		matches!(self, Self::NR | Self::RR)
	}
}

/// Per-call settings of a transform on a curve `C`.
///
/// The configuration borrows the execution context it runs against, so the domain cannot be
/// released or replaced while a configuration is alive.
pub struct NTTConfig<'a, C: Curve> {
	pub ctx: &'a ExecutionContext<C>,
	/// Coset generator. One means no coset shift.
	pub coset_gen: C::Scalar,
	pub ordering: Ordering,
	pub are_inputs_on_device: bool,
	pub are_outputs_on_device: bool,
	/// Number of independent transforms stored back to back in the buffers.
	pub batch_size: i32,
	/// Return once the work is enqueued; the output is valid after the stream is synchronized.
	/// The output must then be a device buffer.
	pub is_async: bool,
	/// Stream to run on. `None` selects the context's stream.
	///
	/// Asynchronous work is ordered only against earlier work on the same stream. A synchronous
	/// call first waits for both this stream and the context's stream.
	pub stream: Option<&'a Stream>,
	/// Reject ECNTT inputs that are not on the curve.
	pub validate_points: bool,
}

impl<'a, C: Curve> NTTConfig<'a, C> {
	/// Default settings: no coset, natural order, host buffers, a single synchronous transform.
	///
	/// Point validation is enabled when `ZKNTT_VALIDATE_POINTS` is set.
	pub fn new(ctx: &'a ExecutionContext<C>) -> Self {
		Self {
			ctx,
			coset_gen: C::Scalar::one(),
			ordering: Ordering::default(),
			are_inputs_on_device: false,
			are_outputs_on_device: false,
			batch_size: 1,
			is_async: false,
			stream: None,
			validate_points: boolean_env_flag_set("ZKNTT_VALIDATE_POINTS"),
		}
	}

	pub fn with_coset_gen(mut self, coset_gen: C::Scalar) -> Self {
		self.coset_gen = coset_gen;
		self
	}

	pub fn with_ordering(mut self, ordering: Ordering) -> Self {
		self.ordering = ordering;
		self
	}

	pub fn with_batch_size(mut self, batch_size: i32) -> Self {
		self.batch_size = batch_size;
		self
	}

	pub fn with_placement(mut self, inputs_on_device: bool, outputs_on_device: bool) -> Self {
		self.are_inputs_on_device = inputs_on_device;
		self.are_outputs_on_device = outputs_on_device;
		self
	}

	/// Makes the call asynchronous on `stream`, or on the context's stream for `None`.
	///
	/// Asynchronous calls need the output on the device, a host output fails with
	/// [`Error::AsyncRequiresDeviceOutput`](crate::Error::AsyncRequiresDeviceOutput).
	pub fn with_async(mut self, stream: Option<&'a Stream>) -> Self {
		self.is_async = true;
		self.stream = stream;
		self
	}

	pub fn with_validate_points(mut self, validate_points: bool) -> Self {
		self.validate_points = validate_points;
		self
	}

	pub(crate) fn stream(&self) -> &'a Stream {
		self.stream.unwrap_or_else(|| self.ctx.stream())
	}
}

impl<C: Curve> Clone for NTTConfig<'_, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<C: Curve> Copy for NTTConfig<'_, C> {}

impl<C: Curve> fmt::Debug for NTTConfig<'_, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NTTConfig")
			.field("curve", &C::NAME)
			.field("coset_gen", &self.coset_gen)
			.field("ordering", &self.ordering)
			.field("are_inputs_on_device", &self.are_inputs_on_device)
			.field("are_outputs_on_device", &self.are_outputs_on_device)
			.field("batch_size", &self.batch_size)
			.field("is_async", &self.is_async)
			.field("validate_points", &self.validate_points)
			.finish_non_exhaustive()
	}
}
