// Copyright 2025 Irreducible Inc.


use zkntt_compute::DeviceConfig;
use zkntt_field::{get_root_of_unity, Curve};

use crate::ExecutionContext;

/// A context with a domain of size `1 << log_capacity`.
pub(super) fn initialized_context<C: Curve>(
	log_capacity: usize,
	fast_twiddles: bool,
	num_threads: usize,
) -> ExecutionContext<C> {
	let mut ctx = ExecutionContext::new(DeviceConfig {
		device_id: 0,
		num_threads: Some(num_threads),
	})
	.unwrap();
	let root = get_root_of_unity(1 << log_capacity).unwrap();
	ctx.initialize_domain(root, fast_twiddles).unwrap();
	ctx
}

/// Reorders every `1 << log_len` slice into bit-reversed order.
pub(super) fn reversed_slices<T: Copy + Send>(data: &[T], log_len: usize) -> Vec<T> {
	let mut data = data.to_vec();
	crate::permutation::bit_reverse_slices(&mut data, log_len);
	data
}
