// Copyright 2025 Irreducible Inc.

use rayon::prelude::*;
use zkntt_field::{FftField, TransformElement};

use super::{
	error::Error,
	radix_two_ntt::{check_transform_input, RadixTwoNTT},
	single_threaded::{self, ct_butterfly, gs_butterfly, SingleThreadedNTT},
	twiddle::{NaturalTwiddleAccess, TwiddleAccess},
};
use crate::config::NTTDir;

/// Implementation of `RadixTwoNTT` that performs the computation multithreaded.
///
/// The top `log_max_threads` stages have fewer blocks than threads, so their butterflies are
/// split across threads inside each block. The remaining stages work on independent chunks of
/// `2^(log_len - log_max_threads)` elements, one chunk per work item.
#[derive(Debug)]
pub struct MultithreadedNTT<F: FftField, TA: TwiddleAccess<F> = NaturalTwiddleAccess<F>> {
	single_threaded: SingleThreadedNTT<F, TA>,
	log_max_threads: usize,
}

impl<F: FftField, TA: TwiddleAccess<F> + Sync> SingleThreadedNTT<F, TA> {
	/// Returns multithreaded NTT implementation which uses `1 << log_max_threads` threads.
	pub const fn multithreaded_with_max_threads(
		self,
		log_max_threads: usize,
	) -> MultithreadedNTT<F, TA> {
		MultithreadedNTT {
			single_threaded: self,
			log_max_threads,
		}
	}
}

impl<F: FftField, TA: TwiddleAccess<F>> MultithreadedNTT<F, TA> {
	pub fn log_max_threads(&self) -> usize {
		self.log_max_threads
	}
}

impl<F, TA> RadixTwoNTT<F> for MultithreadedNTT<F, TA>
where
	F: FftField,
	TA: TwiddleAccess<F> + Sync,
{
	fn log_domain_size(&self) -> usize {
		self.single_threaded.log_domain_size()
	}

	fn get_twiddle(&self, stage: usize, index: usize, dir: NTTDir) -> F {
		self.single_threaded.get_twiddle(stage, index, dir)
	}

	fn decimate_in_frequency<E: TransformElement<F>>(
		&self,
		data: &mut [E],
		dir: NTTDir,
	) -> Result<(), Error> {
		let log_len = check_transform_input(self.log_domain_size(), data)?;
		let twiddles = self.single_threaded.twiddles();
		let log_chunk_len = log_len.saturating_sub(self.log_max_threads);

		for stage in (log_chunk_len..log_len).rev() {
			parallel_stage(data, stage, |u, v, index| {
				gs_butterfly(u, v, twiddles.get(stage, index, dir))
			});
		}
		data.par_chunks_mut(1 << log_chunk_len).for_each(|chunk| {
			single_threaded::decimate_in_frequency_stages(twiddles, chunk, 0..log_chunk_len, dir)
		});

		Ok(())
	}

	fn decimate_in_time<E: TransformElement<F>>(
		&self,
		data: &mut [E],
		dir: NTTDir,
	) -> Result<(), Error> {
		let log_len = check_transform_input(self.log_domain_size(), data)?;
		let twiddles = self.single_threaded.twiddles();
		let log_chunk_len = log_len.saturating_sub(self.log_max_threads);

		data.par_chunks_mut(1 << log_chunk_len).for_each(|chunk| {
			single_threaded::decimate_in_time_stages(twiddles, chunk, 0..log_chunk_len, dir)
		});
		for stage in log_chunk_len..log_len {
			parallel_stage(data, stage, |u, v, index| {
				ct_butterfly(u, v, twiddles.get(stage, index, dir))
			});
		}

		Ok(())
	}
}

/// Applies `butterfly` to every pair of one stage, splitting the pairs of each block across
/// threads. Returns once the whole stage is done.
fn parallel_stage<E, B>(data: &mut [E], stage: usize, butterfly: B)
where
	E: Send,
	B: Fn(&mut E, &mut E, usize) + Sync,
{
	let half = 1 << stage;
	data.par_chunks_exact_mut(2 * half).for_each(|block| {
		let (lo, hi) = block.split_at_mut(half);
		lo.par_iter_mut()
			.zip(hi.par_iter_mut())
			.enumerate()
			.for_each(|(index, (u, v))| butterfly(u, v, index));
	});
}
