// Copyright 2025 Irreducible Inc.

use zkntt_field::{FftField, TransformElement};
use zkntt_utils::rayon::get_log_max_threads;

use crate::{
	config::NTTDir, twiddle::StagedTwiddleAccess, MultithreadedNTT, RadixTwoNTT,
	SingleThreadedNTT,
};

/// How many threads to use (threads number is a power of 2).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadingSettings {
	/// Use a single thread for calculations.
	#[default]
	SingleThreaded,
	/// Use the default number of threads based on the number of cores.
	MultithreadedDefault,
	/// Explicitly set the logarithm of number of threads.
	ExplicitThreadsCount { log_threads: usize },
}

impl ThreadingSettings {
	/// Settings that keep `num_lanes` worker lanes busy.
	pub fn for_lanes(num_lanes: usize) -> Self {
		match num_lanes {
			0 | 1 => Self::SingleThreaded,
			n => Self::ExplicitThreadsCount {
				log_threads: (2 * n - 1).ilog2() as usize,
			},
		}
	}

	/// Get the log2 of the number of threads to use.
	pub fn log_threads_count(&self) -> usize {
		match self {
			ThreadingSettings::SingleThreaded => 0,
			ThreadingSettings::MultithreadedDefault => get_log_max_threads(),
			ThreadingSettings::ExplicitThreadsCount { log_threads } => *log_threads,
		}
	}

	/// Check if settings imply multithreading.
	pub fn is_multithreaded(&self) -> bool {
		match self {
			ThreadingSettings::SingleThreaded => false,
			ThreadingSettings::MultithreadedDefault => true,
			ThreadingSettings::ExplicitThreadsCount { log_threads } => *log_threads > 0,
		}
	}
}

#[derive(Default, Debug, Clone, Copy)]
pub struct NttOptions {
	/// Store twiddles in the stage-major layout.
	pub fast_twiddles: bool,
	pub thread_settings: ThreadingSettings,
}

/// An enum that can be used to switch between different NTT implementations without passing
/// RadixTwoNTT as a type parameter.
#[derive(Debug)]
pub enum DynamicDispatchNTT<F: FftField> {
	SingleThreaded(SingleThreadedNTT<F>),
	SingleThreadedFastTwiddles(SingleThreadedNTT<F, StagedTwiddleAccess<F>>),
	MultiThreaded(MultithreadedNTT<F>),
	MultiThreadedFastTwiddles(MultithreadedNTT<F, StagedTwiddleAccess<F>>),
}

impl<F: FftField> DynamicDispatchNTT<F> {
	/// Create a new RadixTwoNTT over the subgroup generated by `root` based on the given settings.
	pub fn new(root: F, options: NttOptions) -> Result<Self, crate::error::Error> {
		let log_threads = options.thread_settings.log_threads_count();
		let result = match (options.fast_twiddles, log_threads) {
			(false, 0) => DynamicDispatchNTT::SingleThreaded(SingleThreadedNTT::new(root)?),
			(true, 0) => DynamicDispatchNTT::SingleThreadedFastTwiddles(
				SingleThreadedNTT::new(root)?.fast_twiddles(),
			),
			(false, _) => DynamicDispatchNTT::MultiThreaded(
				SingleThreadedNTT::new(root)?.multithreaded_with_max_threads(log_threads),
			),
			(true, _) => DynamicDispatchNTT::MultiThreadedFastTwiddles(
				SingleThreadedNTT::new(root)?
					.fast_twiddles()
					.multithreaded_with_max_threads(log_threads),
			),
		};

		Ok(result)
	}

	pub fn has_fast_twiddles(&self) -> bool {
		matches!(
			self,
			DynamicDispatchNTT::SingleThreadedFastTwiddles(_)
				| DynamicDispatchNTT::MultiThreadedFastTwiddles(_)
		)
	}
}

impl<F: FftField> RadixTwoNTT<F> for DynamicDispatchNTT<F> {
	fn log_domain_size(&self) -> usize {
		match self {
			DynamicDispatchNTT::SingleThreaded(ntt) => ntt.log_domain_size(),
			DynamicDispatchNTT::SingleThreadedFastTwiddles(ntt) => ntt.log_domain_size(),
			DynamicDispatchNTT::MultiThreaded(ntt) => ntt.log_domain_size(),
			DynamicDispatchNTT::MultiThreadedFastTwiddles(ntt) => ntt.log_domain_size(),
		}
	}

	fn get_twiddle(&self, stage: usize, index: usize, dir: NTTDir) -> F {
		match self {
			DynamicDispatchNTT::SingleThreaded(ntt) => ntt.get_twiddle(stage, index, dir),
			DynamicDispatchNTT::SingleThreadedFastTwiddles(ntt) => {
				ntt.get_twiddle(stage, index, dir)
			}
			DynamicDispatchNTT::MultiThreaded(ntt) => ntt.get_twiddle(stage, index, dir),
			DynamicDispatchNTT::MultiThreadedFastTwiddles(ntt) => {
				ntt.get_twiddle(stage, index, dir)
			}
		}
	}

	fn decimate_in_frequency<E: TransformElement<F>>(
		&self,
		data: &mut [E],
		dir: NTTDir,
	) -> Result<(), crate::error::Error> {
		match self {
			DynamicDispatchNTT::SingleThreaded(ntt) => ntt.decimate_in_frequency(data, dir),
			DynamicDispatchNTT::SingleThreadedFastTwiddles(ntt) => {
				ntt.decimate_in_frequency(data, dir)
			}
			DynamicDispatchNTT::MultiThreaded(ntt) => ntt.decimate_in_frequency(data, dir),
			DynamicDispatchNTT::MultiThreadedFastTwiddles(ntt) => {
				ntt.decimate_in_frequency(data, dir)
			}
		}
	}

	fn decimate_in_time<E: TransformElement<F>>(
		&self,
		data: &mut [E],
		dir: NTTDir,
	) -> Result<(), crate::error::Error> {
		match self {
			DynamicDispatchNTT::SingleThreaded(ntt) => ntt.decimate_in_time(data, dir),
			DynamicDispatchNTT::SingleThreadedFastTwiddles(ntt) => ntt.decimate_in_time(data, dir),
			DynamicDispatchNTT::MultiThreaded(ntt) => ntt.decimate_in_time(data, dir),
			DynamicDispatchNTT::MultiThreadedFastTwiddles(ntt) => ntt.decimate_in_time(data, dir),
		}
	}
}
