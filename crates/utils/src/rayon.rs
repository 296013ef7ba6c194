// Copyright 2025 Irreducible Inc.

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Returns the base-2 logarithm of the number of threads that should be used for the task,
/// rounded up so that the result covers every worker of the current pool.
pub fn get_log_max_threads() -> usize {
	(2 * rayon::current_num_threads() - 1).ilog2() as _
}

/// Builds a dedicated thread pool with named workers.
///
/// `num_threads` of `None` lets rayon pick the number of threads (which respects
/// `RAYON_NUM_THREADS`).
pub fn build_named_pool(
	name: &str,
	num_threads: Option<usize>,
) -> Result<ThreadPool, ThreadPoolBuildError> {
	let prefix = name.to_owned();
	let mut builder = ThreadPoolBuilder::new().thread_name(move |i| format!("{prefix}-lane{i}"));
	if let Some(num_threads) = num_threads {
		builder = builder.num_threads(num_threads);
	}
	builder.build()
}
