// Copyright 2025 Irreducible Inc.

use std::{
	fmt,
	panic::{self, AssertUnwindSafe},
	sync::{
		mpsc::{self, Receiver, Sender},
		Arc, Condvar, Mutex, MutexGuard,
	},
	thread::{self, JoinHandle},
};

use tracing::warn;

use crate::error::Error;

pub type TaskError = Box<dyn std::error::Error + Send + Sync + 'static>;

type Task = Box<dyn FnOnce() -> Result<(), TaskError> + Send + 'static>;

#[derive(Default)]
struct Progress {
	pending: usize,
	failure: Option<Error>,
}

type SharedProgress = Arc<(Mutex<Progress>, Condvar)>;

/// An in-order work queue of a device.
///
/// Tasks run one after another on a dedicated worker, in the order they were enqueued. The first
/// failure since the last [`Stream::synchronize`] is kept and reported by it.
pub struct Stream {
	device_id: usize,
	sender: Option<Sender<Task>>,
	progress: SharedProgress,
	worker: Option<JoinHandle<()>>,
}

impl Stream {
	pub fn new(device_id: usize) -> Result<Self, Error> {
		let (sender, receiver) = mpsc::channel::<Task>();
		let progress = SharedProgress::default();
		let worker_progress = Arc::clone(&progress);
		let worker = thread::Builder::new()
			.name(format!("zkntt-dev{device_id}-stream"))
			.spawn(move || run_worker(receiver, worker_progress))
			.map_err(|source| Error::StreamStartup { device_id, source })?;

		Ok(Self {
			device_id,
			sender: Some(sender),
			progress,
			worker: Some(worker),
		})
	}

	pub fn device_id(&self) -> usize {
		self.device_id
	}

	/// Queues `task` behind all previously enqueued work and returns immediately.
	pub fn enqueue<T>(&self, task: T) -> Result<(), Error>
	where
		T: FnOnce() -> Result<(), TaskError> + Send + 'static,
	{
		let sender = self.sender.as_ref().ok_or(Error::StreamDisconnected)?;
		self.lock_progress().pending += 1;
		if sender.send(Box::new(task)).is_err() {
			self.lock_progress().pending -= 1;
			self.progress.1.notify_all();
			return Err(Error::StreamDisconnected);
		}
		Ok(())
	}

	/// Blocks until every enqueued task has finished.
	pub fn synchronize(&self) -> Result<(), Error> {
		let (_, finished) = &*self.progress;
		let mut progress = self.lock_progress();
		while progress.pending > 0 {
			progress = finished
				.wait(progress)
				.expect("stream progress lock is never poisoned");
		}
		match progress.failure.take() {
			Some(err) => Err(err),
			None => Ok(()),
		}
	}

	pub fn is_idle(&self) -> bool {
		self.lock_progress().pending == 0
	}

	fn lock_progress(&self) -> MutexGuard<'_, Progress> {
		self.progress
			.0
			.lock()
			.expect("stream progress lock is never poisoned")
	}
}

impl fmt::Debug for Stream {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Stream")
			.field("device_id", &self.device_id)
			.field("idle", &self.is_idle())
			.finish()
	}
}

impl Drop for Stream {
	fn drop(&mut self) {
		// Closing the channel lets the worker drain the queue and exit.
		drop(self.sender.take());
		if let Some(worker) = self.worker.take() {
			let _ = worker.join();
		}
	}
}

fn run_worker(receiver: Receiver<Task>, progress: SharedProgress) {
	for task in receiver {
		let failure = match panic::catch_unwind(AssertUnwindSafe(task)) {
			Ok(Ok(())) => None,
			Ok(Err(err)) => Some(Error::TaskFailed(err)),
			Err(_) => Some(Error::TaskPanicked),
		};

		let (lock, finished) = &*progress;
		let mut state = lock.lock().expect("stream progress lock is never poisoned");
		state.pending -= 1;
		if let Some(err) = failure {
			warn!(%err, "stream task failed");
			state.failure.get_or_insert(err);
		}
		finished.notify_all();
	}
}
