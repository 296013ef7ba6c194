// Copyright 2025 Irreducible Inc.

use std::io;

use rayon::ThreadPoolBuildError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to start the worker lanes of device {device_id}: {source}")]
	LaneStartup {
		device_id: usize,
		#[source]
		source: ThreadPoolBuildError,
	},
	#[error("failed to start the stream worker of device {device_id}: {source}")]
	StreamStartup {
		device_id: usize,
		#[source]
		source: io::Error,
	},
	#[error("device {device_id} cannot allocate {len} elements")]
	OutOfMemory { device_id: usize, len: usize },
	#[error("buffer length mismatch: expected {expected}, got {actual}")]
	LengthMismatch { expected: usize, actual: usize },
	#[error("buffer lives on device {buffer_device}, not on device {device_id}")]
	WrongDevice {
		device_id: usize,
		buffer_device: usize,
	},
	#[error("a task writing to the device buffer panicked")]
	BufferPoisoned,
	#[error("the stream worker has shut down")]
	StreamDisconnected,
	#[error("a task panicked on the stream")]
	TaskPanicked,
	#[error("a task failed on the stream: {0}")]
	TaskFailed(Box<dyn std::error::Error + Send + Sync + 'static>),
}
