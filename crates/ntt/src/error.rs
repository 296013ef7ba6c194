// Copyright 2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("the primitive root is not a root of unity of power-of-two order in the scalar field")]
	InvalidRoot,
	#[error("no domain is initialized on the execution context")]
	UninitializedDomain,
	#[error("the execution context holds no domain to release")]
	NotInitialized,
	#[error("transform size {size} must be a power of two no larger than the domain capacity {capacity}")]
	SizeMismatch { size: i64, capacity: usize },
	#[error("input point {index} is not on the curve")]
	InvalidPoint { index: usize },
	#[error("device error: {0}")]
	DeviceError(#[source] zkntt_compute::Error),
	#[error("batch size must be at least one, got {batch_size}")]
	InvalidBatchSize { batch_size: i32 },
	#[error("the batch of {batch_size} transforms of size {size} does not fit in memory")]
	BatchTooLarge { size: usize, batch_size: usize },
	#[error("{buffer} buffer holds {actual} elements, expected {expected}")]
	BufferLengthMismatch {
		buffer: &'static str,
		expected: usize,
		actual: usize,
	},
	#[error("{buffer} buffer placement does not match the config: on device = {on_device}")]
	PlacementMismatch {
		buffer: &'static str,
		on_device: bool,
	},
	#[error("the coset generator must be non-zero")]
	ZeroCosetGenerator,
	#[error("asynchronous transforms must write to device memory")]
	AsyncRequiresDeviceOutput,
	#[error("the stream belongs to device {stream_device}, the context to device {device_id}")]
	ForeignStream {
		device_id: usize,
		stream_device: usize,
	},
	#[error("field error: {0}")]
	Field(#[from] zkntt_field::Error),
}

impl From<zkntt_compute::Error> for Error {
	fn from(err: zkntt_compute::Error) -> Self {
		match err {
			// Errors raised by queued transforms travel through the stream type-erased.
			zkntt_compute::Error::TaskFailed(inner) => match inner.downcast::<Self>() {
				Ok(err) => *err,
				Err(inner) => Self::DeviceError(zkntt_compute::Error::TaskFailed(inner)),
			},
			err => Self::DeviceError(err),
		}
	}
}
