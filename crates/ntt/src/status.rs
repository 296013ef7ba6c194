// Copyright 2025 Irreducible Inc.

use crate::error::Error;

/// Numeric outcome of an entry point, stable across releases.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
	Success = 0,
	InvalidRoot = 1,
	UninitializedDomain = 2,
	NotInitialized = 3,
	SizeMismatch = 4,
	InvalidPoint = 5,
	DeviceError = 6,
	InvalidArgument = 7,
}

impl StatusCode {
	pub const fn code(self) -> i32 {
		self as i32
	}

	pub const fn is_success(self) -> bool {
		matches!(self, Self::Success)
	}
}

impl From<&Error> for StatusCode {
	fn from(err: &Error) -> Self {
		match err {
			Error::InvalidRoot => Self::InvalidRoot,
			Error::UninitializedDomain => Self::UninitializedDomain,
			Error::NotInitialized => Self::NotInitialized,
			Error::SizeMismatch { .. } => Self::SizeMismatch,
			Error::InvalidPoint { .. } => Self::InvalidPoint,
			Error::DeviceError(_) => Self::DeviceError,
			Error::InvalidBatchSize { .. }
			| Error::BatchTooLarge { .. }
			| Error::BufferLengthMismatch { .. }
			| Error::PlacementMismatch { .. }
			| Error::ZeroCosetGenerator
			| Error::AsyncRequiresDeviceOutput
			| Error::ForeignStream { .. }
			| Error::Field(_) => Self::InvalidArgument,
		}
	}
}

/// Folds the result of an entry point into its status code.
pub fn status_of<T>(result: &Result<T, Error>) -> StatusCode {
	match result {
		Ok(_) => StatusCode::Success,
		Err(err) => err.into(),
	}
}
