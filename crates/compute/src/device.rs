// Copyright 2025 Irreducible Inc.

use std::sync::Arc;

use getset::CopyGetters;
use rayon::ThreadPool;
use tracing::debug;
use zkntt_utils::{env::parsed_env_var, rayon::build_named_pool};

use crate::{
	error::Error,
	memory::{DeviceVec, HostSlice},
};

/// Which device to start and how many worker lanes it gets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
	pub device_id: usize,
	/// Number of worker lanes. `None` sizes the device to the machine.
	pub num_threads: Option<usize>,
}

impl DeviceConfig {
	/// Reads `ZKNTT_DEVICE_ID` and `ZKNTT_NUM_THREADS`, falling back to the defaults.
	pub fn from_env() -> Self {
		Self {
			device_id: parsed_env_var("ZKNTT_DEVICE_ID").unwrap_or(0),
			num_threads: parsed_env_var("ZKNTT_NUM_THREADS").filter(|&n: &usize| n > 0),
		}
	}
}

/// A compute device: a dedicated pool of worker lanes.
///
/// Cloning yields another handle to the same lanes.
#[derive(Debug, Clone, CopyGetters)]
pub struct Device {
	#[get_copy = "pub"]
	id: usize,
	lanes: Arc<ThreadPool>,
}

impl Device {
	pub fn new(config: DeviceConfig) -> Result<Self, Error> {
		let DeviceConfig {
			device_id,
			num_threads,
		} = config;
		let lanes = build_named_pool(&format!("zkntt-dev{device_id}"), num_threads)
			.map_err(|source| Error::LaneStartup { device_id, source })?;
		debug!(device_id, lanes = lanes.current_num_threads(), "device started");
		Ok(Self {
			id: device_id,
			lanes: Arc::new(lanes),
		})
	}

	pub fn num_lanes(&self) -> usize {
		self.lanes.current_num_threads()
	}

	/// Runs `op` on the device lanes. Rayon parallel iterators inside `op` use this device.
	pub fn install<OP, R>(&self, op: OP) -> R
	where
		OP: FnOnce() -> R + Send,
		R: Send,
	{
		self.lanes.install(op)
	}

	/// Allocates `len` default-initialized elements of device memory.
	pub fn alloc<T: Clone + Default>(&self, len: usize) -> Result<DeviceVec<T>, Error> {
		DeviceVec::try_filled(self.id, len, T::default())
	}

	/// Allocates device memory holding a copy of `src`.
	pub fn alloc_from_host<T: Copy + Default>(
		&self,
		src: &HostSlice<T>,
	) -> Result<DeviceVec<T>, Error> {
		let mut buffer = self.alloc(src.len())?;
		buffer.copy_from_host(src)?;
		Ok(buffer)
	}

	/// Checks that `buffer` was allocated on this device.
	pub fn check_owns<T>(&self, buffer: &DeviceVec<T>) -> Result<(), Error> {
		if buffer.device_id() != self.id {
			return Err(Error::WrongDevice {
				device_id: self.id,
				buffer_device: buffer.device_id(),
			});
		}
		Ok(())
	}
}
