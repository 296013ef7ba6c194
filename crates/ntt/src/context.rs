// Copyright 2025 Irreducible Inc.

use std::sync::Arc;

use getset::{CopyGetters, Getters};
use tracing::{debug, instrument};
use zkntt_compute::{Device, DeviceConfig, Stream};
use zkntt_field::Curve;

use crate::{
	domain::Domain,
	dynamic_dispatch::{NttOptions, ThreadingSettings},
	error::Error,
};

/// Per-handle state of the transform engine for curve `C`.
///
/// The context owns a device, the device's default stream and at most one [`Domain`]. Transforms
/// borrow the context immutably through their [`NTTConfig`](crate::NTTConfig) while
/// [`initialize_domain`](Self::initialize_domain) and [`release_domain`](Self::release_domain)
/// borrow it mutably, so the domain never changes under a running call. Work already queued on a
/// stream keeps its own reference to the domain it was enqueued with.
#[derive(Debug, Getters, CopyGetters)]
pub struct ExecutionContext<C: Curve> {
	#[get = "pub"]
	device: Device,
	#[get = "pub"]
	stream: Stream,
	#[get_copy = "pub"]
	thread_settings: ThreadingSettings,
	domain: Option<Arc<Domain<C::Scalar>>>,
}

impl<C: Curve> ExecutionContext<C> {
	/// Starts the device and its stream. No domain is initialized.
	///
	/// Kernels use every lane of the device: an explicit lane count is rounded up to a power of
	/// two, and without one the kernels size themselves to the device pool.
	pub fn new(config: DeviceConfig) -> Result<Self, Error> {
		let thread_settings = match config.num_threads {
			Some(num_threads) => ThreadingSettings::for_lanes(num_threads),
			None => ThreadingSettings::MultithreadedDefault,
		};
		let device = Device::new(config)?;
		let stream = Stream::new(device.id())?;
		debug!(
			curve = C::NAME,
			device_id = device.id(),
			lanes = device.num_lanes(),
			"execution context created"
		);
		Ok(Self {
			device,
			stream,
			thread_settings,
			domain: None,
		})
	}

	/// Context on the device described by the environment, see [`DeviceConfig::from_env`].
	pub fn from_env() -> Result<Self, Error> {
		Self::new(DeviceConfig::from_env())
	}

	/// Overrides how many threads the kernels of subsequently initialized domains use.
	pub fn with_thread_settings(mut self, thread_settings: ThreadingSettings) -> Self {
		self.thread_settings = thread_settings;
		self
	}

	pub fn device_id(&self) -> usize {
		self.device.id()
	}

	/// Computes the twiddle tables for `primitive_root` and caches them in the context, replacing
	/// any previous domain.
	///
	/// The capacity of the domain is the order of `primitive_root`. On failure the previous domain
	/// stays in place.
	#[instrument(
		skip_all,
		name = "initialize_domain",
		fields(curve = C::NAME, fast_twiddles = fast_twiddles),
		level = "debug"
	)]
	pub fn initialize_domain(
		&mut self,
		primitive_root: C::Scalar,
		fast_twiddles: bool,
	) -> Result<(), Error> {
		let options = NttOptions {
			fast_twiddles,
			thread_settings: self.thread_settings,
		};
		let domain = self
			.device
			.install(|| Domain::new(primitive_root, options))?;
		debug!(
			log_capacity = domain.log_capacity(),
			multithreaded = self.thread_settings.is_multithreaded(),
			"domain initialized"
		);

		if let Some(previous) = self.domain.replace(Arc::new(domain)) {
			debug!(log_capacity = previous.log_capacity(), "replaced previous domain");
		}
		Ok(())
	}

	/// Frees the cached twiddle tables.
	///
	/// Fails with [`Error::NotInitialized`] if there is no domain, including when the domain was
	/// already released.
	#[instrument(skip_all, name = "release_domain", fields(curve = C::NAME), level = "debug")]
	pub fn release_domain(&mut self) -> Result<(), Error> {
		let domain = self.domain.take().ok_or(Error::NotInitialized)?;
		debug!(log_capacity = domain.log_capacity(), "domain released");
		Ok(())
	}

	/// The current domain.
	pub fn domain(&self) -> Result<&Arc<Domain<C::Scalar>>, Error> {
		self.domain.as_ref().ok_or(Error::UninitializedDomain)
	}

	pub fn is_initialized(&self) -> bool {
		self.domain.is_some()
	}

	/// The largest transform size of the current domain.
	pub fn max_size(&self) -> Result<usize, Error> {
		Ok(self.domain()?.max_size())
	}

	pub fn has_fast_twiddles(&self) -> Result<bool, Error> {
		Ok(self.domain()?.has_fast_twiddles())
	}

	/// Waits for the work queued on the context's stream.
	pub fn synchronize(&self) -> Result<(), Error> {
		Ok(self.stream.synchronize()?)
	}
}

impl<C: Curve> Drop for ExecutionContext<C> {
	fn drop(&mut self) {
		if let Err(err) = self.stream.synchronize() {
			debug!(%err, "queued work failed before the context was dropped");
		}
		if let Some(domain) = self.domain.take() {
			debug!(
				curve = C::NAME,
				log_capacity = domain.log_capacity(),
				"releasing domain of dropped context"
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use zkntt_field::{get_root_of_unity, Bls12_381, One};

	use crate::DynamicDispatchNTT;

	use super::*;

	fn context() -> ExecutionContext<Bls12_381> {
		ExecutionContext::new(DeviceConfig {
			device_id: 0,
			num_threads: Some(2),
		})
		.unwrap()
	}

	#[test]
	fn test_domain_lifecycle() {
		let mut ctx = context();
		assert!(!ctx.is_initialized());
		assert_matches!(ctx.max_size(), Err(Error::UninitializedDomain));
		assert_matches!(ctx.release_domain(), Err(Error::NotInitialized));

		let root = get_root_of_unity(1 << 4).unwrap();
		ctx.initialize_domain(root, false).unwrap();
		assert_eq!(ctx.max_size().unwrap(), 16);
		assert!(!ctx.has_fast_twiddles().unwrap());

		let root = get_root_of_unity(1 << 6).unwrap();
		ctx.initialize_domain(root, true).unwrap();
		assert_eq!(ctx.max_size().unwrap(), 64);
		assert!(ctx.has_fast_twiddles().unwrap());

		ctx.release_domain().unwrap();
		assert_matches!(ctx.release_domain(), Err(Error::NotInitialized));
		assert_matches!(ctx.domain(), Err(Error::UninitializedDomain));
	}

	#[test]
	fn test_failed_initialization_keeps_domain() {
		let mut ctx = context();
		ctx.initialize_domain(get_root_of_unity(1 << 3).unwrap(), false)
			.unwrap();
		assert_matches!(
			ctx.initialize_domain(<Bls12_381 as Curve>::Scalar::from(3u64), false),
			Err(Error::InvalidRoot)
		);
		assert_eq!(ctx.max_size().unwrap(), 8);

		ctx.initialize_domain(<Bls12_381 as Curve>::Scalar::one(), false)
			.unwrap();
		assert_eq!(ctx.max_size().unwrap(), 1);
	}

	#[test]
	fn test_thread_settings_follow_lanes() {
		let ctx = context();
		assert_eq!(ctx.device_id(), 0);
		assert_eq!(
			ctx.thread_settings(),
			ThreadingSettings::ExplicitThreadsCount { log_threads: 1 }
		);

		let ctx = context().with_thread_settings(ThreadingSettings::SingleThreaded);
		assert_eq!(ctx.thread_settings(), ThreadingSettings::SingleThreaded);
	}

	#[test]
	fn test_default_lanes_size_kernels_to_device_pool() {
		let mut ctx = ExecutionContext::<Bls12_381>::new(DeviceConfig {
			device_id: 0,
			num_threads: None,
		})
		.unwrap();
		assert_eq!(ctx.thread_settings(), ThreadingSettings::MultithreadedDefault);

		ctx.initialize_domain(get_root_of_unity(1 << 5).unwrap(), false)
			.unwrap();
		let multithreaded = ctx.device().num_lanes() > 1;
		assert_eq!(
			matches!(ctx.domain().unwrap().ntt(), DynamicDispatchNTT::MultiThreaded(_)),
			multithreaded
		);
	}
}
