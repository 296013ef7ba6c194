// Copyright 2025 Irreducible Inc.

use std::{
	fmt,
	ops::{Deref, DerefMut},
	sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::error::Error;

/// A buffer that lives either in host memory or in device memory.
///
/// Transforms accept both kinds for input and output and use the placement to decide which
/// copies to make.
pub trait HostOrDeviceSlice<T> {
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn is_on_device(&self) -> bool;

	fn as_host(&self) -> Option<&[T]>;

	fn as_host_mut(&mut self) -> Option<&mut [T]>;

	fn as_device(&self) -> Option<&DeviceVec<T>>;

	fn as_device_mut(&mut self) -> Option<&mut DeviceVec<T>>;
}

/// A borrowed slice of host memory.
#[repr(transparent)]
pub struct HostSlice<T>([T]);

impl<T> HostSlice<T> {
	pub fn from_slice(slice: &[T]) -> &Self {
		// SAFETY: HostSlice is a transparent wrapper around [T].
		unsafe { &*(slice as *const [T] as *const Self) }
	}

	pub fn from_mut_slice(slice: &mut [T]) -> &mut Self {
		// SAFETY: HostSlice is a transparent wrapper around [T].
		unsafe { &mut *(slice as *mut [T] as *mut Self) }
	}

	pub fn as_slice(&self) -> &[T] {
		&self.0
	}

	pub fn as_mut_slice(&mut self) -> &mut [T] {
		&mut self.0
	}
}

impl<T> Deref for HostSlice<T> {
	type Target = [T];

	fn deref(&self) -> &[T] {
		&self.0
	}
}

impl<T> DerefMut for HostSlice<T> {
	fn deref_mut(&mut self) -> &mut [T] {
		&mut self.0
	}
}

impl<T: fmt::Debug> fmt::Debug for HostSlice<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("HostSlice").field(&&self.0).finish()
	}
}

impl<T> HostOrDeviceSlice<T> for HostSlice<T> {
	fn len(&self) -> usize {
		self.0.len()
	}

	fn is_on_device(&self) -> bool {
		false
	}

	fn as_host(&self) -> Option<&[T]> {
		Some(&self.0)
	}

	fn as_host_mut(&mut self) -> Option<&mut [T]> {
		Some(&mut self.0)
	}

	fn as_device(&self) -> Option<&DeviceVec<T>> {
		None
	}

	fn as_device_mut(&mut self) -> Option<&mut DeviceVec<T>> {
		None
	}
}

/// An owned allocation of device memory.
///
/// The contents are shared with work queued on a [`Stream`](crate::Stream) through
/// [`DeviceVec::share`]; reading the buffer while such work is pending observes unspecified
/// contents until the stream is synchronized.
pub struct DeviceVec<T> {
	device_id: usize,
	len: usize,
	data: Arc<RwLock<Vec<T>>>,
}

impl<T> DeviceVec<T> {
	pub(crate) fn try_filled(device_id: usize, len: usize, fill: T) -> Result<Self, Error>
	where
		T: Clone,
	{
		let mut data = Vec::new();
		data.try_reserve_exact(len)
			.map_err(|_| Error::OutOfMemory { device_id, len })?;
		data.resize(len, fill);
		Ok(Self {
			device_id,
			len,
			data: Arc::new(RwLock::new(data)),
		})
	}

	pub fn device_id(&self) -> usize {
		self.device_id
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, Error> {
		self.data.read().map_err(|_| Error::BufferPoisoned)
	}

	pub fn write(&mut self) -> Result<RwLockWriteGuard<'_, Vec<T>>, Error> {
		self.data.write().map_err(|_| Error::BufferPoisoned)
	}

	/// A handle to the same memory for work that outlives the current borrow.
	pub fn share(&self) -> SharedDeviceBuffer<T> {
		SharedDeviceBuffer {
			device_id: self.device_id,
			data: Arc::clone(&self.data),
		}
	}

	pub fn copy_from_host(&mut self, src: &HostSlice<T>) -> Result<(), Error>
	where
		T: Copy,
	{
		check_len(self.len, src.len())?;
		self.write()?.copy_from_slice(src);
		Ok(())
	}

	pub fn copy_to_host(&self, dst: &mut HostSlice<T>) -> Result<(), Error>
	where
		T: Copy,
	{
		check_len(self.len, dst.len())?;
		dst.copy_from_slice(&self.read()?);
		Ok(())
	}

	pub fn to_host_vec(&self) -> Result<Vec<T>, Error>
	where
		T: Clone,
	{
		Ok(self.read()?.clone())
	}
}

impl<T> fmt::Debug for DeviceVec<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DeviceVec")
			.field("device_id", &self.device_id)
			.field("len", &self.len)
			.finish_non_exhaustive()
	}
}

impl<T> HostOrDeviceSlice<T> for DeviceVec<T> {
	fn len(&self) -> usize {
		self.len
	}

	fn is_on_device(&self) -> bool {
		true
	}

	fn as_host(&self) -> Option<&[T]> {
		None
	}

	fn as_host_mut(&mut self) -> Option<&mut [T]> {
		None
	}

	fn as_device(&self) -> Option<&DeviceVec<T>> {
		Some(self)
	}

	fn as_device_mut(&mut self) -> Option<&mut DeviceVec<T>> {
		Some(self)
	}
}

/// Shared handle to a [`DeviceVec`] allocation held by queued work.
pub struct SharedDeviceBuffer<T> {
	device_id: usize,
	data: Arc<RwLock<Vec<T>>>,
}

impl<T> SharedDeviceBuffer<T> {
	pub fn device_id(&self) -> usize {
		self.device_id
	}

	pub fn read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, Error> {
		self.data.read().map_err(|_| Error::BufferPoisoned)
	}

	pub fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>, Error> {
		self.data.write().map_err(|_| Error::BufferPoisoned)
	}

	/// Whether both handles refer to the same allocation.
	pub fn aliases(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.data, &other.data)
	}
}

impl<T> Clone for SharedDeviceBuffer<T> {
	fn clone(&self) -> Self {
		Self {
			device_id: self.device_id,
			data: Arc::clone(&self.data),
		}
	}
}

fn check_len(expected: usize, actual: usize) -> Result<(), Error> {
	if expected != actual {
		return Err(Error::LengthMismatch { expected, actual });
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	#[test]
	fn test_host_slice_placement() {
		let mut data = vec![1u32, 2, 3, 4];
		let host = HostSlice::from_mut_slice(&mut data);
		assert!(!host.is_on_device());
		assert_eq!(HostOrDeviceSlice::len(host), 4);
		assert!(host.as_device().is_none());
		host.as_host_mut().unwrap()[0] = 7;
		assert_eq!(data[0], 7);
	}

	#[test]
	fn test_copy_roundtrip() {
		let mut buffer = DeviceVec::try_filled(0, 4, 0u32).unwrap();
		assert!(buffer.is_on_device());

		buffer
			.copy_from_host(HostSlice::from_slice(&[5, 6, 7, 8]))
			.unwrap();
		let mut out = [0u32; 4];
		buffer.copy_to_host(HostSlice::from_mut_slice(&mut out)).unwrap();
		assert_eq!(out, [5, 6, 7, 8]);

		let shared = buffer.share();
		assert!(shared.aliases(&buffer.share()));
		assert!(!shared.aliases(&DeviceVec::try_filled(0, 4, 0u32).unwrap().share()));
		shared.write().unwrap()[1] = 0;
		assert_eq!(buffer.to_host_vec().unwrap(), vec![5, 0, 7, 8]);
	}

	#[test]
	fn test_copy_length_mismatch() {
		let mut buffer = DeviceVec::try_filled(0, 4, 0u32).unwrap();
		assert_matches!(
			buffer.copy_from_host(HostSlice::from_slice(&[1, 2])),
			Err(Error::LengthMismatch {
				expected: 4,
				actual: 2
			})
		);
	}
}
