// Copyright 2025 Irreducible Inc.

//! Compute device model for the transform engine.
//!
//! A [`Device`] is a set of worker lanes that runs data-parallel work. Memory is either host
//! memory ([`HostSlice`]) or device memory ([`DeviceVec`]); transforms run on device memory and the
//! caller copies across the boundary explicitly. Work can be queued on a [`Stream`] and awaited
//! with [`Stream::synchronize`].

mod device;
mod error;
mod memory;
mod stream;

pub use device::{Device, DeviceConfig};
pub use error::Error;
pub use memory::{DeviceVec, HostOrDeviceSlice, HostSlice, SharedDeviceBuffer};
pub use stream::{Stream, TaskError};
