// Copyright 2025 Irreducible Inc.

//! Number-theoretic transforms over the scalar fields of pairing-friendly curves, and their
//! elliptic-curve analogue over G1 points.
//!
//! An [`ExecutionContext`] binds a compute device to a cached [`Domain`], the twiddle tables of a
//! primitive root of unity. Transforms run through [`ntt`] and [`ecntt`] with an [`NTTConfig`]
//! that selects batching, coset shift, input/output ordering and buffer placement. The
//! [`bn254`], [`bls12_381`] and [`bw6_761`] modules expose the same entry points per curve.

mod config;
mod context;
mod curves;
mod dispatch;
mod domain;
mod dynamic_dispatch;
mod ecntt;
mod error;
mod multithreaded;
mod ntt;
pub mod permutation;
mod radix_two_ntt;
#[cfg(test)]
mod reference;
mod single_threaded;
mod status;
#[cfg(test)]
mod tests;
pub mod twiddle;

pub use config::{NTTConfig, NTTDir, Ordering};
pub use context::ExecutionContext;
pub use curves::{bls12_381, bn254, bw6_761};
pub use domain::Domain;
pub use dynamic_dispatch::{DynamicDispatchNTT, NttOptions, ThreadingSettings};
pub use ecntt::{check_points, ecntt, ecntt_inplace};
pub use error::Error;
pub use multithreaded::MultithreadedNTT;
pub use ntt::{ntt, ntt_inplace};
pub use radix_two_ntt::RadixTwoNTT;
pub use single_threaded::SingleThreadedNTT;
pub use status::{status_of, StatusCode};
