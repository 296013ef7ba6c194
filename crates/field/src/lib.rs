// Copyright 2025 Irreducible Inc.

//! Arithmetic backend for the transform engine.
//!
//! The finite-field and elliptic-curve arithmetic is provided by arkworks. This crate narrows it
//! down to what the transforms need: the supported curves, the [`TransformElement`] abstraction
//! shared by scalars and projective points, root-of-unity order checks and a stable limb layout
//! for moving elements across a boundary.

mod arithmetic;
mod curve;
mod element;
mod error;
pub mod repr;
mod roots;

pub use ark_ff::{FftField, Field, One, PrimeField, UniformRand, Zero};
pub use arithmetic::*;
pub use curve::*;
pub use element::TransformElement;
pub use error::Error;
pub use roots::*;
