// Copyright 2025 Irreducible Inc.

//! Small shared helpers for the zkntt crates: error macros, power-of-two arithmetic, environment
//! configuration, thread pool sizing and tracing setup.

pub mod checked_arithmetics;
pub mod env;
pub mod error_utils;
pub mod rayon;
pub mod tracing;
