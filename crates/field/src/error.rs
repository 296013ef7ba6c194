// Copyright 2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("zero has no multiplicative inverse")]
	ZeroInverse,
	#[error("expected {expected} limbs, got {actual}")]
	LimbCountMismatch { expected: usize, actual: usize },
	#[error("limbs do not encode a canonical field element")]
	NotInField,
	#[error("the field has no root of unity of order {order}")]
	NoRootOfUnity { order: u64 },
}
