// Copyright 2025 Irreducible Inc.

/// Base-2 logarithm of `val`, or `None` when `val` is not a power of two.
///
/// Zero is not a power of two.
pub const fn log2_strict(val: usize) -> Option<usize> {
	if val.is_power_of_two() {
		Some(val.trailing_zeros() as usize)
	} else {
		None
	}
}

/// Reverses the lowest `log_len` bits of `index`.
///
/// Bits of `index` above `log_len` must be zero.
#[inline]
pub const fn reverse_bits(index: usize, log_len: usize) -> usize {
	if log_len == 0 {
		return 0;
	}
	index.reverse_bits() >> (usize::BITS as usize - log_len)
}
