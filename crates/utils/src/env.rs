// Copyright 2025 Irreducible Inc.

use std::str::FromStr;

/// Read boolean flag from the environment variable.
pub fn boolean_env_flag_set(flag: &str) -> bool {
	match std::env::var(flag) {
		Ok(val) => ["1", "on", "ON", "true", "TRUE", "yes", "YES"].contains(&val.as_str()),
		Err(_) => false,
	}
}

/// Read and parse a value from the environment variable.
///
/// Returns `None` if the variable is unset or does not parse.
pub fn parsed_env_var<T: FromStr>(var: &str) -> Option<T> {
	std::env::var(var).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unset_variables() {
		assert!(!boolean_env_flag_set("ZKNTT_UTILS_TEST_SURELY_UNSET"));
		assert_eq!(parsed_env_var::<usize>("ZKNTT_UTILS_TEST_SURELY_UNSET"), None);
	}
}
