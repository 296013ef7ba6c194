// Copyright 2025 Irreducible Inc.

/// Installs a global `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Does nothing if a global subscriber is already installed.
pub fn init_tracing() {
	use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer())
		.try_init();
}
