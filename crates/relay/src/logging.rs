// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup for binaries and tests embedding the relay.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::env;

/// Filter used when `BW_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

fn filter(default: &str) -> EnvFilter {
    env::log_filter()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Install a global subscriber writing to stderr.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init() -> bool {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter(DEFAULT_FILTER))
        .try_init()
        .is_ok()
}

/// Install a subscriber that writes through the test harness's capture.
/// Safe to call from every test.
pub fn init_for_tests() {
    let _ = fmt().with_env_filter(filter("bw_relay=debug,bw_wire=debug")).with_test_writer().try_init();
}
