// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the relay crate.
//!
//! Unset, empty or unparsable values read as `None`.

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Protocol version to offer in the handshake (`BW_PROTOCOL_VERSION`)
pub fn protocol_version() -> Option<i32> {
    var("BW_PROTOCOL_VERSION").and_then(|s| s.parse::<i32>().ok())
}

/// Decoded events buffered between node readers and the sink (`BW_QUEUE_DEPTH`)
pub fn queue_depth() -> Option<usize> {
    var("BW_QUEUE_DEPTH").and_then(|s| s.parse::<usize>().ok())
}

/// Longest string or byte buffer accepted from a node (`BW_MAX_STRING_LEN`)
pub fn max_string_len() -> Option<usize> {
    var("BW_MAX_STRING_LEN").and_then(|s| s.parse::<usize>().ok())
}

/// Largest collection accepted from a node (`BW_MAX_COLLECTION_LEN`)
pub fn max_collection_len() -> Option<usize> {
    var("BW_MAX_COLLECTION_LEN").and_then(|s| s.parse::<usize>().ok())
}

/// Locale stamped on messages created through a node link (`BW_LOCALE`)
pub fn locale() -> Option<String> {
    var("BW_LOCALE")
}

/// Log filter directive, `EnvFilter` syntax (`BW_LOG`)
pub fn log_filter() -> Option<String> {
    var("BW_LOG")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
