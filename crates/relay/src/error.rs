// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io;

use bw_wire::ProtocolError;
use thiserror::Error;

/// Errors from the relay and the worker-side link.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Handshake failed: {0}")]
    Handshake(#[from] HandshakeError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Node task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl RelayError {
    /// Whether the node's stream fell out of frame alignment.
    pub fn is_desync(&self) -> bool {
        matches!(self, RelayError::Protocol(e) if e.is_desync())
    }
}

#[derive(Debug, Error)]
pub enum HandshakeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("bad magic {0:02x?}")]
    BadMagic([u8; 4]),

    #[error("peer speaks unsupported protocol version {0}")]
    UnsupportedVersion(i32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(i32),

    #[error("queue depth must be at least 1")]
    ZeroQueueDepth,
}
