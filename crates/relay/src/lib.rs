// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transport between worker nodes and the build orchestrator.
//!
//! Workers hold a [`NodeLink`] and send build events and node errors as
//! tagged packets. The orchestrator attaches each node's stream to a
//! [`Relay`], which decodes packets on blocking tasks and funnels them,
//! tagged with the node id, into one bounded queue.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;
pub mod env;
mod error;
pub mod handshake;
mod link;
pub mod logging;
mod packet;
mod pump;
mod sink;

pub use config::RelayConfig;
pub use error::{ConfigError, HandshakeError, RelayError};
pub use link::NodeLink;
pub use packet::{
    Packet, PacketReader, PacketWriter, INTERNAL_LOGGER_ERROR_TAG, INVALID_PROJECT_FILE_TAG,
};
pub use pump::{NodeEvent, NodeStream, PumpExit, PumpResult, Relay};
pub use sink::{run_sink, EventSink, LogSink};
