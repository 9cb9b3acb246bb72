// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumers of decoded node traffic.

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::packet::Packet;
use crate::pump::NodeEvent;

/// Receives every packet decoded by the relay, tagged with its node.
pub trait EventSink: Send {
    fn accept(&mut self, node_id: i32, packet: Packet);
}

/// Sink that records each packet as a structured log line.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn accept(&mut self, node_id: i32, packet: Packet) {
        match packet {
            Packet::Event(event) => info!(
                node_id,
                context = %event.context(),
                summary = %event.log_summary(),
                text = %event.message().unwrap_or_default(),
                "build event"
            ),
            Packet::InvalidProjectFile(err) => warn!(node_id, error = %err, "invalid project file"),
            Packet::LoggerFailure(err) => error!(
                node_id,
                error = %err,
                inner = err.inner_message.as_deref().unwrap_or_default(),
                initialization = err.initialization_error,
                "node logger failed"
            ),
        }
    }
}

impl EventSink for Vec<NodeEvent> {
    fn accept(&mut self, node_id: i32, packet: Packet) {
        self.push(NodeEvent { node_id, packet });
    }
}

/// Drain the relay's queue into `sink` until every sender is gone.
pub async fn run_sink<S: EventSink>(mut rx: mpsc::Receiver<NodeEvent>, mut sink: S) -> S {
    while let Some(NodeEvent { node_id, packet }) = rx.recv().await {
        sink.accept(node_id, packet);
    }
    sink
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
