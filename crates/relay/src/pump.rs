// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator side: pumps node channels into one queue.
//!
//! Each attached node gets a blocking task that negotiates the protocol
//! version, then decodes packets and forwards them over a bounded channel.
//! Cancellation is checked between packets. [`Relay::shutdown`] also
//! closes every node stream, so a pump blocked on a silent node wakes up
//! and reports [`PumpExit::Cancelled`].

use std::io::{self, BufReader, BufWriter, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::os::unix::net::UnixStream;

use bw_core::EventContext;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::handshake;
use crate::packet::{Packet, PacketReader};

/// A packet tagged with the node that sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeEvent {
    pub node_id: i32,
    pub packet: Packet,
}

/// Why a node pump stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpExit {
    /// The node closed its stream between packets
    Closed,
    Cancelled,
    /// Nobody is consuming events any more
    ReceiverDropped,
}

bw_core::simple_display! {
    PumpExit {
        Closed => "closed",
        Cancelled => "cancelled",
        ReceiverDropped => "receiver dropped",
    }
}

pub type PumpResult = Result<PumpExit, RelayError>;

/// A duplex node connection the relay can split and force closed.
pub trait NodeStream: Read + Write + Send + Sized + 'static {
    /// Another handle to the same connection.
    fn try_clone_stream(&self) -> io::Result<Self>;

    /// Shut down both directions, waking any reader blocked on the stream.
    fn shutdown_stream(&self) -> io::Result<()>;
}

impl NodeStream for UnixStream {
    fn try_clone_stream(&self) -> io::Result<Self> {
        self.try_clone()
    }

    fn shutdown_stream(&self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

impl NodeStream for TcpStream {
    fn try_clone_stream(&self) -> io::Result<Self> {
        self.try_clone()
    }

    fn shutdown_stream(&self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

struct AttachedNode {
    node_id: i32,
    handle: JoinHandle<PumpResult>,
    close: Box<dyn Fn() -> io::Result<()> + Send>,
}

pub struct Relay {
    config: RelayConfig,
    tx: mpsc::Sender<NodeEvent>,
    cancel: CancellationToken,
    nodes: Vec<AttachedNode>,
}

impl Relay {
    /// Create a relay and the receiving end of its event queue.
    pub fn new(config: RelayConfig) -> (Self, mpsc::Receiver<NodeEvent>) {
        let (tx, rx) = mpsc::channel(config.queue_depth.max(1));
        let relay = Self { config, tx, cancel: CancellationToken::new(), nodes: Vec::new() };
        (relay, rx)
    }

    /// Start pumping a node's stream. Must be called within a tokio runtime.
    pub fn attach<S: NodeStream>(&mut self, node_id: i32, stream: S) -> Result<(), RelayError> {
        let reader = stream.try_clone_stream()?;
        let closer = stream.try_clone_stream()?;
        let config = self.config.clone();
        let tx = self.tx.clone();
        let cancel = self.cancel.child_token();
        let handle = tokio::task::spawn_blocking(move || {
            pump_node(node_id, reader, stream, &config, &tx, &cancel)
        });
        self.nodes.push(AttachedNode {
            node_id,
            handle,
            close: Box::new(move || closer.shutdown_stream()),
        });
        Ok(())
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Wait for every attached node to stop, in attach order.
    pub async fn join(self) -> Vec<(i32, PumpResult)> {
        let Relay { tx, nodes, .. } = self;
        drop(tx);
        let mut results = Vec::with_capacity(nodes.len());
        for AttachedNode { node_id, handle, .. } in nodes {
            let result = handle.await.unwrap_or_else(|e| Err(RelayError::Join(e)));
            results.push((node_id, result));
        }
        results
    }

    /// Cancel every pump, close every node stream, and wait for them to stop.
    pub async fn shutdown(self) -> Vec<(i32, PumpResult)> {
        self.cancel.cancel();
        for node in &self.nodes {
            // Already hung up nodes report ENOTCONN
            if let Err(e) = (node.close)() {
                debug!(node_id = node.node_id, error = %e, "closing node stream");
            }
        }
        self.join().await
    }
}

fn pump_node<R: Read, W: Write>(
    node_id: i32,
    reader: R,
    writer: W,
    config: &RelayConfig,
    tx: &mpsc::Sender<NodeEvent>,
    cancel: &CancellationToken,
) -> PumpResult {
    let mut reader = BufReader::new(reader);
    let mut writer = BufWriter::new(writer);
    let version = match handshake::negotiate(&mut reader, &mut writer, config.protocol_version) {
        Ok(version) => version,
        Err(_) if cancel.is_cancelled() => {
            debug!(node_id, "node pump cancelled during handshake");
            return Ok(PumpExit::Cancelled);
        }
        Err(e) => {
            warn!(node_id, error = %e, "node handshake failed");
            return Err(e.into());
        }
    };
    info!(node_id, version, "node connected");

    let mut packets = PacketReader::new(reader, version, config.limits);
    loop {
        if cancel.is_cancelled() {
            debug!(node_id, "node pump cancelled");
            return Ok(PumpExit::Cancelled);
        }
        let packet = match packets.recv() {
            Ok(Some(packet)) => packet,
            // Shutdown closed the stream under us
            Ok(None) | Err(_) if cancel.is_cancelled() => {
                debug!(node_id, "node pump cancelled");
                return Ok(PumpExit::Cancelled);
            }
            Ok(None) => {
                info!(node_id, "node disconnected");
                return Ok(PumpExit::Closed);
            }
            Err(e) => {
                if e.is_desync() {
                    error!(node_id, error = %e, "protocol desync; node work is lost");
                } else {
                    warn!(node_id, error = %e, "node channel failed");
                }
                return Err(e.into());
            }
        };
        let packet = attach_node_context(node_id, packet);
        if tx.blocking_send(NodeEvent { node_id, packet }).is_err() {
            debug!(node_id, "event receiver dropped");
            return Ok(PumpExit::ReceiverDropped);
        }
    }
}

/// Events sent without a context are attributed to their node.
fn attach_node_context(node_id: i32, packet: Packet) -> Packet {
    match packet {
        Packet::Event(mut event) => {
            if event.context().is_invalid() {
                event.set_context(EventContext::for_node(node_id));
            }
            Packet::Event(event)
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "pump_tests.rs"]
mod tests;
