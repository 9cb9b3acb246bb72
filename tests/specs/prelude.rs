//! Shared helpers for workspace specs.

use std::os::unix::net::UnixStream;
use std::thread::{self, JoinHandle};

pub use bw_core::test_support::*;
pub use bw_core::{
    BuildEvent, Diagnostic, EventContext, EventKind, EventType, InternalLoggerError,
    InvalidProjectFileError, LazyMessage, MessageArg, SourceSpan,
};
pub use bw_relay::{
    run_sink, NodeEvent, NodeLink, Packet, PumpExit, PumpResult, Relay, RelayConfig,
};

/// A relay with one sink task collecting every packet.
pub struct Orchestrator {
    pub relay: Relay,
    sink: tokio::task::JoinHandle<Vec<NodeEvent>>,
}

impl Orchestrator {
    pub fn start(config: RelayConfig) -> Self {
        bw_relay::logging::init_for_tests();
        let (relay, rx) = Relay::new(config);
        let sink = tokio::spawn(run_sink(rx, Vec::new()));
        Self { relay, sink }
    }

    /// Attach a node and return the worker's end of its socket.
    pub fn connect_node(&mut self, node_id: i32) -> UnixStream {
        let (relay_end, worker_end) = UnixStream::pair().unwrap();
        self.relay.attach(node_id, relay_end).unwrap();
        worker_end
    }

    /// Wait for every node to close, then hand back what the sink saw.
    pub async fn finish(self) -> (Vec<(i32, PumpResult)>, Vec<NodeEvent>) {
        let results = self.relay.join().await;
        let events = self.sink.await.unwrap();
        (results, events)
    }

    /// Cancel the build and close every node, then hand back what the sink saw.
    pub async fn shutdown(self) -> (Vec<(i32, PumpResult)>, Vec<NodeEvent>) {
        let results = self.relay.shutdown().await;
        let events = self.sink.await.unwrap();
        (results, events)
    }
}

/// Run `script` as a worker node on its own thread.
pub fn spawn_worker<F>(stream: UnixStream, config: RelayConfig, script: F) -> JoinHandle<()>
where
    F: FnOnce(&mut NodeLink<UnixStream>) + Send + 'static,
{
    thread::spawn(move || {
        let reader = stream.try_clone().unwrap();
        let mut link = NodeLink::connect(reader, stream, &config).unwrap();
        script(&mut link);
    })
}

/// Events received from `node_id`, in arrival order.
pub fn events_from(received: &[NodeEvent], node_id: i32) -> Vec<BuildEvent> {
    received
        .iter()
        .filter(|e| e.node_id == node_id)
        .filter_map(|e| match &e.packet {
            Packet::Event(event) => Some(event.clone()),
            _ => None,
        })
        .collect()
}

pub fn assert_all_closed(results: &[(i32, PumpResult)]) {
    for (node_id, result) in results {
        assert!(
            matches!(result, Ok(PumpExit::Closed)),
            "node {node_id} did not close cleanly: {result:?}"
        );
    }
}
