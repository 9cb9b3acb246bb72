//! Version skew specs
//!
//! Nodes and orchestrator built at different protocol versions agree on the
//! older one; fields newer than the session are dropped, nothing else.

use bw_wire::{HELP_LINK_VERSION, MIN_PROTOCOL_VERSION, PROTOCOL_VERSION};

use crate::prelude::*;

fn v1() -> RelayConfig {
    RelayConfig { protocol_version: MIN_PROTOCOL_VERSION, ..RelayConfig::default() }
}

async fn relay_one(relay_config: RelayConfig, worker_config: RelayConfig) -> (i32, BuildEvent) {
    let mut orchestrator = Orchestrator::start(relay_config);
    let stream = orchestrator.connect_node(1);
    let worker = std::thread::spawn(move || {
        let reader = stream.try_clone().unwrap();
        let mut link = NodeLink::connect(reader, stream, &worker_config).unwrap();
        link.send(error_event("BW0103", "src/main.cs", 14)).unwrap();
        link.version()
    });
    let version = worker.join().unwrap();

    let (results, received) = orchestrator.finish().await;
    assert_all_closed(&results);
    (version, events_from(&received, 1).remove(0))
}

#[tokio::test]
async fn same_version_keeps_help_link() {
    let (version, event) = relay_one(RelayConfig::default(), RelayConfig::default()).await;
    assert_eq!(version, PROTOCOL_VERSION);
    let diagnostic = event.diagnostic().unwrap();
    assert_eq!(diagnostic.help_link.as_deref(), Some("https://example.invalid/help"));
}

#[tokio::test]
async fn old_worker_new_orchestrator() {
    let (version, event) = relay_one(RelayConfig::default(), v1()).await;
    assert_eq!(version, MIN_PROTOCOL_VERSION);
    let diagnostic = event.diagnostic().unwrap();
    assert_eq!(diagnostic.help_link, None);
    assert_eq!(diagnostic.code.as_deref(), Some("BW0103"));
    assert_eq!(event.message().as_deref(), Some("BW0103 failed"));
}

#[tokio::test]
async fn new_worker_old_orchestrator() {
    let (version, event) = relay_one(v1(), RelayConfig::default()).await;
    assert_eq!(version, MIN_PROTOCOL_VERSION);
    assert_eq!(event.diagnostic().unwrap().help_link, None);
}

#[tokio::test]
async fn foreign_peer_is_rejected() {
    let mut orchestrator = Orchestrator::start(RelayConfig::default());
    let mut stream = orchestrator.connect_node(9);
    std::io::Write::write_all(&mut stream, b"HTTP/1.1 200 OK\r\n").unwrap();

    let (results, received) = orchestrator.finish().await;
    drop(stream);
    assert!(matches!(results[0], (9, Err(bw_relay::RelayError::Handshake(_)))));
    assert!(received.is_empty());
}

#[tokio::test]
async fn numeric_arguments_keep_their_format_from_protocol_three() {
    let cases = [
        (PROTOCOL_VERSION, "took 1.23s, 0007 items"),
        // Older sessions only carry the arguments' plain text
        (HELP_LINK_VERSION, "took 1.23456s, 7 items"),
    ];
    for (version, expected) in cases {
        let mut orchestrator = Orchestrator::start(RelayConfig::default());
        let stream = orchestrator.connect_node(1);
        let worker_config = RelayConfig {
            protocol_version: version,
            locale: Some("en-US".into()),
            ..RelayConfig::default()
        };
        let worker = spawn_worker(stream, worker_config, |link| {
            let message = link.message("took {0:F2}s, {1:D4} items", vec![1.23456.into(), 7i64.into()]);
            link.send(BuildEvent::build_started(message)).unwrap();
        });
        worker.join().unwrap();

        let (results, received) = orchestrator.finish().await;
        assert_all_closed(&results);
        let event = &events_from(&received, 1)[0];
        assert_eq!(event.message().as_deref(), Some(expected), "protocol {version}");
    }
}
