//! Wire limit specs
//!
//! The orchestrator's limits protect it from a node that sends more than it
//! is willing to buffer. Breaching them is a desync for that node only.

use bw_wire::WireLimits;

use crate::prelude::*;

const RELAY_CONFIG: &str = r#"
queue_depth = 8

[limits]
max_string_len = 64
"#;

#[tokio::test]
async fn oversized_string_stops_only_the_offending_node() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relay.toml");
    std::fs::write(&path, RELAY_CONFIG).unwrap();
    let config = RelayConfig::load(&path).unwrap();
    assert_eq!(config.limits, WireLimits { max_string_len: 64, ..WireLimits::default() });

    let mut orchestrator = Orchestrator::start(config);
    let noisy = orchestrator.connect_node(1);
    let quiet = orchestrator.connect_node(2);

    let noisy = spawn_worker(noisy, RelayConfig::default(), |link| {
        let long = "x".repeat(1024);
        // The relay may hang up before the second packet lands
        let _ = link.send(BuildEvent::build_started(long.as_str()));
        let _ = link.send(build_finished_event("never seen", true));
    });
    let quiet = spawn_worker(quiet, RelayConfig::default(), |link| {
        link.send(build_finished_event("Build succeeded.", true)).unwrap();
    });
    noisy.join().unwrap();
    quiet.join().unwrap();

    let (results, received) = orchestrator.finish().await;
    assert!(matches!(&results[0], (1, Err(e)) if e.is_desync()));
    assert!(matches!(results[1], (2, Ok(PumpExit::Closed))));
    assert!(events_from(&received, 1).is_empty());
    assert_eq!(events_from(&received, 2).len(), 1);
}
