//! Node error specs
//!
//! Worker-side failures travel on the same channel as events.

use crate::prelude::*;

#[tokio::test]
async fn invalid_project_file_reaches_orchestrator() {
    let mut orchestrator = Orchestrator::start(RelayConfig::default());
    let stream = orchestrator.connect_node(2);

    let err = InvalidProjectFileError::new("app.proj", SourceSpan::at(12, 5), "unexpected element")
        .with_subcategory("XML")
        .with_code("BW4025");
    let sent = err.clone();
    let worker = spawn_worker(stream, RelayConfig::default(), move |link| {
        link.send(BuildEvent::build_started("Build started.")).unwrap();
        link.send_invalid_project_file(sent).unwrap();
        link.send(build_finished_event("Build FAILED.", false)).unwrap();
    });
    worker.join().unwrap();

    let (results, received) = orchestrator.finish().await;
    assert_all_closed(&results);
    assert_eq!(received.len(), 3);
    assert_eq!(received[1], NodeEvent { node_id: 2, packet: Packet::InvalidProjectFile(err) });

    let Packet::InvalidProjectFile(decoded) = &received[1].packet else {
        panic!("expected an invalid project file");
    };
    assert_eq!(decoded.to_string(), "app.proj(12,5): XML error BW4025: unexpected element");
    assert!(!decoded.has_been_logged);
}

#[tokio::test]
async fn logger_failure_carries_the_offending_event() {
    let mut orchestrator = Orchestrator::start(RelayConfig::default());
    let stream = orchestrator.connect_node(4);

    let worker = spawn_worker(stream, RelayConfig::default(), |link| {
        let inner = std::io::Error::other("disk full");
        let failure = InternalLoggerError::new("file logger failed")
            .with_inner(&inner)
            .with_event(error_event("BW0103", "src/main.cs", 14))
            .with_error_code("BW9001");
        link.send_logger_failure(failure).unwrap();
    });
    worker.join().unwrap();

    let (_, received) = orchestrator.finish().await;
    let [NodeEvent { node_id: 4, packet: Packet::LoggerFailure(failure) }] = &received[..] else {
        panic!("expected one logger failure, got {received:?}");
    };
    assert_eq!(failure.inner_message.as_deref(), Some("disk full"));
    assert_eq!(failure.error_code.as_deref(), Some("BW9001"));

    // The nested event is not re-attributed to the node
    let event = failure.event.as_ref().unwrap();
    assert!(event.context().is_invalid());
    assert_eq!(event.message().as_deref(), Some("BW0103 failed"));
}
