//! Relay session specs
//!
//! A worker streams a whole build through the relay; the orchestrator sees
//! every event, in order, attributed to the right node.

use crate::prelude::*;

fn build_script(project_file: &'static str) -> Vec<BuildEvent> {
    vec![
        BuildEvent::build_started("Build started."),
        project_started_event(1, project_file),
        target_started_event("Compile", project_file),
        warning_event("BW0168"),
        error_event("BW0103", "src/main.cs", 14),
        message_event("3 files compiled", bw_core::MessageImportance::Normal),
        target_finished_event("Compile", false),
        BuildEvent::project_finished("Project finished.", project_file, false),
        build_finished_event("Build FAILED.", false),
    ]
}

#[tokio::test]
async fn whole_build_arrives_in_order() {
    let mut orchestrator = Orchestrator::start(RelayConfig::default());
    let stream = orchestrator.connect_node(1);

    let sent = build_script("app.proj");
    let script = sent.clone();
    let worker = spawn_worker(stream, RelayConfig::default(), move |link| {
        for event in script {
            link.send(event).unwrap();
        }
    });
    worker.join().unwrap();

    let (results, received) = orchestrator.finish().await;
    assert_all_closed(&results);

    let received = events_from(&received, 1);
    let types: Vec<_> = received.iter().map(BuildEvent::event_type).collect();
    let expected: Vec<_> = sent.iter().map(BuildEvent::event_type).collect();
    assert_eq!(types, expected);

    // Events without a context are attributed to the node; the rest keep theirs
    for (got, want) in received.iter().zip(&sent) {
        if want.context().is_invalid() {
            assert_eq!(*got.context(), EventContext::for_node(1));
            similar_asserts::assert_eq!(got.clone().with_context(EventContext::INVALID), *want);
        } else {
            similar_asserts::assert_eq!(got, want);
        }
    }
}

#[tokio::test]
async fn lazy_messages_format_on_the_orchestrator() {
    let mut orchestrator = Orchestrator::start(RelayConfig::default());
    let stream = orchestrator.connect_node(7);

    let config = RelayConfig { locale: Some("de_DE.UTF-8".into()), ..RelayConfig::default() };
    let worker = spawn_worker(stream, config, |link| {
        let message = link.message("{0} took {1:F1} s", vec!["Compile".into(), 2.5.into()]);
        link.send(BuildEvent::build_started(message)).unwrap();
    });
    worker.join().unwrap();

    let (_, received) = orchestrator.finish().await;
    let event = &events_from(&received, 7)[0];
    assert!(!event.lazy_message().is_formatted());
    assert_eq!(event.lazy_message().locale(), Some("de-DE"));
    assert_eq!(event.message().as_deref(), Some("Compile took 2,5 s"));
}

#[tokio::test]
async fn nodes_are_relayed_independently() {
    let mut orchestrator = Orchestrator::start(RelayConfig::default());
    let workers: Vec<_> = (1..=3)
        .map(|node_id| {
            let stream = orchestrator.connect_node(node_id);
            spawn_worker(stream, RelayConfig::default(), move |link| {
                for line in 0..20 {
                    let text = format!("node {node_id} line {line}");
                    link.send(message_event(&text, bw_core::MessageImportance::Low)).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let (results, received) = orchestrator.finish().await;
    assert_eq!(results.len(), 3);
    assert_all_closed(&results);
    assert_eq!(received.len(), 60);

    for node_id in 1..=3 {
        let lines: Vec<_> =
            events_from(&received, node_id).iter().filter_map(BuildEvent::message).collect();
        let expected: Vec<_> = (0..20).map(|line| format!("node {node_id} line {line}")).collect();
        assert_eq!(lines, expected);
    }
}

#[tokio::test]
async fn shutdown_stops_every_pump() {
    let mut orchestrator = Orchestrator::start(RelayConfig::default());
    let stream = orchestrator.connect_node(1);
    let token = orchestrator.relay.cancellation_token();
    token.cancel();

    let worker = spawn_worker(stream, RelayConfig::default(), |link| {
        // The relay may already have hung up
        let _ = link.send(build_finished_event("late", true));
    });
    worker.join().unwrap();

    let (results, received) = orchestrator.finish().await;
    assert!(matches!(results[0], (1, Ok(PumpExit::Cancelled))));
    assert!(received.is_empty());
}

#[tokio::test]
async fn shutdown_does_not_wait_for_silent_nodes() {
    let mut orchestrator = Orchestrator::start(RelayConfig::default());
    let (connected_tx, connected_rx) = std::sync::mpsc::channel();
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

    // Node 1 connects and then goes quiet with its link open
    let stream = orchestrator.connect_node(1);
    let quiet = spawn_worker(stream, RelayConfig::default(), move |_link| {
        connected_tx.send(()).unwrap();
        let _ = release_rx.recv();
    });
    // Node 2 never even greets the orchestrator
    let mute = orchestrator.connect_node(2);
    connected_rx.recv().unwrap();

    let (results, received) =
        tokio::time::timeout(std::time::Duration::from_secs(5), orchestrator.shutdown())
            .await
            .expect("shutdown waited on a silent node");
    assert!(matches!(results[0], (1, Ok(PumpExit::Cancelled))));
    assert!(matches!(results[1], (2, Ok(PumpExit::Cancelled))));
    assert!(received.is_empty());

    release_tx.send(()).unwrap();
    quiet.join().unwrap();
    drop(mute);
}
