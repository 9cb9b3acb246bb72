// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bw_core::test_support::{build_finished_event, warning_event};
use bw_core::{InternalLoggerError, InvalidProjectFileError, SourceSpan};

#[tokio::test]
async fn run_sink_drains_until_senders_close() {
    let (tx, rx) = mpsc::channel(4);
    let sink = tokio::spawn(run_sink(rx, Vec::<NodeEvent>::new()));

    tx.send(NodeEvent { node_id: 1, packet: warning_event("BW1").into() }).await.unwrap();
    tx.send(NodeEvent { node_id: 2, packet: build_finished_event("done", true).into() })
        .await
        .unwrap();
    drop(tx);

    let collected = sink.await.unwrap();
    assert_eq!(collected.len(), 2);
    assert_eq!(collected[0].node_id, 1);
    assert_eq!(collected[1].packet, Packet::from(build_finished_event("done", true)));
}

#[test]
fn log_sink_accepts_every_packet_kind() {
    crate::logging::init_for_tests();
    let mut sink = LogSink;
    sink.accept(1, warning_event("BW1").into());
    sink.accept(1, Packet::InvalidProjectFile(InvalidProjectFileError::new(
        "a.proj",
        SourceSpan::at(1, 1),
        "bad",
    )));
    sink.accept(1, Packet::LoggerFailure(InternalLoggerError::new("boom").during_initialization()));
}
