// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bw_core::test_support::{
    build_finished_event, error_event, message_event, project_started_event,
    target_started_event,
};
use bw_core::{MessageImportance, SourceSpan};

#[test]
fn frames_stream_back_to_back() {
    let events = vec![
        project_started_event(1, "app.proj"),
        target_started_event("Build", "app.proj"),
        error_event("BW0001", "a.cs", 3),
        message_event("note", MessageImportance::Low),
        build_finished_event("Build succeeded.", true),
    ];

    let mut writer = EventWriter::new(Vec::new());
    for event in events.clone() {
        writer.write(event).unwrap();
    }
    let bytes = writer.into_inner();

    let mut reader = EventReader::new(&bytes[..]);
    for expected in &events {
        let decoded = reader.read(expected.event_type()).unwrap();
        assert_eq!(&decoded, expected);
    }
    assert!(reader.is_at_end().unwrap());
}

#[test]
fn errors_share_the_stream_with_events() {
    let err = InvalidProjectFileError::new("app.proj", SourceSpan::at(1, 1), "bad");
    let logger = InternalLoggerError::new("logger failed").with_event(error_event("BW2", "b.cs", 1));

    let mut writer = EventWriter::new(Vec::new());
    writer.write_invalid_project_file(err.clone()).unwrap();
    writer.write(build_finished_event("Build failed.", false)).unwrap();
    writer.write_internal_logger_error(logger.clone()).unwrap();
    let bytes = writer.into_inner();

    let mut reader = EventReader::new(&bytes[..]);
    assert_eq!(reader.read_invalid_project_file().unwrap(), err);
    assert_eq!(
        reader.read(EventType::BuildFinished).unwrap(),
        build_finished_event("Build failed.", false)
    );
    assert_eq!(reader.read_internal_logger_error().unwrap(), logger);
    assert!(reader.is_at_end().unwrap());
}

#[test]
fn version_is_carried_by_both_ends() {
    let writer = EventWriter::new(Vec::new()).with_version(1);
    assert_eq!(writer.version(), 1);
    let empty: &[u8] = &[];
    let reader = EventReader::new(empty);
    assert_eq!(reader.version(), crate::PROTOCOL_VERSION);
}

#[test]
fn limits_apply_to_reader() {
    let bytes = encode_event(error_event("BW0001", "a-very-long-file-name.cs", 3)).unwrap();
    let limits = WireLimits { max_string_len: 8, ..WireLimits::default() };
    let err = EventReader::new(&bytes[..]).with_limits(limits).read(EventType::Error).unwrap_err();
    assert!(err.is_desync());
}

#[test]
fn empty_stream_reports_eof() {
    let empty: &[u8] = &[];
    let mut reader = EventReader::new(empty);
    assert!(reader.is_at_end().unwrap());
    let err = reader.read(EventType::BuildStarted).unwrap_err();
    assert!(err.is_disconnect());
}
