//! Codec scenarios
//!
//! Encode on one side, decode on the other, and check what a consumer sees.

use bw_wire::{decode_event, encode_event, EventReader, EventWriter};

use crate::prelude::*;

#[test]
fn build_finished_round_trip() {
    let event = BuildEvent::build_finished("Build succeeded.", true);
    let bytes = encode_event(event.clone()).unwrap();
    let decoded = decode_event(&bytes, EventType::BuildFinished).unwrap();

    assert_eq!(decoded.message().as_deref(), Some("Build succeeded."));
    assert_eq!(decoded.help_keyword(), None);
    assert_eq!(decoded.succeeded(), Some(true));
    similar_asserts::assert_eq!(decoded, event);
}

#[test]
fn internal_logger_failure_round_trip() {
    let event = BuildEvent::build_started("evMessage").with_help_keyword("evHelpKeyword");
    let inner = std::io::Error::other("innerException");
    let failure = InternalLoggerError::new("message")
        .with_inner(&inner)
        .with_event(event)
        .with_error_code("errorCode")
        .with_help_keyword("helpKeyword");

    let mut writer = EventWriter::new(Vec::new());
    writer.write_internal_logger_error(failure.clone()).unwrap();
    let bytes = writer.into_inner();
    let decoded = EventReader::new(&bytes[..]).read_internal_logger_error().unwrap();

    assert_eq!(decoded.to_string(), "message");
    assert_eq!(decoded.inner_message.as_deref(), Some("innerException"));
    assert_eq!(decoded.error_code.as_deref(), Some("errorCode"));
    assert_eq!(decoded.help_keyword.as_deref(), Some("helpKeyword"));
    assert!(!decoded.initialization_error);
    let event = decoded.event.as_ref().unwrap();
    assert_eq!(event.message().as_deref(), Some("evMessage"));
    assert_eq!(event.help_keyword(), Some("evHelpKeyword"));
}

#[test]
fn failed_template_still_reads() {
    let event = BuildEvent::build_started(LazyMessage::lazy("{0} {1}", vec![]));
    let bytes = encode_event(event).unwrap();
    let decoded = decode_event(&bytes, EventType::BuildStarted).unwrap();

    let text = decoded.message().unwrap();
    assert!(text.starts_with("\"{0} {1}\""), "{text}");
    assert!(text.len() > "\"{0} {1}\"".len());
    // The failure text is cached like any other result
    assert_eq!(decoded.message(), Some(text));
}
