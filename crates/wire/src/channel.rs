// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream endpoints for event and error frames.

use std::io::{BufRead, Write};

use bw_core::{BuildEvent, EventType, InternalLoggerError, InvalidProjectFileError};
use tracing::debug;

use crate::error::Result;
use crate::event::translate_event;
use crate::exception::{translate_internal_logger_error, translate_invalid_project_file};
use crate::translator::{ReadTranslator, Translator, WireLimits, WriteTranslator};

/// Sending half of a node channel.
pub struct EventWriter<W: Write> {
    translator: WriteTranslator<W>,
}

impl<W: Write> EventWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { translator: WriteTranslator::new(writer) }
    }

    pub fn with_version(self, version: i32) -> Self {
        Self { translator: self.translator.with_version(version) }
    }

    pub fn with_limits(self, limits: WireLimits) -> Self {
        Self { translator: self.translator.with_limits(limits) }
    }

    pub fn version(&self) -> i32 {
        self.translator.version()
    }

    /// Encode and flush one event. The event is consumed.
    pub fn write(&mut self, mut event: BuildEvent) -> Result<()> {
        let event_type = event.event_type();
        translate_event(&mut self.translator, event_type, &mut event)?;
        self.translator.flush()
    }

    pub fn write_invalid_project_file(&mut self, err: InvalidProjectFileError) -> Result<()> {
        translate_invalid_project_file(&mut self.translator, &mut Some(err))?;
        self.translator.flush()
    }

    pub fn write_internal_logger_error(&mut self, err: InternalLoggerError) -> Result<()> {
        translate_internal_logger_error(&mut self.translator, &mut Some(err))?;
        self.translator.flush()
    }

    /// Direct access for surrounding framing (e.g. a type code before each frame).
    pub fn translator_mut(&mut self) -> &mut WriteTranslator<W> {
        &mut self.translator
    }

    pub fn into_inner(self) -> W {
        self.translator.into_inner()
    }
}

/// Receiving half of a node channel.
pub struct EventReader<R: BufRead> {
    translator: ReadTranslator<R>,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self { translator: ReadTranslator::new(reader) }
    }

    pub fn with_version(self, version: i32) -> Self {
        Self { translator: self.translator.with_version(version) }
    }

    pub fn with_limits(self, limits: WireLimits) -> Self {
        Self { translator: self.translator.with_limits(limits) }
    }

    pub fn version(&self) -> i32 {
        self.translator.version()
    }

    /// Decode the next frame as an event of type `expected`.
    pub fn read(&mut self, expected: EventType) -> Result<BuildEvent> {
        let mut event = BuildEvent::empty(expected);
        translate_event(&mut self.translator, expected, &mut event).inspect_err(|e| {
            if e.is_desync() {
                debug!(event_type = %expected, error = %e, "event frame rejected");
            }
        })?;
        Ok(event)
    }

    pub fn read_invalid_project_file(&mut self) -> Result<InvalidProjectFileError> {
        let mut slot = None;
        translate_invalid_project_file(&mut self.translator, &mut slot)?;
        Ok(slot.unwrap_or_default())
    }

    pub fn read_internal_logger_error(&mut self) -> Result<InternalLoggerError> {
        let mut slot = None;
        translate_internal_logger_error(&mut self.translator, &mut slot)?;
        Ok(slot.unwrap_or_default())
    }

    /// Whether the peer closed the stream between frames.
    pub fn is_at_end(&mut self) -> Result<bool> {
        self.translator.at_end()
    }

    pub fn translator_mut(&mut self) -> &mut ReadTranslator<R> {
        &mut self.translator
    }

    pub fn into_inner(self) -> R {
        self.translator.into_inner()
    }
}

/// Encode a single event frame at the current protocol version.
pub fn encode_event(event: BuildEvent) -> Result<Vec<u8>> {
    encode_event_with_version(crate::PROTOCOL_VERSION, event)
}

pub fn encode_event_with_version(version: i32, event: BuildEvent) -> Result<Vec<u8>> {
    let mut writer = EventWriter::new(Vec::new()).with_version(version);
    writer.write(event)?;
    Ok(writer.into_inner())
}

/// Decode a single event frame at the current protocol version.
pub fn decode_event(bytes: &[u8], expected: EventType) -> Result<BuildEvent> {
    decode_event_with_version(crate::PROTOCOL_VERSION, bytes, expected)
}

pub fn decode_event_with_version(
    version: i32,
    bytes: &[u8],
    expected: EventType,
) -> Result<BuildEvent> {
    EventReader::new(bytes).with_version(version).read(expected)
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
