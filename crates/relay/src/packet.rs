// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log packets: an i32 tag naming the payload, then the payload frame.
//!
//! Tags `0..=9` are build event type codes. Node errors use tags that no
//! event type will take.

use std::io::{BufRead, Write};

use bw_core::{BuildEvent, EventType, InternalLoggerError, InvalidProjectFileError};
use bw_wire::{EventReader, EventWriter, ProtocolError, Translator, WireLimits};

pub const INVALID_PROJECT_FILE_TAG: i32 = 100;
pub const INTERNAL_LOGGER_ERROR_TAG: i32 = 101;

/// One unit of traffic from a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Event(BuildEvent),
    InvalidProjectFile(InvalidProjectFileError),
    LoggerFailure(InternalLoggerError),
}

impl Packet {
    pub fn tag(&self) -> i32 {
        match self {
            Packet::Event(event) => event.event_type().code(),
            Packet::InvalidProjectFile(_) => INVALID_PROJECT_FILE_TAG,
            Packet::LoggerFailure(_) => INTERNAL_LOGGER_ERROR_TAG,
        }
    }
}

impl From<BuildEvent> for Packet {
    fn from(event: BuildEvent) -> Self {
        Packet::Event(event)
    }
}

pub struct PacketWriter<W: Write> {
    events: EventWriter<W>,
}

impl<W: Write> PacketWriter<W> {
    pub fn new(writer: W, version: i32, limits: WireLimits) -> Self {
        Self { events: EventWriter::new(writer).with_version(version).with_limits(limits) }
    }

    pub fn version(&self) -> i32 {
        self.events.version()
    }

    pub fn send(&mut self, packet: impl Into<Packet>) -> Result<(), ProtocolError> {
        let packet = packet.into();
        let mut tag = packet.tag();
        self.events.translator_mut().translate_i32(&mut tag)?;
        match packet {
            Packet::Event(event) => self.events.write(event),
            Packet::InvalidProjectFile(err) => self.events.write_invalid_project_file(err),
            Packet::LoggerFailure(err) => self.events.write_internal_logger_error(err),
        }
    }

    pub fn into_inner(self) -> W {
        self.events.into_inner()
    }
}

pub struct PacketReader<R: BufRead> {
    events: EventReader<R>,
}

impl<R: BufRead> PacketReader<R> {
    pub fn new(reader: R, version: i32, limits: WireLimits) -> Self {
        Self { events: EventReader::new(reader).with_version(version).with_limits(limits) }
    }

    /// Next packet, or `None` if the peer closed the stream between packets.
    pub fn recv(&mut self) -> Result<Option<Packet>, ProtocolError> {
        if self.events.is_at_end()? {
            return Ok(None);
        }
        let mut tag = 0;
        self.events.translator_mut().translate_i32(&mut tag)?;
        let packet = match tag {
            INVALID_PROJECT_FILE_TAG => {
                Packet::InvalidProjectFile(self.events.read_invalid_project_file()?)
            }
            INTERNAL_LOGGER_ERROR_TAG => {
                Packet::LoggerFailure(self.events.read_internal_logger_error()?)
            }
            code => {
                let event_type =
                    EventType::from_code(code).ok_or(ProtocolError::UnknownEventType(code))?;
                Packet::Event(self.events.read(event_type)?)
            }
        };
        Ok(Some(packet))
    }
}

#[cfg(test)]
#[path = "packet_tests.rs"]
mod tests;
