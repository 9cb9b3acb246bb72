// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker side of a node channel.

use std::io::{BufWriter, Read, Write};

use bw_core::{BuildEvent, InternalLoggerError, InvalidProjectFileError, LazyMessage, MessageArg};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::handshake;
use crate::packet::{Packet, PacketWriter};

/// Sends events from a worker node to the orchestrator.
///
/// Writes are blocking and flushed per packet.
pub struct NodeLink<W: Write> {
    packets: PacketWriter<BufWriter<W>>,
    locale: String,
}

impl<W: Write> NodeLink<W> {
    /// Negotiate the protocol version with the orchestrator.
    pub fn connect<R: Read>(
        mut reader: R,
        writer: W,
        config: &RelayConfig,
    ) -> Result<Self, RelayError> {
        config.validate()?;
        let mut writer = BufWriter::new(writer);
        let version = handshake::negotiate(&mut reader, &mut writer, config.protocol_version)?;
        Ok(Self {
            packets: PacketWriter::new(writer, version, config.limits),
            locale: config.locale_name(),
        })
    }

    pub fn version(&self) -> i32 {
        self.packets.version()
    }

    /// A lazily formatted message in this link's locale.
    pub fn message(&self, template: impl Into<String>, args: Vec<MessageArg>) -> LazyMessage {
        LazyMessage::lazy_in(template, args, self.locale.clone())
    }

    pub fn send(&mut self, event: BuildEvent) -> Result<(), RelayError> {
        Ok(self.packets.send(event)?)
    }

    pub fn send_invalid_project_file(
        &mut self,
        err: InvalidProjectFileError,
    ) -> Result<(), RelayError> {
        Ok(self.packets.send(Packet::InvalidProjectFile(err))?)
    }

    pub fn send_logger_failure(&mut self, err: InternalLoggerError) -> Result<(), RelayError> {
        Ok(self.packets.send(Packet::LoggerFailure(err))?)
    }
}
