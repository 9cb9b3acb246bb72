// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io;

use bw_core::EventType;
use thiserror::Error;

/// Errors from encoding or decoding the node channel.
///
/// Data-shape errors (see [`ProtocolError::is_desync`]) mean the two ends
/// disagree about the byte layout. The stream position is then meaningless
/// and the channel must be torn down. Any error from a write that already
/// emitted part of a frame leaves the peer unable to resync as well.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{what} length {len} exceeds limit {max}")]
    LengthOutOfRange { what: &'static str, len: i64, max: usize },

    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),

    #[error("invalid {name} value {value}")]
    InvalidEnum { name: &'static str, value: i32 },

    #[error("expected {expected} frame, found discriminator {found}")]
    ShapeMismatch { expected: EventType, found: u8 },

    #[error("writer was asked for {expected} but the event is {actual}")]
    TypeMismatch { expected: EventType, actual: EventType },

    #[error("unknown event type code {0}")]
    UnknownEventType(i32),

    #[error("timestamp cannot be represented on the wire")]
    TimestampOutOfRange,

    #[error("nothing to write: {0} is absent")]
    MissingValue(&'static str),
}

impl ProtocolError {
    /// Whether the bytes on the stream did not match the expected layout.
    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            ProtocolError::LengthOutOfRange { .. }
                | ProtocolError::InvalidUtf8(_)
                | ProtocolError::InvalidBool(_)
                | ProtocolError::InvalidEnum { .. }
                | ProtocolError::ShapeMismatch { .. }
                | ProtocolError::UnknownEventType(_)
        )
    }

    /// Whether the peer went away (as opposed to sending bad data).
    pub fn is_disconnect(&self) -> bool {
        match self {
            ProtocolError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::UnexpectedEof
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
            ),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
