// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binary codec for the worker node channel.
//!
//! Build events and node errors are streamed field by field with a
//! hand-written, versioned layout. Both directions share one frame
//! description per type (see [`Translator`]), so reader and writer cannot
//! drift apart.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod channel;
mod error;
mod event;
mod exception;
mod translator;

pub use channel::{
    decode_event, decode_event_with_version, encode_event, encode_event_with_version,
    EventReader, EventWriter,
};
pub use error::{ProtocolError, Result};
pub use event::{shape, translate_event, translate_option_event};
pub use exception::{translate_internal_logger_error, translate_invalid_project_file};
pub use translator::{
    Direction, ReadTranslator, Translator, WireEnum, WireLimits, WriteTranslator,
    HELP_LINK_VERSION, MIN_PROTOCOL_VERSION, PROTOCOL_VERSION, TYPED_ARGS_VERSION,
};
