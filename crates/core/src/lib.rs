// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw-core: Build event model shared by worker nodes and the orchestrator

pub mod macros;

pub mod context;
pub mod error;
pub mod event;
pub mod format;
pub mod locale;
pub mod message;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use context::EventContext;
#[cfg(any(test, feature = "test-support"))]
pub use error::InvalidProjectFileErrorBuilder;
pub use error::{InternalLoggerError, InvalidProjectFileError};
#[cfg(any(test, feature = "test-support"))]
pub use event::DiagnosticBuilder;
pub use event::{
    current_thread_id, BuildEvent, Diagnostic, EventKind, EventType, MessageDetails,
    MessageImportance, ProjectFinished, ProjectStarted, RawEventMut, SourceSpan,
    TargetBuiltReason, TargetFinished, TargetStarted, BUILD_SENDER,
};
pub use format::{CompositeFormatter, FormatError, MessageArg, MessageFormatter};
pub use locale::{BuiltinLocales, Locale, LocaleResolver};
pub use message::{LazyMessage, WireMessage};
