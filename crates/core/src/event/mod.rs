// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build events raised by worker nodes.
//!
//! Every event shares a common header (message, help keyword, sender,
//! timestamp, thread, context). What follows the header depends on the
//! concrete variant, held in [`EventKind`]. [`EventType`] names a variant
//! without its data; readers use it to say which variant they expect.

mod diagnostic;
mod methods;
mod project;
mod target;

pub use diagnostic::{Diagnostic, MessageDetails, MessageImportance, SourceSpan};
#[cfg(any(test, feature = "test-support"))]
pub use diagnostic::DiagnosticBuilder;
pub use project::{ProjectFinished, ProjectStarted};
pub use target::{TargetBuiltReason, TargetFinished, TargetStarted};

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::OnceLock;

use chrono::{DateTime, Local, Utc};

use crate::context::EventContext;
use crate::message::LazyMessage;

/// Sender name used by the status-event constructors.
pub const BUILD_SENDER: &str = "buildwire";

/// Variant-specific data of a build event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Event with no variant data and plain (non-lazy) text
    Custom,
    BuildStarted,
    BuildFinished { succeeded: bool },
    ProjectStarted(ProjectStarted),
    ProjectFinished(ProjectFinished),
    TargetStarted(TargetStarted),
    TargetFinished(TargetFinished),
    Error(Diagnostic),
    Warning(Diagnostic),
    Message(MessageDetails),
}

/// Which concrete variant an event is, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Custom,
    BuildStarted,
    BuildFinished,
    ProjectStarted,
    ProjectFinished,
    TargetStarted,
    TargetFinished,
    Error,
    Warning,
    Message,
}

impl EventType {
    pub const ALL: [EventType; 10] = [
        EventType::Custom,
        EventType::BuildStarted,
        EventType::BuildFinished,
        EventType::ProjectStarted,
        EventType::ProjectFinished,
        EventType::TargetStarted,
        EventType::TargetFinished,
        EventType::Error,
        EventType::Warning,
        EventType::Message,
    ];

    /// Stable numeric code, for dispatch code that frames events.
    pub fn code(self) -> i32 {
        match self {
            EventType::Custom => 0,
            EventType::BuildStarted => 1,
            EventType::BuildFinished => 2,
            EventType::ProjectStarted => 3,
            EventType::ProjectFinished => 4,
            EventType::TargetStarted => 5,
            EventType::TargetFinished => 6,
            EventType::Error => 7,
            EventType::Warning => 8,
            EventType::Message => 9,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.code() == code)
    }

    /// Whether events of this type carry format arguments and a locale.
    pub fn is_lazy_formatted(self) -> bool {
        !matches!(self, EventType::Custom)
    }

    /// Variant data with every field at its default, ready to be filled in.
    pub fn empty_kind(self) -> EventKind {
        match self {
            EventType::Custom => EventKind::Custom,
            EventType::BuildStarted => EventKind::BuildStarted,
            EventType::BuildFinished => EventKind::BuildFinished { succeeded: false },
            EventType::ProjectStarted => EventKind::ProjectStarted(ProjectStarted::default()),
            EventType::ProjectFinished => EventKind::ProjectFinished(ProjectFinished::default()),
            EventType::TargetStarted => EventKind::TargetStarted(TargetStarted::default()),
            EventType::TargetFinished => EventKind::TargetFinished(TargetFinished::default()),
            EventType::Error => EventKind::Error(Diagnostic::default()),
            EventType::Warning => EventKind::Warning(Diagnostic::default()),
            EventType::Message => EventKind::Message(MessageDetails::default()),
        }
    }
}

crate::simple_display! {
    EventType {
        Custom => "custom",
        BuildStarted => "build:started",
        BuildFinished => "build:finished",
        ProjectStarted => "project:started",
        ProjectFinished => "project:finished",
        TargetStarted => "target:started",
        TargetFinished => "target:finished",
        Error => "error",
        Warning => "warning",
        Message => "message",
    }
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Custom => EventType::Custom,
            EventKind::BuildStarted => EventType::BuildStarted,
            EventKind::BuildFinished { .. } => EventType::BuildFinished,
            EventKind::ProjectStarted(_) => EventType::ProjectStarted,
            EventKind::ProjectFinished(_) => EventType::ProjectFinished,
            EventKind::TargetStarted(_) => EventType::TargetStarted,
            EventKind::TargetFinished(_) => EventType::TargetFinished,
            EventKind::Error(_) => EventType::Error,
            EventKind::Warning(_) => EventType::Warning,
            EventKind::Message(_) => EventType::Message,
        }
    }
}

/// A single occurrence in a build's lifecycle.
pub struct BuildEvent {
    message: LazyMessage,
    help_keyword: Option<String>,
    sender_name: Option<String>,
    timestamp: DateTime<Utc>,
    local_timestamp: OnceLock<DateTime<Local>>,
    thread_id: i32,
    context: EventContext,
    kind: EventKind,
}

/// Mutable access to every stored field of an event, for codecs.
pub struct RawEventMut<'a> {
    pub message: &'a mut LazyMessage,
    pub help_keyword: &'a mut Option<String>,
    pub sender_name: &'a mut Option<String>,
    pub timestamp: &'a mut DateTime<Utc>,
    pub thread_id: &'a mut i32,
    pub context: &'a mut EventContext,
    pub kind: &'a mut EventKind,
}

impl BuildEvent {
    /// Create an event stamped with the current time and thread.
    pub fn new(kind: EventKind, message: impl Into<LazyMessage>) -> Self {
        Self {
            message: message.into(),
            help_keyword: None,
            sender_name: None,
            timestamp: Utc::now(),
            local_timestamp: OnceLock::new(),
            thread_id: current_thread_id(),
            context: EventContext::INVALID,
            kind,
        }
    }

    /// An event of the given type with every field at its default.
    ///
    /// Decoders allocate this and then fill it in field by field.
    pub fn empty(event_type: EventType) -> Self {
        Self {
            message: LazyMessage::default(),
            help_keyword: None,
            sender_name: None,
            timestamp: DateTime::<Utc>::default(),
            local_timestamp: OnceLock::new(),
            thread_id: 0,
            context: EventContext::INVALID,
            kind: event_type.empty_kind(),
        }
    }

    pub fn with_help_keyword(mut self, help_keyword: impl Into<String>) -> Self {
        self.help_keyword = Some(help_keyword.into());
        self
    }

    pub fn with_sender(mut self, sender_name: impl Into<String>) -> Self {
        self.sender_name = Some(sender_name.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self.local_timestamp = OnceLock::new();
        self
    }

    pub fn with_thread_id(mut self, thread_id: i32) -> Self {
        self.thread_id = thread_id;
        self
    }

    pub fn with_context(mut self, context: EventContext) -> Self {
        self.context = context;
        self
    }

    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Final message text, formatting it on first access.
    pub fn message(&self) -> Option<String> {
        self.message.text()
    }

    pub fn lazy_message(&self) -> &LazyMessage {
        &self.message
    }

    pub fn help_keyword(&self) -> Option<&str> {
        self.help_keyword.as_deref()
    }

    pub fn sender_name(&self) -> Option<&str> {
        self.sender_name.as_deref()
    }

    /// When the event was raised, in local time. Converted once and cached.
    pub fn timestamp(&self) -> DateTime<Local> {
        *self.local_timestamp.get_or_init(|| self.timestamp.with_timezone(&Local))
    }

    /// When the event was raised, in UTC, without conversion.
    pub fn raw_timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn thread_id(&self) -> i32 {
        self.thread_id
    }

    pub fn context(&self) -> &EventContext {
        &self.context
    }

    /// Attach a context after the fact (the orchestrator does this on receipt).
    pub fn set_context(&mut self, context: EventContext) {
        self.context = context;
    }

    pub fn raw_mut(&mut self) -> RawEventMut<'_> {
        self.local_timestamp = OnceLock::new();
        RawEventMut {
            message: &mut self.message,
            help_keyword: &mut self.help_keyword,
            sender_name: &mut self.sender_name,
            timestamp: &mut self.timestamp,
            thread_id: &mut self.thread_id,
            context: &mut self.context,
            kind: &mut self.kind,
        }
    }
}

impl Clone for BuildEvent {
    fn clone(&self) -> Self {
        Self {
            message: self.message.clone(),
            help_keyword: self.help_keyword.clone(),
            sender_name: self.sender_name.clone(),
            timestamp: self.timestamp,
            local_timestamp: OnceLock::new(),
            thread_id: self.thread_id,
            context: self.context,
            kind: self.kind.clone(),
        }
    }
}

// The local-time cache is derived state and is not compared.
impl PartialEq for BuildEvent {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
            && self.help_keyword == other.help_keyword
            && self.sender_name == other.sender_name
            && self.timestamp == other.timestamp
            && self.thread_id == other.thread_id
            && self.context == other.context
            && self.kind == other.kind
    }
}

impl std::fmt::Debug for BuildEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildEvent")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("help_keyword", &self.help_keyword)
            .field("sender_name", &self.sender_name)
            .field("timestamp", &self.timestamp)
            .field("thread_id", &self.thread_id)
            .field("context", &self.context)
            .finish()
    }
}

/// Small per-thread identifier recorded on events.
///
/// Assigned on first use by each thread, starting at 1.
pub fn current_thread_id() -> i32 {
    static NEXT_ID: AtomicI32 = AtomicI32::new(1);
    thread_local! {
        static THREAD_ID: i32 = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    }
    THREAD_ID.with(|id| *id)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
