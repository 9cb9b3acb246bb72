// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build event frames.
//!
//! ```text
//! frame   := shape:u8 header [lazy] variant [kinds]
//! header  := message? help_keyword? sender? timestamp thread:i32 context?
//! lazy    := args? locale?                      (shape 2 only)
//! kinds   := (kind:i32 [value:i64])*            (shape 2 with args, protocol 3+)
//! context := node project_context target task submission instance   (6 x i32)
//! ```
//!
//! The shape byte is `1` for the plain header and `2` for the lazily
//! formatted header. The variant block is selected by the event's type,
//! which the caller supplies on read: frames do not carry their own type.
//!
//! Arguments always travel as text rendered in the originating locale.
//! From protocol 3 each one is followed at the end of the frame by its
//! kind, and numbers by their exact value, so the receiver formats them
//! with the same specifiers the sender would.

use bw_core::{
    BuildEvent, Diagnostic, EventContext, EventKind, EventType, LazyMessage, MessageArg,
    MessageDetails, SourceSpan, WireMessage,
};

use crate::error::{ProtocolError, Result};
use crate::translator::{Translator, WireEnum, HELP_LINK_VERSION, TYPED_ARGS_VERSION};

/// Frame discriminator values.
pub mod shape {
    /// No event follows. Only valid where the event itself is optional.
    pub const NONE: u8 = 0;
    pub const PLAIN: u8 = 1;
    pub const LAZY: u8 = 2;
}

fn shape_of(event_type: EventType) -> u8 {
    if event_type.is_lazy_formatted() {
        shape::LAZY
    } else {
        shape::PLAIN
    }
}

/// Translate one event frame.
///
/// Writing: `event` must be of type `expected`. Reading: `event` is
/// replaced with a fresh `expected` event filled from the stream.
pub fn translate_event<T: Translator>(
    t: &mut T,
    expected: EventType,
    event: &mut BuildEvent,
) -> Result<()> {
    if t.is_reading() {
        *event = BuildEvent::empty(expected);
    } else if event.event_type() != expected {
        return Err(ProtocolError::TypeMismatch { expected, actual: event.event_type() });
    }

    let mut discriminator = shape_of(expected);
    t.translate_u8(&mut discriminator)?;
    if discriminator != shape_of(expected) {
        return Err(ProtocolError::ShapeMismatch { expected, found: discriminator });
    }
    let lazy = expected.is_lazy_formatted();

    let raw = event.raw_mut();
    let mut message = if t.is_reading() {
        WireMessage::default()
    } else if lazy {
        raw.message.to_wire()
    } else {
        // Plain frames only carry final text
        WireMessage { text: raw.message.text(), args: None, locale: None }
    };

    t.translate_option_string(&mut message.text)?;
    t.translate_option_string(raw.help_keyword)?;
    t.translate_option_string(raw.sender_name)?;
    t.translate_timestamp(raw.timestamp)?;
    t.translate_i32(raw.thread_id)?;
    translate_context(t, raw.context)?;
    if lazy {
        let mut texts = if t.is_reading() { None } else { message.rendered_args() };
        t.translate_option_string_list(&mut texts)?;
        t.translate_option_string(&mut message.locale)?;
        if t.is_reading() {
            message.args = texts.map(|texts| texts.into_iter().map(MessageArg::Text).collect());
        }
    }

    translate_kind(t, raw.kind)?;

    if lazy && t.version() >= TYPED_ARGS_VERSION {
        if let Some(args) = message.args.as_mut() {
            translate_arg_kinds(t, args)?;
        }
    }
    if t.is_reading() {
        *raw.message = LazyMessage::from_wire(message);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgKind {
    Text,
    Integer,
    Decimal,
}

impl ArgKind {
    fn of(arg: &MessageArg) -> Self {
        match arg {
            MessageArg::Text(_) => ArgKind::Text,
            MessageArg::Integer(_) => ArgKind::Integer,
            MessageArg::Decimal(_) => ArgKind::Decimal,
        }
    }
}

impl WireEnum for ArgKind {
    const NAME: &'static str = "argument kind";

    fn code(self) -> i32 {
        match self {
            ArgKind::Text => 0,
            ArgKind::Integer => 1,
            ArgKind::Decimal => 2,
        }
    }

    fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ArgKind::Text),
            1 => Some(ArgKind::Integer),
            2 => Some(ArgKind::Decimal),
            _ => None,
        }
    }
}

/// Kind of each argument, one per entry of the text list already read.
///
/// Text arguments are complete as sent. Integers follow as i64, decimals
/// as the i64 bit pattern of their f64.
fn translate_arg_kinds<T: Translator>(t: &mut T, args: &mut [MessageArg]) -> Result<()> {
    for arg in args.iter_mut() {
        let mut kind = ArgKind::of(arg);
        t.translate_enum(&mut kind)?;
        match kind {
            ArgKind::Text => {}
            ArgKind::Integer => {
                let mut value = match arg {
                    MessageArg::Integer(n) => *n,
                    _ => 0,
                };
                t.translate_i64(&mut value)?;
                *arg = MessageArg::Integer(value);
            }
            ArgKind::Decimal => {
                let mut bits = match arg {
                    MessageArg::Decimal(d) => d.to_bits() as i64,
                    _ => 0,
                };
                t.translate_i64(&mut bits)?;
                *arg = MessageArg::Decimal(f64::from_bits(bits as u64));
            }
        }
    }
    Ok(())
}

/// Optional nested event: presence flag, type code, frame.
///
/// An absent event is a single `0` byte ([`shape::NONE`]).
pub fn translate_option_event<T: Translator>(
    t: &mut T,
    slot: &mut Option<BuildEvent>,
) -> Result<()> {
    if !t.translate_nullable(slot.is_some())? {
        *slot = None;
        return Ok(());
    }
    let mut code = slot.as_ref().map(|event| event.event_type().code()).unwrap_or_default();
    t.translate_i32(&mut code)?;
    let event_type = EventType::from_code(code).ok_or(ProtocolError::UnknownEventType(code))?;
    let event = slot.get_or_insert_with(|| BuildEvent::empty(event_type));
    translate_event(t, event_type, event)
}

/// Event context: absent on the wire means "not attached".
fn translate_context<T: Translator>(t: &mut T, context: &mut EventContext) -> Result<()> {
    if t.translate_nullable(!context.is_invalid())? {
        translate_context_ids(t, context)
    } else {
        *context = EventContext::INVALID;
        Ok(())
    }
}

fn translate_option_context<T: Translator>(
    t: &mut T,
    context: &mut Option<EventContext>,
) -> Result<()> {
    if t.translate_nullable(context.is_some())? {
        translate_context_ids(t, context.get_or_insert(EventContext::INVALID))
    } else {
        *context = None;
        Ok(())
    }
}

fn translate_context_ids<T: Translator>(t: &mut T, context: &mut EventContext) -> Result<()> {
    let mut ids = context.to_array();
    for id in ids.iter_mut() {
        t.translate_i32(id)?;
    }
    *context = EventContext::from_array(ids);
    Ok(())
}

fn translate_span<T: Translator>(t: &mut T, span: &mut SourceSpan) -> Result<()> {
    t.translate_i32(&mut span.line)?;
    t.translate_i32(&mut span.column)?;
    t.translate_i32(&mut span.end_line)?;
    t.translate_i32(&mut span.end_column)
}

fn translate_diagnostic<T: Translator>(t: &mut T, d: &mut Diagnostic) -> Result<()> {
    t.translate_option_string(&mut d.subcategory)?;
    t.translate_option_string(&mut d.code)?;
    t.translate_option_string(&mut d.file)?;
    t.translate_option_string(&mut d.project_file)?;
    translate_span(t, &mut d.span)?;
    t.translate_appended_option_string(HELP_LINK_VERSION, &mut d.help_link)
}

fn translate_message_details<T: Translator>(t: &mut T, m: &mut MessageDetails) -> Result<()> {
    t.translate_option_string(&mut m.subcategory)?;
    t.translate_option_string(&mut m.code)?;
    t.translate_option_string(&mut m.file)?;
    t.translate_option_string(&mut m.project_file)?;
    t.translate_enum(&mut m.importance)?;
    translate_span(t, &mut m.span)
}

fn translate_kind<T: Translator>(t: &mut T, kind: &mut EventKind) -> Result<()> {
    match kind {
        EventKind::Custom | EventKind::BuildStarted => Ok(()),
        EventKind::BuildFinished { succeeded } => t.translate_bool(succeeded),
        EventKind::ProjectStarted(p) => {
            t.translate_i32(&mut p.project_id)?;
            translate_option_context(t, &mut p.parent_context)?;
            t.translate_option_string(&mut p.project_file)?;
            t.translate_string_list(&mut p.target_names)?;
            t.translate_properties(&mut p.properties)
        }
        EventKind::ProjectFinished(p) => {
            t.translate_bool(&mut p.succeeded)?;
            t.translate_option_string(&mut p.project_file)
        }
        EventKind::TargetStarted(ts) => {
            t.translate_option_string(&mut ts.target_name)?;
            t.translate_option_string(&mut ts.project_file)?;
            t.translate_option_string(&mut ts.target_file)?;
            t.translate_option_string(&mut ts.parent_target)?;
            t.translate_enum(&mut ts.reason)
        }
        EventKind::TargetFinished(tf) => {
            t.translate_option_string(&mut tf.project_file)?;
            t.translate_option_string(&mut tf.target_file)?;
            t.translate_option_string(&mut tf.target_name)?;
            t.translate_bool(&mut tf.succeeded)
        }
        EventKind::Error(d) | EventKind::Warning(d) => translate_diagnostic(t, d),
        EventKind::Message(m) => translate_message_details(t, m),
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
