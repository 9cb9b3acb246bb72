// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lazily formatted message text.
//!
//! A [`LazyMessage`] is either *raw* (template + arguments) or *formatted*
//! (final text). The first read of a raw message formats it under the
//! message's own lock, caches the result, and drops the arguments. Format
//! failures never escape: the text becomes a diagnostic built from the
//! template and the error.

use std::fmt;

use parking_lot::Mutex;

use crate::format::{format_failure, CompositeFormatter, MessageArg, MessageFormatter};
use crate::locale::{BuiltinLocales, Locale, LocaleResolver};

#[derive(Debug, Clone, PartialEq)]
enum MessageState {
    Raw { template: Option<String>, args: Vec<MessageArg> },
    Formatted(Option<String>),
}

/// Message text plus the state needed to format it on demand.
pub struct LazyMessage {
    state: Mutex<MessageState>,
    /// Locale active where the message was created
    locale: Option<String>,
}

/// The parts of a message that travel on the wire.
///
/// `args` is `Some` only while the message is still unformatted. Arguments
/// keep their kind so the receiver applies the same format specifiers the
/// sender would have.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireMessage {
    pub text: Option<String>,
    pub args: Option<Vec<MessageArg>>,
    pub locale: Option<String>,
}

impl WireMessage {
    /// Arguments as text rendered in the originating locale, for peers
    /// that only understand text arguments.
    pub fn rendered_args(&self) -> Option<Vec<String>> {
        self.rendered_args_with(&BuiltinLocales)
    }

    pub fn rendered_args_with(&self, locales: &dyn LocaleResolver) -> Option<Vec<String>> {
        let locale = locales.resolve(self.locale.as_deref().unwrap_or_default());
        self.args.as_ref().map(|args| args.iter().map(|arg| arg.to_text(&locale)).collect())
    }
}

impl LazyMessage {
    /// Already-final text (or no text at all).
    pub fn plain(text: Option<String>) -> Self {
        Self { state: Mutex::new(MessageState::Formatted(text)), locale: None }
    }

    /// A template formatted on first read, in the current process locale.
    pub fn lazy(template: impl Into<String>, args: Vec<MessageArg>) -> Self {
        Self::lazy_in(template, args, Locale::current_name())
    }

    /// A template formatted on first read, in the named locale.
    pub fn lazy_in(
        template: impl Into<String>,
        args: Vec<MessageArg>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            state: Mutex::new(MessageState::Raw { template: Some(template.into()), args }),
            locale: Some(locale.into()),
        }
    }

    /// Rebuild a message from its wire parts.
    ///
    /// Present arguments keep the message raw so the receiver formats it in
    /// the originating locale; absent arguments mean the text is final.
    pub fn from_wire(wire: WireMessage) -> Self {
        let state = match wire.args {
            Some(args) => MessageState::Raw { template: wire.text, args },
            None => MessageState::Formatted(wire.text),
        };
        Self { state: Mutex::new(state), locale: wire.locale }
    }

    /// Snapshot the wire parts without forcing formatting.
    pub fn to_wire(&self) -> WireMessage {
        let (text, args) = match &*self.state.lock() {
            MessageState::Formatted(text) => (text.clone(), None),
            MessageState::Raw { template, args } => (template.clone(), Some(args.clone())),
        };
        WireMessage { text, args, locale: self.locale.clone() }
    }

    /// Final text, formatting it on first access.
    pub fn text(&self) -> Option<String> {
        self.text_with(&CompositeFormatter, &BuiltinLocales)
    }

    pub fn text_with(
        &self,
        formatter: &dyn MessageFormatter,
        locales: &dyn LocaleResolver,
    ) -> Option<String> {
        let mut state = self.state.lock();
        if let MessageState::Raw { template, args } = &*state {
            let formatted = template.as_deref().map(|template| {
                let locale = locales.resolve(self.locale.as_deref().unwrap_or_default());
                formatter
                    .format(&locale, template, args)
                    .unwrap_or_else(|err| format_failure(template, &err))
            });
            *state = MessageState::Formatted(formatted);
        }
        match &*state {
            MessageState::Formatted(text) => text.clone(),
            MessageState::Raw { template, .. } => template.clone(),
        }
    }

    pub fn is_formatted(&self) -> bool {
        matches!(*self.state.lock(), MessageState::Formatted(_))
    }

    /// Arguments still waiting to be formatted.
    pub fn args(&self) -> Option<Vec<MessageArg>> {
        match &*self.state.lock() {
            MessageState::Raw { args, .. } => Some(args.clone()),
            MessageState::Formatted(_) => None,
        }
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

impl Default for LazyMessage {
    fn default() -> Self {
        Self::plain(None)
    }
}

impl Clone for LazyMessage {
    fn clone(&self) -> Self {
        Self { state: Mutex::new(self.state.lock().clone()), locale: self.locale.clone() }
    }
}

impl PartialEq for LazyMessage {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.locale != other.locale {
            return false;
        }
        // Never hold both locks at once
        let mine = self.state.lock().clone();
        mine == *other.state.lock()
    }
}

impl fmt::Debug for LazyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        let mut s = f.debug_struct("LazyMessage");
        match &*state {
            MessageState::Raw { template, args } => {
                s.field("template", template).field("args", args);
            }
            MessageState::Formatted(text) => {
                s.field("text", text);
            }
        }
        s.field("locale", &self.locale).finish()
    }
}

impl From<&str> for LazyMessage {
    fn from(text: &str) -> Self {
        Self::plain(Some(text.to_string()))
    }
}

impl From<String> for LazyMessage {
    fn from(text: String) -> Self {
        Self::plain(Some(text))
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
