// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised on a worker node that must reach the orchestrator.
//!
//! Both types are plain data carriers: every field survives a trip over
//! the node channel, so the orchestrator can report the failure exactly
//! as the node saw it.

use thiserror::Error;

use crate::event::{BuildEvent, SourceSpan};

/// A project file could not be loaded or evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", self.formatted_message())]
pub struct InvalidProjectFileError {
    /// Message without the location/code prefix
    pub message: Option<String>,
    pub project_file: Option<String>,
    pub span: SourceSpan,
    pub subcategory: Option<String>,
    pub code: Option<String>,
    pub help_keyword: Option<String>,
    /// Set once the error has been reported, so it is not logged twice
    pub has_been_logged: bool,
}

crate::builder! {
    InvalidProjectFileErrorBuilder => InvalidProjectFileError {
        text: [message, project_file, subcategory, code, help_keyword],
        span: SourceSpan = SourceSpan::default(),
        has_been_logged: bool = false,
    }
}

impl InvalidProjectFileError {
    pub fn new(
        project_file: impl Into<String>,
        span: SourceSpan,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: Some(message.into()),
            project_file: Some(project_file.into()),
            span,
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_help_keyword(mut self, help_keyword: impl Into<String>) -> Self {
        self.help_keyword = Some(help_keyword.into());
        self
    }

    pub fn mark_logged(&mut self) {
        self.has_been_logged = true;
    }

    /// `file(line,col): subcategory error code: message`, skipping absent parts.
    pub fn formatted_message(&self) -> String {
        let mut out = String::new();
        if let Some(file) = self.project_file.as_deref().filter(|f| !f.is_empty()) {
            out.push_str(file);
            out.push_str(&self.span.location());
            out.push_str(": ");
        }
        if let Some(subcategory) = self.subcategory.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(subcategory);
            out.push(' ');
        }
        out.push_str("error");
        if let Some(code) = self.code.as_deref().filter(|c| !c.is_empty()) {
            out.push(' ');
            out.push_str(code);
        }
        out.push_str(": ");
        out.push_str(self.message.as_deref().unwrap_or_default());
        out
    }
}

/// A logger on the node failed.
///
/// Only the inner error's message travels; its type and backtrace stay on
/// the node. `event` is the build event being logged when the failure
/// happened, if any.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{}", self.message.as_deref().unwrap_or_default())]
pub struct InternalLoggerError {
    pub message: Option<String>,
    pub inner_message: Option<String>,
    pub event: Option<BuildEvent>,
    pub error_code: Option<String>,
    pub help_keyword: Option<String>,
    /// Whether the logger failed while being initialized
    pub initialization_error: bool,
}

impl InternalLoggerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), ..Self::default() }
    }

    pub fn with_inner(mut self, inner: &dyn std::error::Error) -> Self {
        self.inner_message = Some(inner.to_string());
        self
    }

    pub fn with_event(mut self, event: BuildEvent) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_error_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = Some(error_code.into());
        self
    }

    pub fn with_help_keyword(mut self, help_keyword: impl Into<String>) -> Self {
        self.help_keyword = Some(help_keyword.into());
        self
    }

    pub fn during_initialization(mut self) -> Self {
        self.initialization_error = true;
        self
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
