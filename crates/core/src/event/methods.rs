// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event methods: variant constructors and accessors, plus the log summary

use super::{
    BuildEvent, Diagnostic, EventKind, MessageDetails, MessageImportance, ProjectFinished,
    ProjectStarted, TargetFinished, TargetStarted, BUILD_SENDER,
};
use crate::message::LazyMessage;

/// Returns ` file={file}` when present, empty string otherwise.
fn file_fragment(file: Option<&str>) -> String {
    match file {
        Some(file) if !file.is_empty() => format!(" file={file}"),
        _ => String::new(),
    }
}

impl BuildEvent {
    pub fn custom(message: impl Into<LazyMessage>) -> Self {
        Self::new(EventKind::Custom, message)
    }

    pub fn build_started(message: impl Into<LazyMessage>) -> Self {
        Self::new(EventKind::BuildStarted, message).with_sender(BUILD_SENDER)
    }

    pub fn build_finished(message: impl Into<LazyMessage>, succeeded: bool) -> Self {
        Self::new(EventKind::BuildFinished { succeeded }, message).with_sender(BUILD_SENDER)
    }

    pub fn project_started(message: impl Into<LazyMessage>, project: ProjectStarted) -> Self {
        Self::new(EventKind::ProjectStarted(project), message).with_sender(BUILD_SENDER)
    }

    pub fn project_finished(
        message: impl Into<LazyMessage>,
        project_file: impl Into<String>,
        succeeded: bool,
    ) -> Self {
        let finished = ProjectFinished { project_file: Some(project_file.into()), succeeded };
        Self::new(EventKind::ProjectFinished(finished), message).with_sender(BUILD_SENDER)
    }

    pub fn target_started(message: impl Into<LazyMessage>, target: TargetStarted) -> Self {
        Self::new(EventKind::TargetStarted(target), message).with_sender(BUILD_SENDER)
    }

    pub fn target_finished(message: impl Into<LazyMessage>, target: TargetFinished) -> Self {
        Self::new(EventKind::TargetFinished(target), message).with_sender(BUILD_SENDER)
    }

    pub fn error(message: impl Into<LazyMessage>, diagnostic: Diagnostic) -> Self {
        Self::new(EventKind::Error(diagnostic), message)
    }

    pub fn warning(message: impl Into<LazyMessage>, diagnostic: Diagnostic) -> Self {
        Self::new(EventKind::Warning(diagnostic), message)
    }

    pub fn message_event(message: impl Into<LazyMessage>, details: MessageDetails) -> Self {
        Self::new(EventKind::Message(details), message)
    }

    /// `Some(succeeded)` for events that report an outcome.
    pub fn succeeded(&self) -> Option<bool> {
        match &self.kind {
            EventKind::BuildFinished { succeeded } => Some(*succeeded),
            EventKind::ProjectFinished(p) => Some(p.succeeded),
            EventKind::TargetFinished(t) => Some(t.succeeded),
            _ => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match &self.kind {
            EventKind::Error(d) | EventKind::Warning(d) => Some(d),
            _ => None,
        }
    }

    pub fn importance(&self) -> Option<MessageImportance> {
        match &self.kind {
            EventKind::Message(m) => Some(m.importance),
            _ => None,
        }
    }

    /// One-line description for structured logs. Does not format the message.
    pub fn log_summary(&self) -> String {
        let t = self.event_type();
        match &self.kind {
            EventKind::Custom | EventKind::BuildStarted => format!("{t}"),
            EventKind::BuildFinished { succeeded } => format!("{t} succeeded={succeeded}"),
            EventKind::ProjectStarted(p) => format!(
                "{t} project_id={} targets={}{}",
                p.project_id,
                p.target_names.join(";"),
                file_fragment(p.project_file.as_deref())
            ),
            EventKind::ProjectFinished(p) => format!(
                "{t} succeeded={}{}",
                p.succeeded,
                file_fragment(p.project_file.as_deref())
            ),
            EventKind::TargetStarted(ts) => format!(
                "{t} target={} reason={}",
                ts.target_name.as_deref().unwrap_or_default(),
                ts.reason
            ),
            EventKind::TargetFinished(tf) => format!(
                "{t} target={} succeeded={}",
                tf.target_name.as_deref().unwrap_or_default(),
                tf.succeeded
            ),
            EventKind::Error(d) | EventKind::Warning(d) => format!(
                "{t} code={}{}{}",
                d.code.as_deref().unwrap_or_default(),
                file_fragment(d.file.as_deref()),
                d.span.location()
            ),
            EventKind::Message(m) => format!("{t} importance={}", m.importance),
        }
    }
}
