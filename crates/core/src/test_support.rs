// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use chrono::{DateTime, TimeZone, Utc};

use crate::context::EventContext;
use crate::event::{
    BuildEvent, Diagnostic, MessageDetails, MessageImportance, ProjectStarted, SourceSpan,
    TargetFinished, TargetStarted,
};
use crate::format::MessageArg;
use crate::message::LazyMessage;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for events.
///
/// Generated events only use values that survive the wire unchanged:
/// decimal arguments are finite, properties have non-empty names and
/// values, and the plain shape never carries unformatted text.
pub mod strategies {
    use super::*;
    use crate::event::{EventKind, EventType, ProjectFinished, TargetBuiltReason};
    use indexmap::IndexMap;
    use proptest::collection::vec;
    use proptest::option;
    use proptest::prelude::*;
    use proptest::sample::select;

    pub fn arb_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 ._{}-]{0,16}"
    }

    pub fn arb_opt_text() -> impl Strategy<Value = Option<String>> {
        option::of(arb_text())
    }

    pub fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
        (-1_000_000_000i64..4_000_000_000i64, 0u32..1_000_000_000u32)
            .prop_filter_map("timestamp in range", |(secs, nanos)| {
                DateTime::from_timestamp(secs, nanos)
            })
    }

    pub fn arb_context() -> impl Strategy<Value = EventContext> {
        prop_oneof![
            Just(EventContext::INVALID),
            (0..64i32, any::<[i32; 5]>()).prop_map(|(node, [a, b, c, d, e])| {
                EventContext::from_array([node, a, b, c, d, e])
            }),
        ]
    }

    pub fn arb_span() -> impl Strategy<Value = SourceSpan> {
        any::<[i32; 4]>().prop_map(|[l, c, el, ec]| SourceSpan::range(l, c, el, ec))
    }

    pub fn arb_message(lazy_shape: bool) -> BoxedStrategy<LazyMessage> {
        let plain = arb_opt_text().prop_map(LazyMessage::plain);
        if !lazy_shape {
            return plain.boxed();
        }
        let raw = (arb_text(), vec(arb_arg(), 0..4), select(vec!["", "en-US", "de-DE", "fr-FR"]))
            .prop_map(|(template, args, locale)| LazyMessage::lazy_in(template, args, locale));
        prop_oneof![plain, raw].boxed()
    }

    /// Any argument kind; decimals stay finite so equality is meaningful.
    pub fn arb_arg() -> impl Strategy<Value = MessageArg> {
        prop_oneof![
            arb_text().prop_map(MessageArg::Text),
            any::<i64>().prop_map(MessageArg::Integer),
            (-1e12..1e12f64).prop_map(MessageArg::Decimal),
        ]
    }

    fn arb_properties() -> impl Strategy<Value = Option<IndexMap<String, String>>> {
        option::of(
            vec(("[A-Za-z]{1,8}", "[a-z0-9]{1,8}"), 0..4)
                .prop_map(|pairs| pairs.into_iter().collect::<IndexMap<_, _>>()),
        )
    }

    fn arb_diagnostic() -> impl Strategy<Value = Diagnostic> {
        (arb_opt_text(), arb_opt_text(), arb_opt_text(), arb_opt_text(), arb_span(), arb_opt_text())
            .prop_map(|(subcategory, code, file, project_file, span, help_link)| Diagnostic {
                subcategory,
                code,
                file,
                project_file,
                span,
                help_link,
            })
    }

    pub fn arb_kind(event_type: EventType) -> BoxedStrategy<EventKind> {
        match event_type {
            EventType::Custom => Just(EventKind::Custom).boxed(),
            EventType::BuildStarted => Just(EventKind::BuildStarted).boxed(),
            EventType::BuildFinished => {
                any::<bool>().prop_map(|succeeded| EventKind::BuildFinished { succeeded }).boxed()
            }
            EventType::ProjectStarted => (
                any::<i32>(),
                option::of(arb_context()),
                arb_opt_text(),
                vec(arb_text(), 0..4),
                arb_properties(),
            )
                .prop_map(|(project_id, parent_context, project_file, target_names, properties)| {
                    EventKind::ProjectStarted(ProjectStarted {
                        project_id,
                        parent_context,
                        project_file,
                        target_names,
                        properties,
                    })
                })
                .boxed(),
            EventType::ProjectFinished => (arb_opt_text(), any::<bool>())
                .prop_map(|(project_file, succeeded)| {
                    EventKind::ProjectFinished(ProjectFinished { project_file, succeeded })
                })
                .boxed(),
            EventType::TargetStarted => (
                arb_opt_text(),
                arb_opt_text(),
                arb_opt_text(),
                arb_opt_text(),
                select(vec![
                    TargetBuiltReason::None,
                    TargetBuiltReason::BeforeTargets,
                    TargetBuiltReason::DependsOn,
                    TargetBuiltReason::AfterTargets,
                ]),
            )
                .prop_map(|(target_name, project_file, target_file, parent_target, reason)| {
                    EventKind::TargetStarted(TargetStarted {
                        target_name,
                        project_file,
                        target_file,
                        parent_target,
                        reason,
                    })
                })
                .boxed(),
            EventType::TargetFinished => {
                (arb_opt_text(), arb_opt_text(), arb_opt_text(), any::<bool>())
                    .prop_map(|(project_file, target_file, target_name, succeeded)| {
                        EventKind::TargetFinished(TargetFinished {
                            project_file,
                            target_file,
                            target_name,
                            succeeded,
                        })
                    })
                    .boxed()
            }
            EventType::Error => arb_diagnostic().prop_map(EventKind::Error).boxed(),
            EventType::Warning => arb_diagnostic().prop_map(EventKind::Warning).boxed(),
            EventType::Message => (
                select(vec![MessageImportance::High, MessageImportance::Normal, MessageImportance::Low]),
                arb_opt_text(),
                arb_opt_text(),
                arb_opt_text(),
                arb_opt_text(),
                arb_span(),
            )
                .prop_map(|(importance, subcategory, code, file, project_file, span)| {
                    EventKind::Message(MessageDetails {
                        importance,
                        subcategory,
                        code,
                        file,
                        project_file,
                        span,
                    })
                })
                .boxed(),
        }
    }

    /// An arbitrary event of the given type.
    pub fn arb_event_of(event_type: EventType) -> BoxedStrategy<BuildEvent> {
        (
            arb_message(event_type.is_lazy_formatted()),
            arb_opt_text(),
            arb_opt_text(),
            arb_timestamp(),
            any::<i32>(),
            arb_context(),
            arb_kind(event_type),
        )
            .prop_map(|(message, help_keyword, sender, timestamp, thread_id, context, kind)| {
                let mut event = BuildEvent::new(kind, message)
                    .with_timestamp(timestamp)
                    .with_thread_id(thread_id)
                    .with_context(context);
                let raw = event.raw_mut();
                *raw.help_keyword = help_keyword;
                *raw.sender_name = sender;
                event
            })
            .boxed()
    }

    /// An arbitrary event of any type.
    pub fn arb_event() -> impl Strategy<Value = BuildEvent> {
        select(EventType::ALL.to_vec()).prop_flat_map(arb_event_of)
    }
}

// ── Event factory functions ─────────────────────────────────────────────────

/// Fixed instant used by factory events so that equality is deterministic.
pub fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, 9, 26, 53).single().unwrap_or_default()
}

pub fn build_finished_event(message: &str, succeeded: bool) -> BuildEvent {
    BuildEvent::build_finished(message, succeeded).with_timestamp(fixed_timestamp()).with_thread_id(1)
}

pub fn project_started_event(project_id: i32, project_file: &str) -> BuildEvent {
    let project = ProjectStarted::new(project_id, project_file)
        .with_targets(["Build"])
        .with_property("Configuration", "Release")
        .with_parent(EventContext::new(1, 2, 3, 4));
    BuildEvent::project_started("Project started.", project)
        .with_timestamp(fixed_timestamp())
        .with_thread_id(1)
        .with_context(EventContext::new(1, project_id, EventContext::INVALID_TARGET_ID, 0))
}

pub fn target_started_event(target: &str, project_file: &str) -> BuildEvent {
    BuildEvent::target_started("Target started.", TargetStarted::new(target, project_file))
        .with_timestamp(fixed_timestamp())
        .with_thread_id(1)
}

pub fn target_finished_event(target: &str, succeeded: bool) -> BuildEvent {
    let finished = TargetFinished { target_name: Some(target.to_string()), succeeded, ..Default::default() };
    BuildEvent::target_finished("Target finished.", finished)
        .with_timestamp(fixed_timestamp())
        .with_thread_id(1)
}

pub fn error_event(code: &str, file: &str, line: i32) -> BuildEvent {
    let diagnostic = Diagnostic::builder()
        .code(code)
        .file(file)
        .span(SourceSpan::at(line, 1))
        .help_link("https://example.invalid/help")
        .build();
    BuildEvent::error(LazyMessage::lazy_in("{0} failed", vec![MessageArg::from(code)], "en-US"), diagnostic)
        .with_timestamp(fixed_timestamp())
        .with_thread_id(1)
}

pub fn warning_event(code: &str) -> BuildEvent {
    BuildEvent::warning("careful", Diagnostic::builder().code(code).build())
        .with_timestamp(fixed_timestamp())
        .with_thread_id(1)
}

pub fn message_event(text: &str, importance: MessageImportance) -> BuildEvent {
    BuildEvent::message_event(text, MessageDetails::new(importance))
        .with_timestamp(fixed_timestamp())
        .with_thread_id(1)
}
