// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payloads for error, warning and message events.

/// Source location covered by a diagnostic. Zero means "unknown".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    pub line: i32,
    pub column: i32,
    pub end_line: i32,
    pub end_column: i32,
}

impl SourceSpan {
    pub const fn at(line: i32, column: i32) -> Self {
        Self { line, column, end_line: 0, end_column: 0 }
    }

    pub const fn range(line: i32, column: i32, end_line: i32, end_column: i32) -> Self {
        Self { line, column, end_line, end_column }
    }

    /// `(line,col)` style location suffix, empty when the line is unknown.
    pub fn location(&self) -> String {
        match (self.line, self.column) {
            (0, _) => String::new(),
            (line, 0) => format!("({line})"),
            (line, column) => format!("({line},{column})"),
        }
    }
}

/// Payload shared by error and warning events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostic {
    pub subcategory: Option<String>,
    pub code: Option<String>,
    pub file: Option<String>,
    pub project_file: Option<String>,
    pub span: SourceSpan,
    pub help_link: Option<String>,
}

crate::builder! {
    DiagnosticBuilder => Diagnostic {
        text: [subcategory, code, file, project_file, help_link],
        span: SourceSpan = SourceSpan::default(),
    }
}

/// How prominently a message event should be shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MessageImportance {
    High,
    #[default]
    Normal,
    Low,
}

impl MessageImportance {
    pub fn code(self) -> i32 {
        match self {
            MessageImportance::High => 0,
            MessageImportance::Normal => 1,
            MessageImportance::Low => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(MessageImportance::High),
            1 => Some(MessageImportance::Normal),
            2 => Some(MessageImportance::Low),
            _ => None,
        }
    }
}

crate::simple_display! {
    MessageImportance {
        High => "high",
        Normal => "normal",
        Low => "low",
    }
}

/// Payload of a message event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDetails {
    pub importance: MessageImportance,
    pub subcategory: Option<String>,
    pub code: Option<String>,
    pub file: Option<String>,
    pub project_file: Option<String>,
    pub span: SourceSpan,
}

impl MessageDetails {
    pub fn new(importance: MessageImportance) -> Self {
        Self { importance, ..Self::default() }
    }
}
