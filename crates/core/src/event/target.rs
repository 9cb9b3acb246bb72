// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target lifecycle payloads.

/// Why a target was scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TargetBuiltReason {
    /// Requested directly (entry target)
    #[default]
    None,
    BeforeTargets,
    DependsOn,
    AfterTargets,
}

impl TargetBuiltReason {
    pub fn code(self) -> i32 {
        match self {
            TargetBuiltReason::None => 0,
            TargetBuiltReason::BeforeTargets => 1,
            TargetBuiltReason::DependsOn => 2,
            TargetBuiltReason::AfterTargets => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(TargetBuiltReason::None),
            1 => Some(TargetBuiltReason::BeforeTargets),
            2 => Some(TargetBuiltReason::DependsOn),
            3 => Some(TargetBuiltReason::AfterTargets),
            _ => None,
        }
    }
}

crate::simple_display! {
    TargetBuiltReason {
        None => "none",
        BeforeTargets => "before-targets",
        DependsOn => "depends-on",
        AfterTargets => "after-targets",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetStarted {
    pub target_name: Option<String>,
    pub project_file: Option<String>,
    pub target_file: Option<String>,
    pub parent_target: Option<String>,
    pub reason: TargetBuiltReason,
}

impl TargetStarted {
    pub fn new(target_name: impl Into<String>, project_file: impl Into<String>) -> Self {
        Self {
            target_name: Some(target_name.into()),
            project_file: Some(project_file.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetFinished {
    pub project_file: Option<String>,
    pub target_file: Option<String>,
    pub target_name: Option<String>,
    pub succeeded: bool,
}
