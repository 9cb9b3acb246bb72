// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event context: where in the build an event was raised.

use std::fmt;

/// Coordinates of a build event within node/project/target/task space.
///
/// A context that was never attached is [`EventContext::INVALID`], not `None`;
/// decoders substitute the sentinel when the wire says the context is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventContext {
    pub node_id: i32,
    pub project_context_id: i32,
    pub target_id: i32,
    pub task_id: i32,
    pub submission_id: i32,
    pub project_instance_id: i32,
}

impl EventContext {
    pub const INVALID_NODE_ID: i32 = -2;
    pub const INVALID_PROJECT_CONTEXT_ID: i32 = -2;
    pub const INVALID_TARGET_ID: i32 = -1;
    pub const INVALID_TASK_ID: i32 = -1;
    pub const INVALID_SUBMISSION_ID: i32 = -1;
    pub const INVALID_PROJECT_INSTANCE_ID: i32 = -1;

    /// Sentinel for "no context attached".
    pub const INVALID: Self = Self {
        node_id: Self::INVALID_NODE_ID,
        project_context_id: Self::INVALID_PROJECT_CONTEXT_ID,
        target_id: Self::INVALID_TARGET_ID,
        task_id: Self::INVALID_TASK_ID,
        submission_id: Self::INVALID_SUBMISSION_ID,
        project_instance_id: Self::INVALID_PROJECT_INSTANCE_ID,
    };

    pub const fn new(node_id: i32, project_context_id: i32, target_id: i32, task_id: i32) -> Self {
        Self {
            node_id,
            project_context_id,
            target_id,
            task_id,
            submission_id: Self::INVALID_SUBMISSION_ID,
            project_instance_id: Self::INVALID_PROJECT_INSTANCE_ID,
        }
    }

    /// Context for an event raised by a node outside any project.
    pub const fn for_node(node_id: i32) -> Self {
        Self { node_id, ..Self::INVALID }
    }

    pub const fn with_submission(mut self, submission_id: i32, project_instance_id: i32) -> Self {
        self.submission_id = submission_id;
        self.project_instance_id = project_instance_id;
        self
    }

    pub fn is_invalid(&self) -> bool {
        *self == Self::INVALID
    }

    /// The six identifiers in wire order.
    pub fn to_array(&self) -> [i32; 6] {
        [
            self.node_id,
            self.project_context_id,
            self.target_id,
            self.task_id,
            self.submission_id,
            self.project_instance_id,
        ]
    }

    pub fn from_array(ids: [i32; 6]) -> Self {
        let [node_id, project_context_id, target_id, task_id, submission_id, project_instance_id] =
            ids;
        Self { node_id, project_context_id, target_id, task_id, submission_id, project_instance_id }
    }
}

impl Default for EventContext {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for EventContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            return f.write_str("<invalid>");
        }
        write!(
            f,
            "node={} project={} target={} task={} submission={} instance={}",
            self.node_id,
            self.project_context_id,
            self.target_id,
            self.task_id,
            self.submission_id,
            self.project_instance_id
        )
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
