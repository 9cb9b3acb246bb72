// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project lifecycle payloads.

use indexmap::IndexMap;

use crate::context::EventContext;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectStarted {
    pub project_id: i32,
    /// Context of the project that requested this build, if any
    pub parent_context: Option<EventContext>,
    pub project_file: Option<String>,
    pub target_names: Vec<String>,
    /// Global properties. Entries with an empty name or value are not transmitted.
    pub properties: Option<IndexMap<String, String>>,
}

impl ProjectStarted {
    pub fn new(project_id: i32, project_file: impl Into<String>) -> Self {
        Self { project_id, project_file: Some(project_file.into()), ..Self::default() }
    }

    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_names = targets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.get_or_insert_with(IndexMap::new).insert(name.into(), value.into());
        self
    }

    pub fn with_parent(mut self, parent: EventContext) -> Self {
        self.parent_context = Some(parent);
        self
    }

    /// Properties that survive transmission.
    pub fn valid_properties(&self) -> impl Iterator<Item = (&String, &String)> {
        self.properties
            .iter()
            .flatten()
            .filter(|(name, value)| !name.is_empty() && !value.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFinished {
    pub project_file: Option<String>,
    pub succeeded: bool,
}
