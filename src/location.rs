// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Field locations and their canonical keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of one leaf value inside a segment.
///
/// All indexes are 1-based. The canonical key written by [`fmt::Display`] is
/// `TAG-<field>[<rep>]-<component>-<subcomponent>`, where the bracketed
/// repetition and the trailing component/subcomponent parts appear only when
/// set. A subcomponent is only written together with a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldLocation {
    /// Segment tag (e.g. `PID`)
    pub segment: String,
    /// Field number
    pub field: usize,
    /// Repetition index, present only when the field repeats
    pub repetition: Option<usize>,
    /// Component index
    pub component: Option<usize>,
    /// Subcomponent index
    pub subcomponent: Option<usize>,
}

impl FieldLocation {
    /// Location of a whole field
    pub fn new<S: Into<String>>(segment: S, field: usize) -> Self {
        Self {
            segment: segment.into(),
            field,
            repetition: None,
            component: None,
            subcomponent: None,
        }
    }

    /// Set the repetition index
    pub fn with_repetition(mut self, repetition: usize) -> Self {
        self.repetition = Some(repetition);
        self
    }

    /// Set the component index
    pub fn with_component(mut self, component: usize) -> Self {
        self.component = Some(component);
        self
    }

    /// Set the subcomponent index
    pub fn with_subcomponent(mut self, subcomponent: usize) -> Self {
        self.subcomponent = Some(subcomponent);
        self
    }

    /// Canonical string key
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.segment, self.field)?;
        if let Some(repetition) = self.repetition {
            write!(f, "[{repetition}]")?;
        }
        if let Some(component) = self.component {
            write!(f, "-{component}")?;
            if let Some(subcomponent) = self.subcomponent {
                write!(f, "-{subcomponent}")?;
            }
        }
        Ok(())
    }
}
