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

//! Delimiter set and its discovery from the message header

use crate::error::{Hl7Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default field delimiter
pub const DEFAULT_FIELD: char = '|';
/// Default component delimiter
pub const DEFAULT_COMPONENT: char = '^';
/// Default repetition delimiter
pub const DEFAULT_REPETITION: char = '~';
/// Default escape character
pub const DEFAULT_ESCAPE: char = '\\';
/// Default subcomponent delimiter
pub const DEFAULT_SUBCOMPONENT: char = '&';

/// Tag of the header segment that declares the delimiters
pub const HEADER_TAG: &str = "MSH";

/// The five characters that structure an HL7v2 message.
///
/// One set governs a whole decode call. It is discovered from the header
/// segment before any field is split and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DelimiterSet {
    /// Separates fields within a segment
    pub field: char,
    /// Separates components within a field repetition
    pub component: char,
    /// Separates repetitions of a field
    pub repetition: char,
    /// Opens and closes escape sequences
    pub escape: char,
    /// Separates subcomponents within a component
    pub subcomponent: char,
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self {
            field: DEFAULT_FIELD,
            component: DEFAULT_COMPONENT,
            repetition: DEFAULT_REPETITION,
            escape: DEFAULT_ESCAPE,
            subcomponent: DEFAULT_SUBCOMPONENT,
        }
    }
}

impl DelimiterSet {
    /// Create a checked delimiter set.
    ///
    /// All five characters must be distinct and none of them may be a line break,
    /// since segments are split on CR/LF before any delimiter is applied.
    pub fn new(
        field: char,
        component: char,
        repetition: char,
        escape: char,
        subcomponent: char,
    ) -> Result<Self> {
        let set = Self {
            field,
            component,
            repetition,
            escape,
            subcomponent,
        };

        let named = set.named();
        for (i, (name, c)) in named.iter().enumerate() {
            if *c == '\r' || *c == '\n' {
                return Err(Hl7Error::invalid_delimiters(format!(
                    "{name} delimiter cannot be a line break"
                )));
            }
            if let Some((other, _)) = named[i + 1..].iter().find(|(_, o)| o == c) {
                return Err(Hl7Error::invalid_delimiters(format!(
                    "{name} and {other} delimiters are both {c:?}"
                )));
            }
        }

        Ok(set)
    }

    /// Discover the delimiters of a message from its header segment.
    ///
    /// The first line starting with `header_tag` is the header. The character right
    /// after the tag is the field delimiter; when the line reaches four more
    /// characters, those are the component, repetition, escape and subcomponent
    /// delimiters in that order. Whatever cannot be read from the header keeps its
    /// value from `fallback`. This never fails.
    pub fn discover<'a, I>(lines: I, header_tag: &str, fallback: DelimiterSet) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let Some(header) = lines.into_iter().find(|line| line.starts_with(header_tag)) else {
            log::debug!("No {header_tag} segment found, using fallback delimiters {fallback}");
            return fallback;
        };

        let mut set = fallback;
        let mut rest = header[header_tag.len()..].chars();

        match rest.next() {
            Some(field) => set.field = field,
            None => {
                log::debug!("{header_tag} segment has no field delimiter, using fallback delimiters");
                return set;
            }
        }

        let encoding: Vec<char> = rest.take(4).collect();
        if let [component, repetition, escape, subcomponent] = encoding[..] {
            set.component = component;
            set.repetition = repetition;
            set.escape = escape;
            set.subcomponent = subcomponent;
        } else {
            log::debug!(
                "{header_tag} segment too short for encoding characters, keeping fallback for them"
            );
        }

        log::debug!("Discovered delimiters {set}");
        set
    }

    /// The encoding characters as they appear in the second header field (`^~\&`)
    pub fn encoding_characters(&self) -> String {
        [self.component, self.repetition, self.escape, self.subcomponent]
            .iter()
            .collect()
    }

    fn named(&self) -> [(&'static str, char); 5] {
        [
            ("field", self.field),
            ("component", self.component),
            ("repetition", self.repetition),
            ("escape", self.escape),
            ("subcomponent", self.subcomponent),
        ]
    }
}

impl fmt::Display for DelimiterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.field, self.encoding_characters())
    }
}
