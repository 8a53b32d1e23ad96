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

//! Segment records and segment line decoding
//!
//! A segment line is split field by field, then each field into repetitions,
//! components and subcomponents. Every leaf lands in the [`SegmentRecord`]
//! under a key built from its [`FieldLocation`]. Sub-level indexes only appear
//! in a key when the text actually has structure at that level.

use crate::config::DecoderConfig;
use crate::delimiters::DelimiterSet;
use crate::escape::unescape;
use crate::location::FieldLocation;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Decoded values of one segment occurrence, keyed by field location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentRecord {
    values: IndexMap<String, String>,
}

impl SegmentRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value. An existing key keeps its position and takes the new value.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    /// Value stored under a canonical key such as `PID-5-1`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value stored at a location
    pub fn get_at(&self, location: &FieldLocation) -> Option<&str> {
        self.get(&location.key())
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in decoding order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Key/value pairs in decoding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the record and return the underlying map
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.values
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SegmentRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Decode one segment line into its tag and record.
///
/// The tag is everything before the first field delimiter. For the header
/// segment, field 1 is the field delimiter itself and field 2 the raw
/// encoding characters; neither is split nor unescaped, and numbering of the
/// remaining fields starts at 3. Other segments number their fields from 1.
pub fn decode_segment<'a>(
    line: &'a str,
    delimiters: &DelimiterSet,
    config: &DecoderConfig,
) -> (&'a str, SegmentRecord) {
    let mut fields = line.split(delimiters.field);
    let tag = fields.next().unwrap_or_default();
    let mut record = SegmentRecord::new();

    let first_field = if tag == config.header_tag {
        record.insert(FieldLocation::new(tag, 1).key(), delimiters.field);
        if let Some(encoding) = fields.next() {
            record.insert(FieldLocation::new(tag, 2).key(), encoding);
        }
        3
    } else {
        1
    };

    let mut decoder = FieldDecoder {
        tag,
        delimiters,
        resolve_escapes: config.resolve_escapes,
        record: &mut record,
    };
    for (offset, text) in fields.enumerate() {
        decoder.decode_field(first_field + offset, text);
    }

    log::trace!("Decoded {tag} segment with {} values", record.len());
    (tag, record)
}

struct FieldDecoder<'a, 'r> {
    tag: &'a str,
    delimiters: &'r DelimiterSet,
    resolve_escapes: bool,
    record: &'r mut SegmentRecord,
}

impl FieldDecoder<'_, '_> {
    fn decode_field(&mut self, number: usize, text: &str) {
        let repetitions: Vec<&str> = text.split(self.delimiters.repetition).collect();
        let repeated = repetitions.len() > 1;

        for (index, repetition) in repetitions.iter().enumerate() {
            let mut location = FieldLocation::new(self.tag, number);
            if repeated {
                location = location.with_repetition(index + 1);
            }
            self.decode_repetition(&location, repetition);
        }
    }

    fn decode_repetition(&mut self, location: &FieldLocation, repetition: &str) {
        let d = self.delimiters;
        let components: Vec<&str> = repetition.split(d.component).collect();

        for (comp_index, component) in components.iter().enumerate() {
            let subcomponents: Vec<&str> = component.split(d.subcomponent).collect();

            // Kept literal: a single empty component must not get an index.
            let indexed_component = repetition.contains(d.component)
                || components.len() > 1
                || (components.len() == 1
                    && (component.contains(d.subcomponent) || subcomponents.len() > 1));
            let indexed_subcomponent =
                component.contains(d.subcomponent) || subcomponents.len() > 1;

            for (sub_index, subcomponent) in subcomponents.iter().enumerate() {
                let mut leaf = location.clone();
                if indexed_component {
                    leaf.component = Some(comp_index + 1);
                    if indexed_subcomponent {
                        leaf.subcomponent = Some(sub_index + 1);
                    }
                }
                self.store(leaf, subcomponent);
            }
        }
    }

    fn store(&mut self, location: FieldLocation, text: &str) {
        let value = if self.resolve_escapes {
            unescape(text, self.delimiters).into_owned()
        } else {
            text.to_string()
        };
        self.record.insert(location.key(), value);
    }
}
