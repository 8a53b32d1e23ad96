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

//! Decoded message structure and aggregation of repeated segments

use crate::error::{Hl7Error, Result};
use crate::segment::SegmentRecord;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Records decoded for one segment tag.
///
/// A tag seen once holds a single record. The second occurrence turns it into
/// a sequence of both records in order of appearance, and later occurrences
/// are appended. Use [`SegmentValue::records`] for a uniform view.
///
/// Serialized untagged: a single record is a JSON object, repeated records
/// are a JSON array of objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentValue {
    /// The tag occurred once
    Single(SegmentRecord),
    /// The tag occurred two or more times
    Many(Vec<SegmentRecord>),
}

impl SegmentValue {
    /// Add another occurrence, promoting a single record to a sequence
    pub fn push(&mut self, record: SegmentRecord) {
        match self {
            SegmentValue::Single(first) => {
                let first = std::mem::take(first);
                *self = SegmentValue::Many(vec![first, record]);
            }
            SegmentValue::Many(records) => records.push(record),
        }
    }

    /// All occurrences in order of appearance
    pub fn records(&self) -> &[SegmentRecord] {
        match self {
            SegmentValue::Single(record) => std::slice::from_ref(record),
            SegmentValue::Many(records) => records,
        }
    }

    /// The first occurrence
    pub fn first(&self) -> Option<&SegmentRecord> {
        self.records().first()
    }

    /// Number of occurrences
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// Whether there are no occurrences (only possible for a deserialized empty sequence)
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Whether this is the sequence shape
    pub fn is_repeated(&self) -> bool {
        matches!(self, SegmentValue::Many(_))
    }

    /// Consume the value and return its occurrences as a vector
    pub fn into_records(self) -> Vec<SegmentRecord> {
        match self {
            SegmentValue::Single(record) => vec![record],
            SegmentValue::Many(records) => records,
        }
    }
}

impl From<SegmentRecord> for SegmentValue {
    fn from(record: SegmentRecord) -> Self {
        SegmentValue::Single(record)
    }
}

/// A decoded HL7v2 message: segment tag to its record(s), in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecodedMessage {
    segments: IndexMap<String, SegmentValue>,
}

impl DecodedMessage {
    /// Create an empty message
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a segment occurrence into the message
    pub fn insert<S: Into<String>>(&mut self, tag: S, record: SegmentRecord) {
        match self.segments.entry(tag.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(record),
            Entry::Vacant(entry) => {
                entry.insert(SegmentValue::Single(record));
            }
        }
    }

    /// Record(s) stored for a tag
    pub fn get(&self, tag: &str) -> Option<&SegmentValue> {
        self.segments.get(tag)
    }

    /// Record(s) for a tag that the caller requires to be present
    pub fn require(&self, tag: &str) -> Result<&SegmentValue> {
        self.get(tag).ok_or_else(|| Hl7Error::missing_segment(tag))
    }

    /// All occurrences of a tag; empty when the tag is absent
    pub fn records(&self, tag: &str) -> &[SegmentRecord] {
        self.get(tag).map(SegmentValue::records).unwrap_or_default()
    }

    /// Whether the tag occurred at all
    pub fn contains(&self, tag: &str) -> bool {
        self.segments.contains_key(tag)
    }

    /// Tags in order of first appearance
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.segments.keys().map(String::as_str)
    }

    /// Tag/value pairs in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SegmentValue)> {
        self.segments.iter().map(|(tag, value)| (tag.as_str(), value))
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no segment was decoded
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total number of segment occurrences
    pub fn segment_count(&self) -> usize {
        self.segments.values().map(SegmentValue::len).sum()
    }

    /// Consume the message and return the underlying map
    pub fn into_inner(self) -> IndexMap<String, SegmentValue> {
        self.segments
    }

    /// JSON view of the message
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Pretty-printed JSON text of the message
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromStr for DecodedMessage {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(crate::decode(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, &str)]) -> SegmentRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_first_occurrence_is_single() {
        let mut message = DecodedMessage::new();
        message.insert("PID", record(&[("PID-1", "1")]));

        let value = message.get("PID").unwrap();
        assert!(!value.is_repeated());
        assert_eq!(value.len(), 1);
        assert_eq!(value.first().unwrap().get("PID-1"), Some("1"));
    }

    #[test]
    fn test_second_occurrence_promotes() {
        let mut message = DecodedMessage::new();
        message.insert("OBX", record(&[("OBX-1", "1")]));
        message.insert("OBX", record(&[("OBX-1", "2")]));

        match message.get("OBX").unwrap() {
            SegmentValue::Many(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].get("OBX-1"), Some("1"));
                assert_eq!(records[1].get("OBX-1"), Some("2"));
            }
            other => panic!("Expected Many, got {other:?}"),
        }
    }

    #[test]
    fn test_later_occurrences_append() {
        let mut message = DecodedMessage::new();
        for i in 1..=4 {
            let set_id = i.to_string();
            message.insert("NTE", record(&[("NTE-1", set_id.as_str())]));
        }

        let values: Vec<_> = message
            .records("NTE")
            .iter()
            .map(|r| r.get("NTE-1").unwrap())
            .collect();
        assert_eq!(values, vec!["1", "2", "3", "4"]);
        assert_eq!(message.len(), 1);
        assert_eq!(message.segment_count(), 4);
    }

    #[test]
    fn test_tags_keep_first_appearance_order() {
        let mut message = DecodedMessage::new();
        message.insert("MSH", SegmentRecord::new());
        message.insert("OBX", SegmentRecord::new());
        message.insert("PID", SegmentRecord::new());
        message.insert("OBX", SegmentRecord::new());

        assert_eq!(message.tags().collect::<Vec<_>>(), vec!["MSH", "OBX", "PID"]);
    }

    #[test]
    fn test_into_records_normalizes_shapes() {
        let single = SegmentValue::from(record(&[("PID-1", "1")]));
        assert!(matches!(single, SegmentValue::Single(_)));
        assert_eq!(single.into_records(), vec![record(&[("PID-1", "1")])]);

        let mut many = SegmentValue::from(record(&[("OBX-1", "1")]));
        many.push(record(&[("OBX-1", "2")]));
        let set_ids: Vec<_> = many
            .into_records()
            .iter()
            .map(|r| r.get("OBX-1").unwrap().to_string())
            .collect();
        assert_eq!(set_ids, vec!["1", "2"]);
    }

    #[test]
    fn test_into_inner() {
        let mut message = DecodedMessage::new();
        message.insert("PID", record(&[("PID-1", "1")]));
        message.insert("OBX", record(&[("OBX-1", "1")]));
        message.insert("OBX", record(&[("OBX-1", "2")]));

        let segments = message.into_inner();
        assert_eq!(segments.keys().collect::<Vec<_>>(), vec!["PID", "OBX"]);
        assert!(segments["OBX"].is_repeated());
    }

    #[test]
    fn test_missing_tag() {
        let message = DecodedMessage::new();
        assert!(message.records("PID").is_empty());
        assert!(!message.contains("PID"));

        let err = message.require("PID").unwrap_err();
        assert!(matches!(err, Hl7Error::MissingSegment { ref tag } if tag == "PID"));
    }

    #[test]
    fn test_json_shape() {
        let mut message = DecodedMessage::new();
        message.insert("PID", record(&[("PID-1", "1")]));
        message.insert("OBX", record(&[("OBX-1", "1")]));
        message.insert("OBX", record(&[("OBX-1", "2")]));

        assert_eq!(
            message.to_json().unwrap(),
            json!({
                "PID": { "PID-1": "1" },
                "OBX": [ { "OBX-1": "1" }, { "OBX-1": "2" } ]
            })
        );
    }

    #[test]
    fn test_json_roundtrip_keeps_shapes() {
        let text = r#"{"PID":{"PID-1":"1"},"OBX":[{"OBX-1":"1"},{"OBX-1":"2"}]}"#;
        let message: DecodedMessage = serde_json::from_str(text).unwrap();
        assert!(!message.get("PID").unwrap().is_repeated());
        assert!(message.get("OBX").unwrap().is_repeated());
    }
}
