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

//! Error types for the HL7v2 decoder
//!
//! Decoding itself never fails. These errors cover the checked constructors and
//! the helpers collaborators use on top of a decoded message.

use thiserror::Error;

/// Result type alias for HL7v2 operations
pub type Result<T> = std::result::Result<T, Hl7Error>;

/// Error type for HL7v2 operations
#[derive(Error, Debug)]
pub enum Hl7Error {
    /// A delimiter set that cannot be used to split a message
    #[error("Invalid delimiters: {message}")]
    InvalidDelimiters {
        /// Human-readable reason
        message: String,
    },

    /// A segment the caller expected is not present in the decoded message
    #[error("Missing segment: {tag}")]
    MissingSegment {
        /// Tag of the missing segment
        tag: String,
    },

    /// JSON rendering of a decoded message failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Hl7Error {
    /// Create an invalid delimiters error
    pub fn invalid_delimiters<S: Into<String>>(message: S) -> Self {
        Self::InvalidDelimiters {
            message: message.into(),
        }
    }

    /// Create a missing segment error
    pub fn missing_segment<S: Into<String>>(tag: S) -> Self {
        Self::MissingSegment { tag: tag.into() }
    }
}
