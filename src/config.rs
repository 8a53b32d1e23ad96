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

//! Decoder configuration options

use crate::delimiters::{DelimiterSet, HEADER_TAG};

/// Configuration for [`MessageDecoder`](crate::MessageDecoder)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Tag of the segment that declares the delimiters
    pub header_tag: String,

    /// Delimiters used for whatever the header does not declare
    pub fallback_delimiters: DelimiterSet,

    /// Whether leaf values have their escape sequences resolved
    pub resolve_escapes: bool,
}

impl DecoderConfig {
    /// Create a configuration with custom settings
    pub fn new<S: Into<String>>(
        header_tag: S,
        fallback_delimiters: DelimiterSet,
        resolve_escapes: bool,
    ) -> Self {
        Self {
            header_tag: header_tag.into(),
            fallback_delimiters,
            resolve_escapes,
        }
    }

    /// Create a configuration that stores leaf values exactly as they appear on the wire
    pub fn raw() -> Self {
        Self {
            resolve_escapes: false,
            ..Self::default()
        }
    }

    /// Use a different header segment tag
    pub fn with_header_tag<S: Into<String>>(mut self, header_tag: S) -> Self {
        self.header_tag = header_tag.into();
        self
    }

    /// Use different fallback delimiters
    pub fn with_fallback_delimiters(mut self, delimiters: DelimiterSet) -> Self {
        self.fallback_delimiters = delimiters;
        self
    }

    /// Enable or disable escape resolution
    pub fn with_resolve_escapes(mut self, resolve_escapes: bool) -> Self {
        self.resolve_escapes = resolve_escapes;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            header_tag: HEADER_TAG.to_string(),
            fallback_delimiters: DelimiterSet::default(),
            resolve_escapes: true,
        }
    }
}
