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

//! Message decoder
//!
//! Decoding runs in two phases. The delimiters are discovered from the header
//! segment first, then every segment line is decoded with them and merged into
//! the [`DecodedMessage`]. All state lives in the call, so one decoder can be
//! shared freely between threads.

use crate::config::DecoderConfig;
use crate::delimiters::DelimiterSet;
use crate::message::DecodedMessage;
use crate::segment::decode_segment;

/// Decoder turning HL7v2 message text into a [`DecodedMessage`]
#[derive(Debug, Clone, Default)]
pub struct MessageDecoder {
    config: DecoderConfig,
}

impl MessageDecoder {
    /// Create a decoder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with a custom configuration
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Delimiters that [`decode`](Self::decode) would use for this message
    pub fn discover_delimiters(&self, message: &str) -> DelimiterSet {
        DelimiterSet::discover(
            segment_lines(message),
            &self.config.header_tag,
            self.config.fallback_delimiters,
        )
    }

    /// Decode a message.
    ///
    /// Never fails: a missing or short header falls back to the configured
    /// delimiters, blank lines are skipped and empty values are kept.
    pub fn decode(&self, message: &str) -> DecodedMessage {
        let lines: Vec<&str> = segment_lines(message).collect();
        let delimiters = DelimiterSet::discover(
            lines.iter().copied(),
            &self.config.header_tag,
            self.config.fallback_delimiters,
        );

        let mut decoded = DecodedMessage::new();
        for line in lines {
            if line.trim_matches(is_blank).is_empty() {
                continue;
            }
            let (tag, record) = decode_segment(line, &delimiters, &self.config);
            decoded.insert(tag, record);
        }

        log::debug!(
            "Decoded {} segments ({} distinct tags) with delimiters {delimiters}",
            decoded.segment_count(),
            decoded.len()
        );
        decoded
    }
}

/// Split message text into segment lines.
///
/// The whole message is trimmed, then split on any run of CR/LF characters.
/// Trimming also strips the file and record separators (`0x1C`-`0x1F`), so an
/// MLLP trailer does not leak into the last value.
pub fn segment_lines(message: &str) -> impl Iterator<Item = &str> {
    message
        .trim_matches(is_blank)
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Decode a message with the default configuration
pub fn decode(message: &str) -> DecodedMessage {
    MessageDecoder::new().decode(message)
}
