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

//! HL7v2 message decoder
//!
//! Converts a single HL7v2 pipe-and-caret message into a nested structure:
//! segment tag to one [`SegmentRecord`] (or a sequence of them for repeating
//! segments), where each record maps a field location key such as `PID-5-1`
//! or `PID-13[2]` to its decoded string value.
//!
//! # Quick Start
//!
//! ```
//! use octofhir_hl7v2::decode;
//!
//! let message = decode(
//!     "MSH|^~\\&|GHH_ADT||||20080115153000||ADT^A01^ADT_A01|0123456789|P|2.5\n\
//!      PID|1||566-554-3423^^^GHH^MR||EVERYMAN^ADAM^A",
//! );
//!
//! let pid = &message.records("PID")[0];
//! assert_eq!(pid.get("PID-5-1"), Some("EVERYMAN"));
//! assert_eq!(message.records("MSH")[0].get("MSH-9-3"), Some("ADT_A01"));
//! ```
//!
//! # Module Organization
//!
//! - [`delimiters`] - Delimiter set and discovery from the header segment
//! - [`escape`] - Escape sequence resolution
//! - [`location`] - Field locations and canonical keys
//! - [`segment`] - Segment records and segment line decoding
//! - [`message`] - Decoded message and repeated segment aggregation
//! - [`decoder`] - The decoder entry point
//! - [`config`] - Decoder configuration

pub mod config;
pub mod decoder;
pub mod delimiters;
pub mod error;
pub mod escape;
pub mod location;
pub mod message;
pub mod segment;

// Re-export main types
pub use config::DecoderConfig;
pub use decoder::{MessageDecoder, decode};
pub use delimiters::DelimiterSet;
pub use error::{Hl7Error, Result};
pub use escape::unescape;
pub use location::FieldLocation;
pub use message::{DecodedMessage, SegmentValue};
pub use segment::SegmentRecord;
