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

//! Escape sequence resolution
//!
//! HL7v2 hides delimiter characters inside values behind short codes wrapped in
//! the escape character (`\F\`, `\S\`, ...). Resolution is an ordered chain of
//! replacements: the doubled escape character collapses first, then each code
//! is substituted in turn. The order is observable, e.g. `\\F\\` becomes `\F\`
//! in the first step and the field delimiter in the second.

use crate::delimiters::DelimiterSet;
use std::borrow::Cow;

/// Escape code for the field delimiter
pub const FIELD_CODE: char = 'F';
/// Escape code for the component delimiter
pub const COMPONENT_CODE: char = 'S';
/// Escape code for the repetition delimiter
pub const REPETITION_CODE: char = 'R';
/// Escape code for the escape character itself
pub const ESCAPE_CODE: char = 'E';
/// Escape code for the subcomponent delimiter
pub const SUBCOMPONENT_CODE: char = 'T';

/// Resolve the escape sequences in a leaf value.
///
/// Unknown codes (`\H\`, `\X0D\`, ...) are left untouched. Values without the
/// escape character are returned borrowed.
pub fn unescape<'a>(value: &'a str, delimiters: &DelimiterSet) -> Cow<'a, str> {
    let esc = delimiters.escape;
    if !value.contains(esc) {
        return Cow::Borrowed(value);
    }

    let substitutions = [
        (FIELD_CODE, delimiters.field),
        (COMPONENT_CODE, delimiters.component),
        (REPETITION_CODE, delimiters.repetition),
        (ESCAPE_CODE, esc),
        (SUBCOMPONENT_CODE, delimiters.subcomponent),
    ];

    let mut resolved = value.replace(&format!("{esc}{esc}"), &esc.to_string());
    for (code, replacement) in substitutions {
        let sequence = format!("{esc}{code}{esc}");
        if resolved.contains(&sequence) {
            resolved = resolved.replace(&sequence, &replacement.to_string());
        }
    }

    Cow::Owned(resolved)
}
