// Copyright 2025 Fernando Borretti
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

//! The optional TOML header at the top of a deck file:
//!
//! ```text
//! ---
//! name = "Cell Biology"
//! order = 2
//! tags = ["biology", "cells"]
//! ---
//! ```

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ParseErrorKind;
use crate::error::ParserError;

const DELIMITER: &str = "---";

/// Metadata that can be specified at the top of a deck file. Unknown keys
/// are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckMetadata {
    pub name: Option<String>,
    pub order: Option<i64>,
    pub tags: Vec<String>,
    pub subject: Option<String>,
    pub topic: Option<String>,
}

/// A deck file split into its header and body.
#[derive(Debug, PartialEq)]
pub struct SplitSource<'a> {
    pub metadata: DeckMetadata,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
    /// Index of the body's first line within the whole file.
    pub body_line: usize,
}

/// Strip the header from `text`, if it has one.
///
/// A file whose first line is `---` must close the header with another `---`
/// line, otherwise the whole file is rejected.
pub fn extract_header<'a>(file_path: &Path, text: &'a str) -> Result<SplitSource<'a>, ParserError> {
    let mut lines = text.split_inclusive('\n');
    let header_start = match lines.next() {
        Some(first) if first.trim() == DELIMITER => first.len(),
        _ => {
            return Ok(SplitSource {
                metadata: DeckMetadata::default(),
                body: text,
                body_line: 0,
            });
        }
    };

    let mut offset = header_start;
    for (idx, line) in lines.enumerate() {
        if line.trim() == DELIMITER {
            let metadata: DeckMetadata =
                toml::from_str(&text[header_start..offset]).map_err(|e| {
                    ParserError::new(
                        ParseErrorKind::InvalidHeader(e.message().to_string()),
                        file_path.to_path_buf(),
                        0,
                    )
                })?;
            return Ok(SplitSource {
                metadata,
                body: &text[offset + line.len()..],
                // +1 for the opening delimiter, +1 for the closing one.
                body_line: idx + 2,
            });
        }
        offset += line.len();
    }

    Err(ParserError::new(
        ParseErrorKind::MalformedHeader,
        file_path.to_path_buf(),
        0,
    ))
}
