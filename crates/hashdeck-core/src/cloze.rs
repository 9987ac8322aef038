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

//! Cloze deletion extraction.
//!
//! A cloze block like `The [sky] is [blue].` becomes the clean text
//! `The sky is blue.` plus one deletion per bracketed span. Image links
//! (`![alt](src)`) keep their brackets and are never deletions, and `\[` or
//! `\]` stand for a literal bracket.
//!
//! Offsets are byte positions in the clean text, not character positions:
//! the clean text and the offsets are built in the same pass, because every
//! stripped bracket shifts what comes after it.

use crate::error::ParseErrorKind;

/// An inclusive byte range `start..=end` of the clean text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deletion {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ClozeBlock {
    /// The text with deletion brackets removed.
    pub text: String,
    pub deletions: Vec<Deletion>,
}

/// Find the deletions in a cloze block. `text` should already be trimmed.
pub fn extract_deletions(text: &str) -> Result<ClozeBlock, ParseErrorKind> {
    let bytes = text.as_bytes();
    let mut clean: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut deletions = Vec::new();
    let mut open: Option<usize> = None;
    let mut image_mode = false;

    let mut pos = 0;
    while pos < bytes.len() {
        let c = bytes[pos];
        let next = bytes.get(pos + 1).copied();
        match c {
            b'\\' if matches!(next, Some(b'[' | b']')) => {
                // Escaped bracket: drop the backslash, keep the bracket.
                clean.extend(next);
                pos += 2;
                continue;
            }
            // Only `![` starts an image. A lone `!` is just text.
            b'!' if !image_mode && next == Some(b'[') => {
                image_mode = true;
                clean.push(c);
            }
            b'[' if image_mode => clean.push(c),
            b']' if image_mode => {
                image_mode = false;
                clean.push(c);
            }
            b'[' => open = Some(clean.len()),
            b']' => {
                if let Some(start) = open.take() {
                    if clean.len() == start {
                        return Err(ParseErrorKind::EmptyDeletion);
                    }
                    deletions.push(Deletion {
                        start,
                        end: clean.len() - 1,
                    });
                }
            }
            _ => clean.push(c),
        }
        pos += 1;
    }

    if deletions.is_empty() {
        return Err(ParseErrorKind::EmptyClozeCard);
    }
    if !offsets_fit(clean.len()) {
        return Err(ParseErrorKind::ClozeTooLarge);
    }
    // Only ASCII bytes were removed from valid UTF-8, so this cannot fail in
    // practice.
    let text = String::from_utf8(clean).map_err(|_| ParseErrorKind::InvalidUtf8)?;
    Ok(ClozeBlock { text, deletions })
}

/// Offsets are hashed as `u32`, so the clean text must stay under 4 GiB.
fn offsets_fit(len: usize) -> bool {
    u32::try_from(len).is_ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn spans(input: &str) -> Result<(String, Vec<String>), ParseErrorKind> {
        let block = extract_deletions(input)?;
        let hidden = block
            .deletions
            .iter()
            .map(|d| block.text[d.start..=d.end].to_string())
            .collect();
        Ok((block.text, hidden))
    }

    #[test]
    fn test_two_deletions() -> Result<(), ParseErrorKind> {
        let block = extract_deletions("The [sky] is [blue].")?;
        assert_eq!(block.text, "The sky is blue.");
        assert_eq!(
            block.deletions,
            vec![Deletion { start: 4, end: 6 }, Deletion { start: 11, end: 14 }]
        );
        Ok(())
    }

    #[test]
    fn test_image_is_not_a_deletion() -> Result<(), ParseErrorKind> {
        let (text, hidden) = spans("See ![diagram](fig.png) and [answer].")?;
        assert_eq!(text, "See ![diagram](fig.png) and answer.");
        assert_eq!(hidden, vec!["answer"]);
        Ok(())
    }

    #[test]
    fn test_empty_alt_image_between_deletions() -> Result<(), ParseErrorKind> {
        let block = extract_deletions("Foo [bar] ![](image.jpg) [quux].")?;
        assert_eq!(block.text, "Foo bar ![](image.jpg) quux.");
        assert_eq!(
            block.deletions,
            vec![Deletion { start: 4, end: 6 }, Deletion { start: 23, end: 26 }]
        );
        Ok(())
    }

    #[test]
    fn test_image_inside_deletion() -> Result<(), ParseErrorKind> {
        let (text, hidden) = spans("Logo: [![rust](rust.svg)]")?;
        assert_eq!(text, "Logo: ![rust](rust.svg)");
        assert_eq!(hidden, vec!["![rust](rust.svg)"]);
        Ok(())
    }

    #[test]
    fn test_exclamation_mark_in_deletion() -> Result<(), ParseErrorKind> {
        let (text, hidden) = spans("The notation [$n!$] means 'n factorial'.")?;
        assert_eq!(text, "The notation $n!$ means 'n factorial'.");
        assert_eq!(hidden, vec!["$n!$"]);
        Ok(())
    }

    #[test]
    fn test_escaped_brackets() -> Result<(), ParseErrorKind> {
        let (text, hidden) = spans("\\[markdown\\] [`\\[cloze\\]`]")?;
        assert_eq!(text, "[markdown] `[cloze]`");
        assert_eq!(hidden, vec!["`[cloze]`"]);
        Ok(())
    }

    #[test]
    fn test_backslash_elsewhere_is_text() -> Result<(), ParseErrorKind> {
        let (text, hidden) = spans("The string `\\alpha` renders as [$\\alpha$].")?;
        assert_eq!(text, "The string `\\alpha` renders as $\\alpha$.");
        assert_eq!(hidden, vec!["$\\alpha$"]);
        Ok(())
    }

    #[test]
    fn test_offsets_are_bytes() -> Result<(), ParseErrorKind> {
        let block = extract_deletions("Straße [führt] nach [Köln].")?;
        assert_eq!(block.text, "Straße führt nach Köln.");
        // "Straße " is 8 bytes: 'ß' takes two.
        assert_eq!(block.deletions[0], Deletion { start: 8, end: 13 });
        assert_eq!(block.deletions[1], Deletion { start: 20, end: 24 });
        assert_eq!(&block.text[20..=24], "Köln");
        Ok(())
    }

    #[test]
    fn test_multiline_block() -> Result<(), ParseErrorKind> {
        let block = extract_deletions("[foo]\n[bar]\nbaz.")?;
        assert_eq!(block.text, "foo\nbar\nbaz.");
        assert_eq!(
            block.deletions,
            vec![Deletion { start: 0, end: 2 }, Deletion { start: 4, end: 6 }]
        );
        Ok(())
    }

    #[test]
    fn test_stray_closing_bracket_is_dropped() -> Result<(), ParseErrorKind> {
        let (text, hidden) = spans("a] [b]")?;
        assert_eq!(text, "a b");
        assert_eq!(hidden, vec!["b"]);
        Ok(())
    }

    #[test]
    fn test_no_deletions() {
        assert_eq!(
            extract_deletions("Just text."),
            Err(ParseErrorKind::EmptyClozeCard)
        );
        assert_eq!(
            extract_deletions("Only ![an](image.png)"),
            Err(ParseErrorKind::EmptyClozeCard)
        );
    }

    #[test]
    fn test_empty_deletion() {
        assert_eq!(
            extract_deletions("Nothing [] here [x]"),
            Err(ParseErrorKind::EmptyDeletion)
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_offset_limit() {
        assert!(offsets_fit(u32::MAX as usize));
        assert!(!offsets_fit(u32::MAX as usize + 1));
    }
}
