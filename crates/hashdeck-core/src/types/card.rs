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

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::types::card_hash::CardHash;
use crate::types::card_hash::Hasher;

pub type DeckName = String;

/// Zero-based `(start, end)` line indices of a card in its source file. `end`
/// is the line that closed the card: the next tag or separator, or the last
/// line of the file.
pub type LineRange = (usize, usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Basic,
    Cloze,
    Problem,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Basic => "Basic",
            CardType::Cloze => "Cloze",
            CardType::Problem => "Problem",
        }
    }
}

/// The semantic part of a card. This, and only this, determines the hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CardContent {
    Basic {
        question: String,
        answer: String,
    },
    /// `start` and `end` are inclusive byte offsets into `text`.
    Cloze {
        text: String,
        start: usize,
        end: usize,
    },
    Problem {
        problem: String,
        solution: String,
    },
}

impl CardContent {
    pub fn new_basic(question: impl AsRef<str>, answer: impl AsRef<str>) -> Self {
        CardContent::Basic {
            question: question.as_ref().trim().to_string(),
            answer: answer.as_ref().trim().to_string(),
        }
    }

    pub fn new_cloze(text: impl Into<String>, start: usize, end: usize) -> Self {
        CardContent::Cloze {
            text: text.into(),
            start,
            end,
        }
    }

    pub fn new_problem(problem: impl AsRef<str>, solution: impl AsRef<str>) -> Self {
        CardContent::Problem {
            problem: problem.as_ref().trim().to_string(),
            solution: solution.as_ref().trim().to_string(),
        }
    }

    pub fn card_type(&self) -> CardType {
        match self {
            CardContent::Basic { .. } => CardType::Basic,
            CardContent::Cloze { .. } => CardType::Cloze,
            CardContent::Problem { .. } => CardType::Problem,
        }
    }

    pub fn hash(&self) -> CardHash {
        let mut hasher = Hasher::tagged(self.card_type().as_str());
        match self {
            CardContent::Basic { question, answer } => {
                hasher
                    .update_field(question.as_bytes())
                    .update_field(answer.as_bytes());
            }
            // The offsets are fixed-width, so the text needs no length prefix.
            // Parsed cloze text never exceeds `u32::MAX` bytes (see
            // `cloze::extract_deletions`), so the offsets fit.
            CardContent::Cloze { text, start, end } => {
                hasher
                    .update(text.as_bytes())
                    .update(&offset_bytes(*start))
                    .update(&offset_bytes(*end));
            }
            CardContent::Problem { problem, solution } => {
                hasher
                    .update_field(problem.as_bytes())
                    .update_field(solution.as_bytes());
            }
        }
        hasher.finalize()
    }

    /// Shared by every deletion cut from the same cloze text.
    pub fn family_hash(&self) -> Option<CardHash> {
        match self {
            CardContent::Cloze { text, .. } => Some(
                Hasher::tagged(CardType::Cloze.as_str())
                    .update(text.as_bytes())
                    .finalize(),
            ),
            _ => None,
        }
    }
}

fn offset_bytes(offset: usize) -> [u8; 4] {
    u32::try_from(offset).unwrap_or(u32::MAX).to_le_bytes()
}

/// A parsed card. Immutable once built; the hash is computed up front.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Card {
    hash: CardHash,
    #[serde(skip_serializing_if = "Option::is_none")]
    family_hash: Option<CardHash>,
    deck_name: DeckName,
    file_path: PathBuf,
    range: LineRange,
    content: CardContent,
}

impl Card {
    pub fn new(
        deck_name: DeckName,
        file_path: PathBuf,
        range: LineRange,
        content: CardContent,
    ) -> Self {
        Self {
            hash: content.hash(),
            family_hash: content.family_hash(),
            deck_name,
            file_path,
            range,
            content,
        }
    }

    pub fn hash(&self) -> CardHash {
        self.hash
    }

    pub fn family_hash(&self) -> Option<CardHash> {
        self.family_hash
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn range(&self) -> LineRange {
        self.range
    }

    pub fn content(&self) -> &CardContent {
        &self.content
    }

    pub fn card_type(&self) -> CardType {
        self.content.card_type()
    }

    /// The hidden span of a cloze card.
    pub fn deletion(&self) -> Option<&str> {
        match &self.content {
            CardContent::Cloze { text, start, end } => text.get(*start..=*end),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn basic(deck: &str, path: &str, range: LineRange) -> Card {
        Card::new(
            deck.to_string(),
            PathBuf::from(path),
            range,
            CardContent::new_basic("What is Rust?", "A language."),
        )
    }

    #[test]
    fn test_hash_ignores_provenance() {
        let a = basic("rust", "rust.md", (0, 1));
        let b = basic("languages", "notes/other.md", (40, 52));
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_basic_hash_layout() {
        let card = CardContent::new_basic("  foo\n", "ba ");
        let mut expected = b"Basic".to_vec();
        expected.extend_from_slice(&3u64.to_le_bytes());
        expected.extend_from_slice(b"foo");
        expected.extend_from_slice(&2u64.to_le_bytes());
        expected.extend_from_slice(b"ba");
        assert_eq!(card.hash(), CardHash::hash_bytes(&expected));
    }

    #[test]
    fn test_field_boundary_changes_hash() {
        let a = CardContent::new_basic("ab", "c");
        let b = CardContent::new_basic("a", "bc");
        assert_ne!(a.hash(), b.hash());
        let p = CardContent::new_problem("ab", "c");
        let q = CardContent::new_problem("a", "bc");
        assert_ne!(p.hash(), q.hash());
    }

    #[test]
    fn test_cloze_hash_layout() {
        let card = CardContent::new_cloze("The sky", 4, 6);
        let mut expected = b"ClozeThe sky".to_vec();
        expected.extend_from_slice(&[4, 0, 0, 0, 6, 0, 0, 0]);
        assert_eq!(card.hash(), CardHash::hash_bytes(&expected));
        assert_eq!(card.family_hash(), Some(CardHash::hash_bytes(b"ClozeThe sky")));
    }

    #[test]
    fn test_type_tag_separates_hashes() {
        let basic = CardContent::new_basic("foo", "bar");
        let problem = CardContent::new_problem("foo", "bar");
        assert_ne!(basic.hash(), problem.hash());
        assert_eq!(basic.family_hash(), None);
    }

    #[test]
    fn test_deletion_slice() {
        let card = Card::new(
            "d".to_string(),
            PathBuf::from("d.md"),
            (0, 0),
            CardContent::new_cloze("The sky is blue.", 11, 14),
        );
        assert_eq!(card.deletion(), Some("blue"));
        assert_eq!(card.card_type(), CardType::Cloze);
    }
}
