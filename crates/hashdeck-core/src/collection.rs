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

use log::debug;
use serde::Serialize;

use crate::error::ParserError;
use crate::header::DeckMetadata;
use crate::header::extract_header;
use crate::parser::Parser;
use crate::types::card::Card;
use crate::types::card::DeckName;

/// One source file, as seen by the parser.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Deck {
    pub name: DeckName,
    pub file_path: PathBuf,
    pub metadata: DeckMetadata,
    /// Cards parsed from this file, before deduplication.
    pub card_count: usize,
}

/// Every deck and the deduplicated union of their cards.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Collection {
    /// In the order the files were given.
    pub decks: Vec<Deck>,
    /// Sorted by hash, one card per hash.
    pub cards: Vec<Card>,
}

impl Collection {
    /// Decks with an `order` come first, ascending; the rest follow by name.
    pub fn decks_in_order(&self) -> Vec<&Deck> {
        let mut decks: Vec<&Deck> = self.decks.iter().collect();
        decks.sort_by(|a, b| {
            let key = |d: &Deck| (d.metadata.order.is_none(), d.metadata.order);
            key(a).cmp(&key(b)).then_with(|| a.name.cmp(&b.name))
        });
        decks
    }
}

/// Parse a whole deck file: header, then body.
///
/// The deck is named by the header's `name`, falling back to the file stem.
pub fn parse_source(file_path: &Path, text: &str) -> Result<(Deck, Vec<Card>), ParserError> {
    let source = extract_header(file_path, text)?;
    let name: DeckName = source.metadata.name.clone().unwrap_or_else(|| {
        file_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("None")
            .to_string()
    });
    let cards = Parser::new(name.clone(), file_path.to_path_buf())
        .with_line_offset(source.body_line)
        .parse(source.body)?;
    debug!(
        "Parsed {} cards from {} (deck {name:?}).",
        cards.len(),
        file_path.display()
    );
    let deck = Deck {
        name,
        file_path: file_path.to_path_buf(),
        metadata: source.metadata,
        card_count: cards.len(),
    };
    Ok((deck, cards))
}

/// Parse every `(path, text)` pair and deduplicate the cards across files.
/// The first malformed file aborts the whole batch; see
/// [`parse_decks_lenient`] to keep going.
pub fn parse_decks<'a, P: AsRef<Path>>(
    files: impl IntoIterator<Item = (P, &'a str)>,
) -> Result<Collection, ParserError> {
    let mut decks = Vec::new();
    let mut all_cards = Vec::new();
    for (path, text) in files {
        let (deck, cards) = parse_source(path.as_ref(), text)?;
        decks.push(deck);
        all_cards.extend(cards);
    }
    Ok(Collection {
        decks,
        cards: dedup_cards(all_cards),
    })
}

/// Like [`parse_decks`], but a malformed file only loses its own cards. The
/// collection holds every file that parsed; the errors are returned in file
/// order.
pub fn parse_decks_lenient<'a, P: AsRef<Path>>(
    files: impl IntoIterator<Item = (P, &'a str)>,
) -> (Collection, Vec<ParserError>) {
    let mut decks = Vec::new();
    let mut all_cards = Vec::new();
    let mut errors = Vec::new();
    for (path, text) in files {
        match parse_source(path.as_ref(), text) {
            Ok((deck, cards)) => {
                decks.push(deck);
                all_cards.extend(cards);
            }
            Err(e) => {
                debug!("Skipping {}: {e}", path.as_ref().display());
                errors.push(e);
            }
        }
    }
    let collection = Collection {
        decks,
        cards: dedup_cards(all_cards),
    };
    (collection, errors)
}

/// Sort cards by hash and keep the first card of each hash.
///
/// The sort is stable, so among equal hashes the earliest card in the input
/// survives.
pub fn dedup_cards(mut cards: Vec<Card>) -> Vec<Card> {
    let before = cards.len();
    cards.sort_by_key(|c| c.hash());
    cards.dedup_by_key(|c| c.hash());
    debug!("Dropped {} duplicate cards.", before - cards.len());
    cards
}
