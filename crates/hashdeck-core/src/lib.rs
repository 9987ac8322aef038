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

//! hashdeck-core: turns plain-text flashcard decks into content-addressed
//! cards.
//!
//! - [`header`] strips the optional TOML header of a deck file.
//! - [`line`] and [`parser`] classify lines and assemble cards.
//! - [`cloze`] finds cloze deletions by byte offset.
//! - [`types::card`] hashes cards by content, never by location.
//! - [`collection`] parses many files and deduplicates by hash.
//! - [`storage`] and [`scheduler`] are the interfaces to the outside world.
//!
//! Nothing here does I/O.

pub mod cloze;
pub mod collection;
pub mod error;
pub mod header;
pub mod line;
pub mod parser;
pub mod scheduler;
pub mod storage;
pub mod types;

pub use collection::{
    Collection, Deck, dedup_cards, parse_decks, parse_decks_lenient, parse_source,
};
pub use error::{ErrorReport, Fallible, ParseErrorKind, ParserError, fail};
pub use header::DeckMetadata;
pub use parser::{Parser, parse_deck_content};
pub use scheduler::{Grade, Schedule, Scheduler};
pub use storage::{CardStore, MemoryStore};
pub use types::card::{Card, CardContent, CardType};
pub use types::card_hash::CardHash;
pub use types::date::Date;
