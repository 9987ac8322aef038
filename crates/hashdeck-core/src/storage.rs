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

//! The card store interface. Storage is keyed by card hash and nothing else.

use std::collections::BTreeMap;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card_hash::CardHash;

pub trait CardStore {
    /// Store `card` under `hash`. Returns `false` if the hash was already
    /// present, in which case the stored card is left alone.
    fn insert(&mut self, hash: CardHash, card: Card) -> Fallible<bool>;

    fn get(&self, hash: &CardHash) -> Fallible<Option<Card>>;

    fn remove(&mut self, hash: &CardHash) -> Fallible<Option<Card>>;

    /// All stored hashes, in ascending order.
    fn hashes(&self) -> Fallible<Vec<CardHash>>;

    fn contains(&self, hash: &CardHash) -> Fallible<bool> {
        Ok(self.get(hash)?.is_some())
    }
}

/// Insert every card under its own hash. Returns how many were new.
pub fn store_cards<S: CardStore + ?Sized>(store: &mut S, cards: &[Card]) -> Fallible<usize> {
    let mut added = 0;
    for card in cards {
        if store.insert(card.hash(), card.clone())? {
            added += 1;
        }
    }
    Ok(added)
}

/// Hashes in the store with no matching card in `cards`, e.g. cards whose
/// text was edited or deleted since they were stored.
pub fn orphan_hashes<S: CardStore + ?Sized>(store: &S, cards: &[Card]) -> Fallible<Vec<CardHash>> {
    let mut current: Vec<CardHash> = cards.iter().map(|c| c.hash()).collect();
    current.sort();
    Ok(store
        .hashes()?
        .into_iter()
        .filter(|h| current.binary_search(h).is_err())
        .collect())
}

#[derive(Default)]
pub struct MemoryStore {
    cards: BTreeMap<CardHash, Card>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardStore for MemoryStore {
    fn insert(&mut self, hash: CardHash, card: Card) -> Fallible<bool> {
        if card.hash() != hash {
            return fail(format!(
                "card stored under {hash} but its content hashes to {}",
                card.hash()
            ));
        }
        if self.cards.contains_key(&hash) {
            return Ok(false);
        }
        self.cards.insert(hash, card);
        Ok(true)
    }

    fn get(&self, hash: &CardHash) -> Fallible<Option<Card>> {
        Ok(self.cards.get(hash).cloned())
    }

    fn remove(&mut self, hash: &CardHash) -> Fallible<Option<Card>> {
        Ok(self.cards.remove(hash))
    }

    fn hashes(&self) -> Fallible<Vec<CardHash>> {
        Ok(self.cards.keys().copied().collect())
    }
}
