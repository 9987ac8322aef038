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

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// A card's content address. Wraps blake3 because `blake3::Hash` has no
/// `Ord`, and cards are sorted by hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardHash {
    #[serde(skip)]
    inner: blake3::Hash,
}

impl CardHash {
    pub fn hash_bytes(bytes: &[u8]) -> Self {
        Self {
            inner: blake3::hash(bytes),
        }
    }

    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }

    pub fn from_hex(s: &str) -> Fallible<Self> {
        let inner = blake3::Hash::from_hex(s)
            .map_err(|_| ErrorReport::new(format!("invalid card hash: {s:?}")))?;
        Ok(Self { inner })
    }
}

impl PartialOrd for CardHash {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CardHash {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.as_bytes().cmp(other.inner.as_bytes())
    }
}

impl Display for CardHash {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.inner.to_hex())
    }
}

impl TryFrom<String> for CardHash {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CardHash::from_hex(&value)
    }
}

impl From<CardHash> for String {
    fn from(hash: CardHash) -> String {
        hash.to_hex()
    }
}

/// Streaming hasher. Every card hash starts with a type discriminator, so a
/// hasher is always created with one.
pub struct Hasher {
    inner: blake3::Hasher,
}

impl Hasher {
    pub fn tagged(tag: &str) -> Self {
        let mut inner = blake3::Hasher::new();
        inner.update(tag.as_bytes());
        Self { inner }
    }

    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// A variable-length field, prefixed with its length as a little-endian
    /// `u64` so that adjacent fields can't run into each other.
    pub fn update_field(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(&(data.len() as u64).to_le_bytes());
        self.inner.update(data);
        self
    }

    pub fn finalize(&self) -> CardHash {
        CardHash {
            inner: self.inner.finalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let hash = CardHash::hash_bytes(b"test");
        assert_eq!(
            hash.to_string(),
            "4878ca0425c739fa427f7eda20fe845f6b2e46ba5fe2a14df5b1e32f50603215"
        );
    }

    #[test]
    fn test_ordering() -> Fallible<()> {
        let a =
            CardHash::from_hex("0000000000000000000000000000000000000000000000000000000000000000")?;
        let b =
            CardHash::from_hex("00000000000000000000000000000000000000000000000000000000000000ff")?;
        let c =
            CardHash::from_hex("0100000000000000000000000000000000000000000000000000000000000000")?;
        assert!(a < b);
        assert!(b < c);
        Ok(())
    }

    #[test]
    fn test_invalid_hex() {
        assert!(CardHash::from_hex("not a hash").is_err());
    }

    #[test]
    fn test_tagged_hasher_matches_concatenation() {
        let streamed = Hasher::tagged("Basic")
            .update(b"foo")
            .update(b"bar")
            .finalize();
        assert_eq!(streamed, CardHash::hash_bytes(b"Basicfoobar"));
    }

    #[test]
    fn test_fields_are_length_prefixed() {
        let a = Hasher::tagged("Basic")
            .update_field(b"ab")
            .update_field(b"c")
            .finalize();
        let b = Hasher::tagged("Basic")
            .update_field(b"a")
            .update_field(b"bc")
            .finalize();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_as_hex() -> Fallible<()> {
        let hash = CardHash::hash_bytes(b"test");
        let json = serde_json::to_string(&hash)?;
        assert_eq!(json, format!("\"{}\"", hash.to_hex()));
        let back: CardHash = serde_json::from_str(&json)?;
        assert_eq!(back, hash);
        Ok(())
    }
}
