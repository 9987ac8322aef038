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

use hashdeck_core::Card;
use hashdeck_core::Fallible;

use crate::collection::load_collection;

/// Print one line per unique card: its hash and where it came from.
pub fn print_hashes(directory: Option<String>, extension: &str) -> Fallible<()> {
    let collection = load_collection(directory, extension)?;
    for card in &collection.cards {
        println!("{}", hash_line(card));
    }
    Ok(())
}

fn hash_line(card: &Card) -> String {
    format!(
        "{} {} {}:{}",
        card.hash(),
        card.deck_name(),
        card.file_path().display(),
        card.range().0 + 1
    )
}
