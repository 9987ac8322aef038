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

use hashdeck_core::Collection;
use hashdeck_core::Fallible;
use hashdeck_core::fail;

use crate::collection::load_collection_lenient;

/// Parse every deck, reporting all malformed files rather than just the
/// first.
pub fn check_collection(directory: Option<String>, extension: &str) -> Fallible<()> {
    let (collection, errors) = load_collection_lenient(directory, extension)?;
    for error in &errors {
        eprintln!("{error}");
    }
    println!("{}", summary(&collection));
    match errors.len() {
        0 => Ok(()),
        n => fail(format!("{n} malformed deck files")),
    }
}

fn summary(collection: &Collection) -> String {
    let parsed: usize = collection.decks.iter().map(|d| d.card_count).sum();
    format!(
        "{} decks, {} unique cards ({} duplicates).",
        collection.decks.len(),
        collection.cards.len(),
        parsed - collection.cards.len()
    )
}

#[cfg(test)]
mod tests {
    use hashdeck_core::ParserError;
    use hashdeck_core::parse_decks;

    use super::*;

    #[test]
    fn test_summary() -> Result<(), ParserError> {
        let collection = parse_decks([
            ("a.md", "Q: foo\nA: bar\n\nC: [x] and [y]"),
            ("b.md", "Q: foo\nA: bar"),
        ])?;
        assert_eq!(summary(&collection), "2 decks, 3 unique cards (1 duplicates).");
        Ok(())
    }

    #[test]
    fn test_check_reports_bad_files() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("a.md"), "Q: a\nA: b")?;
        std::fs::write(dir.path().join("b.md"), "Q:\nA: b")?;
        std::fs::write(dir.path().join("c.md"), "A: orphan")?;
        let err = check_collection(Some(dir.path().display().to_string()), "md").unwrap_err();
        assert_eq!(err.message(), "2 malformed deck files");
        Ok(())
    }
}
