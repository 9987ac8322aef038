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

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use hashdeck_core::Collection;
use hashdeck_core::ErrorReport;
use hashdeck_core::Fallible;
use hashdeck_core::fail;
use hashdeck_core::ParserError;
use hashdeck_core::parse_decks;
use hashdeck_core::parse_decks_lenient;
use log::debug;
use walkdir::WalkDir;

/// Resolve the collection directory, defaulting to the working directory.
pub fn collection_root(directory: Option<String>) -> Fallible<PathBuf> {
    let root = match directory {
        Some(dir) => PathBuf::from(dir),
        None => current_dir()?,
    };
    if !root.is_dir() {
        return fail(format!("directory does not exist: {}", root.display()));
    }
    Ok(root)
}

/// Read every deck file under `root`, in a stable order. Paths are relative
/// to `root`, so cards don't depend on where the collection is checked out.
pub fn read_deck_files(root: &Path, extension: &str) -> Fallible<Vec<(PathBuf, String)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry =
            entry.map_err(|e| ErrorReport::new(format!("failed to walk directory: {e}")))?;
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != extension) {
            continue;
        }
        let text = read_to_string(path)?;
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        debug!("Reading {}", relative.display());
        files.push((relative, text));
    }
    Ok(files)
}

pub fn load_collection(directory: Option<String>, extension: &str) -> Fallible<Collection> {
    let root = collection_root(directory)?;
    let files = read_deck_files(&root, extension)?;
    let collection = parse_decks(files.iter().map(|(path, text)| (path, text.as_str())))?;
    debug!(
        "Loaded {} decks with {} unique cards from {}",
        collection.decks.len(),
        collection.cards.len(),
        root.display()
    );
    Ok(collection)
}

/// Load every file that parses, collecting the errors of the rest.
pub fn load_collection_lenient(
    directory: Option<String>,
    extension: &str,
) -> Fallible<(Collection, Vec<ParserError>)> {
    let root = collection_root(directory)?;
    let files = read_deck_files(&root, extension)?;
    Ok(parse_decks_lenient(
        files.iter().map(|(path, text)| (path, text.as_str())),
    ))
}
