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

/// A single line of a deck body, classified by its prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `Q: <text>`
    StartQuestion(String),
    /// `A: <text>`
    StartAnswer(String),
    /// `C: <text>`
    StartCloze(String),
    /// `P: <text>`
    StartProblem(String),
    /// `S: <text>`
    StartSolution(String),
    /// A line that's just `---`.
    Separator,
    /// Anything else, untrimmed.
    Text(String),
}

impl Line {
    pub fn classify(line: &str) -> Self {
        let tagged = |tag: &str| line.strip_prefix(tag).map(|rest| rest.trim().to_string());

        if let Some(text) = tagged("Q:") {
            Line::StartQuestion(text)
        } else if let Some(text) = tagged("A:") {
            Line::StartAnswer(text)
        } else if let Some(text) = tagged("C:") {
            Line::StartCloze(text)
        } else if let Some(text) = tagged("P:") {
            Line::StartProblem(text)
        } else if let Some(text) = tagged("S:") {
            Line::StartSolution(text)
        } else if line.trim() == "---" {
            Line::Separator
        } else {
            Line::Text(line.to_string())
        }
    }
}
