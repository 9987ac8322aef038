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

use std::fmt::Display;
use std::fmt::Formatter;
use std::path::PathBuf;

use thiserror::Error;

/// A catch-all error for everything above the parser: I/O, JSON, storage.
#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport::new(format!("I/O error: {value}"))
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport::new(format!("JSON error: {value}"))
    }
}

impl From<ParserError> for ErrorReport {
    fn from(value: ParserError) -> Self {
        ErrorReport::new(format!("Parse error: {value}"))
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl std::error::Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::new(msg))
}

/// What went wrong while reading a deck file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Header opening '---' found but no closing '---'.")]
    MalformedHeader,

    #[error("Failed to parse TOML header: {0}")]
    InvalidHeader(String),

    #[error("Found answer tag without a question.")]
    AnswerWithoutQuestion,

    #[error("New question without answer.")]
    NewQuestionBeforeAnswer,

    #[error("Found cloze tag while reading a question.")]
    ClozeTagMidQuestion,

    #[error("Found flashcard separator while reading a question.")]
    SeparatorMidQuestion,

    #[error("Found answer tag while reading an answer.")]
    DoubleAnswer,

    #[error("Found answer tag while reading a cloze card.")]
    AnswerTagMidCloze,

    #[error("File ended while reading a question without an answer.")]
    UnterminatedQuestion,

    #[error("Question is empty.")]
    EmptyQuestion,

    #[error("Answer is empty.")]
    EmptyAnswer,

    #[error("Cloze card must contain at least one cloze deletion.")]
    EmptyClozeCard,

    #[error("Cloze deletion '[]' is empty.")]
    EmptyDeletion,

    #[error("Cloze card contains invalid UTF-8.")]
    InvalidUtf8,

    #[error("Found solution tag without a problem.")]
    SolutionWithoutProblem,

    #[error("New problem without solution.")]
    NewProblemBeforeSolution,

    #[error("Found flashcard separator while reading a problem.")]
    SeparatorMidProblem,

    #[error("Found solution tag while reading a solution.")]
    DoubleSolution,

    #[error("File ended while reading a problem without a solution.")]
    UnterminatedProblem,

    #[error("Problem is empty.")]
    EmptyProblem,

    #[error("Solution is empty.")]
    EmptySolution,

    #[error("Cloze card is too large: offsets must fit in 32 bits.")]
    ClozeTooLarge,

    #[error("Found {tag} tag while reading {reading}.")]
    UnexpectedTag {
        tag: &'static str,
        reading: &'static str,
    },
}

/// A fatal, file-scoped parse failure.
///
/// `line_num` is 0-based; it is rendered 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    pub kind: ParseErrorKind,
    pub file_path: PathBuf,
    pub line_num: usize,
}

impl ParserError {
    pub fn new(kind: ParseErrorKind, file_path: PathBuf, line_num: usize) -> Self {
        ParserError {
            kind,
            file_path,
            line_num,
        }
    }

    /// The 1-based line number of the offending line.
    pub fn line(&self) -> usize {
        self.line_num + 1
    }
}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Location: {}:{}",
            self.kind,
            self.file_path.display(),
            self.line()
        )
    }
}

impl std::error::Error for ParserError {}
