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

use std::path::PathBuf;

use log::trace;

use crate::cloze::extract_deletions;
use crate::error::ParseErrorKind;
use crate::error::ParserError;
use crate::line::Line;
use crate::types::card::Card;
use crate::types::card::CardContent;
use crate::types::card::DeckName;
use crate::types::card::LineRange;

/// Parse a deck body (no header) into cards, in file order.
pub fn parse_deck_content(
    deck_name: &str,
    file_path: impl Into<PathBuf>,
    text: &str,
) -> Result<Vec<Card>, ParserError> {
    Parser::new(deck_name.to_string(), file_path.into()).parse(text)
}

/// Assembles the cards of one file.
pub struct Parser {
    deck_name: DeckName,
    file_path: PathBuf,
    /// Added to every line index, so that positions refer to the whole file
    /// even when the header has been stripped.
    line_offset: usize,
}

enum State {
    Initial,
    ReadingQuestion {
        question: String,
        start_line: usize,
    },
    ReadingAnswer {
        question: String,
        answer: String,
        start_line: usize,
    },
    ReadingCloze {
        text: String,
        start_line: usize,
    },
    ReadingProblem {
        problem: String,
        start_line: usize,
    },
    ReadingSolution {
        problem: String,
        solution: String,
        start_line: usize,
    },
}

fn append(mut body: String, line: &str) -> String {
    body.push('\n');
    body.push_str(line);
    body
}

impl Parser {
    pub fn new(deck_name: DeckName, file_path: PathBuf) -> Self {
        Parser {
            deck_name,
            file_path,
            line_offset: 0,
        }
    }

    pub fn with_line_offset(mut self, line_offset: usize) -> Self {
        self.line_offset = line_offset;
        self
    }

    /// Parse all the cards in the given text. Duplicates are kept; see
    /// [`crate::collection::dedup_cards`].
    pub fn parse(&self, text: &str) -> Result<Vec<Card>, ParserError> {
        let mut cards = Vec::new();
        let mut state = State::Initial;
        let mut last_line = self.line_offset;
        for (idx, line) in text.lines().enumerate() {
            last_line = self.line_offset + idx;
            state = self.step(state, Line::classify(line), last_line, &mut cards)?;
        }
        self.finish(state, last_line, &mut cards)?;
        Ok(cards)
    }

    fn error<T>(&self, kind: ParseErrorKind, line_num: usize) -> Result<T, ParserError> {
        Err(ParserError::new(kind, self.file_path.clone(), line_num))
    }

    fn step(
        &self,
        state: State,
        line: Line,
        line_num: usize,
        cards: &mut Vec<Card>,
    ) -> Result<State, ParserError> {
        use Line as L;
        use ParseErrorKind as E;
        use State as S;

        let unexpected =
            |tag: &'static str, reading: &'static str| E::UnexpectedTag { tag, reading };

        match (state, line) {
            (S::Initial, L::StartQuestion(question)) => Ok(S::ReadingQuestion {
                question,
                start_line: line_num,
            }),
            (S::Initial, L::StartAnswer(_)) => self.error(E::AnswerWithoutQuestion, line_num),
            (S::Initial, L::StartCloze(text)) => Ok(S::ReadingCloze {
                text,
                start_line: line_num,
            }),
            (S::Initial, L::StartProblem(problem)) => Ok(S::ReadingProblem {
                problem,
                start_line: line_num,
            }),
            (S::Initial, L::StartSolution(_)) => self.error(E::SolutionWithoutProblem, line_num),
            (S::Initial, L::Separator | L::Text(_)) => Ok(S::Initial),

            (S::ReadingQuestion { .. }, L::StartQuestion(_)) => {
                self.error(E::NewQuestionBeforeAnswer, line_num)
            }
            (
                S::ReadingQuestion {
                    question,
                    start_line,
                },
                L::StartAnswer(answer),
            ) => Ok(S::ReadingAnswer {
                question,
                answer,
                start_line,
            }),
            (S::ReadingQuestion { .. }, L::StartCloze(_)) => {
                self.error(E::ClozeTagMidQuestion, line_num)
            }
            (S::ReadingQuestion { .. }, L::StartProblem(_)) => {
                self.error(unexpected("problem", "a question"), line_num)
            }
            (S::ReadingQuestion { .. }, L::StartSolution(_)) => {
                self.error(unexpected("solution", "a question"), line_num)
            }
            (S::ReadingQuestion { .. }, L::Separator) => {
                self.error(E::SeparatorMidQuestion, line_num)
            }
            (
                S::ReadingQuestion {
                    question,
                    start_line,
                },
                L::Text(text),
            ) => Ok(S::ReadingQuestion {
                question: append(question, &text),
                start_line,
            }),

            (S::ReadingAnswer { .. }, L::StartAnswer(_)) => self.error(E::DoubleAnswer, line_num),
            (S::ReadingAnswer { .. }, L::StartSolution(_)) => {
                self.error(unexpected("solution", "an answer"), line_num)
            }
            (
                S::ReadingAnswer {
                    question,
                    answer,
                    start_line,
                },
                L::Text(text),
            ) => Ok(S::ReadingAnswer {
                question,
                answer: append(answer, &text),
                start_line,
            }),

            (S::ReadingCloze { .. }, L::StartAnswer(_)) => {
                self.error(E::AnswerTagMidCloze, line_num)
            }
            (S::ReadingCloze { .. }, L::StartSolution(_)) => {
                self.error(unexpected("solution", "a cloze card"), line_num)
            }
            (S::ReadingCloze { text, start_line }, L::Text(more)) => Ok(S::ReadingCloze {
                text: append(text, &more),
                start_line,
            }),

            (S::ReadingProblem { .. }, L::StartProblem(_)) => {
                self.error(E::NewProblemBeforeSolution, line_num)
            }
            (
                S::ReadingProblem {
                    problem,
                    start_line,
                },
                L::StartSolution(solution),
            ) => Ok(S::ReadingSolution {
                problem,
                solution,
                start_line,
            }),
            (S::ReadingProblem { .. }, L::StartQuestion(_)) => {
                self.error(unexpected("question", "a problem"), line_num)
            }
            (S::ReadingProblem { .. }, L::StartAnswer(_)) => {
                self.error(unexpected("answer", "a problem"), line_num)
            }
            (S::ReadingProblem { .. }, L::StartCloze(_)) => {
                self.error(unexpected("cloze", "a problem"), line_num)
            }
            (S::ReadingProblem { .. }, L::Separator) => {
                self.error(E::SeparatorMidProblem, line_num)
            }
            (
                S::ReadingProblem {
                    problem,
                    start_line,
                },
                L::Text(text),
            ) => Ok(S::ReadingProblem {
                problem: append(problem, &text),
                start_line,
            }),

            (S::ReadingSolution { .. }, L::StartSolution(_)) => {
                self.error(E::DoubleSolution, line_num)
            }
            (S::ReadingSolution { .. }, L::StartAnswer(_)) => {
                self.error(unexpected("answer", "a solution"), line_num)
            }
            (
                S::ReadingSolution {
                    problem,
                    solution,
                    start_line,
                },
                L::Text(text),
            ) => Ok(S::ReadingSolution {
                problem,
                solution: append(solution, &text),
                start_line,
            }),

            // A complete card followed by the start of another card or a
            // separator: emit, then handle the line from the initial state.
            (
                state @ (S::ReadingAnswer { .. } | S::ReadingCloze { .. } | S::ReadingSolution { .. }),
                line @ (L::StartQuestion(_)
                | L::StartCloze(_)
                | L::StartProblem(_)
                | L::Separator),
            ) => {
                self.finish(state, line_num, cards)?;
                self.step(S::Initial, line, line_num, cards)
            }
        }
    }

    /// Emit the card under construction, ending at `end_line`. Also used at
    /// end of input, where a half-read card is an error.
    fn finish(&self, state: State, end_line: usize, cards: &mut Vec<Card>) -> Result<(), ParserError> {
        match state {
            State::Initial => Ok(()),
            State::ReadingQuestion { .. } => {
                self.error(ParseErrorKind::UnterminatedQuestion, end_line)
            }
            State::ReadingProblem { .. } => self.error(ParseErrorKind::UnterminatedProblem, end_line),
            State::ReadingAnswer {
                question,
                answer,
                start_line,
            } => {
                let content = CardContent::new_basic(question, answer);
                if let CardContent::Basic { question, answer } = &content {
                    if question.is_empty() {
                        return self.error(ParseErrorKind::EmptyQuestion, start_line);
                    }
                    if answer.is_empty() {
                        return self.error(ParseErrorKind::EmptyAnswer, start_line);
                    }
                }
                cards.push(self.card((start_line, end_line), content));
                Ok(())
            }
            State::ReadingSolution {
                problem,
                solution,
                start_line,
            } => {
                let content = CardContent::new_problem(problem, solution);
                if let CardContent::Problem { problem, solution } = &content {
                    if problem.is_empty() {
                        return self.error(ParseErrorKind::EmptyProblem, start_line);
                    }
                    if solution.is_empty() {
                        return self.error(ParseErrorKind::EmptySolution, start_line);
                    }
                }
                cards.push(self.card((start_line, end_line), content));
                Ok(())
            }
            State::ReadingCloze { text, start_line } => {
                let block = match extract_deletions(text.trim()) {
                    Ok(block) => block,
                    Err(kind) => return self.error(kind, start_line),
                };
                for deletion in block.deletions {
                    let content =
                        CardContent::new_cloze(block.text.clone(), deletion.start, deletion.end);
                    cards.push(self.card((start_line, end_line), content));
                }
                Ok(())
            }
        }
    }

    fn card(&self, range: LineRange, content: CardContent) -> Card {
        let card = Card::new(
            self.deck_name.clone(),
            self.file_path.clone(),
            range,
            content,
        );
        trace!(
            "{}:{}: {} card {}",
            self.file_path.display(),
            range.0 + 1,
            card.card_type().as_str(),
            card.hash()
        );
        card
    }
}
