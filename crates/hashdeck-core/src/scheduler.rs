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

//! The scheduler interface. The review algorithm itself lives elsewhere; the
//! core only hands it a card hash and a grade.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card_hash::CardHash;
use crate::types::date::Date;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Grade {
    Forgot,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Forgot => "forgot",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Grade {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "forgot" => Ok(Grade::Forgot),
            "hard" => Ok(Grade::Hard),
            "good" => Ok(Grade::Good),
            "easy" => Ok(Grade::Easy),
            _ => fail(format!("invalid grade string: {value}")),
        }
    }
}

/// What a scheduler reports back after a review.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Schedule {
    pub due_date: Date,
    pub review_count: usize,
}

pub trait Scheduler {
    fn review(&mut self, hash: CardHash, grade: Grade, reviewed_on: Date) -> Fallible<Schedule>;
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use super::*;

    /// Doubles the interval on success and resets it on failure.
    #[derive(Default)]
    struct Doubling {
        state: HashMap<CardHash, (u64, usize)>,
    }

    impl Scheduler for Doubling {
        fn review(&mut self, hash: CardHash, grade: Grade, reviewed_on: Date) -> Fallible<Schedule> {
            let (interval, count) = self.state.entry(hash).or_insert((0, 0));
            *interval = match grade {
                Grade::Forgot => 1,
                _ => (*interval * 2).max(1),
            };
            *count += 1;
            Ok(Schedule {
                due_date: reviewed_on.plus_days(*interval),
                review_count: *count,
            })
        }
    }

    #[test]
    fn test_grade_strings() -> Fallible<()> {
        for grade in [Grade::Forgot, Grade::Hard, Grade::Good, Grade::Easy] {
            assert_eq!(Grade::try_from(grade.as_str())?, grade);
        }
        assert!(Grade::try_from("meh").is_err());
        Ok(())
    }

    #[test]
    fn test_scheduler_is_keyed_by_hash() -> Fallible<()> {
        let today = Date::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let a = CardHash::hash_bytes(b"a");
        let b = CardHash::hash_bytes(b"b");
        let mut scheduler = Doubling::default();
        scheduler.review(a, Grade::Good, today)?;
        let second = scheduler.review(a, Grade::Good, today)?;
        let other = scheduler.review(b, Grade::Good, today)?;
        assert_eq!(second.review_count, 2);
        assert_eq!(second.due_date.to_string(), "2025-03-03");
        assert_eq!(other.review_count, 1);
        Ok(())
    }
}
