//! Button polls.
//!
//! Every member has one vote. Voting for the same option again is reported as a duplicate;
//! voting for another option moves the vote.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::server::error::session::SessionError;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 10;
/// Shortest accepted poll in seconds.
pub const MIN_POLL_SECS: u64 = 30;
/// Length of the result bar in cells.
const BAR_CELLS: usize = 10;

pub const NUMBER_EMOJIS: [&str; MAX_OPTIONS] = [
    "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟",
];

/// Splits a comma separated option list, dropping blank entries.
pub fn parse_options(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits the prefix command form `Question? | A, B, C`.
pub fn parse_question_and_options(value: &str) -> Result<(String, Vec<String>), SessionError> {
    let (question, options) = value
        .split_once('|')
        .ok_or(SessionError::MissingPollSeparator)?;

    Ok((question.trim().to_string(), parse_options(options)))
}

/// What happened to a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded,
    Changed { from: usize },
    Duplicate,
}

/// Tally of one option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionResult {
    pub label: String,
    pub votes: usize,
    /// Share of all votes in percent.
    pub percentage: f64,
}

impl OptionResult {
    /// Ten-cell bar, one filled cell per full ten percent.
    pub fn bar(&self) -> String {
        let filled = ((self.percentage / 10.0) as usize).min(BAR_CELLS);
        format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
    }
}

/// A running poll.
#[derive(Debug, Clone)]
pub struct Poll {
    pub question: String,
    pub options: Vec<String>,
    pub author_id: u64,
    pub channel_id: u64,
    pub ends_at: DateTime<Utc>,
    votes: HashMap<u64, usize>,
}

impl Poll {
    /// Creates a poll after validating the option count.
    ///
    /// # Returns
    /// - `Ok(Poll)` - Valid poll without votes
    /// - `Err(SessionError)` - Fewer than 2 or more than 10 options
    pub fn new(
        question: String,
        options: Vec<String>,
        author_id: u64,
        channel_id: u64,
        ends_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if options.len() < MIN_OPTIONS {
            return Err(SessionError::TooFewOptions);
        }
        if options.len() > MAX_OPTIONS {
            return Err(SessionError::TooManyOptions);
        }

        Ok(Self {
            question,
            options,
            author_id,
            channel_id,
            ends_at,
            votes: HashMap::new(),
        })
    }

    /// Records the vote of `user_id` for the option at `index`.
    ///
    /// # Returns
    /// - `Some(VoteOutcome)` - How the vote was applied
    /// - `None` - `index` is not an option of this poll
    pub fn vote(&mut self, user_id: u64, index: usize) -> Option<VoteOutcome> {
        if index >= self.options.len() {
            return None;
        }

        let outcome = match self.votes.insert(user_id, index) {
            None => VoteOutcome::Recorded,
            Some(previous) if previous == index => VoteOutcome::Duplicate,
            Some(previous) => VoteOutcome::Changed { from: previous },
        };
        Some(outcome)
    }

    pub fn total_votes(&self) -> usize {
        self.votes.len()
    }

    pub fn results(&self) -> Vec<OptionResult> {
        let total = self.total_votes();
        let mut counts = vec![0usize; self.options.len()];
        for &index in self.votes.values() {
            counts[index] += 1;
        }

        self.options
            .iter()
            .zip(counts)
            .map(|(label, votes)| OptionResult {
                label: label.clone(),
                votes,
                percentage: if total == 0 {
                    0.0
                } else {
                    votes as f64 / total as f64 * 100.0
                },
            })
            .collect()
    }

    /// Options tied at the highest vote count. Empty when nobody voted.
    pub fn winners(&self) -> Vec<OptionResult> {
        let results = self.results();
        let Some(max) = results.iter().map(|r| r.votes).max().filter(|&m| m > 0) else {
            return Vec::new();
        };

        results.into_iter().filter(|r| r.votes == max).collect()
    }

    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.ends_at - now).num_seconds()
    }
}

/// How long to wait before checking a poll with `remaining_secs` left.
pub fn tick_interval(remaining_secs: i64) -> std::time::Duration {
    if remaining_secs > 60 {
        std::time::Duration::from_secs(30)
    } else {
        std::time::Duration::from_secs(5)
    }
}

/// End time of a poll running for `seconds` from `now`.
pub fn ends_at(now: DateTime<Utc>, seconds: u64) -> DateTime<Utc> {
    now + Duration::seconds(i64::try_from(seconds).unwrap_or(i64::MAX))
}
