//! Live minigame sessions.
//!
//! Countdowns, polls and quiz rounds only live as long as the message that shows them. Each
//! kind is kept in its own [`Registry`] keyed by that message's id and owned by the
//! [`SessionManager`]. Gaming sessions are not kept here; they are persisted through the
//! activity service so that they survive restarts.

pub mod countdown;
pub mod poll;
pub mod quiz;
pub mod registry;

use self::{countdown::Countdown, poll::Poll, quiz::QuizRound, registry::Registry};

/// Registries of every live minigame, keyed by Discord message id.
///
/// Cloning shares the registries.
#[derive(Clone, Default)]
pub struct SessionManager {
    pub countdowns: Registry<u64, Countdown>,
    pub polls: Registry<u64, Poll>,
    pub quizzes: Registry<u64, QuizRound>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }
}
