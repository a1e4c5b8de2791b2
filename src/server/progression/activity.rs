//! Per-user game activity state machine.
//!
//! A member is either idle or playing one game since a start time. Presence signals move the
//! member between those states; leaving a playing state finishes the session and converts the
//! elapsed time into play-time XP.
//!
//! Sessions shorter than `min_session_minutes` are discarded: they earn no XP and add no
//! play time.

use chrono::{DateTime, Utc};

use crate::server::model::progress::UserProgress;

use super::{event::NotificationSink, quest::UnlockOutcome, Progression};

/// A session in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub game: String,
    pub started_at: DateTime<Utc>,
}

/// What the platform reports about a member's activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivitySignal {
    Playing(String),
    Idle,
}

/// A session that has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedSession {
    pub game: String,
    pub minutes: u64,
}

/// Effect of applying a signal to the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Session that ended with this signal.
    pub finished: Option<FinishedSession>,
    /// State after the signal; `None` means idle.
    pub next: Option<ActiveSession>,
    /// Whether a new session started with this signal.
    pub started: bool,
}

impl Transition {
    /// Whether the persisted state has to change.
    pub fn is_noop(&self) -> bool {
        self.finished.is_none() && !self.started
    }
}

/// Applies `signal` to the `current` state.
///
/// Reporting the game that is already being played keeps the running session untouched.
pub fn transition(
    current: Option<&ActiveSession>,
    signal: ActivitySignal,
    now: DateTime<Utc>,
) -> Transition {
    match (current, signal) {
        (None, ActivitySignal::Idle) => Transition {
            finished: None,
            next: None,
            started: false,
        },
        (None, ActivitySignal::Playing(game)) => Transition {
            finished: None,
            next: Some(ActiveSession {
                game,
                started_at: now,
            }),
            started: true,
        },
        (Some(session), ActivitySignal::Playing(game)) if session.game == game => Transition {
            finished: None,
            next: Some(session.clone()),
            started: false,
        },
        (Some(session), ActivitySignal::Playing(game)) => Transition {
            finished: Some(finish(session, now)),
            next: Some(ActiveSession {
                game,
                started_at: now,
            }),
            started: true,
        },
        (Some(session), ActivitySignal::Idle) => Transition {
            finished: Some(finish(session, now)),
            next: None,
            started: false,
        },
    }
}

/// Ends `session` at `now`. A start time in the future counts as zero minutes.
pub fn finish(session: &ActiveSession, now: DateTime<Utc>) -> FinishedSession {
    let minutes = (now - session.started_at).num_minutes().max(0) as u64;

    FinishedSession {
        game: session.game.clone(),
        minutes,
    }
}

/// How a finished session was credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCredit {
    /// Too short; nothing recorded.
    Discarded,
    /// Play time recorded, with the XP it earned.
    Credited { xp: u64 },
}

/// Progress effects of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub credit: Option<SessionCredit>,
    pub unlock: Option<UnlockOutcome>,
}

impl<'a> Progression<'a> {
    /// Credits a finished session, discarding it when shorter than the minimum.
    pub fn finish_session(
        &self,
        progress: &mut UserProgress,
        finished: &FinishedSession,
        now: DateTime<Utc>,
        sink: &mut impl NotificationSink,
    ) -> SessionCredit {
        if finished.minutes < self.rules.min_session_minutes {
            return SessionCredit::Discarded;
        }

        let xp = self.add_game_xp(progress, finished.minutes, &finished.game, now, sink);
        SessionCredit::Credited { xp }
    }

    /// Handles a session start, unlocking the game when it is a catalogued bonus game.
    pub fn start_session(
        &self,
        progress: &mut UserProgress,
        session: &ActiveSession,
        sink: &mut impl NotificationSink,
    ) -> Option<UnlockOutcome> {
        self.catalog.bonus_game(&session.game)?;
        Some(self.unlock_game(progress, &session.game, sink))
    }

    /// Applies the progress side of a transition: first the finished session, then the
    /// session that started.
    pub fn apply_transition(
        &self,
        progress: &mut UserProgress,
        transition: &Transition,
        now: DateTime<Utc>,
        sink: &mut impl NotificationSink,
    ) -> TransitionOutcome {
        let credit = transition
            .finished
            .as_ref()
            .map(|finished| self.finish_session(progress, finished, now, sink));

        let unlock = match (&transition.next, transition.started) {
            (Some(session), true) => self.start_session(progress, session, sink),
            _ => None,
        };

        TransitionOutcome { credit, unlock }
    }
}
