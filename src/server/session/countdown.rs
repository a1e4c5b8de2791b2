//! Countdown timers.
//!
//! A countdown is an embed that counts down to a point in time and pings its author when it
//! reaches zero. The author or a guild administrator can cancel it; the running loop checks the
//! cancellation flag on every tick.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use chrono::{DateTime, Duration, Utc};

use crate::server::error::session::SessionError;

/// Shortest accepted countdown in seconds.
pub const MIN_COUNTDOWN_SECS: u64 = 5;
/// Longest accepted countdown or poll in seconds.
pub const MAX_DURATION_SECS: u64 = 7 * 86_400;

/// Parses a duration such as `30s`, `2m`, `1h` or `1d` into seconds.
///
/// Only a single number with a single unit is accepted. Case and surrounding whitespace are
/// ignored.
pub fn parse_duration(value: &str) -> Option<u64> {
    let value = value.trim().to_lowercase();
    let unit = value.chars().last()?;
    let digits = &value[..value.len() - unit.len_utf8()];

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3_600,
        'd' => 86_400,
        _ => return None,
    };

    digits.parse::<u64>().ok()?.checked_mul(multiplier)
}

/// Formats seconds as `1d 2h 3m 4s`, leaving out zero components. Zero is `0s`.
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }

    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 {
        parts.push(format!("{}s", secs));
    }

    parts.join(" ")
}

/// Parses and bounds-checks a duration argument.
///
/// # Returns
/// - `Ok(seconds)` - Valid duration
/// - `Err(SessionError)` - Unparsable, below `min_secs` or above seven days
pub fn parse_bounded(value: &str, min_secs: u64) -> Result<u64, SessionError> {
    let seconds = parse_duration(value).ok_or(SessionError::InvalidDuration)?;

    if seconds < min_secs {
        return Err(SessionError::DurationTooShort(describe_bound(min_secs)));
    }
    if seconds > MAX_DURATION_SECS {
        return Err(SessionError::DurationTooLong(describe_bound(MAX_DURATION_SECS)));
    }

    Ok(seconds)
}

fn describe_bound(seconds: u64) -> String {
    match seconds {
        s if s % 86_400 == 0 => format!("{} dní", s / 86_400),
        s if s < 60 => format!("{} sekund", s),
        s => format_duration(s),
    }
}

/// How long to wait before refreshing a countdown with `remaining_secs` left.
pub fn tick_interval(remaining_secs: i64) -> std::time::Duration {
    let secs = match remaining_secs {
        r if r > 3_600 => 60,
        r if r > 60 => 10,
        _ => 1,
    };
    std::time::Duration::from_secs(secs)
}

/// A running countdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    pub author_id: u64,
    pub channel_id: u64,
    pub reason: Option<String>,
    pub ends_at: DateTime<Utc>,
    cancelled: Arc<AtomicBool>,
}

impl Countdown {
    pub fn new(
        author_id: u64,
        channel_id: u64,
        reason: Option<String>,
        now: DateTime<Utc>,
        seconds: u64,
    ) -> Self {
        Self {
            author_id,
            channel_id,
            reason,
            ends_at: now + Duration::seconds(i64::try_from(seconds).unwrap_or(i64::MAX)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seconds left at `now`, negative once the countdown is over.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.ends_at - now).num_seconds()
    }

    /// Cancels the countdown on behalf of `user_id`.
    ///
    /// # Returns
    /// - `Ok(())` - Cancelled; clones of this countdown observe it on their next check
    /// - `Err(SessionError::NotCountdownOwner)` - Neither the author nor an administrator
    pub fn cancel(&self, user_id: u64, is_admin: bool) -> Result<(), SessionError> {
        if user_id != self.author_id && !is_admin {
            return Err(SessionError::NotCountdownOwner);
        }

        self.cancelled.store(true, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
