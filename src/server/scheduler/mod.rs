//! Cron jobs.

pub mod session_sweep;
