//! XP, leveling and quest progression engine.
//!
//! Every operation here is a synchronous mutation of a single [`UserProgress`] record. Nothing
//! in this module awaits, performs I/O or reads the clock; callers pass `now` explicitly and
//! persist the record afterwards. Side effects worth announcing are reported through a
//! [`NotificationSink`].
//!
//! # Components
//!
//! - **Level curve** (`level`) - pure XP ↔ level functions
//! - **Accrual** (`accrual`) - plain XP, quiz XP and capped play-time XP
//! - **Quests** (`quest`) - play-time thresholds and one-time bonus game unlocks
//! - **Daily bonus** (`daily`) - cooldown, streak continuation and streak bonus
//! - **Activity** (`activity`) - the per-user playing/idle state machine
//! - **Catalog** (`catalog`) and **rules** (`rules`) - the data the engine consumes
//!
//! [`UserProgress`]: crate::server::model::progress::UserProgress

pub mod accrual;
pub mod activity;
pub mod catalog;
pub mod daily;
pub mod event;
pub mod level;
pub mod quest;
pub mod rules;

#[cfg(test)]
mod test;

use self::{catalog::GameCatalog, rules::ProgressionRules};

/// Progression engine bound to one set of rules and a catalog.
///
/// Cheap to construct; services build one per operation from the guild's effective rules.
pub struct Progression<'a> {
    rules: &'a ProgressionRules,
    catalog: &'a GameCatalog,
}

impl<'a> Progression<'a> {
    pub fn new(rules: &'a ProgressionRules, catalog: &'a GameCatalog) -> Self {
        Self { rules, catalog }
    }
}
