//! Application state shared by the dashboard handlers, the Discord bot and the scheduler.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    progression::{catalog::GameCatalog, rules::ProgressionRules},
    service::lock::UserLocks,
    session::SessionManager,
};

/// Shared resources of the running bot.
///
/// Cloning is cheap: the connection is a pool and everything else is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Per-member locks serializing progress updates across the bot and the dashboard.
    pub locks: UserLocks,

    /// Quest, bonus game and trivia data.
    pub catalog: Arc<GameCatalog>,

    /// Rules for guilds without their own settings.
    pub defaults: Arc<ProgressionRules>,

    /// Live countdowns, polls and quiz rounds.
    pub sessions: SessionManager,

    /// Expected bearer token of the dashboard API.
    pub dashboard_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        catalog: GameCatalog,
        defaults: ProgressionRules,
        dashboard_token: Option<String>,
    ) -> Self {
        Self {
            db,
            locks: UserLocks::new(),
            catalog: Arc::new(catalog),
            defaults: Arc::new(defaults),
            sessions: SessionManager::new(),
            dashboard_token: dashboard_token.map(Arc::from),
        }
    }
}
