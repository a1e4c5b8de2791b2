mod model;
mod server;

use std::sync::Arc;

use crate::server::{
    bot, config::Config, error::AppError, router, scheduler::session_sweep, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let catalog = startup::load_catalog(&config).await?;

    let state = AppState::new(
        db,
        catalog,
        config.default_rules.clone(),
        config.dashboard_token.clone(),
    );

    if config.dashboard_token.is_none() {
        tracing::warn!("DASHBOARD_TOKEN is not set, dashboard endpoints will reject all requests");
    }

    let (bot_client, discord_http) = bot::start::init_bot(&config, state.clone()).await?;

    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let scheduler_state = state.clone();
    let scheduler_http = Arc::clone(&discord_http);
    tokio::spawn(async move {
        if let Err(e) = session_sweep::start_scheduler(scheduler_state, scheduler_http).await {
            tracing::error!("Session sweep scheduler error: {}", e);
        }
    });

    let app = router::router(state, &config.cors_origins);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    tracing::info!("Dashboard listening on {}", config.bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
