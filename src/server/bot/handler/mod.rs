use serenity::all::{Context, EventHandler, Interaction, Message, Presence, Ready};
use serenity::async_trait;

use crate::server::state::AppState;

pub mod interaction;
pub mod message;
pub mod presence;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called for slash commands and button presses
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.state, ctx, interaction).await;
    }

    /// Called when a member's status or activity changes
    async fn presence_update(&self, ctx: Context, new_data: Presence) {
        presence::handle_presence_update(&self.state, ctx, new_data).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.state, ctx, message).await;
    }
}
