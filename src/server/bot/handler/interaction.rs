use serenity::all::{Context, Interaction};

use crate::server::{
    bot::{command, component},
    state::AppState,
};

/// Routes slash commands and button presses.
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => {
            tracing::debug!(
                "Received /{} from user {}",
                command.data.name,
                command.user.id
            );

            if let Err(err) = command::dispatch(&ctx, &command, state).await {
                command::report_error(&ctx, &command, err).await;
            }
        }
        Interaction::Component(interaction) => {
            component::handle_component(&ctx, &interaction, state).await;
        }
        _ => {}
    }
}
