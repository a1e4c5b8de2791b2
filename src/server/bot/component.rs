//! Button interactions of live minigames.
//!
//! Buttons carry their action in the custom id. The message they are attached to identifies
//! the session in the [`SessionManager`](crate::server::session::SessionManager).

use chrono::Utc;
use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
};

use crate::server::{
    bot::{
        command::{countdown, quiz, user_message},
        notifier,
    },
    error::{session::SessionError, AppError},
    service::progress::ProgressService,
    session::poll::VoteOutcome,
    state::AppState,
};

const COUNTDOWN_CANCEL: &str = "countdown:cancel";
const POLL_VOTE: &str = "poll:vote:";
const QUIZ_ANSWER: &str = "quiz:answer:";

/// Action encoded in a button's custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    CancelCountdown,
    Vote(usize),
    Answer(usize),
}

impl ComponentAction {
    pub fn parse(custom_id: &str) -> Option<Self> {
        if custom_id == COUNTDOWN_CANCEL {
            return Some(Self::CancelCountdown);
        }
        if let Some(index) = custom_id.strip_prefix(POLL_VOTE) {
            return index.parse().ok().map(Self::Vote);
        }
        if let Some(index) = custom_id.strip_prefix(QUIZ_ANSWER) {
            return index.parse().ok().map(Self::Answer);
        }
        None
    }

    pub fn custom_id(&self) -> String {
        match self {
            Self::CancelCountdown => COUNTDOWN_CANCEL.to_string(),
            Self::Vote(index) => format!("{}{}", POLL_VOTE, index),
            Self::Answer(index) => format!("{}{}", QUIZ_ANSWER, index),
        }
    }
}

/// Handles a button press.
pub async fn handle_component(ctx: &Context, component: &ComponentInteraction, state: &AppState) {
    let Some(action) = ComponentAction::parse(&component.data.custom_id) else {
        tracing::debug!("Ignoring unknown component {}", component.data.custom_id);
        return;
    };

    let result = match action {
        ComponentAction::CancelCountdown => cancel_countdown(ctx, component, state).await,
        ComponentAction::Vote(index) => vote(ctx, component, state, index).await,
        ComponentAction::Answer(index) => answer(ctx, component, state, index).await,
    };

    if let Err(err) = result {
        let content = user_message(&err).unwrap_or_else(|| {
            tracing::error!("Component {} failed: {}", component.data.custom_id, err);
            "❌ Něco se pokazilo, zkus to prosím znovu.".to_string()
        });
        if let Err(e) = respond_ephemeral(ctx, component, &content).await {
            tracing::error!("Failed to report component error: {}", e);
        }
    }
}

async fn respond_ephemeral(
    ctx: &Context,
    component: &ComponentInteraction,
    content: &str,
) -> Result<(), AppError> {
    let message = CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true);

    component
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;

    Ok(())
}

async fn cancel_countdown(
    ctx: &Context,
    component: &ComponentInteraction,
    state: &AppState,
) -> Result<(), AppError> {
    let message_id = component.message.id.get();
    let Some(countdown) = state.sessions.countdowns.get(&message_id) else {
        return respond_ephemeral(ctx, component, "⌛ Tento odpočet již skončil.").await;
    };

    let is_admin = component
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator());
    countdown.cancel(component.user.id.get(), is_admin)?;
    state.sessions.countdowns.finalize(&message_id);

    tracing::info!(
        "Countdown {} cancelled by user {}",
        message_id,
        component.user.id
    );

    let message = CreateInteractionResponseMessage::new()
        .embed(countdown::cancelled_embed(&countdown, component.user.id.get()))
        .components(vec![]);
    component
        .create_response(&ctx.http, CreateInteractionResponse::UpdateMessage(message))
        .await?;

    Ok(())
}

async fn vote(
    ctx: &Context,
    component: &ComponentInteraction,
    state: &AppState,
    index: usize,
) -> Result<(), AppError> {
    let message_id = component.message.id.get();
    let now = Utc::now();

    let voted = state.sessions.polls.with_mut(&message_id, |poll| {
        if poll.remaining_secs(now) <= 0 {
            return Err(SessionError::PollClosed);
        }
        Ok(poll
            .vote(component.user.id.get(), index)
            .map(|outcome| (outcome, poll.options[index].clone())))
    });

    let (outcome, option) = match voted {
        None => return Err(SessionError::PollClosed.into()),
        Some(result) => match result? {
            Some(vote) => vote,
            None => return Err(AppError::BadRequest("Neplatná možnost.".to_string())),
        },
    };

    let content = match outcome {
        VoteOutcome::Recorded => format!("✅ Hlasoval jsi pro **{}**!", option),
        VoteOutcome::Changed { .. } => format!("🔄 Změnil jsi hlas na **{}**!", option),
        VoteOutcome::Duplicate => format!("ℹ️ Už jsi hlasoval pro **{}**.", option),
    };

    respond_ephemeral(ctx, component, &content).await
}

async fn answer(
    ctx: &Context,
    component: &ComponentInteraction,
    state: &AppState,
    choice: usize,
) -> Result<(), AppError> {
    let message_id = component.message.id.get();
    let now = Utc::now();

    let Some(round) = state.sessions.quizzes.get(&message_id) else {
        return Err(SessionError::QuizExpired.into());
    };
    let correct = round.check_answer(component.user.id.get(), choice, now)?;

    // A double click must not record the answer twice.
    if state.sessions.quizzes.finalize(&message_id).is_none() {
        return Err(SessionError::QuizExpired.into());
    }

    let update = ProgressService::new(&state.db, &state.catalog, &state.locks, &state.defaults)
        .record_quiz(round.guild_id, round.owner_id, round.difficulty, correct, now)
        .await?;

    let message = CreateInteractionResponseMessage::new()
        .embed(quiz::result_embed(&round, choice, correct, update.value))
        .components(vec![]);
    component
        .create_response(&ctx.http, CreateInteractionResponse::UpdateMessage(message))
        .await?;

    notifier::announce(
        &ctx.http,
        component.channel_id,
        round.owner_id,
        &update.events,
    )
    .await;

    Ok(())
}
