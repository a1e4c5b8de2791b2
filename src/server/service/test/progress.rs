use futures::future::join_all;

use super::*;
use crate::server::{
    progression::{catalog::Difficulty, event::XpSource},
    service::progress::ProgressService,
};

/// Tests claiming the daily bonus twice in a row.
///
/// Expected: first claim grants 50 XP and is persisted, second fails with AlreadyClaimed
#[tokio::test]
async fn daily_claim_then_cooldown() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (catalog, locks, rules) = engine_parts();
    let service = ProgressService::new(db, &catalog, &locks, &rules);
    let now = Utc::now();

    let update = service.claim_daily(1, 2, now).await?;
    assert_eq!(update.value.total(), 50);
    assert_eq!(update.progress.version, 1);

    let stored = service.get(1, 2).await?.unwrap();
    assert_eq!(stored.xp, 50);
    assert_eq!(stored.streak, 1);

    let second = service.claim_daily(1, 2, now + Duration::hours(2)).await;
    assert!(matches!(
        second,
        Err(AppError::ProgressErr(ProgressError::AlreadyClaimed { .. }))
    ));

    let unchanged = service.get(1, 2).await?.unwrap();
    assert_eq!(unchanged.xp, 50);
    assert_eq!(unchanged.version, 1);

    Ok(())
}

/// Tests that guild settings change the daily bonus amounts.
///
/// Expected: base 80 with the guild's override
#[tokio::test]
async fn daily_claim_uses_guild_settings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_settings::GuildSettingsFactory::new(db)
        .guild_id("9")
        .base_daily_xp(80)
        .build()
        .await?;

    let (catalog, locks, rules) = engine_parts();
    let service = ProgressService::new(db, &catalog, &locks, &rules);

    let update = service.claim_daily(9, 2, Utc::now()).await?;

    assert_eq!(update.value.base, 80);

    Ok(())
}

/// Tests an administrative grant with a negative amount.
///
/// Expected: InvalidAmount and no record created
#[tokio::test]
async fn rejects_negative_grant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (catalog, locks, rules) = engine_parts();
    let service = ProgressService::new(db, &catalog, &locks, &rules);

    let result = service.grant_xp(1, 2, -5, Utc::now()).await;

    assert!(matches!(
        result,
        Err(AppError::ProgressErr(ProgressError::InvalidAmount(-5)))
    ));
    assert!(service.get(1, 2).await?.is_none());

    Ok(())
}

/// Tests an administrative grant crossing a level.
///
/// Expected: leveled_up with a LevelUp event
#[tokio::test]
async fn grant_reports_level_up() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (catalog, locks, rules) = engine_parts();
    let service = ProgressService::new(db, &catalog, &locks, &rules);

    let update = service.grant_xp(1, 2, 400, Utc::now()).await?;

    assert!(update.value);
    assert_eq!(update.progress.level(), 3);
    assert!(matches!(
        update.events.as_slice(),
        [ProgressEvent::LevelUp { new_level: 3, .. }]
    ));

    Ok(())
}

/// Tests quiz answers accumulating across updates.
///
/// Expected: counters and XP persisted
#[tokio::test]
async fn records_quiz_answers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (catalog, locks, rules) = engine_parts();
    let service = ProgressService::new(db, &catalog, &locks, &rules);
    let now = Utc::now();

    service.record_quiz(1, 2, Difficulty::Medium, true, now).await?;
    service.record_quiz(1, 2, Difficulty::Medium, false, now).await?;

    let stored = service.get(1, 2).await?.unwrap();
    assert_eq!(stored.total_games, 2);
    assert_eq!(stored.total_correct, 1);
    assert_eq!(stored.xp, 25);

    Ok(())
}

/// Tests the leaderboard limit clamp.
///
/// Expected: a zero limit still returns the top entry
#[tokio::test]
async fn leaderboard_clamps_limit() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for xp in [5, 15] {
        factory::user_progress::UserProgressFactory::new(db)
            .xp(xp)
            .build()
            .await?;
    }

    let (catalog, locks, rules) = engine_parts();
    let service = ProgressService::new(db, &catalog, &locks, &rules);

    let board = service.leaderboard(1, 0).await?;

    assert_eq!(board.len(), 1);
    assert_eq!(board[0].xp, 15);

    Ok(())
}

/// Tests concurrent updates of one member.
///
/// Expected: all ten grants applied, none lost
#[tokio::test]
async fn concurrent_updates_are_serialized() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (catalog, locks, rules) = engine_parts();
    let service = ProgressService::new(db, &catalog, &locks, &rules);
    let now = Utc::now();

    let grants = (0..10).map(|_| service.grant_xp(1, 2, 10, now));
    for result in join_all(grants).await {
        assert!(result.is_ok());
    }

    let stored = service.get(1, 2).await.unwrap().unwrap();
    assert_eq!(stored.xp, 100);
    assert_eq!(stored.version, 10);

    Ok(())
}

/// Tests an update whose first save loses against a concurrent writer.
///
/// Expected: the operation runs again on a fresh load and the second save succeeds
#[tokio::test]
async fn update_retries_after_version_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (catalog, locks, rules) = engine_parts();
    let service = ProgressService::new(db, &catalog, &locks, &rules);

    let mut runs = 0;
    let update = service
        .update(1, 2, Utc::now(), |engine, progress, events| {
            runs += 1;
            if runs == 1 {
                // Loaded before another writer saved.
                progress.version -= 1;
            }
            Ok(engine.add_xp(progress, 30, XpSource::Admin, events))
        })
        .await?;

    assert_eq!(runs, 2);
    assert_eq!(update.progress.version, 1);

    let stored = service.get(1, 2).await?.unwrap();
    assert_eq!(stored.xp, 30);
    assert_eq!(stored.version, 1);

    Ok(())
}

/// Tests an update that conflicts on every attempt.
///
/// Expected: Conflict after three attempts and the record unchanged
#[tokio::test]
async fn update_gives_up_after_repeated_conflicts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (catalog, locks, rules) = engine_parts();
    let service = ProgressService::new(db, &catalog, &locks, &rules);

    let mut runs = 0;
    let result = service
        .update(1, 2, Utc::now(), |engine, progress, events| {
            runs += 1;
            progress.version -= 1;
            Ok(engine.add_xp(progress, 30, XpSource::Admin, events))
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(runs, 3);

    let stored = service.get(1, 2).await?.unwrap();
    assert_eq!(stored.xp, 0);
    assert_eq!(stored.version, 0);

    Ok(())
}
