use super::*;

/// Tests saving a modified record.
///
/// Verifies that scalar columns and all child rows are written and the version is bumped.
///
/// Expected: Ok(Saved) and a reload equal to the saved model
#[tokio::test]
async fn saves_scalars_and_children() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
    let repo = UserProgressRepository::new(db);
    let mut progress = repo.get_or_create(1, 2, now).await?;

    progress.xp = 180;
    progress.streak = 3;
    progress.last_daily_claim = Some(now + Duration::hours(1));
    progress.daily_game_xp = 30;
    progress.total_games = 4;
    progress.total_correct = 3;
    progress.game_times.insert("Minecraft".to_string(), 60);
    progress
        .completed_quests
        .entry("Minecraft".to_string())
        .or_default()
        .insert(0);
    progress.unlocked_games.insert("Hollow Knight".to_string());

    let outcome = repo.save(&mut progress).await?;

    assert_eq!(outcome, SaveOutcome::Saved);
    assert_eq!(progress.version, 1);

    let reloaded = repo.find(1, 2).await?.unwrap();
    assert_eq!(reloaded, progress);

    Ok(())
}

/// Tests saving twice with growing child data.
///
/// Verifies that game times are updated in place and existing quest rows are kept.
///
/// Expected: Ok(Saved) both times, one game_time row with the latest minutes
#[tokio::test]
async fn updates_existing_children() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserProgressRepository::new(db);
    let mut progress = repo.get_or_create(1, 2, Utc::now()).await?;

    progress.game_times.insert("Minecraft".to_string(), 60);
    progress
        .completed_quests
        .entry("Minecraft".to_string())
        .or_default()
        .insert(0);
    assert_eq!(repo.save(&mut progress).await?, SaveOutcome::Saved);

    progress.game_times.insert("Minecraft".to_string(), 320);
    progress
        .completed_quests
        .entry("Minecraft".to_string())
        .or_default()
        .insert(1);
    assert_eq!(repo.save(&mut progress).await?, SaveOutcome::Saved);

    let rows = entity::prelude::GameTime::find()
        .filter(entity::game_time::Column::ProgressId.eq(progress.id))
        .all(db)
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].minutes, 320);

    let quests = entity::prelude::CompletedQuest::find()
        .filter(entity::completed_quest::Column::ProgressId.eq(progress.id))
        .count(db)
        .await?;
    assert_eq!(quests, 2);
    assert_eq!(progress.version, 2);

    Ok(())
}

/// Tests saving a stale copy after another writer saved.
///
/// Expected: Ok(Conflict) and the other writer's data kept
#[tokio::test]
async fn rejects_stale_version() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserProgressRepository::new(db);
    let mut first = repo.get_or_create(1, 2, Utc::now()).await?;
    let mut stale = first.clone();

    first.xp = 100;
    assert_eq!(repo.save(&mut first).await?, SaveOutcome::Saved);

    stale.xp = 10;
    stale.unlocked_games.insert("Celeste".to_string());
    assert_eq!(repo.save(&mut stale).await?, SaveOutcome::Conflict);
    assert_eq!(stale.version, 0);

    let stored = repo.find(1, 2).await?.unwrap();
    assert_eq!(stored.xp, 100);
    assert!(stored.unlocked_games.is_empty());

    Ok(())
}

/// Tests that a cleared daily claim round-trips as NULL.
///
/// Expected: Ok(Saved) with last_daily_claim None after reload
#[tokio::test]
async fn stores_missing_daily_claim() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let claimed = Utc::now() - Duration::hours(3);
    factory::user_progress::UserProgressFactory::new(db)
        .user_id("2")
        .streak(4, claimed)
        .build()
        .await?;

    let repo = UserProgressRepository::new(db);
    let mut progress = repo.find(1, 2).await?.unwrap();
    progress.last_daily_claim = None;
    progress.streak = 0;
    repo.save(&mut progress).await?;

    let reloaded = repo.find(1, 2).await?.unwrap();
    assert!(reloaded.last_daily_claim.is_none());
    assert_eq!(reloaded.streak, 0);

    Ok(())
}
