use super::*;

/// Tests the first interaction of a member.
///
/// Verifies that a zeroed record is inserted with the game XP window starting at the given
/// time.
///
/// Expected: Ok with a fresh record persisted
#[tokio::test]
async fn creates_empty_record() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();

    let repo = UserProgressRepository::new(db);
    let progress = repo.get_or_create(42, 7, now).await?;

    assert_eq!(progress.guild_id, 42);
    assert_eq!(progress.user_id, 7);
    assert_eq!(progress.xp, 0);
    assert_eq!(progress.streak, 0);
    assert_eq!(progress.version, 0);
    assert_eq!(progress.last_game_xp_reset, now);
    assert!(progress.game_times.is_empty());

    let count = entity::prelude::UserProgress::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests loading a member that already has a record.
///
/// Expected: Ok with the existing record and no second row
#[tokio::test]
async fn returns_existing_record() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user_progress::UserProgressFactory::new(db)
        .guild_id("42")
        .user_id("7")
        .xp(450)
        .game_time("Minecraft", 75)
        .build()
        .await?;

    let repo = UserProgressRepository::new(db);
    let progress = repo.get_or_create(42, 7, Utc::now()).await?;

    assert_eq!(progress.id, existing.id);
    assert_eq!(progress.xp, 450);
    assert_eq!(progress.game_minutes("Minecraft"), 75);

    let count = entity::prelude::UserProgress::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that records are scoped per guild.
///
/// Expected: the same user gets separate records in two guilds
#[tokio::test]
async fn separates_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserProgressRepository::new(db);
    let first = repo.get_or_create(1, 7, Utc::now()).await?;
    let second = repo.get_or_create(2, 7, Utc::now()).await?;

    assert_ne!(first.id, second.id);

    Ok(())
}
