use super::*;

/// Tests loading a record with all child rows.
///
/// Expected: Ok(Some) with game times, completed quests and unlocks folded into the model
#[tokio::test]
async fn loads_children() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user_progress::UserProgressFactory::new(db)
        .guild_id("5")
        .user_id("9")
        .game_time("Minecraft", 320)
        .game_time("Terraria", 15)
        .completed_quest("Minecraft", 0)
        .completed_quest("Minecraft", 1)
        .unlocked_game("Terraria")
        .build()
        .await?;

    let repo = UserProgressRepository::new(db);
    let progress = repo.find(5, 9).await?.unwrap();

    assert_eq!(progress.game_minutes("Minecraft"), 320);
    assert_eq!(progress.game_minutes("Terraria"), 15);
    assert!(progress.has_completed_quest("Minecraft", 0));
    assert!(progress.has_completed_quest("Minecraft", 1));
    assert!(!progress.has_completed_quest("Minecraft", 2));
    assert!(progress.unlocked_games.contains("Terraria"));

    Ok(())
}

/// Tests loading a member without a record.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_member() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_progress(db).await?;

    let repo = UserProgressRepository::new(db);
    let result = repo.find(1, 999_999_999).await?;

    assert!(result.is_none());

    Ok(())
}
