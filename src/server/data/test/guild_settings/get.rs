use super::*;

/// Tests reading stored settings.
///
/// Expected: Ok(Some) with the stored values
#[tokio::test]
async fn returns_stored_settings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_settings::GuildSettingsFactory::new(db)
        .guild_id("77")
        .daily_game_xp_cap(120)
        .announce_channel_id("555")
        .build()
        .await?;

    let repo = GuildSettingsRepository::new(db);
    let settings = repo.get(77).await?.unwrap();

    assert_eq!(settings.daily_game_xp_cap, 120);
    assert_eq!(settings.base_daily_xp, 50);
    assert_eq!(settings.announce_channel_id, Some(555));
    assert!(settings.updated_at.is_some());

    Ok(())
}

/// Tests reading a guild that never stored settings.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_settings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guild_settings(db).await?;

    let repo = GuildSettingsRepository::new(db);
    assert!(repo.get(1).await?.is_none());

    Ok(())
}
