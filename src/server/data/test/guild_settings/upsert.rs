use super::*;

fn param(guild_id: u64, cap: u64) -> UpdateGuildSettingsParam {
    UpdateGuildSettingsParam {
        guild_id,
        daily_game_xp_cap: cap,
        base_daily_xp: 60,
        streak_bonus_per_day: 15,
        announce_channel_id: Some(900),
    }
}

/// Tests creating settings for a guild.
///
/// Expected: Ok with the given values
#[tokio::test]
async fn creates_settings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    let settings = repo.upsert(param(10, 300)).await?;

    assert_eq!(settings.guild_id, 10);
    assert_eq!(settings.daily_game_xp_cap, 300);
    assert_eq!(settings.base_daily_xp, 60);
    assert_eq!(settings.streak_bonus_per_day, 15);
    assert_eq!(settings.announce_channel_id, Some(900));

    Ok(())
}

/// Tests replacing existing settings.
///
/// Expected: the second write wins
#[tokio::test]
async fn replaces_settings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    repo.upsert(param(10, 300)).await?;
    repo.upsert(UpdateGuildSettingsParam {
        announce_channel_id: None,
        ..param(10, 80)
    })
    .await?;

    let settings = repo.get(10).await?.unwrap();
    assert_eq!(settings.daily_game_xp_cap, 80);
    assert_eq!(settings.announce_channel_id, None);

    Ok(())
}
