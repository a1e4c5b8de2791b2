use super::*;
use crate::server::{
    model::settings::UpdateGuildSettingsParam,
    service::{
        guild_settings::{GuildSettingsService, MAX_SETTING_XP},
        progress::ProgressService,
    },
};

fn param(base_daily_xp: u64, streak_bonus_per_day: u64) -> UpdateGuildSettingsParam {
    UpdateGuildSettingsParam {
        guild_id: 4,
        daily_game_xp_cap: 200,
        base_daily_xp,
        streak_bonus_per_day,
        announce_channel_id: None,
    }
}

/// Tests amounts above the configurable maximum.
///
/// Expected: BadRequest and nothing stored
#[tokio::test]
async fn rejects_out_of_range_amounts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let rules = ProgressionRules::default();
    let service = GuildSettingsService::new(db, &rules);

    let result = service.update(param(u64::MAX, u64::MAX)).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service.update(param(50, MAX_SETTING_XP + 1)).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    assert_eq!(service.get(4).await?.updated_at, None);

    Ok(())
}

/// Tests consecutive daily claims with the largest accepted settings.
///
/// Expected: every claim succeeds and the third pays base plus two streak days
#[tokio::test]
async fn maximum_settings_keep_daily_claims_working() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (catalog, locks, rules) = engine_parts();

    GuildSettingsService::new(db, &rules)
        .update(param(MAX_SETTING_XP, MAX_SETTING_XP))
        .await?;

    let service = ProgressService::new(db, &catalog, &locks, &rules);
    let start = Utc::now();

    service.claim_daily(4, 2, start).await?;
    service.claim_daily(4, 2, start + Duration::hours(30)).await?;
    let third = service.claim_daily(4, 2, start + Duration::hours(60)).await?;

    assert_eq!(third.value.streak, 3);
    assert_eq!(third.value.total(), MAX_SETTING_XP * 3);
    assert_eq!(third.progress.xp, MAX_SETTING_XP * 6);

    Ok(())
}
