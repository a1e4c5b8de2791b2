use super::*;

/// Tests selecting stale sessions.
///
/// Expected: only sessions older than the cutoff, from every guild
#[tokio::test]
async fn returns_only_older_sessions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(GameSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();

    factory::game_session::GameSessionFactory::new(db, "Minecraft")
        .guild_id("1")
        .started_at(now - Duration::hours(13))
        .build()
        .await?;
    factory::game_session::GameSessionFactory::new(db, "Terraria")
        .guild_id("2")
        .started_at(now - Duration::hours(20))
        .build()
        .await?;
    factory::create_game_session(db, "Celeste").await?;

    let repo = GameSessionRepository::new(db);
    let mut stale = repo.find_started_before(now - Duration::hours(12)).await?;
    stale.sort_by(|a, b| a.game_name.cmp(&b.game_name));

    let games: Vec<&str> = stale.iter().map(|s| s.game_name.as_str()).collect();
    assert_eq!(games, vec!["Minecraft", "Terraria"]);

    Ok(())
}
