use super::*;

/// Tests storing a new session.
///
/// Expected: Ok with the session readable through `find`
#[tokio::test]
async fn stores_new_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(GameSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let started = Utc::now().trunc_subsecs(0) - Duration::minutes(5);

    let repo = GameSessionRepository::new(db);
    let session = repo.upsert(1, 2, "Minecraft", started).await?;

    assert_eq!(session.game_name, "Minecraft");
    assert_eq!(repo.find(1, 2).await?, Some(session));

    Ok(())
}

/// Tests replacing the running session of a member.
///
/// Expected: one row holding the new game and start time
#[tokio::test]
async fn replaces_existing_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(GameSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::game_session::GameSessionFactory::new(db, "Minecraft")
        .guild_id("1")
        .user_id("2")
        .started_at(Utc::now() - Duration::hours(1))
        .build()
        .await?;

    let started = Utc::now().trunc_subsecs(0);
    let repo = GameSessionRepository::new(db);
    repo.upsert(1, 2, "Terraria", started).await?;

    let session = repo.find(1, 2).await?.unwrap();
    assert_eq!(session.game_name, "Terraria");
    assert_eq!(session.started_at, started);
    assert_eq!(GameSession::find().count(db).await?, 1);

    Ok(())
}
