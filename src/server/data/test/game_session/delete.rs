use super::*;

/// Tests removing a running session.
///
/// Expected: Ok(true) and the session gone
#[tokio::test]
async fn deletes_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(GameSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::game_session::GameSessionFactory::new(db, "Celeste")
        .user_id("8")
        .build()
        .await?;

    let repo = GameSessionRepository::new(db);
    assert!(repo.delete(1, 8).await?);
    assert!(repo.find(1, 8).await?.is_none());

    Ok(())
}

/// Tests removing a session that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_missing_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(GameSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GameSessionRepository::new(db);
    assert!(!repo.delete(1, 8).await?);

    Ok(())
}
