use super::*;

/// Tests ranking members of one guild by XP.
///
/// Expected: descending XP with ranks from 1, other guilds excluded
#[tokio::test]
async fn ranks_by_xp_within_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for (user, xp) in [("10", 50), ("11", 900), ("12", 400)] {
        factory::user_progress::UserProgressFactory::new(db)
            .guild_id("3")
            .user_id(user)
            .xp(xp)
            .build()
            .await?;
    }
    factory::user_progress::UserProgressFactory::new(db)
        .guild_id("4")
        .xp(10_000)
        .build()
        .await?;

    let repo = UserProgressRepository::new(db);
    let board = repo.leaderboard(3, 10).await?;

    let ranked: Vec<(u32, u64, u64)> = board.iter().map(|e| (e.rank, e.user_id, e.xp)).collect();
    assert_eq!(ranked, vec![(1, 11, 900), (2, 12, 400), (3, 10, 50)]);
    assert_eq!(board[0].level(), 4);

    Ok(())
}

/// Tests the entry limit.
///
/// Expected: only the top `limit` entries
#[tokio::test]
async fn respects_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for xp in [10, 20, 30, 40] {
        factory::user_progress::UserProgressFactory::new(db)
            .xp(xp)
            .build()
            .await?;
    }

    let repo = UserProgressRepository::new(db);
    let board = repo.leaderboard(1, 2).await?;

    assert_eq!(board.len(), 2);
    assert_eq!(board[0].xp, 40);
    assert_eq!(board[1].xp, 30);

    Ok(())
}
