use super::*;

/// Tests protected endpoints reject requests without a token.
///
/// Expected: 401 Unauthorized
#[tokio::test]
async fn leaderboard_requires_token() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let request = Request::builder()
        .uri("/api/guilds/1/leaderboard")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(db), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json::<ErrorDto>(&body).error, "Unauthorized");
}

/// Tests the leaderboard orders members by XP and honors the limit.
///
/// Expected: Two highest members, highest first
#[tokio::test]
async fn leaderboard_orders_by_xp() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for (user_id, xp) in [("10", 50), ("11", 400), ("12", 900)] {
        factory::user_progress::UserProgressFactory::new(db)
            .guild_id("7")
            .user_id(user_id)
            .xp(xp)
            .build()
            .await
            .unwrap();
    }

    let request = request(Method::GET, "/api/guilds/7/leaderboard?limit=2", None);
    let (status, body) = send(app(db), request).await;

    assert_eq!(status, StatusCode::OK);
    let entries: Vec<LeaderboardEntryDto> = json(&body);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].user_id, 12);
    assert_eq!(entries[0].level, 4);
    assert_eq!(entries[1].user_id, 11);
    assert_eq!(entries[1].rank, 2);
}

/// Tests fetching a member without progress.
///
/// Expected: 404 Not Found
#[tokio::test]
async fn unknown_member_is_not_found() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let request = request(Method::GET, "/api/guilds/1/users/99/progress", None);
    let (status, _) = send(app(db), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Tests fetching a member's progress with child rows.
///
/// Expected: 200 with level, play time and completed quests
#[tokio::test]
async fn returns_member_progress() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user_progress::UserProgressFactory::new(db)
        .guild_id("1")
        .user_id("5")
        .xp(150)
        .game_time("Minecraft", 75)
        .completed_quest("Minecraft", 0)
        .build()
        .await
        .unwrap();

    let request = request(Method::GET, "/api/guilds/1/users/5/progress", None);
    let (status, body) = send(app(db), request).await;

    assert_eq!(status, StatusCode::OK);
    let progress: UserProgressDto = json(&body);
    assert_eq!(progress.level, 2);
    assert_eq!(progress.game_times.get("Minecraft"), Some(&75));
    assert_eq!(progress.completed_quests.get("Minecraft"), Some(&vec![0]));
}

/// Tests granting XP creates the record and reports the level-up.
///
/// Expected: 200 with xp 100, level 2, leveled_up true
#[tokio::test]
async fn grant_xp_levels_up() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let request = request(
        Method::POST,
        "/api/guilds/1/users/5/xp",
        Some(serde_json::json!({ "amount": 100 })),
    );
    let (status, body) = send(app(db), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json::<GrantXpResultDto>(&body),
        GrantXpResultDto {
            xp: 100,
            level: 2,
            leveled_up: true,
        }
    );
}

/// Tests a negative XP grant.
///
/// Expected: 400 Bad Request
#[tokio::test]
async fn grant_rejects_negative_amount() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let request = request(
        Method::POST,
        "/api/guilds/1/users/5/xp",
        Some(serde_json::json!({ "amount": -10 })),
    );
    let (status, _) = send(app(db), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
