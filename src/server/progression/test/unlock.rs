use super::*;
use crate::server::progression::quest::UnlockOutcome;

/// Tests the first unlock of a catalogued bonus game.
///
/// Expected: NewlyUnlocked with catalog metadata, 100 XP, level 2 reached
#[test]
fn first_unlock_grants_bonus() {
    let rules = ProgressionRules::default();
    let catalog = GameCatalog::default();
    let engine = Progression::new(&rules, &catalog);
    let mut progress = progress();
    let mut events = Vec::new();

    let outcome = engine.unlock_game(&mut progress, "Terraria", &mut events);

    assert_eq!(
        outcome,
        UnlockOutcome::NewlyUnlocked {
            bonus_xp: 100,
            category: "Sandbox".to_string(),
            emoji: "🌳".to_string(),
        }
    );
    assert!(progress.unlocked_games.contains("Terraria"));
    assert_eq!(progress.xp, 100);
    assert!(matches!(events[0], ProgressEvent::GameUnlocked { .. }));
    assert_eq!(level_ups(&events), vec![2]);
}

/// Tests unlocking the same game twice.
///
/// Expected: AlreadyUnlocked, no additional XP or events
#[test]
fn second_unlock_is_noop() {
    let rules = ProgressionRules::default();
    let catalog = GameCatalog::default();
    let engine = Progression::new(&rules, &catalog);
    let mut progress = progress();
    let mut events = Vec::new();

    engine.unlock_game(&mut progress, "Celeste", &mut events);
    let mut second_events = Vec::new();
    let outcome = engine.unlock_game(&mut progress, "Celeste", &mut second_events);

    assert_eq!(outcome, UnlockOutcome::AlreadyUnlocked);
    assert_eq!(progress.xp, 100);
    assert!(second_events.is_empty());
}

/// Tests unlocking a game that is not in the bonus catalog.
///
/// Expected: unlocked under the generic category
#[test]
fn uncatalogued_game_uses_generic_category() {
    let rules = ProgressionRules::default();
    let catalog = GameCatalog::default();
    let engine = Progression::new(&rules, &catalog);
    let mut progress = progress();
    let mut events = Vec::new();

    let outcome = engine.unlock_game(&mut progress, "Factorio", &mut events);

    assert!(matches!(
        outcome,
        UnlockOutcome::NewlyUnlocked { ref category, .. } if category == "Other"
    ));
}
