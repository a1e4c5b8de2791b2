use super::*;
use crate::server::error::progress::ProgressError;

/// Tests a first claim.
///
/// Expected: streak 1, base XP only
#[test]
fn first_claim_starts_streak() {
    let rules = ProgressionRules::default();
    let catalog = GameCatalog::default();
    let engine = Progression::new(&rules, &catalog);
    let mut progress = progress();
    let mut events = Vec::new();

    let bonus = engine.claim_daily(&mut progress, now(), &mut events).unwrap();

    assert_eq!(bonus.streak, 1);
    assert_eq!(bonus.base, 50);
    assert_eq!(bonus.streak_bonus, 0);
    assert!(!bonus.leveled_up);
    assert_eq!(progress.xp, 50);
    assert_eq!(progress.last_daily_claim, Some(now()));
    assert_eq!(
        events,
        vec![ProgressEvent::DailyBonusGranted {
            base: 50,
            streak_bonus: 0,
            streak: 1,
        }]
    );
}

/// Tests a claim 30 hours after the previous one.
///
/// Expected: streak incremented, bonus for one extra day
#[test]
fn claim_within_window_continues_streak() {
    let rules = ProgressionRules::default();
    let catalog = GameCatalog::default();
    let engine = Progression::new(&rules, &catalog);
    let mut progress = progress();
    progress.streak = 3;
    progress.last_daily_claim = Some(now() - Duration::hours(30));
    let mut events = Vec::new();

    let bonus = engine.claim_daily(&mut progress, now(), &mut events).unwrap();

    assert_eq!(bonus.streak, 4);
    assert_eq!(bonus.streak_bonus, 30);
    assert_eq!(bonus.total(), 80);
    assert_eq!(progress.streak, 4);
}

/// Tests a claim 50 hours after the previous one.
///
/// Expected: streak reset to 1
#[test]
fn claim_after_gap_resets_streak() {
    let rules = ProgressionRules::default();
    let catalog = GameCatalog::default();
    let engine = Progression::new(&rules, &catalog);
    let mut progress = progress();
    progress.streak = 7;
    progress.last_daily_claim = Some(now() - Duration::hours(50));
    let mut events = Vec::new();

    let bonus = engine.claim_daily(&mut progress, now(), &mut events).unwrap();

    assert_eq!(bonus.streak, 1);
    assert_eq!(bonus.streak_bonus, 0);
}

/// Tests a claim 2 hours after the previous one.
///
/// Expected: AlreadyClaimed with 22 hours remaining, record untouched
#[test]
fn claim_during_cooldown_fails() {
    let rules = ProgressionRules::default();
    let catalog = GameCatalog::default();
    let engine = Progression::new(&rules, &catalog);
    let mut progress = progress();
    progress.streak = 2;
    progress.last_daily_claim = Some(now() - Duration::hours(2));
    let before = progress.clone();
    let mut events = Vec::new();

    let result = engine.claim_daily(&mut progress, now(), &mut events);

    assert_eq!(
        result,
        Err(ProgressError::AlreadyClaimed {
            remaining: Duration::hours(22),
        })
    );
    assert_eq!(progress, before);
    assert!(events.is_empty());
}

/// Tests the exact window boundaries.
///
/// Expected: 24h continues the streak, 48h resets it
#[test]
fn window_boundaries() {
    let rules = ProgressionRules::default();
    let catalog = GameCatalog::default();
    let engine = Progression::new(&rules, &catalog);
    let mut events = Vec::new();

    let mut at_24 = progress();
    at_24.streak = 1;
    at_24.last_daily_claim = Some(now() - Duration::hours(24));
    assert_eq!(
        engine.claim_daily(&mut at_24, now(), &mut events).unwrap().streak,
        2
    );

    let mut at_48 = progress();
    at_48.streak = 5;
    at_48.last_daily_claim = Some(now() - Duration::hours(48));
    assert_eq!(
        engine.claim_daily(&mut at_48, now(), &mut events).unwrap().streak,
        1
    );
}

/// Tests the streak bonus cap.
///
/// Expected: a 25 day streak earns the bonus of 10 days only
#[test]
fn streak_bonus_caps_at_ten_days() {
    let rules = ProgressionRules::default();
    let catalog = GameCatalog::default();
    let engine = Progression::new(&rules, &catalog);
    let mut progress = progress();
    progress.streak = 24;
    progress.last_daily_claim = Some(now() - Duration::hours(25));
    let mut events = Vec::new();

    let bonus = engine.claim_daily(&mut progress, now(), &mut events).unwrap();

    assert_eq!(bonus.streak, 25);
    assert_eq!(bonus.streak_bonus, 100);
    assert_eq!(bonus.total(), 150);
}

/// Tests a daily claim that crosses a level boundary.
///
/// Expected: leveled_up true and a LevelUp event after the bonus event
#[test]
fn claim_reports_level_up() {
    let rules = ProgressionRules::default();
    let catalog = GameCatalog::default();
    let engine = Progression::new(&rules, &catalog);
    let mut progress = progress();
    progress.xp = 60;
    let mut events = Vec::new();

    let bonus = engine.claim_daily(&mut progress, now(), &mut events).unwrap();

    assert!(bonus.leveled_up);
    assert!(matches!(events[0], ProgressEvent::DailyBonusGranted { .. }));
    assert_eq!(level_ups(&events), vec![2]);
}

/// Tests a streak claim with the largest configurable amounts.
///
/// Expected: the reward saturates instead of overflowing
#[test]
fn huge_bonus_saturates() {
    let rules = ProgressionRules {
        base_daily_xp: u64::MAX,
        streak_bonus_per_day: u64::MAX,
        ..ProgressionRules::default()
    };
    let catalog = GameCatalog::default();
    let engine = Progression::new(&rules, &catalog);
    let mut progress = progress();
    progress.streak = 2;
    progress.last_daily_claim = Some(now() - Duration::hours(30));
    let mut events = Vec::new();

    let bonus = engine.claim_daily(&mut progress, now(), &mut events).unwrap();

    assert_eq!(bonus.streak, 3);
    assert_eq!(bonus.total(), u64::MAX);
    assert_eq!(progress.xp, u64::MAX);
}
