//! Level curve.
//!
//! Levels are derived from XP and never stored. Level `L` starts at `(L - 1)^2 * 100` XP, so
//! level 2 needs 100 XP, level 3 needs 400 XP and level 10 needs 8100 XP.

/// XP multiplier applied to the squared level step.
const XP_PER_LEVEL_STEP: u64 = 100;

/// Returns the level reached with `xp` experience points.
///
/// Computes `floor(sqrt(xp / 100)) + 1` with integer arithmetic, which keeps level
/// boundaries exact for arbitrarily large XP values. Zero XP is level 1.
pub fn level_for_xp(xp: u64) -> u32 {
    let steps = (xp / XP_PER_LEVEL_STEP).isqrt();
    u32::try_from(steps + 1).unwrap_or(u32::MAX)
}

/// Returns the minimum XP required to reach `level`.
///
/// Levels 0 and 1 both start at 0 XP.
pub fn xp_for_level(level: u32) -> u64 {
    if level <= 1 {
        return 0;
    }

    let steps = u64::from(level - 1);
    steps.saturating_mul(steps).saturating_mul(XP_PER_LEVEL_STEP)
}

/// XP still missing until the level after the one `xp` currently sits in.
pub fn xp_to_next_level(xp: u64) -> u64 {
    xp_for_level(level_for_xp(xp).saturating_add(1)).saturating_sub(xp)
}
