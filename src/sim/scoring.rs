//! Score and combo algebra
//!
//! `resolve` is pure: it turns an outcome into a delta triple and leaves the
//! session untouched. `apply` folds the triple into the session with the
//! clamping rules (score and time never drop below zero, time never exceeds
//! the cap).

use serde::{Deserialize, Serialize};

use super::state::{Session, TargetKind};
use crate::consts::RAMPAGE_COMBO;

/// How a target left the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player struck it
    Hit,
    /// Next spawn replaced it while still unstruck
    Miss,
}

/// Delta triple produced by a resolved target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub score_delta: i32,
    pub combo_after: u32,
    pub time_delta: u32,
}

/// Score multiplier: x2 in rampage, x2 in the data-leak window, stacking to x4
#[inline]
pub fn multiplier(combo_before: u32, data_leak: bool) -> i32 {
    let rampage = if combo_before >= RAMPAGE_COMBO { 2 } else { 1 };
    let leak = if data_leak { 2 } else { 1 };
    rampage * leak
}

/// Resolve a target outcome into score/combo/time deltas
pub fn resolve(kind: TargetKind, outcome: Outcome, combo_before: u32, data_leak: bool) -> Resolution {
    let mult = multiplier(combo_before, data_leak);
    let clean = combo_before.saturating_add(1);

    let (score_delta, combo_after, time_delta) = match (outcome, kind) {
        (Outcome::Hit, TargetKind::Normal) => (mult, clean, 0),
        (Outcome::Hit, TargetKind::Bonus) => (5 * mult, clean, 5),
        (Outcome::Hit, TargetKind::Boss) => (30 * mult, clean, 0),
        // Penalties ignore the multiplier
        (Outcome::Hit, TargetKind::Decoy) => (-3, 0, 0),
        (Outcome::Hit, TargetKind::Impostor) => (-5, 0, 0),
        (Outcome::Miss, TargetKind::Boss) => (-30, combo_before, 0),
        // Letting a decoy go is the right call
        (Outcome::Miss, TargetKind::Decoy) => (0, combo_before, 0),
        (Outcome::Miss, TargetKind::Normal | TargetKind::Bonus | TargetKind::Impostor) => (0, 0, 0),
    };

    Resolution {
        score_delta,
        combo_after,
        time_delta,
    }
}

/// Apply a resolution to the session, clamping score at zero and time at `time_cap`
pub fn apply(session: &mut Session, resolution: &Resolution, time_cap: u32) {
    session.score = session.score.saturating_add_signed(resolution.score_delta);
    session.combo = resolution.combo_after;
    session.time_left = session
        .time_left
        .saturating_add(resolution.time_delta)
        .min(time_cap.max(session.time_left));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_TIME_SECS;
    use proptest::prelude::*;

    #[test]
    fn test_normal_hit_adds_one() {
        let mut session = Session::new(30);
        for expected in 1..=4 {
            let res = resolve(TargetKind::Normal, Outcome::Hit, session.combo, session.is_data_leak());
            apply(&mut session, &res, MAX_TIME_SECS);
            assert_eq!(session.score, expected);
            assert_eq!(session.combo, expected);
        }
    }

    #[test]
    fn test_rampage_doubles_and_leak_stacks() {
        assert_eq!(resolve(TargetKind::Normal, Outcome::Hit, 4, false).score_delta, 1);
        assert_eq!(resolve(TargetKind::Normal, Outcome::Hit, 5, false).score_delta, 2);
        assert_eq!(resolve(TargetKind::Normal, Outcome::Hit, 5, true).score_delta, 4);
        assert_eq!(resolve(TargetKind::Bonus, Outcome::Hit, 5, true).score_delta, 20);
        assert_eq!(resolve(TargetKind::Boss, Outcome::Hit, 0, true).score_delta, 60);
        assert_eq!(resolve(TargetKind::Boss, Outcome::Hit, 7, true).score_delta, 120);
    }

    #[test]
    fn test_penalties_ignore_multiplier() {
        let decoy = resolve(TargetKind::Decoy, Outcome::Hit, 9, true);
        assert_eq!(decoy.score_delta, -3);
        assert_eq!(decoy.combo_after, 0);

        let impostor = resolve(TargetKind::Impostor, Outcome::Hit, 9, true);
        assert_eq!(impostor.score_delta, -5);
        assert_eq!(impostor.combo_after, 0);

        let boss_miss = resolve(TargetKind::Boss, Outcome::Miss, 9, true);
        assert_eq!(boss_miss.score_delta, -30);
        assert_eq!(boss_miss.combo_after, 9);
    }

    #[test]
    fn test_miss_rules() {
        for kind in [TargetKind::Normal, TargetKind::Bonus, TargetKind::Impostor] {
            let res = resolve(kind, Outcome::Miss, 3, false);
            assert_eq!(res, Resolution { score_delta: 0, combo_after: 0, time_delta: 0 });
        }
        let decoy = resolve(TargetKind::Decoy, Outcome::Miss, 3, false);
        assert_eq!(decoy, Resolution { score_delta: 0, combo_after: 3, time_delta: 0 });
    }

    #[test]
    fn test_bonus_adds_time_up_to_cap() {
        let mut session = Session::new(30);
        let res = resolve(TargetKind::Bonus, Outcome::Hit, 0, false);
        assert_eq!(res.time_delta, 5);
        apply(&mut session, &res, MAX_TIME_SECS);
        assert_eq!(session.time_left, 35);

        session.time_left = MAX_TIME_SECS - 2;
        apply(&mut session, &res, MAX_TIME_SECS);
        assert_eq!(session.time_left, MAX_TIME_SECS);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let mut session = Session::new(30);
        session.score = 2;
        apply(&mut session, &resolve(TargetKind::Impostor, Outcome::Hit, 0, false), MAX_TIME_SECS);
        assert_eq!(session.score, 0);
        apply(&mut session, &resolve(TargetKind::Boss, Outcome::Miss, 0, false), MAX_TIME_SECS);
        assert_eq!(session.score, 0);
    }

    fn kind_strategy() -> impl Strategy<Value = TargetKind> {
        prop::sample::select(TargetKind::ALL.to_vec())
    }

    fn outcome_strategy() -> impl Strategy<Value = Outcome> {
        prop_oneof![Just(Outcome::Hit), Just(Outcome::Miss)]
    }

    proptest! {
        #[test]
        fn prop_score_and_time_never_negative(
            steps in prop::collection::vec((kind_strategy(), outcome_strategy(), any::<bool>()), 0..200),
        ) {
            let mut session = Session::new(30);
            let mut expected: i64 = 0;
            for (kind, outcome, leak) in steps {
                let res = resolve(kind, outcome, session.combo, leak);
                expected = (expected + i64::from(res.score_delta)).max(0);
                apply(&mut session, &res, MAX_TIME_SECS);
                prop_assert_eq!(i64::from(session.score), expected);
                prop_assert!(session.time_left <= MAX_TIME_SECS);
            }
        }

        #[test]
        fn prop_combo_rules(kind in kind_strategy(), outcome in outcome_strategy(), combo in 0u32..50, leak in any::<bool>()) {
            let res = resolve(kind, outcome, combo, leak);
            match (outcome, kind) {
                (Outcome::Hit, TargetKind::Decoy | TargetKind::Impostor) => {
                    prop_assert_eq!(res.combo_after, 0);
                    prop_assert!(res.score_delta < 0);
                }
                (Outcome::Hit, _) => {
                    prop_assert_eq!(res.combo_after, combo + 1);
                    prop_assert!(res.score_delta > 0);
                    prop_assert_eq!(res.score_delta % multiplier(combo, leak), 0);
                }
                (Outcome::Miss, TargetKind::Decoy | TargetKind::Boss) => {
                    prop_assert_eq!(res.combo_after, combo);
                }
                (Outcome::Miss, _) => {
                    prop_assert_eq!(res.combo_after, 0);
                }
            }
        }
    }
}
