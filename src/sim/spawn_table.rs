//! Weighted target distributions per level
//!
//! Rows are keyed by `(level, data_leak)`. Columns always appear in the fixed
//! order normal, decoy, bonus, impostor, boss so a single roll maps to the
//! same kind regardless of which row is active.

use super::state::TargetKind;

/// One weighted distribution over target kinds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTable {
    pub weights: &'static [(TargetKind, f64)],
}

const LEVEL_1: SpawnTable = SpawnTable {
    weights: &[
        (TargetKind::Normal, 0.60),
        (TargetKind::Decoy, 0.21),
        (TargetKind::Bonus, 0.19),
    ],
};

const LEVEL_1_LEAK: SpawnTable = SpawnTable {
    weights: &[
        (TargetKind::Normal, 0.50),
        (TargetKind::Decoy, 0.21),
        (TargetKind::Bonus, 0.29),
    ],
};

const LEVEL_2: SpawnTable = SpawnTable {
    weights: &[
        (TargetKind::Normal, 0.38),
        (TargetKind::Decoy, 0.10),
        (TargetKind::Bonus, 0.25),
        (TargetKind::Impostor, 0.27),
    ],
};

const LEVEL_2_LEAK: SpawnTable = SpawnTable {
    weights: &[
        (TargetKind::Normal, 0.28),
        (TargetKind::Decoy, 0.10),
        (TargetKind::Bonus, 0.35),
        (TargetKind::Impostor, 0.27),
    ],
};

const LEVEL_3: SpawnTable = SpawnTable {
    weights: &[
        (TargetKind::Normal, 0.40),
        (TargetKind::Decoy, 0.15),
        (TargetKind::Bonus, 0.20),
        (TargetKind::Impostor, 0.15),
        (TargetKind::Boss, 0.10),
    ],
};

const LEVEL_3_LEAK: SpawnTable = SpawnTable {
    weights: &[
        (TargetKind::Normal, 0.30),
        (TargetKind::Decoy, 0.15),
        (TargetKind::Bonus, 0.30),
        (TargetKind::Impostor, 0.15),
        (TargetKind::Boss, 0.10),
    ],
};

impl SpawnTable {
    /// Table for a level; levels past 3 reuse the level 3 rows
    pub fn for_level(level: u8, data_leak: bool) -> &'static SpawnTable {
        match (level, data_leak) {
            (0 | 1, false) => &LEVEL_1,
            (0 | 1, true) => &LEVEL_1_LEAK,
            (2, false) => &LEVEL_2,
            (2, true) => &LEVEL_2_LEAK,
            (_, false) => &LEVEL_3,
            (_, true) => &LEVEL_3_LEAK,
        }
    }

    /// Map a uniform roll in `[0, 1)` onto a kind via cumulative thresholds
    pub fn sample(&self, roll: f64) -> TargetKind {
        let mut cumulative = 0.0;
        for &(kind, weight) in self.weights {
            cumulative += weight;
            if roll < cumulative {
                return kind;
            }
        }
        // Float rounding can leave the top sliver uncovered
        self.weights
            .last()
            .map(|&(kind, _)| kind)
            .unwrap_or_default()
    }

    /// Configured weight for a kind (0 if the kind never spawns here)
    pub fn weight_of(&self, kind: TargetKind) -> f64 {
        self.weights
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|&(_, w)| w)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_sum_to_one() {
        for level in 1..=3 {
            for leak in [false, true] {
                let total: f64 = SpawnTable::for_level(level, leak)
                    .weights
                    .iter()
                    .map(|(_, w)| w)
                    .sum();
                assert!((total - 1.0).abs() < 1e-9, "level {level} leak {leak}: {total}");
            }
        }
    }

    #[test]
    fn test_boss_only_on_level_3() {
        for leak in [false, true] {
            assert_eq!(SpawnTable::for_level(1, leak).weight_of(TargetKind::Boss), 0.0);
            assert_eq!(SpawnTable::for_level(2, leak).weight_of(TargetKind::Boss), 0.0);
            assert_eq!(SpawnTable::for_level(3, leak).weight_of(TargetKind::Boss), 0.10);
        }
    }

    #[test]
    fn test_leak_adds_ten_points_of_bonus() {
        for level in 1..=3 {
            let calm = SpawnTable::for_level(level, false).weight_of(TargetKind::Bonus);
            let leak = SpawnTable::for_level(level, true).weight_of(TargetKind::Bonus);
            assert!((leak - calm - 0.10).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sample_thresholds_in_column_order() {
        let table = SpawnTable::for_level(1, false);
        assert_eq!(table.sample(0.0), TargetKind::Normal);
        assert_eq!(table.sample(0.599), TargetKind::Normal);
        assert_eq!(table.sample(0.60), TargetKind::Decoy);
        assert_eq!(table.sample(0.80), TargetKind::Decoy);
        assert_eq!(table.sample(0.82), TargetKind::Bonus);
        assert_eq!(table.sample(0.999_999), TargetKind::Bonus);

        let table = SpawnTable::for_level(3, true);
        assert_eq!(table.sample(0.95), TargetKind::Boss);
        assert_eq!(table.sample(0.85), TargetKind::Impostor);
    }
}
