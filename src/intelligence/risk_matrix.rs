//! The eight constant risk tier matrices.
//!
//! Each matrix is indexed `[age][systolic][cholesterol]`: age groups 40/50/60/70,
//! systolic rows 120/140/160/180 mmHg, cholesterol columns 4..=8 mmol/L.
//! Cells hold a tier index 0..=4 (see `risk::RISK_TIERS`). Within one matrix a
//! tier never decreases along any axis.

use serde::{Deserialize, Serialize};

use crate::models::enums::Gender;

use super::normalizer::RiskBin;

pub type TierMatrix = [[[u8; 5]; 4]; 4];

/// Selects one of the eight matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMatrixKey {
    pub has_diabetes: bool,
    pub gender: Gender,
    pub is_smoker: bool,
}

impl RiskMatrixKey {
    pub fn new(has_diabetes: bool, gender: Gender, is_smoker: bool) -> Self {
        Self {
            has_diabetes,
            gender,
            is_smoker,
        }
    }

    /// Position in `RISK_MATRICES`.
    pub fn index(&self) -> usize {
        let diabetes = if self.has_diabetes { 0 } else { 4 };
        let gender = match self.gender {
            Gender::Male => 0,
            Gender::Female => 2,
        };
        let smoking = if self.is_smoker { 0 } else { 1 };
        diabetes + gender + smoking
    }

    pub fn matrix(&self) -> &'static TierMatrix {
        &RISK_MATRICES[self.index()]
    }

    /// Tier index stored at the given chart position.
    pub fn tier_at(&self, bin: &RiskBin) -> u8 {
        self.matrix()[bin.age_index()][bin.bp_index()][bin.chol_index()]
    }

    /// All eight keys, in matrix order.
    pub fn all() -> [RiskMatrixKey; 8] {
        let mut keys = [RiskMatrixKey::new(true, Gender::Male, true); 8];
        for (i, key) in keys.iter_mut().enumerate() {
            let gender = if i % 4 < 2 { Gender::Male } else { Gender::Female };
            *key = RiskMatrixKey::new(i < 4, gender, i % 2 == 0);
        }
        keys
    }
}

pub static RISK_MATRICES: [TierMatrix; 8] = [
    DIABETIC_MALE_SMOKER,
    DIABETIC_MALE_NON_SMOKER,
    DIABETIC_FEMALE_SMOKER,
    DIABETIC_FEMALE_NON_SMOKER,
    NON_DIABETIC_MALE_SMOKER,
    NON_DIABETIC_MALE_NON_SMOKER,
    NON_DIABETIC_FEMALE_SMOKER,
    NON_DIABETIC_FEMALE_NON_SMOKER,
];

/// Diabetic, male, smoker.
const DIABETIC_MALE_SMOKER: TierMatrix = [
    // age 40
    [
        [0, 1, 2, 2, 3], // 120
        [1, 1, 2, 3, 3], // 140
        [1, 2, 3, 3, 4], // 160
        [2, 2, 3, 4, 4], // 180
    ],
    // age 50
    [
        [1, 2, 2, 3, 3], // 120
        [2, 2, 3, 3, 4], // 140
        [2, 3, 3, 4, 4], // 160
        [3, 3, 4, 4, 4], // 180
    ],
    // age 60
    [
        [2, 2, 3, 4, 4], // 120
        [2, 3, 3, 4, 4], // 140
        [3, 3, 4, 4, 4], // 160
        [3, 4, 4, 4, 4], // 180
    ],
    // age 70
    [
        [2, 3, 4, 4, 4], // 120
        [3, 4, 4, 4, 4], // 140
        [3, 4, 4, 4, 4], // 160
        [4, 4, 4, 4, 4], // 180
    ],
];

/// Diabetic, male, non-smoker.
const DIABETIC_MALE_NON_SMOKER: TierMatrix = [
    // age 40
    [
        [0, 0, 1, 1, 2], // 120
        [0, 1, 1, 2, 2], // 140
        [1, 1, 2, 2, 3], // 160
        [1, 2, 2, 3, 3], // 180
    ],
    // age 50
    [
        [0, 1, 2, 2, 3], // 120
        [1, 1, 2, 3, 3], // 140
        [1, 2, 3, 3, 4], // 160
        [2, 2, 3, 4, 4], // 180
    ],
    // age 60
    [
        [1, 2, 2, 3, 3], // 120
        [2, 2, 3, 3, 4], // 140
        [2, 3, 3, 4, 4], // 160
        [3, 3, 4, 4, 4], // 180
    ],
    // age 70
    [
        [2, 2, 3, 3, 4], // 120
        [2, 3, 3, 4, 4], // 140
        [3, 3, 4, 4, 4], // 160
        [3, 4, 4, 4, 4], // 180
    ],
];

/// Diabetic, female, smoker.
const DIABETIC_FEMALE_SMOKER: TierMatrix = [
    // age 40
    [
        [0, 1, 1, 2, 2], // 120
        [1, 1, 2, 2, 3], // 140
        [1, 2, 2, 3, 3], // 160
        [2, 2, 3, 3, 4], // 180
    ],
    // age 50
    [
        [1, 1, 2, 2, 3], // 120
        [1, 2, 2, 3, 3], // 140
        [2, 2, 3, 3, 4], // 160
        [2, 3, 3, 4, 4], // 180
    ],
    // age 60
    [
        [1, 2, 3, 3, 4], // 120
        [2, 2, 3, 4, 4], // 140
        [2, 3, 4, 4, 4], // 160
        [3, 3, 4, 4, 4], // 180
    ],
    // age 70
    [
        [2, 3, 3, 4, 4], // 120
        [3, 3, 4, 4, 4], // 140
        [3, 4, 4, 4, 4], // 160
        [4, 4, 4, 4, 4], // 180
    ],
];

/// Diabetic, female, non-smoker.
const DIABETIC_FEMALE_NON_SMOKER: TierMatrix = [
    // age 40
    [
        [0, 0, 0, 1, 1], // 120
        [0, 0, 1, 1, 2], // 140
        [0, 1, 1, 2, 2], // 160
        [1, 1, 2, 2, 3], // 180
    ],
    // age 50
    [
        [0, 1, 1, 2, 2], // 120
        [1, 1, 2, 2, 3], // 140
        [1, 2, 2, 3, 3], // 160
        [2, 2, 3, 3, 4], // 180
    ],
    // age 60
    [
        [1, 1, 2, 2, 3], // 120
        [1, 2, 2, 3, 3], // 140
        [2, 2, 3, 3, 4], // 160
        [2, 3, 3, 4, 4], // 180
    ],
    // age 70
    [
        [2, 2, 3, 3, 4], // 120
        [2, 3, 3, 4, 4], // 140
        [3, 3, 4, 4, 4], // 160
        [3, 4, 4, 4, 4], // 180
    ],
];

/// Non-diabetic, male, smoker.
const NON_DIABETIC_MALE_SMOKER: TierMatrix = [
    // age 40
    [
        [0, 0, 1, 1, 2], // 120
        [0, 1, 1, 2, 2], // 140
        [1, 1, 2, 2, 3], // 160
        [1, 2, 2, 3, 3], // 180
    ],
    // age 50
    [
        [0, 1, 1, 2, 2], // 120
        [1, 1, 2, 2, 3], // 140
        [1, 2, 2, 3, 3], // 160
        [2, 2, 3, 3, 4], // 180
    ],
    // age 60
    [
        [1, 2, 2, 3, 3], // 120
        [2, 2, 3, 3, 4], // 140
        [2, 3, 3, 4, 4], // 160
        [3, 3, 4, 4, 4], // 180
    ],
    // age 70
    [
        [2, 2, 3, 3, 4], // 120
        [2, 3, 3, 4, 4], // 140
        [3, 3, 4, 4, 4], // 160
        [3, 4, 4, 4, 4], // 180
    ],
];

/// Non-diabetic, male, non-smoker.
const NON_DIABETIC_MALE_NON_SMOKER: TierMatrix = [
    // age 40
    [
        [0, 0, 0, 0, 1], // 120
        [0, 0, 0, 1, 1], // 140
        [0, 0, 1, 1, 2], // 160
        [1, 1, 1, 2, 2], // 180
    ],
    // age 50
    [
        [0, 0, 1, 1, 2], // 120
        [0, 1, 1, 2, 2], // 140
        [1, 1, 2, 2, 3], // 160
        [1, 2, 2, 3, 3], // 180
    ],
    // age 60
    [
        [0, 1, 1, 2, 2], // 120
        [1, 1, 2, 2, 3], // 140
        [1, 2, 2, 3, 3], // 160
        [2, 2, 3, 3, 4], // 180
    ],
    // age 70
    [
        [1, 2, 2, 2, 3], // 120
        [2, 2, 3, 3, 3], // 140
        [2, 3, 3, 3, 4], // 160
        [3, 3, 4, 4, 4], // 180
    ],
];

/// Non-diabetic, female, smoker.
const NON_DIABETIC_FEMALE_SMOKER: TierMatrix = [
    // age 40
    [
        [0, 0, 0, 1, 1], // 120
        [0, 0, 1, 1, 2], // 140
        [0, 1, 1, 2, 2], // 160
        [1, 1, 2, 2, 3], // 180
    ],
    // age 50
    [
        [0, 0, 1, 1, 2], // 120
        [0, 1, 1, 2, 2], // 140
        [1, 1, 2, 2, 3], // 160
        [1, 2, 2, 3, 3], // 180
    ],
    // age 60
    [
        [1, 1, 2, 2, 2], // 120
        [1, 2, 2, 2, 3], // 140
        [2, 2, 3, 3, 3], // 160
        [2, 3, 3, 3, 4], // 180
    ],
    // age 70
    [
        [1, 2, 2, 3, 3], // 120
        [2, 2, 3, 3, 4], // 140
        [2, 3, 3, 4, 4], // 160
        [3, 3, 4, 4, 4], // 180
    ],
];

/// Non-diabetic, female, non-smoker.
const NON_DIABETIC_FEMALE_NON_SMOKER: TierMatrix = [
    // age 40
    [
        [0, 0, 0, 0, 0], // 120
        [0, 0, 0, 0, 1], // 140
        [0, 0, 0, 1, 1], // 160
        [0, 1, 1, 1, 2], // 180
    ],
    // age 50
    [
        [0, 0, 0, 1, 1], // 120
        [0, 0, 1, 1, 1], // 140
        [0, 1, 1, 2, 2], // 160
        [1, 1, 2, 2, 2], // 180
    ],
    // age 60
    [
        [0, 0, 1, 1, 2], // 120
        [1, 1, 1, 2, 2], // 140
        [1, 1, 2, 2, 3], // 160
        [2, 2, 2, 3, 3], // 180
    ],
    // age 70
    [
        [1, 1, 2, 2, 2], // 120
        [1, 2, 2, 2, 3], // 140
        [2, 2, 3, 3, 3], // 160
        [2, 3, 3, 3, 4], // 180
    ],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_index_is_a_bijection() {
        let mut seen = [false; 8];
        for key in RiskMatrixKey::all() {
            assert!(!seen[key.index()], "duplicate index for {:?}", key);
            seen[key.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn all_lists_keys_in_matrix_order() {
        for (i, key) in RiskMatrixKey::all().iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn diabetic_male_smoker_age_50_row_160() {
        let key = RiskMatrixKey::new(true, Gender::Male, true);
        assert_eq!(key.matrix()[1][2], [2, 3, 3, 4, 4]);
    }

    #[test]
    fn every_cell_is_a_valid_tier() {
        for matrix in RISK_MATRICES.iter() {
            for age in matrix {
                for row in age {
                    assert!(row.iter().all(|t| *t <= 4));
                }
            }
        }
    }

    #[test]
    fn tiers_are_monotonic_along_every_axis() {
        for (m, matrix) in RISK_MATRICES.iter().enumerate() {
            for a in 0..4 {
                for b in 0..4 {
                    for c in 0..5 {
                        let tier = matrix[a][b][c];
                        if a < 3 {
                            assert!(matrix[a + 1][b][c] >= tier, "age axis, matrix {m}");
                        }
                        if b < 3 {
                            assert!(matrix[a][b + 1][c] >= tier, "bp axis, matrix {m}");
                        }
                        if c < 4 {
                            assert!(matrix[a][b][c + 1] >= tier, "chol axis, matrix {m}");
                        }
                    }
                }
            }
        }
    }
}
