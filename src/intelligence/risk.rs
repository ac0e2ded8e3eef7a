//! Ten-year cardiovascular risk tier from the chart matrices.

use serde::{Deserialize, Serialize};

use crate::models::PatientRiskProfile;

use super::normalizer::{self, RiskBin};
use super::risk_matrix::RiskMatrixKey;

/// Youngest age the chart covers.
pub const MIN_CHART_AGE: u32 = 40;

/// Shown wherever no tier could be computed. Must never match a tier label.
pub const NOT_APPLICABLE_LABEL: &str = "Tidak dapat dihitung";

/// One row of the fixed tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskTier {
    pub range_label: &'static str,
    pub level_name: &'static str,
    pub percentage_estimate: u8,
}

/// Tier index -> labels. Ordered from lowest to highest risk.
pub const RISK_TIERS: [RiskTier; 5] = [
    RiskTier {
        range_label: "<10%",
        level_name: "Sangat Rendah",
        percentage_estimate: 5,
    },
    RiskTier {
        range_label: "10-20%",
        level_name: "Rendah",
        percentage_estimate: 15,
    },
    RiskTier {
        range_label: "20-30%",
        level_name: "Sedang",
        percentage_estimate: 25,
    },
    RiskTier {
        range_label: "30-40%",
        level_name: "Tinggi",
        percentage_estimate: 35,
    },
    RiskTier {
        range_label: "≥40%",
        level_name: "Sangat Tinggi",
        percentage_estimate: 45,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub tier_index: u8,
    pub range_label: String,
    pub level_name: String,
    pub percentage_estimate: u8,
}

impl RiskResult {
    pub fn from_tier(tier_index: u8) -> Option<Self> {
        let tier = RISK_TIERS.get(tier_index as usize)?;
        Some(Self {
            tier_index,
            range_label: tier.range_label.to_string(),
            level_name: tier.level_name.to_string(),
            percentage_estimate: tier.percentage_estimate,
        })
    }

    pub fn display_label(&self) -> String {
        format!("{} ({})", self.level_name, self.range_label)
    }
}

/// Render an optional result for display. A missing result never renders
/// like the lowest tier.
pub fn render_risk(result: Option<&RiskResult>) -> String {
    match result {
        Some(r) => r.display_label(),
        None => NOT_APPLICABLE_LABEL.to_string(),
    }
}

/// Full trace of one lookup: which matrix, which cell, which tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub key: RiskMatrixKey,
    pub bin: RiskBin,
    pub result: RiskResult,
    /// BP or cholesterol fell off the chart and was pinned to its edge.
    pub clamped: bool,
}

/// Look up the risk tier. `None` when the patient is under 40 or systolic
/// pressure / cholesterol is missing; that is an expected outcome, not an error.
pub fn assess(profile: &PatientRiskProfile) -> Option<RiskAssessment> {
    if profile.age_years < MIN_CHART_AGE {
        return None;
    }
    let systolic = profile.systolic_bp.filter(|v| v.is_finite())?;
    let cholesterol = profile.total_cholesterol_mg_dl.filter(|v| v.is_finite())?;

    let bin = normalizer::bin(profile.age_years, systolic, cholesterol);
    let key = RiskMatrixKey::new(profile.has_diabetes, profile.gender, profile.is_smoker);
    let result = RiskResult::from_tier(key.tier_at(&bin))?;

    Some(RiskAssessment {
        key,
        bin,
        result,
        clamped: normalizer::is_clamped(systolic, cholesterol),
    })
}

pub fn classify(profile: &PatientRiskProfile) -> Option<RiskResult> {
    assess(profile).map(|a| a.result)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::models::enums::Gender;

    fn profile(age: u32, systolic: Option<f64>, chol: Option<f64>) -> PatientRiskProfile {
        PatientRiskProfile {
            age_years: age,
            gender: Gender::Male,
            is_smoker: true,
            has_diabetes: true,
            systolic_bp: systolic,
            total_cholesterol_mg_dl: chol,
        }
    }

    #[test]
    fn reference_patient_is_tinggi() {
        let assessment = assess(&profile(52, Some(165.0), Some(220.0))).unwrap();
        assert_eq!(assessment.bin.age_group, 50);
        assert_eq!(assessment.bin.bp_row, 160);
        assert_eq!(assessment.bin.chol_col, 6);
        assert_eq!(assessment.result.tier_index, 3);
        assert_eq!(assessment.result.range_label, "30-40%");
        assert_eq!(assessment.result.level_name, "Tinggi");
        assert_eq!(assessment.result.percentage_estimate, 35);
        assert!(!assessment.clamped);
    }

    #[test]
    fn missing_bp_or_cholesterol_gives_none() {
        assert!(classify(&profile(60, None, Some(220.0))).is_none());
        assert!(classify(&profile(60, Some(140.0), None)).is_none());
        assert!(classify(&profile(60, Some(f64::NAN), Some(220.0))).is_none());
    }

    #[test]
    fn age_forty_is_on_the_chart() {
        assert!(classify(&profile(40, Some(120.0), Some(150.0))).is_some());
        assert!(classify(&profile(39, Some(120.0), Some(150.0))).is_none());
    }

    #[test]
    fn off_chart_values_are_clamped() {
        let assessment = assess(&profile(75, Some(240.0), Some(400.0))).unwrap();
        assert_eq!(assessment.bin.bp_row, 180);
        assert_eq!(assessment.bin.chol_col, 8);
        assert!(assessment.clamped);
        assert_eq!(assessment.result.tier_index, 4);
    }

    #[test]
    fn tier_table_is_ordered() {
        for pair in RISK_TIERS.windows(2) {
            assert!(pair[0].percentage_estimate < pair[1].percentage_estimate);
        }
        assert!(RiskResult::from_tier(5).is_none());
    }

    #[test]
    fn none_renders_differently_from_lowest_tier() {
        let lowest = RiskResult::from_tier(0).unwrap();
        assert_eq!(render_risk(Some(&lowest)), "Sangat Rendah (<10%)");
        assert_eq!(render_risk(None), NOT_APPLICABLE_LABEL);
        for tier in 0..5 {
            let r = RiskResult::from_tier(tier).unwrap();
            assert_ne!(render_risk(Some(&r)), render_risk(None));
        }
    }

    proptest! {
        #[test]
        fn under_forty_never_classified(
            age in 0u32..40,
            diabetic in any::<bool>(),
            smoker in any::<bool>(),
            female in any::<bool>(),
            systolic in 60.0f64..260.0,
            chol in 80.0f64..450.0,
        ) {
            let p = PatientRiskProfile {
                age_years: age,
                gender: if female { Gender::Female } else { Gender::Male },
                is_smoker: smoker,
                has_diabetes: diabetic,
                systolic_bp: Some(systolic),
                total_cholesterol_mg_dl: Some(chol),
            };
            prop_assert!(classify(&p).is_none());
        }

        #[test]
        fn classification_is_deterministic(
            age in 40u32..100,
            systolic in 60.0f64..260.0,
            chol in 80.0f64..450.0,
        ) {
            let p = profile(age, Some(systolic), Some(chol));
            prop_assert_eq!(assess(&p), assess(&p));
        }

        #[test]
        fn higher_systolic_never_lowers_tier(
            age in 40u32..100,
            systolic in 60.0f64..240.0,
            bump in 0.0f64..60.0,
            chol in 80.0f64..450.0,
        ) {
            let low = classify(&profile(age, Some(systolic), Some(chol))).unwrap();
            let high = classify(&profile(age, Some(systolic + bump), Some(chol))).unwrap();
            prop_assert!(high.tier_index >= low.tier_index);
        }
    }
}
