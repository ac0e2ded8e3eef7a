use serde::{Deserialize, Serialize};

use super::enums::Gender;
use super::lab::LabObservation;

/// Inputs to the cardiovascular risk classifier. Recomputed per evaluation,
/// never stored on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRiskProfile {
    pub age_years: u32,
    pub gender: Gender,
    pub is_smoker: bool,
    pub has_diabetes: bool,
    #[serde(rename = "systolicBP")]
    pub systolic_bp: Option<f64>,
    pub total_cholesterol_mg_dl: Option<f64>,
}

/// Nursing narrative captured alongside the measurements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeEvents {
    pub complaint_text: Option<String>,
    pub complication_text: Option<String>,
    pub diet_issue_text: Option<String>,
    pub notify_doctor_flag: Option<bool>,
}

impl NarrativeEvents {
    pub fn complaint(&self) -> Option<&str> {
        non_blank(&self.complaint_text)
    }

    pub fn complication(&self) -> Option<&str> {
        non_blank(&self.complication_text)
    }

    pub fn diet_issue(&self) -> Option<&str> {
        non_blank(&self.diet_issue_text)
    }

    pub fn notify_doctor(&self) -> bool {
        self.notify_doctor_flag.unwrap_or(false)
    }
}

/// Whitespace-only narrative counts as empty.
fn non_blank(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

/// Full payload of one clinical examination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamInput {
    pub patient_id: String,
    pub age_years: u32,
    pub gender: Gender,
    pub is_smoker: bool,
    pub has_diabetes: bool,
    #[serde(rename = "systolicBP", default)]
    pub systolic_bp: Option<f64>,
    #[serde(default)]
    pub total_cholesterol_mg_dl: Option<f64>,
    #[serde(default)]
    pub lab_observations: Vec<LabObservation>,
    #[serde(flatten)]
    pub narrative: NarrativeEvents,
}

impl ExamInput {
    pub fn risk_profile(&self) -> PatientRiskProfile {
        PatientRiskProfile {
            age_years: self.age_years,
            gender: self.gender,
            is_smoker: self.is_smoker,
            has_diabetes: self.has_diabetes,
            systolic_bp: self.systolic_bp,
            total_cholesterol_mg_dl: self.total_cholesterol_mg_dl,
        }
    }
}
