use std::time::Instant;

use crate::models::enums::OriginRole;
use crate::models::ExamInput;

use super::lab::{classify_observation, is_known_test};
use super::risk;
use super::synthesizer::{synthesize, SynthesisInput};
use super::types::{CdsError, DecisionSupport, EncounterEvaluation};

/// Default implementation of the decision-support core.
/// Shared by every intake screen; the originating role only travels on the
/// drafts, it never changes thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDecisionEngine;

impl DefaultDecisionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Reject input that can only come from a programming defect upstream.
    /// Clinically odd but well-formed values are never rejected here.
    fn validate(input: &ExamInput) -> Result<(), CdsError> {
        if input.patient_id.trim().is_empty() {
            return Err(CdsError::InvalidInput("patient id is empty".into()));
        }
        if input.systolic_bp.is_some_and(|v| !v.is_finite()) {
            return Err(CdsError::InvalidInput("systolic BP is not a finite number".into()));
        }
        if input.total_cholesterol_mg_dl.is_some_and(|v| !v.is_finite()) {
            return Err(CdsError::InvalidInput(
                "total cholesterol is not a finite number".into(),
            ));
        }
        for obs in &input.lab_observations {
            if obs.test_key.trim().is_empty() {
                return Err(CdsError::InvalidInput("lab observation without test key".into()));
            }
            if !obs.numeric_value.is_finite() {
                return Err(CdsError::InvalidInput(format!(
                    "lab value for {} is not a finite number",
                    obs.test_key
                )));
            }
        }
        Ok(())
    }
}

impl ExamInput {
    /// Parse the JSON intake payload. Malformed payloads are structural
    /// defects and surface as `InvalidInput`.
    pub fn from_json(json: &str) -> Result<Self, CdsError> {
        serde_json::from_str(json).map_err(|e| CdsError::InvalidInput(e.to_string()))
    }
}

impl DecisionSupport for DefaultDecisionEngine {
    fn evaluate(
        &self,
        input: &ExamInput,
        origin: OriginRole,
    ) -> Result<EncounterEvaluation, CdsError> {
        let start = Instant::now();
        Self::validate(input)?;

        let assessment = risk::assess(&input.risk_profile());
        if let Some(a) = assessment.as_ref().filter(|a| a.clamped) {
            tracing::warn!(
                patient_id = %input.patient_id,
                bp_row = a.bin.bp_row,
                chol_col = a.bin.chol_col,
                "Risk factors outside chart bounds, clamped to nearest edge"
            );
        }

        let lab_results: Vec<_> = input
            .lab_observations
            .iter()
            .map(classify_observation)
            .collect();

        let unknown_tests: Vec<String> = input
            .lab_observations
            .iter()
            .filter(|o| !is_known_test(&o.test_key))
            .map(|o| o.test_key.clone())
            .collect();
        for key in &unknown_tests {
            tracing::warn!(
                patient_id = %input.patient_id,
                test_key = %key,
                "Unknown lab test key, classified as normal"
            );
        }

        let risk_result = assessment.as_ref().map(|a| a.result.clone());
        let drafts = synthesize(&SynthesisInput {
            patient_id: &input.patient_id,
            origin,
            risk: risk_result.as_ref(),
            lab_results: &lab_results,
            narrative: &input.narrative,
        });

        tracing::info!(
            patient_id = %input.patient_id,
            origin = origin.as_str(),
            risk = %risk::render_risk(risk_result.as_ref()),
            labs = lab_results.len(),
            drafts = drafts.len(),
            processing_us = start.elapsed().as_micros() as u64,
            "Encounter evaluated"
        );

        Ok(EncounterEvaluation {
            patient_id: input.patient_id.clone(),
            origin,
            risk: risk_result,
            risk_bin: assessment.map(|a| a.bin),
            lab_results,
            drafts,
            unknown_tests,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{
        AlertCategory, AlertPriority, AlertType, Gender, LabStatus, TargetRole,
    };
    use crate::models::{LabObservation, NarrativeEvents};

    fn reference_exam() -> ExamInput {
        ExamInput {
            patient_id: "RM-0042".into(),
            age_years: 52,
            gender: Gender::Male,
            is_smoker: true,
            has_diabetes: true,
            systolic_bp: Some(165.0),
            total_cholesterol_mg_dl: Some(220.0),
            lab_observations: vec![],
            narrative: NarrativeEvents::default(),
        }
    }

    #[test]
    fn reference_patient_yields_one_risk_warning() {
        let engine = DefaultDecisionEngine::new();
        let eval = engine.evaluate(&reference_exam(), OriginRole::PoliNurse).unwrap();

        let risk = eval.risk.as_ref().unwrap();
        assert_eq!(risk.level_name, "Tinggi");
        assert_eq!(risk.percentage_estimate, 35);
        let bin = eval.risk_bin.unwrap();
        assert_eq!((bin.age_group, bin.bp_row, bin.chol_col), (50, 160, 6));

        assert_eq!(eval.drafts.len(), 1);
        let d = &eval.drafts[0];
        assert_eq!(d.alert_type, AlertType::Warning);
        assert_eq!(d.priority, AlertPriority::High);
        assert_eq!(d.target_role, TargetRole::Doctor);
        assert_eq!(d.category, AlertCategory::CardiovascularRisk);
        assert_eq!(d.origin_role, OriginRole::PoliNurse);
    }

    #[test]
    fn young_patient_has_no_risk_and_no_risk_alert() {
        let engine = DefaultDecisionEngine::new();
        let mut exam = reference_exam();
        exam.age_years = 35;
        let eval = engine.evaluate(&exam, OriginRole::WardNurse).unwrap();
        assert!(eval.risk.is_none());
        assert!(eval.risk_bin.is_none());
        assert!(eval.drafts.is_empty());
    }

    #[test]
    fn lab_entries_keep_input_order_and_report_unknown_keys() {
        let engine = DefaultDecisionEngine::new();
        let mut exam = reference_exam();
        exam.age_years = 30;
        exam.lab_observations = vec![
            LabObservation::new("gulaDarahSewaktu", 350.0),
            LabObservation::new("trombosit", 90.0),
            LabObservation::new("hdl", 60.0),
        ];
        let eval = engine.evaluate(&exam, OriginRole::LabTechnician).unwrap();

        let statuses: Vec<_> = eval.lab_results.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![LabStatus::Critical, LabStatus::Normal, LabStatus::Normal]
        );
        assert_eq!(eval.unknown_tests, vec!["trombosit".to_string()]);
        assert_eq!(eval.drafts.len(), 1);
        assert_eq!(eval.drafts[0].alert_type, AlertType::Critical);
    }

    #[test]
    fn same_rules_for_every_origin_role() {
        let engine = DefaultDecisionEngine::new();
        let mut exam = reference_exam();
        exam.lab_observations = vec![LabObservation::new("hdl", 35.0)];
        exam.narrative.diet_issue_text = Some("porsi nasi berlebih".into());

        let roles = [
            OriginRole::WardNurse,
            OriginRole::PoliNurse,
            OriginRole::LabTechnician,
            OriginRole::Doctor,
        ];
        let baseline = engine.evaluate(&exam, roles[0]).unwrap();
        for role in &roles[1..] {
            let eval = engine.evaluate(&exam, *role).unwrap();
            assert_eq!(eval.lab_results, baseline.lab_results);
            assert_eq!(eval.risk, baseline.risk);
            assert_eq!(eval.drafts.len(), baseline.drafts.len());
            assert!(eval.drafts.iter().all(|d| d.origin_role == *role));
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let engine = DefaultDecisionEngine::new();
        let mut exam = reference_exam();
        exam.lab_observations = vec![LabObservation::new("kalium", 6.8)];
        exam.narrative.complication_text = Some("retinopati".into());
        exam.narrative.notify_doctor_flag = Some(true);

        let a = engine.evaluate(&exam, OriginRole::WardNurse).unwrap();
        let b = engine.evaluate(&exam, OriginRole::WardNurse).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_finite_values_are_structural_errors() {
        let engine = DefaultDecisionEngine::new();

        let mut exam = reference_exam();
        exam.systolic_bp = Some(f64::NAN);
        assert!(matches!(
            engine.evaluate(&exam, OriginRole::Doctor),
            Err(CdsError::InvalidInput(_))
        ));

        let mut exam = reference_exam();
        exam.lab_observations = vec![LabObservation::new("hdl", f64::INFINITY)];
        assert!(matches!(
            engine.evaluate(&exam, OriginRole::Doctor),
            Err(CdsError::InvalidInput(_))
        ));

        let mut exam = reference_exam();
        exam.patient_id = "  ".into();
        assert!(matches!(
            engine.evaluate(&exam, OriginRole::Doctor),
            Err(CdsError::InvalidInput(_))
        ));
    }

    #[test]
    fn malformed_json_is_invalid_input() {
        assert!(matches!(
            ExamInput::from_json("{\"patientId\": 12}"),
            Err(CdsError::InvalidInput(_))
        ));
    }
}
