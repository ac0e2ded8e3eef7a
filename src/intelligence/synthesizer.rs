//! Alert synthesis: turns classifier outputs and nursing narrative into
//! routed alert drafts.
//!
//! Each rule is evaluated independently; one encounter may yield several
//! drafts. Nothing here holds state, so identical input always yields
//! identical drafts. Deduplication across calls belongs to the alert store.

use crate::models::enums::{
    AlertCategory, AlertPriority, AlertType, LabStatus, OriginRole, TargetRole,
};
use crate::models::{AlertDraft, LabResultEntry, NarrativeEvents};

use super::messages::MessageTemplates;
use super::risk::RiskResult;

/// Risk estimates at or above this percentage are critical.
pub const RISK_CRITICAL_PERCENT: u8 = 40;
/// Risk estimates at or above this percentage (and below critical) warn.
pub const RISK_WARNING_PERCENT: u8 = 30;

/// Everything known about one encounter after classification.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    pub patient_id: &'a str,
    pub origin: OriginRole,
    pub risk: Option<&'a RiskResult>,
    pub lab_results: &'a [LabResultEntry],
    pub narrative: &'a NarrativeEvents,
}

impl SynthesisInput<'_> {
    fn draft(
        &self,
        alert_type: AlertType,
        category: AlertCategory,
        priority: AlertPriority,
        target_role: TargetRole,
        message: String,
    ) -> AlertDraft {
        AlertDraft {
            alert_type,
            category,
            priority,
            message,
            patient_id: self.patient_id.to_string(),
            target_role,
            origin_role: self.origin,
        }
    }

    fn abnormal_labs(&self) -> Vec<&LabResultEntry> {
        self.lab_results
            .iter()
            .filter(|e| e.status.is_abnormal())
            .collect()
    }
}

/// Run every rule and collect the drafts, in a fixed rule order.
pub fn synthesize(input: &SynthesisInput<'_>) -> Vec<AlertDraft> {
    let drafts: Vec<AlertDraft> = [
        lab_alert(input),
        risk_alert(input),
        complication_alert(input),
        diet_alert(input),
        doctor_notification(input),
    ]
    .into_iter()
    .flatten()
    .collect();

    tracing::debug!(
        patient_id = input.patient_id,
        origin = input.origin.as_str(),
        drafts = drafts.len(),
        "Alert synthesis complete"
    );

    drafts
}

/// One aggregated draft for all abnormal labs of the encounter.
pub fn lab_alert(input: &SynthesisInput<'_>) -> Option<AlertDraft> {
    let abnormal = input.abnormal_labs();
    if abnormal.is_empty() {
        return None;
    }

    let any_critical = abnormal.iter().any(|e| e.status == LabStatus::Critical);
    let (alert_type, priority) = if any_critical {
        (AlertType::Critical, AlertPriority::Urgent)
    } else {
        (AlertType::Warning, AlertPriority::High)
    };

    Some(input.draft(
        alert_type,
        AlertCategory::LabResult,
        priority,
        TargetRole::Doctor,
        MessageTemplates::abnormal_labs(&abnormal),
    ))
}

pub fn risk_alert(input: &SynthesisInput<'_>) -> Option<AlertDraft> {
    let risk = input.risk?;
    let (alert_type, priority) = match risk.percentage_estimate {
        p if p >= RISK_CRITICAL_PERCENT => (AlertType::Critical, AlertPriority::Urgent),
        p if p >= RISK_WARNING_PERCENT => (AlertType::Warning, AlertPriority::High),
        _ => return None,
    };

    Some(input.draft(
        alert_type,
        AlertCategory::CardiovascularRisk,
        priority,
        TargetRole::Doctor,
        MessageTemplates::cardiovascular_risk(risk),
    ))
}

/// Any reported complication goes to the doctor, without thresholds.
pub fn complication_alert(input: &SynthesisInput<'_>) -> Option<AlertDraft> {
    let text = input.narrative.complication()?;
    Some(input.draft(
        AlertType::Critical,
        AlertCategory::Complication,
        AlertPriority::Urgent,
        TargetRole::Doctor,
        MessageTemplates::complication(text),
    ))
}

pub fn diet_alert(input: &SynthesisInput<'_>) -> Option<AlertDraft> {
    let text = input.narrative.diet_issue()?;
    Some(input.draft(
        AlertType::Warning,
        AlertCategory::Diet,
        AlertPriority::High,
        TargetRole::Nutritionist,
        MessageTemplates::diet_issue(text),
    ))
}

pub fn doctor_notification(input: &SynthesisInput<'_>) -> Option<AlertDraft> {
    if !input.narrative.notify_doctor() {
        return None;
    }
    let has_abnormal_lab = input.lab_results.iter().any(|e| e.status.is_abnormal());
    let priority = if has_abnormal_lab {
        AlertPriority::High
    } else {
        AlertPriority::Medium
    };

    Some(input.draft(
        AlertType::Info,
        AlertCategory::DoctorNotification,
        priority,
        TargetRole::Doctor,
        MessageTemplates::notify_doctor(input.narrative.complaint(), has_abnormal_lab),
    ))
}
