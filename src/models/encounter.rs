use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{LabStatus, OriginRole};

/// A recorded encounter as read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSummary {
    pub id: Uuid,
    pub patient_id: String,
    pub origin_role: OriginRole,
    /// `None` when no tier applied (under 40 or missing BP/cholesterol).
    pub risk_level_name: Option<String>,
    pub risk_range_label: Option<String>,
    pub risk_percentage: Option<u8>,
    pub recorded_at: NaiveDateTime,
}

/// Stored lab observation together with the status it was classified as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLabObservation {
    pub test_key: String,
    pub numeric_value: f64,
    pub status: LabStatus,
    pub observed_at: Option<NaiveDateTime>,
}
