use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::LabStatus;

/// One numeric laboratory observation captured during an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabObservation {
    pub test_key: String,
    pub numeric_value: f64,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl LabObservation {
    pub fn new(test_key: impl Into<String>, numeric_value: f64) -> Self {
        Self {
            test_key: test_key.into(),
            numeric_value,
            timestamp: None,
        }
    }
}

/// Classified observation, as shown on the patient's lab sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResultEntry {
    pub test_key: String,
    /// Falls back to the raw key for tests missing from the reference table.
    pub display_name: String,
    pub value: f64,
    pub unit: String,
    pub normal_range_text: String,
    pub status: LabStatus,
}
