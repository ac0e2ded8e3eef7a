use crate::models::enums::LabStatus;
use crate::models::{LabObservation, LabResultEntry};

use super::reference::{self, LabTestDefinition};

/// Classify a value against one definition. First match wins:
/// critical, then high, then low.
pub fn classify_against(def: &LabTestDefinition, value: f64) -> LabStatus {
    if def.critical.is_some_and(|c| value >= c) {
        return LabStatus::Critical;
    }
    if def.high.is_some_and(|h| value > h) {
        return LabStatus::High;
    }
    if def.low.is_some_and(|l| value < l) {
        return LabStatus::Low;
    }
    LabStatus::Normal
}

/// Classify by test key. Keys missing from the reference table are NORMAL.
pub fn classify(test_key: &str, value: f64) -> LabStatus {
    match reference::lookup(test_key) {
        Some(def) => classify_against(def, value),
        None => LabStatus::Normal,
    }
}

/// Build the lab sheet entry for one observation.
pub fn classify_observation(obs: &LabObservation) -> LabResultEntry {
    match reference::lookup(&obs.test_key) {
        Some(def) => LabResultEntry {
            test_key: obs.test_key.clone(),
            display_name: def.display_name.to_string(),
            value: obs.numeric_value,
            unit: def.unit.to_string(),
            normal_range_text: def.normal_range_text.to_string(),
            status: classify_against(def, obs.numeric_value),
        },
        None => LabResultEntry {
            test_key: obs.test_key.clone(),
            display_name: obs.test_key.clone(),
            value: obs.numeric_value,
            unit: String::new(),
            normal_range_text: "-".to_string(),
            status: LabStatus::Normal,
        },
    }
}

pub fn is_known_test(test_key: &str) -> bool {
    reference::lookup(test_key).is_some()
}
