use crate::models::LabResultEntry;

use super::risk::RiskResult;

/// Message template builder for alert text shown to the care team.
/// Every message names the clinical fact it was derived from.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Aggregated abnormal lab message, one clause per abnormal test.
    pub fn abnormal_labs(abnormal: &[&LabResultEntry]) -> String {
        let items: Vec<String> = abnormal.iter().map(|e| Self::lab_item(e)).collect();
        format!("Hasil lab abnormal: {}.", items.join("; "))
    }

    fn lab_item(entry: &LabResultEntry) -> String {
        let value = format_value(entry.value);
        let status = entry.status.as_str().to_uppercase();
        if entry.unit.is_empty() {
            format!("{} {} ({})", entry.display_name, value, status)
        } else {
            format!("{} {} {} ({})", entry.display_name, value, entry.unit, status)
        }
    }

    pub fn cardiovascular_risk(risk: &RiskResult) -> String {
        format!(
            "Risiko kardiovaskular 10 tahun {} ({}, perkiraan {}%).",
            risk.level_name, risk.range_label, risk.percentage_estimate,
        )
    }

    pub fn complication(text: &str) -> String {
        format!("Komplikasi dilaporkan: {}", text)
    }

    pub fn diet_issue(text: &str) -> String {
        format!("Masalah diet dilaporkan: {}", text)
    }

    /// Doctor notification. The complaint, when present, is quoted so the
    /// doctor sees why the nurse asked for attention.
    pub fn notify_doctor(complaint: Option<&str>, has_abnormal_lab: bool) -> String {
        let mut message = String::from("Perawat meminta dokter meninjau pasien.");
        if let Some(c) = complaint {
            message.push_str(&format!(" Keluhan: {}.", c));
        }
        if has_abnormal_lab {
            message.push_str(" Terdapat hasil lab abnormal pada pemeriksaan ini.");
        }
        message
    }
}

/// Drop a trailing ".0" so whole readings print as "350", not "350.0".
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::LabStatus;

    fn entry(name: &str, value: f64, unit: &str, status: LabStatus) -> LabResultEntry {
        LabResultEntry {
            test_key: name.to_lowercase(),
            display_name: name.into(),
            value,
            unit: unit.into(),
            normal_range_text: "-".into(),
            status,
        }
    }

    #[test]
    fn abnormal_labs_lists_every_test() {
        let a = entry("Gula Darah Sewaktu", 350.0, "mg/dL", LabStatus::Critical);
        let b = entry("Kolesterol HDL", 35.5, "mg/dL", LabStatus::Low);
        let msg = MessageTemplates::abnormal_labs(&[&a, &b]);
        assert_eq!(
            msg,
            "Hasil lab abnormal: Gula Darah Sewaktu 350 mg/dL (CRITICAL); Kolesterol HDL 35.5 mg/dL (LOW)."
        );
    }

    #[test]
    fn risk_message_names_level() {
        let risk = RiskResult::from_tier(3).unwrap();
        let msg = MessageTemplates::cardiovascular_risk(&risk);
        assert!(msg.contains("Tinggi"));
        assert!(msg.contains("30-40%"));
        assert!(msg.contains("35%"));
    }

    #[test]
    fn notify_doctor_quotes_complaint() {
        let msg = MessageTemplates::notify_doctor(Some("pusing"), false);
        assert!(msg.contains("Keluhan: pusing."));
        assert!(!msg.contains("lab abnormal"));

        let msg = MessageTemplates::notify_doctor(None, true);
        assert!(!msg.contains("Keluhan"));
        assert!(msg.contains("lab abnormal"));
    }
}
