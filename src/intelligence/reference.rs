use serde::Serialize;

/// Reference range for one laboratory test. Boundaries are asymmetric per
/// test: any of `low`, `high` and `critical` may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTestDefinition {
    pub test_key: &'static str,
    pub display_name: &'static str,
    pub unit: &'static str,
    pub normal_range_text: &'static str,
    /// Values strictly below are LOW.
    pub low: Option<f64>,
    /// Values strictly above are HIGH.
    pub high: Option<f64>,
    /// Values at or above are CRITICAL.
    pub critical: Option<f64>,
}

/// Lab threshold table shared by every intake screen.
pub static LAB_TEST_DEFINITIONS: &[LabTestDefinition] = &[
    LabTestDefinition {
        test_key: "gulaDarahSewaktu",
        display_name: "Gula Darah Sewaktu",
        unit: "mg/dL",
        normal_range_text: "< 200 mg/dL",
        low: None,
        high: Some(200.0),
        critical: Some(300.0),
    },
    LabTestDefinition {
        test_key: "gulaDarahPuasa",
        display_name: "Gula Darah Puasa",
        unit: "mg/dL",
        normal_range_text: "< 126 mg/dL",
        low: None,
        high: Some(126.0),
        critical: Some(250.0),
    },
    LabTestDefinition {
        test_key: "gulaDarah2JamPP",
        display_name: "Gula Darah 2 Jam PP",
        unit: "mg/dL",
        normal_range_text: "< 200 mg/dL",
        low: None,
        high: Some(200.0),
        critical: Some(300.0),
    },
    LabTestDefinition {
        test_key: "hba1c",
        display_name: "HbA1c",
        unit: "%",
        normal_range_text: "< 6.5 %",
        low: None,
        high: Some(6.5),
        critical: Some(10.0),
    },
    LabTestDefinition {
        test_key: "kolesterolTotal",
        display_name: "Kolesterol Total",
        unit: "mg/dL",
        normal_range_text: "< 200 mg/dL",
        low: None,
        high: Some(200.0),
        critical: Some(300.0),
    },
    LabTestDefinition {
        test_key: "ldl",
        display_name: "Kolesterol LDL",
        unit: "mg/dL",
        normal_range_text: "< 130 mg/dL",
        low: None,
        high: Some(130.0),
        critical: Some(190.0),
    },
    LabTestDefinition {
        test_key: "hdl",
        display_name: "Kolesterol HDL",
        unit: "mg/dL",
        normal_range_text: "> 40 mg/dL",
        low: Some(40.0),
        high: None,
        critical: None,
    },
    LabTestDefinition {
        test_key: "trigliserida",
        display_name: "Trigliserida",
        unit: "mg/dL",
        normal_range_text: "< 150 mg/dL",
        low: None,
        high: Some(150.0),
        critical: Some(500.0),
    },
    LabTestDefinition {
        test_key: "ureum",
        display_name: "Ureum",
        unit: "mg/dL",
        normal_range_text: "10 - 50 mg/dL",
        low: Some(10.0),
        high: Some(50.0),
        critical: None,
    },
    LabTestDefinition {
        test_key: "kreatinin",
        display_name: "Kreatinin",
        unit: "mg/dL",
        normal_range_text: "0.6 - 1.3 mg/dL",
        low: Some(0.6),
        high: Some(1.3),
        critical: Some(4.0),
    },
    LabTestDefinition {
        test_key: "asamUrat",
        display_name: "Asam Urat",
        unit: "mg/dL",
        normal_range_text: "3.4 - 7.0 mg/dL",
        low: Some(3.4),
        high: Some(7.0),
        critical: None,
    },
    LabTestDefinition {
        test_key: "albumin",
        display_name: "Albumin",
        unit: "g/dL",
        normal_range_text: "3.5 - 5.0 g/dL",
        low: Some(3.5),
        high: Some(5.0),
        critical: None,
    },
    LabTestDefinition {
        test_key: "mikroalbuminuria",
        display_name: "Mikroalbuminuria",
        unit: "mg/24 jam",
        normal_range_text: "< 30 mg/24 jam",
        low: None,
        high: Some(30.0),
        critical: Some(300.0),
    },
    LabTestDefinition {
        test_key: "kalium",
        display_name: "Kalium",
        unit: "mmol/L",
        normal_range_text: "3.5 - 5.0 mmol/L",
        low: Some(3.5),
        high: Some(5.0),
        critical: Some(6.5),
    },
    LabTestDefinition {
        test_key: "natrium",
        display_name: "Natrium",
        unit: "mmol/L",
        normal_range_text: "135 - 145 mmol/L",
        low: Some(135.0),
        high: Some(145.0),
        critical: Some(160.0),
    },
    LabTestDefinition {
        test_key: "hemoglobin",
        display_name: "Hemoglobin",
        unit: "g/dL",
        normal_range_text: "12 - 17.5 g/dL",
        low: Some(12.0),
        high: Some(17.5),
        critical: None,
    },
    LabTestDefinition {
        test_key: "sgot",
        display_name: "SGOT",
        unit: "U/L",
        normal_range_text: "< 40 U/L",
        low: None,
        high: Some(40.0),
        critical: None,
    },
    LabTestDefinition {
        test_key: "sgpt",
        display_name: "SGPT",
        unit: "U/L",
        normal_range_text: "< 41 U/L",
        low: None,
        high: Some(41.0),
        critical: None,
    },
];

/// Look up a test definition by its key. Keys are case-sensitive.
pub fn lookup(test_key: &str) -> Option<&'static LabTestDefinition> {
    LAB_TEST_DEFINITIONS.iter().find(|d| d.test_key == test_key)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<_> = LAB_TEST_DEFINITIONS.iter().map(|d| d.test_key).collect();
        assert_eq!(keys.len(), LAB_TEST_DEFINITIONS.len());
    }

    #[test]
    fn thresholds_are_ordered() {
        for def in LAB_TEST_DEFINITIONS {
            if let (Some(low), Some(high)) = (def.low, def.high) {
                assert!(low < high, "{}: low >= high", def.test_key);
            }
            if let (Some(high), Some(critical)) = (def.high, def.critical) {
                assert!(high < critical, "{}: high >= critical", def.test_key);
            }
            assert!(
                def.low.is_some() || def.high.is_some(),
                "{}: no boundary at all",
                def.test_key
            );
        }
    }

    #[test]
    fn glucose_defines_high_and_critical_only() {
        let def = lookup("gulaDarahSewaktu").unwrap();
        assert!(def.low.is_none());
        assert_eq!(def.high, Some(200.0));
        assert_eq!(def.critical, Some(300.0));
    }

    #[test]
    fn hdl_defines_low_only() {
        let def = lookup("hdl").unwrap();
        assert_eq!(def.low, Some(40.0));
        assert!(def.high.is_none());
        assert!(def.critical.is_none());
    }

    #[test]
    fn albumin_defines_low_and_high_only() {
        let def = lookup("albumin").unwrap();
        assert!(def.low.is_some() && def.high.is_some());
        assert!(def.critical.is_none());
    }

    #[test]
    fn lookup_unknown_key() {
        assert!(lookup("trombosit").is_none());
        assert!(lookup("HDL").is_none());
    }
}
