//! Encounter save workflow.
//!
//! Primary facts (measurements, narrative, labs, derived risk) are committed
//! before any alert is written. If that commit fails, the encounter produces
//! no alerts at all.

use chrono::Timelike;
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::db::repository::insert_encounter;
use crate::intelligence::types::{AlertStore, CdsError, DecisionSupport, EncounterEvaluation};
use crate::models::enums::OriginRole;
use crate::models::{Alert, ExamInput};

/// Result of a fully recorded encounter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterOutcome {
    pub encounter_id: Uuid,
    pub evaluation: EncounterEvaluation,
    pub alerts: Vec<Alert>,
}

/// Evaluate and record one encounter captured on `origin`'s screen.
pub fn record_encounter(
    conn: &Connection,
    engine: &dyn DecisionSupport,
    alerts: &dyn AlertStore,
    input: &ExamInput,
    origin: OriginRole,
) -> Result<EncounterOutcome, CdsError> {
    let evaluation = engine.evaluate(input, origin)?;

    let encounter_id = Uuid::new_v4();
    let now = chrono::Local::now().naive_local();
    let recorded_at = now.with_nanosecond(0).unwrap_or(now);

    if let Err(e) = insert_encounter(conn, &encounter_id, input, &evaluation, recorded_at) {
        tracing::error!(
            patient_id = %input.patient_id,
            error = %e,
            "Encounter save failed, alerts withheld"
        );
        return Err(e.into());
    }

    let persisted = alerts.persist(evaluation.drafts.clone())?;

    tracing::info!(
        patient_id = %input.patient_id,
        encounter_id = %encounter_id,
        origin = origin.as_str(),
        alerts = persisted.len(),
        "Encounter recorded"
    );

    Ok(EncounterOutcome {
        encounter_id,
        evaluation,
        alerts: persisted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{count_encounters, get_lab_observations, SqliteAlertStore};
    use crate::db::sqlite::{open_database, open_memory_database};
    use crate::intelligence::{DefaultDecisionEngine, MemoryAlertStore};
    use crate::models::enums::{AlertCategory, Gender, LabStatus, TargetRole};
    use crate::models::{LabObservation, NarrativeEvents};

    fn exam() -> ExamInput {
        ExamInput {
            patient_id: "RM-0042".into(),
            age_years: 52,
            gender: Gender::Male,
            is_smoker: true,
            has_diabetes: true,
            systolic_bp: Some(165.0),
            total_cholesterol_mg_dl: Some(220.0),
            lab_observations: vec![LabObservation::new("gulaDarahSewaktu", 350.0)],
            narrative: NarrativeEvents {
                diet_issue_text: Some("makan manis berlebih".into()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn records_facts_then_alerts() {
        let conn = open_memory_database().unwrap();
        let store = MemoryAlertStore::new();
        let engine = DefaultDecisionEngine::new();

        let outcome =
            record_encounter(&conn, &engine, &store, &exam(), OriginRole::WardNurse).unwrap();

        assert_eq!(count_encounters(&conn).unwrap(), 1);
        let labs = get_lab_observations(&conn, &outcome.encounter_id).unwrap();
        assert_eq!(labs[0].status, LabStatus::Critical);

        // lab, risk and diet drafts
        assert_eq!(outcome.alerts.len(), 3);
        assert_eq!(store.len().unwrap(), 3);
        let nutritionist = store.fetch_by_role(TargetRole::Nutritionist, true).unwrap();
        assert_eq!(nutritionist.len(), 1);
        assert_eq!(nutritionist[0].draft.category, AlertCategory::Diet);
    }

    #[test]
    fn failed_primary_save_emits_no_alerts() {
        let conn = open_memory_database().unwrap();
        conn.execute_batch("DROP TABLE lab_observations; DROP TABLE encounters;")
            .unwrap();
        let store = MemoryAlertStore::new();

        let result = record_encounter(
            &conn,
            &DefaultDecisionEngine::new(),
            &store,
            &exam(),
            OriginRole::PoliNurse,
        );
        assert!(matches!(result, Err(CdsError::Database(_))));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn invalid_input_touches_nothing() {
        let conn = open_memory_database().unwrap();
        let store = MemoryAlertStore::new();
        let mut input = exam();
        input.total_cholesterol_mg_dl = Some(f64::NAN);

        let result = record_encounter(
            &conn,
            &DefaultDecisionEngine::new(),
            &store,
            &input,
            OriginRole::PoliNurse,
        );
        assert!(matches!(result, Err(CdsError::InvalidInput(_))));
        assert_eq!(count_encounters(&conn).unwrap(), 0);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn on_disk_database_with_sqlite_alert_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diacare.db");
        let conn = open_database(&path).unwrap();
        let store = SqliteAlertStore::new(open_database(&path).unwrap());

        let outcome = record_encounter(
            &conn,
            &DefaultDecisionEngine::new(),
            &store,
            &exam(),
            OriginRole::LabTechnician,
        )
        .unwrap();

        let doctor = store.fetch_by_role(TargetRole::Doctor, true).unwrap();
        assert_eq!(doctor.len(), 2);
        assert!(doctor
            .iter()
            .all(|a| a.draft.origin_role == OriginRole::LabTechnician));
        assert!(outcome.alerts.iter().all(|a| !a.is_read));
    }
}
