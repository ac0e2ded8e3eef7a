use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::intelligence::types::EncounterEvaluation;
use crate::models::enums::*;
use crate::models::{EncounterSummary, ExamInput, StoredLabObservation};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Save the primary facts of one encounter: measurements, narrative, derived
/// risk and classified labs. All rows land in one transaction or none do.
pub fn insert_encounter(
    conn: &Connection,
    encounter_id: &Uuid,
    input: &ExamInput,
    evaluation: &EncounterEvaluation,
    recorded_at: NaiveDateTime,
) -> Result<(), DatabaseError> {
    if input.lab_observations.len() != evaluation.lab_results.len() {
        return Err(DatabaseError::ConstraintViolation(format!(
            "{} observations but {} classified results",
            input.lab_observations.len(),
            evaluation.lab_results.len()
        )));
    }

    let tx = conn.unchecked_transaction()?;
    let risk = evaluation.risk.as_ref();
    let id = encounter_id.to_string();

    tx.execute(
        "INSERT INTO encounters
         (id, patient_id, origin_role, age_years, gender, is_smoker, has_diabetes,
          systolic_bp, total_cholesterol_mg_dl, complaint_text, complication_text,
          diet_issue_text, notify_doctor, risk_range_label, risk_level_name,
          risk_percentage, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            id,
            input.patient_id,
            evaluation.origin.as_str(),
            input.age_years,
            input.gender.as_str(),
            input.is_smoker as i32,
            input.has_diabetes as i32,
            input.systolic_bp,
            input.total_cholesterol_mg_dl,
            input.narrative.complaint(),
            input.narrative.complication(),
            input.narrative.diet_issue(),
            input.narrative.notify_doctor() as i32,
            risk.map(|r| r.range_label.as_str()),
            risk.map(|r| r.level_name.as_str()),
            risk.map(|r| r.percentage_estimate),
            recorded_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;

    for (obs, entry) in input.lab_observations.iter().zip(&evaluation.lab_results) {
        tx.execute(
            "INSERT INTO lab_observations
             (encounter_id, test_key, numeric_value, status, observed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id,
                obs.test_key,
                obs.numeric_value,
                entry.status.as_str(),
                obs.timestamp.map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
            ],
        )?;
    }

    tx.commit()?;
    Ok(())
}

/// Encounters for one patient, most recent first.
pub fn get_encounters_for_patient(
    conn: &Connection,
    patient_id: &str,
) -> Result<Vec<EncounterSummary>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, origin_role, risk_level_name, risk_range_label,
                risk_percentage, recorded_at
         FROM encounters
         WHERE patient_id = ?1
         ORDER BY recorded_at DESC, rowid DESC",
    )?;

    let rows = stmt.query_map(params![patient_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, Option<String>>(4)?,
            row.get::<_, Option<u8>>(5)?,
            row.get::<_, String>(6)?,
        ))
    })?;

    let mut encounters = Vec::new();
    for row in rows {
        let (id, patient_id, origin_role, level, range, percentage, recorded_at) = row?;
        encounters.push(EncounterSummary {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            patient_id,
            origin_role: OriginRole::from_str(&origin_role)?,
            risk_level_name: level,
            risk_range_label: range,
            risk_percentage: percentage,
            recorded_at: NaiveDateTime::parse_from_str(&recorded_at, TIMESTAMP_FORMAT)
                .unwrap_or_default(),
        });
    }
    Ok(encounters)
}

/// Lab observations of one encounter, in capture order.
pub fn get_lab_observations(
    conn: &Connection,
    encounter_id: &Uuid,
) -> Result<Vec<StoredLabObservation>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT test_key, numeric_value, status, observed_at
         FROM lab_observations
         WHERE encounter_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(params![encounter_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, f64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut observations = Vec::new();
    for row in rows {
        let (test_key, numeric_value, status, observed_at) = row?;
        observations.push(StoredLabObservation {
            test_key,
            numeric_value,
            status: LabStatus::from_str(&status)?,
            observed_at: observed_at
                .and_then(|s| NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).ok()),
        });
    }
    Ok(observations)
}

pub fn count_encounters(conn: &Connection) -> Result<usize, DatabaseError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM encounters", [], |row| row.get(0))?;
    Ok(count as usize)
}
