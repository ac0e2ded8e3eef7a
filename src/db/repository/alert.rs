use std::str::FromStr;
use std::sync::Mutex;

use chrono::{NaiveDateTime, Timelike};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::intelligence::types::{AlertStore, CdsError};
use crate::models::enums::*;
use crate::models::{Alert, AlertDraft};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Insert a persisted alert.
pub fn insert_alert(conn: &Connection, alert: &Alert) -> Result<(), DatabaseError> {
    let d = &alert.draft;
    conn.execute(
        "INSERT INTO alerts
         (id, alert_type, category, priority, message, patient_id,
          target_role, origin_role, created_at, is_read)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            alert.id.to_string(),
            d.alert_type.as_str(),
            d.category.as_str(),
            d.priority.as_str(),
            d.message,
            d.patient_id,
            d.target_role.as_str(),
            d.origin_role.as_str(),
            alert.created_at.format(TIMESTAMP_FORMAT).to_string(),
            alert.is_read as i32,
        ],
    )?;
    Ok(())
}

/// Alerts routed to `role`, newest first. Ties on the second-resolution
/// timestamp fall back to insertion order.
pub fn get_alerts_by_role(
    conn: &Connection,
    role: TargetRole,
    unread_only: bool,
) -> Result<Vec<Alert>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, alert_type, category, priority, message, patient_id,
                target_role, origin_role, created_at, is_read
         FROM alerts
         WHERE target_role = ?1 AND (?2 = 0 OR is_read = 0)
         ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt.query_map(params![role.as_str(), unread_only as i32], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
            row.get::<_, String>(7)?,
            row.get::<_, String>(8)?,
            row.get::<_, i32>(9)?,
        ))
    })?;

    let mut alerts = Vec::new();
    for row in rows {
        let (
            id, alert_type, category, priority, message, patient_id,
            target_role, origin_role, created_at, is_read,
        ) = row?;

        alerts.push(Alert {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            draft: AlertDraft {
                alert_type: AlertType::from_str(&alert_type)?,
                category: AlertCategory::from_str(&category)?,
                priority: AlertPriority::from_str(&priority)?,
                message,
                patient_id,
                target_role: TargetRole::from_str(&target_role)?,
                origin_role: OriginRole::from_str(&origin_role)?,
            },
            created_at: NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_FORMAT)
                .unwrap_or_default(),
            is_read: is_read != 0,
        });
    }
    Ok(alerts)
}

/// Mark one alert read. Returns whether the alert moved from unread to read;
/// an already-read alert yields `Ok(false)`.
pub fn mark_alert_read(conn: &Connection, alert_id: &Uuid) -> Result<bool, DatabaseError> {
    let id = alert_id.to_string();
    let changed = conn.execute(
        "UPDATE alerts SET is_read = 1 WHERE id = ?1 AND is_read = 0",
        params![id],
    )?;
    if changed > 0 {
        return Ok(true);
    }

    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM alerts WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(DatabaseError::NotFound {
            entity_type: "Alert".into(),
            id,
        });
    }
    Ok(false)
}

/// Mark several alerts read in one transaction. Unknown ids are skipped.
pub fn mark_alerts_read(conn: &Connection, alert_ids: &[Uuid]) -> Result<usize, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let mut transitioned = 0;
    {
        let mut stmt = tx.prepare("UPDATE alerts SET is_read = 1 WHERE id = ?1 AND is_read = 0")?;
        for id in alert_ids {
            transitioned += stmt.execute(params![id.to_string()])?;
        }
    }
    tx.commit()?;
    Ok(transitioned)
}

pub fn delete_alert(conn: &Connection, alert_id: &Uuid) -> Result<(), DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM alerts WHERE id = ?1",
        params![alert_id.to_string()],
    )?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Alert".into(),
            id: alert_id.to_string(),
        });
    }
    Ok(())
}

pub fn count_unread_alerts(conn: &Connection, role: TargetRole) -> Result<usize, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM alerts WHERE target_role = ?1 AND is_read = 0",
        params![role.as_str()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

/// SQLite-backed alert store. Owns its connection so it can be shared
/// across threads behind the `AlertStore` trait.
pub struct SqliteAlertStore {
    conn: Mutex<Connection>,
}

impl SqliteAlertStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, DatabaseError>,
    ) -> Result<T, CdsError> {
        let conn = self.conn.lock().map_err(|_| CdsError::LockFailed)?;
        Ok(f(&conn)?)
    }
}

fn not_found_as_alert(err: DatabaseError, alert_id: &Uuid) -> CdsError {
    match err {
        DatabaseError::NotFound { .. } => CdsError::AlertNotFound(*alert_id),
        other => CdsError::Database(other),
    }
}

impl AlertStore for SqliteAlertStore {
    fn persist(&self, drafts: Vec<AlertDraft>) -> Result<Vec<Alert>, CdsError> {
        let now = chrono::Local::now().naive_local();
        // Stored timestamps have second resolution; keep returned alerts equal
        // to what a later fetch yields.
        let now = now.with_nanosecond(0).unwrap_or(now);
        let created: Vec<Alert> = drafts
            .into_iter()
            .map(|d| Alert::from_draft(d, now))
            .collect();

        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            for alert in &created {
                insert_alert(&tx, alert)?;
            }
            tx.commit()?;
            Ok(())
        })?;

        tracing::debug!(stored = created.len(), "Alerts persisted to database");
        Ok(created)
    }

    fn fetch_by_role(&self, role: TargetRole, unread_only: bool) -> Result<Vec<Alert>, CdsError> {
        self.with_conn(|conn| get_alerts_by_role(conn, role, unread_only))
    }

    fn mark_read(&self, alert_id: &Uuid) -> Result<(), CdsError> {
        let conn = self.conn.lock().map_err(|_| CdsError::LockFailed)?;
        mark_alert_read(&conn, alert_id)
            .map(|_| ())
            .map_err(|e| not_found_as_alert(e, alert_id))
    }

    fn mark_many_read(&self, alert_ids: &[Uuid]) -> Result<usize, CdsError> {
        self.with_conn(|conn| mark_alerts_read(conn, alert_ids))
    }

    fn delete(&self, alert_id: &Uuid) -> Result<(), CdsError> {
        let conn = self.conn.lock().map_err(|_| CdsError::LockFailed)?;
        delete_alert(&conn, alert_id).map_err(|e| not_found_as_alert(e, alert_id))
    }

    fn unread_count(&self, role: TargetRole) -> Result<usize, CdsError> {
        self.with_conn(|conn| count_unread_alerts(conn, role))
    }
}
