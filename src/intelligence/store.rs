use uuid::Uuid;

use crate::models::enums::TargetRole;
use crate::models::{Alert, AlertDraft};

use super::types::{AlertStore, CdsError};

/// In-memory alert store backed by RwLock.
/// Used by tests and by callers that persist alerts elsewhere.
pub struct MemoryAlertStore {
    pub(crate) alerts: std::sync::RwLock<Vec<Alert>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self {
            alerts: std::sync::RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> Result<usize, CdsError> {
        let alerts = self.alerts.read().map_err(|_| CdsError::LockFailed)?;
        Ok(alerts.len())
    }

    pub fn is_empty(&self) -> Result<bool, CdsError> {
        Ok(self.len()? == 0)
    }
}

impl Default for MemoryAlertStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertStore for MemoryAlertStore {
    fn persist(&self, drafts: Vec<AlertDraft>) -> Result<Vec<Alert>, CdsError> {
        let now = chrono::Local::now().naive_local();
        let created: Vec<Alert> = drafts
            .into_iter()
            .map(|d| Alert::from_draft(d, now))
            .collect();

        let mut alerts = self.alerts.write().map_err(|_| CdsError::LockFailed)?;
        alerts.extend(created.iter().cloned());

        tracing::debug!(stored = created.len(), "Alerts persisted in memory");
        Ok(created)
    }

    fn fetch_by_role(&self, role: TargetRole, unread_only: bool) -> Result<Vec<Alert>, CdsError> {
        let alerts = self.alerts.read().map_err(|_| CdsError::LockFailed)?;

        // Insertion order is creation order, so reversing gives newest first.
        Ok(alerts
            .iter()
            .rev()
            .filter(|a| a.draft.target_role == role)
            .filter(|a| !unread_only || !a.is_read)
            .cloned()
            .collect())
    }

    fn mark_read(&self, alert_id: &Uuid) -> Result<(), CdsError> {
        let mut alerts = self.alerts.write().map_err(|_| CdsError::LockFailed)?;

        let alert = alerts
            .iter_mut()
            .find(|a| a.id == *alert_id)
            .ok_or(CdsError::AlertNotFound(*alert_id))?;

        alert.is_read = true;
        Ok(())
    }

    fn mark_many_read(&self, alert_ids: &[Uuid]) -> Result<usize, CdsError> {
        let mut alerts = self.alerts.write().map_err(|_| CdsError::LockFailed)?;

        let mut transitioned = 0;
        for alert in alerts.iter_mut() {
            if !alert.is_read && alert_ids.contains(&alert.id) {
                alert.is_read = true;
                transitioned += 1;
            }
        }
        Ok(transitioned)
    }

    fn delete(&self, alert_id: &Uuid) -> Result<(), CdsError> {
        let mut alerts = self.alerts.write().map_err(|_| CdsError::LockFailed)?;

        let before = alerts.len();
        alerts.retain(|a| a.id != *alert_id);
        if alerts.len() == before {
            return Err(CdsError::AlertNotFound(*alert_id));
        }
        Ok(())
    }
}
