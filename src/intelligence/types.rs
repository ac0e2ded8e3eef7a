use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::{OriginRole, TargetRole};
use crate::models::{Alert, AlertDraft, ExamInput, LabResultEntry};

use super::normalizer::RiskBin;
use super::risk::RiskResult;

// ---------------------------------------------------------------------------
// EncounterEvaluation
// ---------------------------------------------------------------------------

/// Everything the decision-support core derives from one encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterEvaluation {
    pub patient_id: String,
    pub origin: OriginRole,
    /// `None` means "not applicable", never the lowest tier.
    pub risk: Option<RiskResult>,
    pub risk_bin: Option<RiskBin>,
    /// One entry per observation, in input order.
    pub lab_results: Vec<LabResultEntry>,
    pub drafts: Vec<AlertDraft>,
    /// Test keys missing from the reference table (classified NORMAL).
    pub unknown_tests: Vec<String>,
}

// ---------------------------------------------------------------------------
// CdsError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum CdsError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Invalid encounter input: {0}")]
    InvalidInput(String),

    #[error("Alert not found: {0}")]
    AlertNotFound(Uuid),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal lock failed")]
    LockFailed,
}

// ---------------------------------------------------------------------------
// DecisionSupport trait
// ---------------------------------------------------------------------------

/// Evaluates encounters. Implementations hold no per-patient state.
pub trait DecisionSupport {
    /// Classify risk and labs and synthesize alert drafts for one encounter
    /// captured on the `origin` role's screen.
    fn evaluate(
        &self,
        input: &ExamInput,
        origin: OriginRole,
    ) -> Result<EncounterEvaluation, CdsError>;
}

// ---------------------------------------------------------------------------
// AlertStore trait
// ---------------------------------------------------------------------------

/// Persists drafts and owns the read lifecycle of alerts.
///
/// An alert starts unread; the only transition is unread -> read, which is
/// idempotent. Alerts never expire and are never re-opened.
pub trait AlertStore: Send + Sync {
    /// Assign id, timestamp and unread state to each draft.
    fn persist(&self, drafts: Vec<AlertDraft>) -> Result<Vec<Alert>, CdsError>;

    /// Alerts routed to `role`, newest first.
    fn fetch_by_role(&self, role: TargetRole, unread_only: bool) -> Result<Vec<Alert>, CdsError>;

    /// Mark one alert read. Marking an already-read alert is a no-op.
    fn mark_read(&self, alert_id: &Uuid) -> Result<(), CdsError>;

    /// Mark each listed alert read independently. Unknown ids are skipped.
    /// Returns how many alerts moved from unread to read.
    fn mark_many_read(&self, alert_ids: &[Uuid]) -> Result<usize, CdsError>;

    /// Mark every unread alert routed to `role` as read.
    fn mark_all_read(&self, role: TargetRole) -> Result<usize, CdsError> {
        let ids: Vec<Uuid> = self
            .fetch_by_role(role, true)?
            .iter()
            .map(|a| a.id)
            .collect();
        self.mark_many_read(&ids)
    }

    fn delete(&self, alert_id: &Uuid) -> Result<(), CdsError>;

    fn unread_count(&self, role: TargetRole) -> Result<usize, CdsError> {
        Ok(self.fetch_by_role(role, true)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_ids() {
        let id = Uuid::nil();
        let msg = CdsError::AlertNotFound(id).to_string();
        assert!(msg.contains(&id.to_string()));
    }

    #[test]
    fn database_errors_convert() {
        let err: CdsError = DatabaseError::ConstraintViolation("x".into()).into();
        assert!(matches!(err, CdsError::Database(_)));
    }
}
