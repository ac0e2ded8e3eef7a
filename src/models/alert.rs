use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AlertCategory, AlertPriority, AlertType, OriginRole, TargetRole};

/// Unpersisted alert candidate produced by the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDraft {
    pub alert_type: AlertType,
    pub category: AlertCategory,
    pub priority: AlertPriority,
    pub message: String,
    pub patient_id: String,
    pub target_role: TargetRole,
    pub origin_role: OriginRole,
}

/// Read state of a persisted alert. The only transition is Unread -> Read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadState {
    Unread,
    Read,
}

/// A draft after the alert store assigned identity, timestamp and read state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    #[serde(flatten)]
    pub draft: AlertDraft,
    pub created_at: NaiveDateTime,
    pub is_read: bool,
}

impl Alert {
    /// Wrap a draft as a freshly created, unread alert.
    pub fn from_draft(draft: AlertDraft, created_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            draft,
            created_at,
            is_read: false,
        }
    }

    pub fn state(&self) -> ReadState {
        if self.is_read {
            ReadState::Read
        } else {
            ReadState::Unread
        }
    }
}
