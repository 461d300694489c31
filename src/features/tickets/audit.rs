//! Field-level audit of ticket updates.
//!
//! Only status, priority and description are tracked. Title, assignee and
//! department changes are persisted without a history row.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::features::tickets::models::{Ticket, TicketChanges, TicketHistory};

pub const FIELD_TICKET: &str = "ticket";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_PRIORITY: &str = "priority";
pub const FIELD_DESCRIPTION: &str = "description";

/// A change waiting to be written as a history row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field_name: &'static str,
    pub old_value: String,
    pub new_value: String,
}

impl FieldChange {
    fn new(field_name: &'static str, old_value: String, new_value: String) -> Self {
        Self {
            field_name,
            old_value,
            new_value,
        }
    }

    /// Marker entry appended when a ticket is first created
    pub fn created() -> Self {
        Self::new(FIELD_TICKET, String::new(), "created".to_string())
    }

    pub fn into_history(
        self,
        ticket_id: Uuid,
        changed_by: Uuid,
        changed_at: DateTime<Utc>,
    ) -> TicketHistory {
        TicketHistory {
            id: Uuid::now_v7(),
            ticket_id,
            changed_at,
            changed_by,
            field_name: self.field_name.to_string(),
            old_value: self.old_value,
            new_value: self.new_value,
        }
    }
}

/// Compares the stored ticket with the incoming values, one entry per changed tracked field.
///
/// Ids are rendered as decimal strings, descriptions verbatim.
pub fn diff(old: &Ticket, new: &TicketChanges) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if old.status_id != new.status_id {
        changes.push(FieldChange::new(
            FIELD_STATUS,
            old.status_id.to_string(),
            new.status_id.to_string(),
        ));
    }

    if old.priority_id != new.priority_id {
        changes.push(FieldChange::new(
            FIELD_PRIORITY,
            old.priority_id.to_string(),
            new.priority_id.to_string(),
        ));
    }

    if old.description != new.description {
        changes.push(FieldChange::new(
            FIELD_DESCRIPTION,
            old.description.clone(),
            new.description.clone(),
        ));
    }

    changes
}

/// Builds the history rows of one update, all sharing `changed_at`
pub fn history_rows(
    ticket_id: Uuid,
    changed_by: Uuid,
    changed_at: DateTime<Utc>,
    changes: Vec<FieldChange>,
) -> Vec<TicketHistory> {
    changes
        .into_iter()
        .map(|c| c.into_history(ticket_id, changed_by, changed_at))
        .collect()
}
