//! Manager aggregate.

use super::client::Client;
use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Natural key of a manager row.
pub type ManagerId = String;

/// A manager and the clients assigned to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub id: ManagerId,
    pub label: String,
    /// Every client whose `manager_id` is this manager, in id order.
    pub clients: Vec<Client>,
    /// Clients of the same relation that carry an `order_column`, sorted by
    /// it. Empty when no client has one.
    pub clients_ordered: Vec<Client>,
}

impl Manager {
    /// Creates a manager with empty client collections.
    pub fn new(id: impl Into<ManagerId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            clients: Vec::new(),
            clients_ordered: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("manager", "id", &self.id)?;
        require_text("manager", "label", &self.label)
    }
}
