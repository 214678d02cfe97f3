//! Client and client detail records.
//!
//! # Invariants
//! - `name` is unique across all clients (case-sensitive).
//! - `manager_id` must reference an existing manager.
//! - `client_info`, when present, belongs to exactly this client.

use super::manager::ManagerId;
use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Surrogate key of a client row.
pub type ClientId = i64;

/// One-to-one detail record owned by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub info: String,
}

impl ClientInfo {
    pub fn new(info: impl Into<String>) -> Self {
        Self { info: info.into() }
    }
}

/// A client served by one manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// `None` until the row has been inserted.
    pub id: Option<ClientId>,
    pub name: String,
    pub manager_id: ManagerId,
    /// Position inside the manager's ordered client list. `None` keeps the
    /// client out of that list.
    pub order_column: Option<i64>,
    /// Only populated by queries that fetch it.
    pub client_info: Option<ClientInfo>,
}

impl Client {
    /// Creates an unsaved client without details or ordering.
    pub fn new(name: impl Into<String>, manager_id: impl Into<ManagerId>) -> Self {
        Self {
            id: None,
            name: name.into(),
            manager_id: manager_id.into(),
            order_column: None,
            client_info: None,
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.client_info = Some(ClientInfo::new(info));
        self
    }

    pub fn with_order(mut self, order_column: i64) -> Self {
        self.order_column = Some(order_column);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("client", "name", &self.name)?;
        require_text("client", "manager_id", &self.manager_id)
    }
}
