//! CRM entity model.
//!
//! # Responsibility
//! - Define the in-memory shape of `manager`, `client`, `client_info` and
//!   `table_with_pk` rows.
//! - Own field-level validation shared by repository write and read paths.
//!
//! # Invariants
//! - Entities are plain data; loading associations is the repository's job.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client;
pub mod manager;
pub mod table_with_pk;

/// Field-level validation failure for any CRM entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity}.{field} must not be empty")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(())
}
