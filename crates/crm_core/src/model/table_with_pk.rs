//! Lookup entry keyed by a two-part natural key.

use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Composite primary key of `table_with_pk`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pk {
    pub first_part: String,
    pub second_part: String,
}

impl Pk {
    pub fn new(first_part: impl Into<String>, second_part: impl Into<String>) -> Self {
        Self {
            first_part: first_part.into(),
            second_part: second_part.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("table_with_pk", "first_part", &self.first_part)?;
        require_text("table_with_pk", "second_part", &self.second_part)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableWithPk {
    pub pk: Pk,
    pub value: String,
}

impl TableWithPk {
    pub fn new(pk: Pk, value: impl Into<String>) -> Self {
        Self {
            pk,
            value: value.into(),
        }
    }
}
