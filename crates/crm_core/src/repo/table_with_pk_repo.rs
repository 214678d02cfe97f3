//! Composite-key lookup table repository.
//!
//! # Invariants
//! - Lookups match on both key parts; a partial key never matches.
//! - `save_entry` is insert-only. A duplicate key is a constraint violation,
//!   not an overwrite.

use crate::model::table_with_pk::{Pk, TableWithPk};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for `table_with_pk` rows.
pub trait TableWithPkRepository {
    fn save_entry(&self, entry: &TableWithPk) -> RepoResult<()>;
    fn find_by_id(&self, pk: &Pk) -> RepoResult<Option<TableWithPk>>;
    /// Returns `true` when a row was removed.
    fn delete_by_id(&self, pk: &Pk) -> RepoResult<bool>;
}

/// SQLite-backed `table_with_pk` repository.
pub struct SqliteTableWithPkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTableWithPkRepository<'conn> {
    /// Creates repository from a migrated connection or open transaction.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["table_with_pk"])?;
        Ok(Self { conn })
    }
}

impl TableWithPkRepository for SqliteTableWithPkRepository<'_> {
    fn save_entry(&self, entry: &TableWithPk) -> RepoResult<()> {
        entry.pk.validate()?;
        self.conn.execute(
            "INSERT INTO table_with_pk (first_part, second_part, value)
             VALUES (?1, ?2, ?3);",
            params![
                entry.pk.first_part.as_str(),
                entry.pk.second_part.as_str(),
                entry.value.as_str(),
            ],
        )?;
        Ok(())
    }

    fn find_by_id(&self, pk: &Pk) -> RepoResult<Option<TableWithPk>> {
        let entry = self
            .conn
            .query_row(
                "SELECT first_part, second_part, value
                 FROM table_with_pk
                 WHERE first_part = ?1 AND second_part = ?2;",
                params![pk.first_part.as_str(), pk.second_part.as_str()],
                |row| {
                    Ok(TableWithPk::new(
                        Pk::new(
                            row.get::<_, String>("first_part")?,
                            row.get::<_, String>("second_part")?,
                        ),
                        row.get::<_, String>("value")?,
                    ))
                },
            )
            .optional()?;

        if let Some(found) = entry.as_ref() {
            found.pk.validate().map_err(|err| {
                RepoError::InvalidData(format!("table_with_pk row failed validation: {err}"))
            })?;
        }
        Ok(entry)
    }

    fn delete_by_id(&self, pk: &Pk) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM table_with_pk WHERE first_part = ?1 AND second_part = ?2;",
            params![pk.first_part.as_str(), pk.second_part.as_str()],
        )?;
        Ok(changed > 0)
    }
}
