//! Shared harness: a fresh database per test, fixture rows loaded, and the
//! test body run inside a transaction that is always rolled back.

#![allow(dead_code)]

use crm_core::{open_db_in_memory, rollback_scope};
use rusqlite::{Connection, Transaction};

pub const FIXTURE_SQL: &str = include_str!("../fixtures/test-data.sql");

pub const TEST_CLIENT_ID: i64 = 1;
pub const TEST_CLIENT_NAME: &str = "Test Client 1";
pub const TEST_CLIENT_NEW_NAME: &str = "Test Client 1 NEW";
pub const TEST_CLIENT_INFO: &str = "Client 1 details";
pub const TEST_MANAGER_ID: &str = "1";
pub const TEST_MANAGER_LABEL: &str = "Test Manager 1";
pub const TEST_PK_VALUE: &str = "Test PK value 1";

/// Migrated in-memory database with fixture rows committed.
pub fn fixture_db() -> Connection {
    let conn = open_db_in_memory().unwrap();
    load_fixtures(&conn);
    conn
}

pub fn load_fixtures(conn: &Connection) {
    conn.execute_batch(FIXTURE_SQL).unwrap();
}

/// Runs `test` against fixture data inside a rollback scope.
pub fn with_fixtures<T>(test: impl FnOnce(&Transaction<'_>) -> T) -> T {
    let mut conn = fixture_db();
    rollback_scope(&mut conn, |tx| Ok::<_, rusqlite::Error>(test(tx))).unwrap()
}
