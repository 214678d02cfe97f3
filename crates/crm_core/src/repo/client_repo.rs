//! Client repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide finder and update APIs over `client` rows.
//! - Own the client row mapping shared with the manager repository.
//!
//! # Invariants
//! - `find_by_name` and `find_by_id` load `client_info` with the client.
//! - `find_by_name_ignore_case` never loads `client_info`; callers rely on
//!   the returned client carrying `None` there.
//! - `find_by_name_ignore_case` folds case with Unicode rules, not ASCII
//!   only; several matches resolve to the lowest id.
//! - `update_name` on a missing id changes nothing and is not an error.

use crate::model::client::{Client, ClientId, ClientInfo};
use crate::model::require_text;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use log::{debug, warn};
use rusqlite::{params, Connection, Row};

const CLIENT_SELECT_SQL: &str = "SELECT
    c.id AS id,
    c.name AS name,
    c.manager_id AS manager_id,
    c.order_column AS order_column
FROM client c";

const CLIENT_WITH_INFO_SELECT_SQL: &str = "SELECT
    c.id AS id,
    c.name AS name,
    c.manager_id AS manager_id,
    c.order_column AS order_column,
    ci.info AS info
FROM client c
LEFT JOIN client_info ci ON ci.client_id = c.id";

/// Repository interface for client queries.
pub trait ClientRepository {
    /// Inserts a client and its detail row; returns the stored id.
    fn save(&self, client: &Client) -> RepoResult<ClientId>;
    /// Loads one client with details by primary key.
    fn find_by_id(&self, id: ClientId) -> RepoResult<Option<Client>>;
    /// Loads one client with details by exact name.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Client>>;
    /// Loads one client by case-insensitive name, without details.
    fn find_by_name_ignore_case(&self, name: &str) -> RepoResult<Option<Client>>;
    /// Renames one client; returns the number of rows changed (0 or 1).
    fn update_name(&self, id: ClientId, new_name: &str) -> RepoResult<usize>;
}

/// SQLite-backed client repository.
pub struct SqliteClientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientRepository<'conn> {
    /// Creates repository from a migrated connection or open transaction.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["client", "client_info"])?;
        Ok(Self { conn })
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn save(&self, client: &Client) -> RepoResult<ClientId> {
        client.validate()?;

        // Savepoints nest inside an enclosing transaction, BEGIN would not.
        self.conn.execute_batch("SAVEPOINT client_save;")?;
        match insert_client(self.conn, client) {
            Ok(id) => {
                self.conn.execute_batch("RELEASE client_save;")?;
                Ok(id)
            }
            Err(err) => {
                if let Err(rollback_err) = self
                    .conn
                    .execute_batch("ROLLBACK TO client_save; RELEASE client_save;")
                {
                    warn!(
                        "event=client_save module=repo status=error error_code=savepoint_rollback_failed error={rollback_err}"
                    );
                }
                Err(err)
            }
        }
    }

    fn find_by_id(&self, id: ClientId) -> RepoResult<Option<Client>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLIENT_WITH_INFO_SELECT_SQL} WHERE c.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_with_info_row(row)?));
        }

        Ok(None)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Client>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLIENT_WITH_INFO_SELECT_SQL} WHERE c.name = ?1;"))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_with_info_row(row)?));
        }

        Ok(None)
    }

    fn find_by_name_ignore_case(&self, name: &str) -> RepoResult<Option<Client>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CLIENT_SELECT_SQL}
             WHERE crm_fold(c.name) = crm_fold(?1)
             ORDER BY c.id ASC
             LIMIT 1;"
        ))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_row(row)?));
        }

        Ok(None)
    }

    fn update_name(&self, id: ClientId, new_name: &str) -> RepoResult<usize> {
        require_text("client", "name", new_name)?;

        let changed = self.conn.execute(
            "UPDATE client SET name = ?2 WHERE id = ?1;",
            params![id, new_name],
        )?;
        if changed == 0 {
            debug!("event=client_update_name module=repo status=noop client_id={id}");
        }
        Ok(changed)
    }
}

fn insert_client(conn: &Connection, client: &Client) -> RepoResult<ClientId> {
    conn.execute(
        "INSERT INTO client (id, name, manager_id, order_column)
         VALUES (?1, ?2, ?3, ?4);",
        params![
            client.id,
            client.name.as_str(),
            client.manager_id.as_str(),
            client.order_column,
        ],
    )?;
    let id = conn.last_insert_rowid();

    if let Some(client_info) = client.client_info.as_ref() {
        conn.execute(
            "INSERT INTO client_info (client_id, info) VALUES (?1, ?2);",
            params![id, client_info.info.as_str()],
        )?;
    }

    Ok(id)
}

/// Loads clients with details, for one manager or for all of them.
///
/// Rows come back ordered by `manager_id`, then `id`.
pub(crate) fn load_clients(
    conn: &Connection,
    manager_id: Option<&str>,
) -> RepoResult<Vec<Client>> {
    let mut stmt = conn.prepare(&format!(
        "{CLIENT_WITH_INFO_SELECT_SQL}
         WHERE (?1 IS NULL OR c.manager_id = ?1)
         ORDER BY c.manager_id ASC, c.id ASC;"
    ))?;
    let mut rows = stmt.query([manager_id])?;
    let mut clients = Vec::new();
    while let Some(row) = rows.next()? {
        clients.push(parse_client_with_info_row(row)?);
    }
    Ok(clients)
}

fn parse_client_row(row: &Row<'_>) -> RepoResult<Client> {
    let client = Client {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        manager_id: row.get("manager_id")?,
        order_column: row.get("order_column")?,
        client_info: None,
    };
    client.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "client row {} failed validation: {err}",
            client.id.unwrap_or_default()
        ))
    })?;
    Ok(client)
}

fn parse_client_with_info_row(row: &Row<'_>) -> RepoResult<Client> {
    let mut client = parse_client_row(row)?;
    client.client_info = row.get::<_, Option<String>>("info")?.map(ClientInfo::new);
    Ok(client)
}
