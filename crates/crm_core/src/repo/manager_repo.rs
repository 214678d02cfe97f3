//! Manager repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load managers together with their client collections.
//! - Keep the fetch strategy explicit at the call site.
//!
//! # Invariants
//! - Manager listing is deterministic: `id ASC`, compared as text, so a
//!   label like "10" sorts before "2".
//! - `clients` holds every client of the manager, `id ASC`, with details.
//! - `clients_ordered` holds only clients with an `order_column`, sorted by
//!   it; it is empty when none has one.

use crate::model::client::Client;
use crate::model::manager::{Manager, ManagerId};
use crate::repo::client_repo::load_clients;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;

/// How much of the manager aggregate a query loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManagerFetch {
    /// Manager columns only; both client collections stay empty.
    Shallow,
    /// Manager plus both client collections, clients with details.
    #[default]
    WithClients,
}

/// Repository interface for manager queries.
pub trait ManagerRepository {
    /// Lists all managers with their clients.
    fn find_all(&self) -> RepoResult<Vec<Manager>> {
        self.find_all_with(ManagerFetch::WithClients)
    }
    /// Lists all managers using the given fetch strategy.
    fn find_all_with(&self, fetch: ManagerFetch) -> RepoResult<Vec<Manager>>;
    /// Loads one manager with its clients.
    fn find_by_id(&self, id: &str) -> RepoResult<Option<Manager>>;
    /// Inserts the manager row. Client collections are not written.
    fn save(&self, manager: &Manager) -> RepoResult<ManagerId>;
}

/// SQLite-backed manager repository.
pub struct SqliteManagerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteManagerRepository<'conn> {
    /// Creates repository from a migrated connection or open transaction.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["manager", "client", "client_info"])?;
        Ok(Self { conn })
    }
}

impl ManagerRepository for SqliteManagerRepository<'_> {
    fn find_all_with(&self, fetch: ManagerFetch) -> RepoResult<Vec<Manager>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, label FROM manager ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut managers = Vec::new();
        while let Some(row) = rows.next()? {
            managers.push(parse_manager_row(row)?);
        }

        if fetch == ManagerFetch::WithClients {
            let mut by_manager: HashMap<ManagerId, Vec<Client>> = HashMap::new();
            for client in load_clients(self.conn, None)? {
                by_manager
                    .entry(client.manager_id.clone())
                    .or_default()
                    .push(client);
            }
            for manager in &mut managers {
                let clients = by_manager.remove(&manager.id).unwrap_or_default();
                attach_clients(manager, clients);
            }
        }

        Ok(managers)
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Manager>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, label FROM manager WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let mut manager = parse_manager_row(row)?;
        let clients = load_clients(self.conn, Some(id))?;
        attach_clients(&mut manager, clients);
        Ok(Some(manager))
    }

    fn save(&self, manager: &Manager) -> RepoResult<ManagerId> {
        manager.validate()?;
        self.conn.execute(
            "INSERT INTO manager (id, label) VALUES (?1, ?2);",
            params![manager.id.as_str(), manager.label.as_str()],
        )?;
        Ok(manager.id.clone())
    }
}

fn attach_clients(manager: &mut Manager, clients: Vec<Client>) {
    let mut ordered: Vec<Client> = clients
        .iter()
        .filter(|client| client.order_column.is_some())
        .cloned()
        .collect();
    // Stable sort keeps `id ASC` among equal positions.
    ordered.sort_by_key(|client| client.order_column);

    manager.clients = clients;
    manager.clients_ordered = ordered;
}

fn parse_manager_row(row: &Row<'_>) -> RepoResult<Manager> {
    let manager = Manager::new(row.get::<_, String>("id")?, row.get::<_, String>("label")?);
    manager.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "manager row `{}` failed validation: {err}",
            manager.id
        ))
    })?;
    Ok(manager)
}
