//! Persistence layer for the CRM domain: managers, clients, client details
//! and a composite-key lookup table, stored in SQLite.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{ConfigError, DataSourceConfig, DataSourceTarget};
pub use db::scope::rollback_scope;
pub use db::{open_data_source, open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::client::{Client, ClientId, ClientInfo};
pub use model::manager::{Manager, ManagerId};
pub use model::table_with_pk::{Pk, TableWithPk};
pub use model::ValidationError;
pub use repo::client_repo::{ClientRepository, SqliteClientRepository};
pub use repo::manager_repo::{ManagerFetch, ManagerRepository, SqliteManagerRepository};
pub use repo::table_with_pk_repo::{SqliteTableWithPkRepository, TableWithPkRepository};
pub use repo::{RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
