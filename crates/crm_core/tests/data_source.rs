mod common;

use common::{load_fixtures, TEST_CLIENT_ID, TEST_CLIENT_NAME, TEST_CLIENT_NEW_NAME};
use crm_core::{
    open_data_source, rollback_scope, ClientRepository, DataSourceConfig, DbError, RepoError,
    SqliteClientRepository,
};

#[test]
fn memory_url_opens_migrated_database() {
    let conn = open_data_source(&DataSourceConfig::in_memory()).unwrap();
    load_fixtures(&conn);

    let repo = SqliteClientRepository::try_new(&conn).unwrap();
    assert!(repo.find_by_name(TEST_CLIENT_NAME).unwrap().is_some());
}

#[test]
fn unsupported_url_is_reported() {
    let config = DataSourceConfig::new("postgres://localhost:5432/crm", "crm", "secret");
    assert!(matches!(
        open_data_source(&config),
        Err(DbError::UnsupportedUrl(url)) if url == config.url
    ));
}

#[test]
fn rolled_back_scope_leaves_file_database_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("crm.db").display());
    let config = DataSourceConfig::new(url, "crm", "secret");

    {
        let conn = open_data_source(&config).unwrap();
        load_fixtures(&conn);
    }

    {
        let mut conn = open_data_source(&config).unwrap();
        let renamed = rollback_scope(&mut conn, |tx| -> Result<Option<String>, RepoError> {
            let repo = SqliteClientRepository::try_new(tx)?;
            repo.update_name(TEST_CLIENT_ID, TEST_CLIENT_NEW_NAME)?;
            Ok(repo.find_by_id(TEST_CLIENT_ID)?.map(|client| client.name))
        })
        .unwrap();
        assert_eq!(renamed.as_deref(), Some(TEST_CLIENT_NEW_NAME));
    }

    let conn = open_data_source(&config).unwrap();
    let repo = SqliteClientRepository::try_new(&conn).unwrap();
    let client = repo.find_by_id(TEST_CLIENT_ID).unwrap().unwrap();
    assert_eq!(client.name, TEST_CLIENT_NAME);
}
