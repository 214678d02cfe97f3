mod common;

use common::{
    with_fixtures, TEST_CLIENT_INFO, TEST_CLIENT_NAME, TEST_MANAGER_ID, TEST_MANAGER_LABEL,
};
use crm_core::{Manager, ManagerFetch, ManagerRepository, RepoError, SqliteManagerRepository};

#[test]
fn find_all_returns_fixture_managers_with_clients() {
    with_fixtures(|tx| {
        let repo = SqliteManagerRepository::try_new(tx).unwrap();

        let managers = repo.find_all().unwrap();
        assert_eq!(managers.len(), 3);

        let manager = managers
            .iter()
            .find(|manager| manager.id == TEST_MANAGER_ID)
            .expect("fixture manager should be listed");
        assert_eq!(manager.label, TEST_MANAGER_LABEL);
        assert_eq!(manager.clients.len(), 1);
        assert_eq!(manager.clients[0].name, TEST_CLIENT_NAME);
        assert_eq!(
            manager.clients[0].client_info.as_ref().unwrap().info,
            TEST_CLIENT_INFO
        );
        assert!(manager.clients_ordered.is_empty());
    });
}

#[test]
fn find_all_lists_managers_by_id() {
    with_fixtures(|tx| {
        let repo = SqliteManagerRepository::try_new(tx).unwrap();

        let ids: Vec<String> = repo
            .find_all()
            .unwrap()
            .into_iter()
            .map(|manager| manager.id)
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
    });
}

#[test]
fn manager_ids_sort_as_text() {
    with_fixtures(|tx| {
        let repo = SqliteManagerRepository::try_new(tx).unwrap();
        repo.save(&Manager::new("10", "Test Manager 10")).unwrap();

        let ids: Vec<String> = repo
            .find_all_with(ManagerFetch::Shallow)
            .unwrap()
            .into_iter()
            .map(|manager| manager.id)
            .collect();
        assert_eq!(ids, ["1", "10", "2", "3"]);
    });
}

#[test]
fn ordered_clients_follow_order_column_and_skip_unordered_rows() {
    with_fixtures(|tx| {
        let repo = SqliteManagerRepository::try_new(tx).unwrap();

        let manager = repo.find_by_id("2").unwrap().unwrap();
        let all: Vec<&str> = manager.clients.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(all, ["Test Client 2", "Test Client 3", "Test Client 4"]);

        let ordered: Vec<&str> = manager
            .clients_ordered
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(ordered, ["Test Client 4", "Test Client 3"]);
    });
}

#[test]
fn manager_without_clients_has_empty_collections() {
    with_fixtures(|tx| {
        let repo = SqliteManagerRepository::try_new(tx).unwrap();

        let manager = repo.find_by_id("3").unwrap().unwrap();
        assert!(manager.clients.is_empty());
        assert!(manager.clients_ordered.is_empty());
    });
}

#[test]
fn shallow_fetch_leaves_collections_empty() {
    with_fixtures(|tx| {
        let repo = SqliteManagerRepository::try_new(tx).unwrap();

        let managers = repo.find_all_with(ManagerFetch::Shallow).unwrap();
        assert_eq!(managers.len(), 3);
        assert!(managers
            .iter()
            .all(|manager| manager.clients.is_empty() && manager.clients_ordered.is_empty()));
    });
}

#[test]
fn find_by_id_returns_none_for_unknown_manager() {
    with_fixtures(|tx| {
        let repo = SqliteManagerRepository::try_new(tx).unwrap();
        assert!(repo.find_by_id("404").unwrap().is_none());
    });
}

#[test]
fn save_inserts_manager_and_rejects_duplicate_id() {
    with_fixtures(|tx| {
        let repo = SqliteManagerRepository::try_new(tx).unwrap();

        repo.save(&Manager::new("4", "Test Manager 4")).unwrap();
        let saved = repo.find_by_id("4").unwrap().unwrap();
        assert_eq!(saved.label, "Test Manager 4");
        assert!(saved.clients.is_empty());

        let err = repo.save(&Manager::new("1", "Duplicate")).unwrap_err();
        assert!(matches!(err, RepoError::ConstraintViolation(_)));
    });
}

#[test]
fn repeated_reads_are_identical() {
    with_fixtures(|tx| {
        let repo = SqliteManagerRepository::try_new(tx).unwrap();
        assert_eq!(repo.find_all().unwrap(), repo.find_all().unwrap());
    });
}
