//! End-to-end behavior of the directory service over both store backends

use super::test_utils::for_each_backend;
use dirtree::service::ServiceResponse;

fn listing(service: &dirtree::DirectoryTreeService) -> String {
    service.list_directories().success().unwrap()
}

#[test]
fn test_create_nested_path_on_empty_tree() {
    for_each_backend(|service| {
        let leaf = service.create_directory("docs/reports/2024").success().unwrap();
        assert_eq!(leaf.name, "2024");
        assert_eq!(service.all_directories().success().unwrap().len(), 3);
        assert_eq!(listing(service), "docs\n  reports\n    2024\n");
    });
}

#[test]
fn test_create_twice_conflicts_and_leaves_tree_unchanged() {
    for_each_backend(|service| {
        let first = service.create_directory("docs/reports/2024");
        assert!(first.is_success());
        let before = listing(service);

        let second = service.create_directory("docs/reports/2024");
        assert_eq!(second.status_code(), 409);
        assert_eq!(
            second.message(),
            Some("Directory already exists with path: docs/reports/2024")
        );

        assert_eq!(listing(service), before);
        let count = service
            .all_directories()
            .success()
            .unwrap()
            .iter()
            .filter(|node| node.name == "2024")
            .count();
        assert_eq!(count, 1);
        assert!(service.find_directory("docs/reports/2024").is_success());
    });
}

#[test]
fn test_delete_removes_subtree() {
    for_each_backend(|service| {
        service.create_directory("docs/reports/2024");
        assert!(service.delete_directory("docs/reports").is_success());
        assert_eq!(listing(service), "docs\n");
        assert_eq!(service.all_directories().success().unwrap().len(), 1);

        let again = service.delete_directory("docs/reports");
        assert_eq!(
            again,
            ServiceResponse::NotFound(
                "Cannot delete docs/reports - directory does not exist".to_string()
            )
        );
    });
}

#[test]
fn test_render_sorts_case_insensitively() {
    for_each_backend(|service| {
        for path in ["c", "b/x", "A/z", "A/Y"] {
            assert!(service.create_directory(path).is_success());
        }
        assert_eq!(listing(service), "A\n  Y\n  z\nb\n  x\nc\n");
    });
}

#[test]
fn test_move_to_root() {
    for_each_backend(|service| {
        service.create_directory("a/b/c");
        let moved = service.move_directory("a/b/c", "").success().unwrap();
        assert!(moved.is_root_level());
        assert!(service.find_directory("c").is_success());
        assert_eq!(service.find_directory("a/b/c").status_code(), 400);
        assert_eq!(listing(service), "a\n  b\nc\n");
    });
}

#[test]
fn test_move_missing_paths_report_not_found() {
    for_each_backend(|service| {
        service.create_directory("a");
        let response = service.move_directory("a", "missing");
        assert_eq!(
            response.message(),
            Some("Cannot move a - source or target does not exist")
        );
        assert_eq!(response.status_code(), 400);
        assert_eq!(listing(service), "a\n");
    });
}

#[test]
fn test_move_into_own_subtree_is_bad_input() {
    for_each_backend(|service| {
        service.create_directory("a/b");
        let response = service.move_directory("a", "a/b");
        assert!(matches!(response, ServiceResponse::BadInput(_)));
        assert_eq!(listing(service), "a\n  b\n");
    });
}

#[test]
fn test_invalid_create_path_is_bad_input() {
    for_each_backend(|service| {
        assert!(matches!(
            service.create_directory("/leading"),
            ServiceResponse::BadInput(_)
        ));
        assert!(matches!(service.create_directory(""), ServiceResponse::BadInput(_)));
        assert_eq!(listing(service), "");
    });
}

#[test]
fn test_directory_tree_matches_listing_order() {
    for_each_backend(|service| {
        for path in ["b", "A/z", "A/Y"] {
            service.create_directory(path);
        }
        let tree = service.directory_tree().success().unwrap();
        let names: Vec<&str> = tree.iter().map(|view| view.name.as_str()).collect();
        assert_eq!(names, ["A", "b"]);
        let children: Vec<&str> = tree[0]
            .children
            .iter()
            .map(|view| view.name.as_str())
            .collect();
        assert_eq!(children, ["Y", "z"]);
    });
}
