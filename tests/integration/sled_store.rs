//! Durable store behavior across process-like reopen cycles

use dirtree::service::DirectoryTreeService;
use dirtree::store::{NodeStore, SledNodeStore};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_tree_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store");

    {
        let store = Arc::new(SledNodeStore::new(&path).unwrap());
        let service = DirectoryTreeService::new(store.clone());
        service.create_directory("fruits/apples/fuji");
        service.create_directory("foods");
        service.move_directory("fruits", "foods");
        store.flush().unwrap();
    }

    let store = Arc::new(SledNodeStore::new(&path).unwrap());
    let service = DirectoryTreeService::new(store.clone());
    assert_eq!(
        service.list_directories().success().unwrap(),
        "foods\n  fruits\n    apples\n      fuji\n"
    );
    assert_eq!(store.len().unwrap(), 4);
}

#[test]
fn test_ids_are_not_reused_after_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store");

    let first_id = {
        let store = SledNodeStore::new(&path).unwrap();
        let node = store.insert("a", None).unwrap();
        store.delete_subtree(node.id).unwrap();
        store.flush().unwrap();
        node.id
    };

    let store = SledNodeStore::new(&path).unwrap();
    let second = store.insert("a", None).unwrap();
    assert!(second.id > first_id);
}
