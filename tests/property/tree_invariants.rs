//! Random operation sequences must preserve sibling uniqueness, acyclicity,
//! cascade deletion and deterministic rendering.

use dirtree::service::{DirectoryTreeService, ServiceResponse};
use dirtree::store::{MemoryNodeStore, NodeStore};
use dirtree::tree::TreeResolver;
use dirtree::types::NodeId;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Op {
    Create(String),
    Move(String, String),
    Delete(String),
}

/// Small alphabet so paths collide often.
fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a", "B", "b", "c"]), 1..4)
        .prop_map(|segments| segments.join("/"))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => path_strategy().prop_map(Op::Create),
        2 => (path_strategy(), prop_oneof![Just(String::new()), path_strategy()])
            .prop_map(|(source, target)| Op::Move(source, target)),
        1 => path_strategy().prop_map(Op::Delete),
    ]
}

fn apply(service: &DirectoryTreeService, op: &Op) {
    match op {
        Op::Create(path) => {
            service.create_directory(path);
        }
        Op::Move(source, target) => {
            service.move_directory(source, target);
        }
        Op::Delete(path) => {
            service.delete_directory(path);
        }
    }
}

fn assert_siblings_unique(store: &dyn NodeStore) {
    let mut seen = HashSet::new();
    for node in store.list_all().unwrap() {
        assert!(
            seen.insert((node.parent, node.name.clone())),
            "duplicate sibling {:?}",
            node
        );
    }
}

fn assert_acyclic(store: &dyn NodeStore) {
    let all = store.list_all().unwrap();
    let limit = all.len();
    for node in &all {
        let mut steps = 0;
        let mut cursor = node.parent;
        while let Some(id) = cursor {
            steps += 1;
            assert!(steps <= limit, "parent chain of {:?} loops", node);
            cursor = store.get(id).unwrap().expect("dangling parent").parent;
        }
    }
}

#[test]
fn test_random_operations_preserve_invariants() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(op_strategy(), 1..40), |ops| {
            let store = Arc::new(MemoryNodeStore::new());
            let service = DirectoryTreeService::new(store.clone());
            for op in &ops {
                apply(&service, op);
                assert_siblings_unique(store.as_ref());
                assert_acyclic(store.as_ref());
            }

            let first = service.list_directories().success().unwrap();
            let second = service.list_directories().success().unwrap();
            prop_assert_eq!(first, second);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_render_independent_of_insertion_order() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop::collection::vec(path_strategy(), 1..20).prop_shuffle(),
            |paths| {
                let forward = DirectoryTreeService::in_memory();
                let reverse = DirectoryTreeService::in_memory();
                for path in &paths {
                    forward.create_directory(path);
                }
                for path in paths.iter().rev() {
                    reverse.create_directory(path);
                }
                prop_assert_eq!(
                    forward.list_directories().success().unwrap(),
                    reverse.list_directories().success().unwrap()
                );
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn test_delete_removes_every_descendant() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(path_strategy(), 1..20), path_strategy()),
            |(paths, victim)| {
                let store = Arc::new(MemoryNodeStore::new());
                let service = DirectoryTreeService::new(store.clone());
                for path in &paths {
                    service.create_directory(path);
                }

                let target = TreeResolver::new(store.as_ref()).resolve(&victim).unwrap();
                let before = store.len().unwrap();
                let response = service.delete_directory(&victim);

                match target {
                    None => {
                        prop_assert!(matches!(response, ServiceResponse::NotFound(_)));
                        prop_assert_eq!(store.len().unwrap(), before);
                    }
                    Some(node) => {
                        prop_assert!(response.is_success());
                        let removed: NodeId = node.id;
                        prop_assert!(store.get(removed).unwrap().is_none());
                        let resolver = TreeResolver::new(store.as_ref());
                        for survivor in store.list_all().unwrap() {
                            let chain = resolver.ancestors(&survivor).unwrap();
                            prop_assert!(!chain.contains(&removed));
                        }
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn test_create_twice_conflicts() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&path_strategy(), |path| {
            let service = DirectoryTreeService::in_memory();
            prop_assert!(service.create_directory(&path).is_success());
            let before = service.list_directories().success().unwrap();
            prop_assert_eq!(service.create_directory(&path).status_code(), 409);
            prop_assert_eq!(service.list_directories().success().unwrap(), before);
            Ok(())
        })
        .unwrap();
}
