//! Concurrent callers racing on overlapping paths

use super::test_utils::sled_service;
use dirtree::service::{DirectoryTreeService, ServiceResponse};
use std::sync::{Arc, Barrier};
use std::thread;

const RACERS: usize = 8;

fn race_creates(service: Arc<DirectoryTreeService>, path: &'static str) -> Vec<u16> {
    let barrier = Arc::new(Barrier::new(RACERS));
    let handles: Vec<_> = (0..RACERS)
        .map(|_| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service.create_directory(path).status_code()
            })
        })
        .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

fn assert_single_winner(statuses: &[u16]) {
    assert_eq!(statuses.iter().filter(|&&s| s == 200).count(), 1);
    assert_eq!(statuses.iter().filter(|&&s| s == 409).count(), RACERS - 1);
}

#[test]
fn test_concurrent_identical_creates_in_memory() {
    let service = Arc::new(DirectoryTreeService::in_memory());
    let statuses = race_creates(Arc::clone(&service), "docs/reports/2024");
    assert_single_winner(&statuses);
    assert_eq!(service.all_directories().success().unwrap().len(), 3);
}

#[test]
fn test_concurrent_identical_creates_sled() {
    let (_dir, service) = sled_service();
    let service = Arc::new(service);
    let statuses = race_creates(Arc::clone(&service), "docs/reports/2024");
    assert_single_winner(&statuses);
    assert_eq!(
        service.list_directories().success().unwrap(),
        "docs\n  reports\n    2024\n"
    );
}

#[test]
fn test_concurrent_creates_under_distinct_roots() {
    let service = Arc::new(DirectoryTreeService::in_memory());
    let handles: Vec<_> = (0..RACERS)
        .map(|i| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.create_directory(&format!("root{}/child", i)))
        })
        .collect();
    for handle in handles {
        assert!(matches!(handle.join().unwrap(), ServiceResponse::Success(_)));
    }
    assert_eq!(
        service.all_directories().success().unwrap().len(),
        RACERS * 2
    );
}

#[test]
fn test_concurrent_moves_keep_tree_acyclic() {
    let service = Arc::new(DirectoryTreeService::in_memory());
    service.create_directory("a");
    service.create_directory("b");

    let forward = {
        let service = Arc::clone(&service);
        thread::spawn(move || service.move_directory("a", "b"))
    };
    let backward = {
        let service = Arc::clone(&service);
        thread::spawn(move || service.move_directory("b", "a"))
    };
    let results = [forward.join().unwrap(), backward.join().unwrap()];
    assert_eq!(results.iter().filter(|r| r.is_success()).count(), 1);

    let listing = service.list_directories().success().unwrap();
    assert!(listing == "a\n  b\n" || listing == "b\n  a\n", "{}", listing);
}

#[test]
fn test_listing_during_create_delete_churn_never_fails() {
    let (_dir, service) = sled_service();
    let service = Arc::new(service);
    let done = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let writer = {
        let service = Arc::clone(&service);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for _ in 0..500 {
                assert!(service.create_directory("x/a/b/c").is_success());
                assert!(service.delete_directory("x").is_success());
            }
            done.store(true, std::sync::atomic::Ordering::SeqCst);
        })
    };

    let mut failures = Vec::new();
    while !done.load(std::sync::atomic::Ordering::SeqCst) {
        if let ServiceResponse::Internal(message) = service.list_directories() {
            failures.push(message);
        }
        if let ServiceResponse::Internal(message) = service.directory_tree() {
            failures.push(message);
        }
    }
    writer.join().unwrap();

    assert!(failures.is_empty(), "listing failed: {:?}", failures.first());
    assert_eq!(service.list_directories().success().unwrap(), "");
}
