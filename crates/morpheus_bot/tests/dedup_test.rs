//! Tests for the dedup store.

mod bot_test_helpers;

use bot_test_helpers::{FakeClock, midday};
use chrono::TimeDelta;
use morpheus_bot::DedupTracker;
use morpheus_error::StorageErrorKind;
use std::sync::Arc;
use std::time::Duration;

const WEEK: Duration = Duration::from_secs(7 * 24 * 3600);

fn retention() -> TimeDelta {
    TimeDelta::days(7)
}

#[test]
fn test_mark_then_already_engaged() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(FakeClock::new(midday()));
    let mut tracker = DedupTracker::load(dir.path().join("engaged.json"), retention(), clock);

    assert!(!tracker.already_engaged("1001"));
    tracker.mark_engaged("1001").unwrap();
    assert!(tracker.already_engaged("1001"));
    assert!(!tracker.already_engaged("1002"));
    assert_eq!(tracker.len(), 1);
}

#[test]
fn test_records_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engaged.json");
    let clock = Arc::new(FakeClock::new(midday()));

    let mut tracker = DedupTracker::load(&path, retention(), clock.clone());
    tracker.mark_engaged("1001").unwrap();
    tracker.mark_engaged("1002").unwrap();

    let reloaded = DedupTracker::load(&path, retention(), clock);
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.already_engaged("1001"));
    assert!(reloaded.already_engaged("1002"));
}

#[test]
fn test_records_expire_after_retention() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engaged.json");
    let clock = Arc::new(FakeClock::new(midday()));

    let mut tracker = DedupTracker::load(&path, retention(), clock.clone());
    tracker.mark_engaged("1001").unwrap();

    clock.advance(WEEK + Duration::from_secs(1));
    assert!(!tracker.already_engaged("1001"));

    let reloaded = DedupTracker::load(&path, retention(), clock);
    assert!(reloaded.is_empty());
    assert!(!reloaded.already_engaged("1001"));
}

#[test]
fn test_record_inside_window_still_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(FakeClock::new(midday()));
    let mut tracker =
        DedupTracker::load(dir.path().join("engaged.json"), retention(), clock.clone());
    tracker.mark_engaged("1001").unwrap();

    clock.advance(WEEK - Duration::from_secs(60));
    assert!(tracker.already_engaged("1001"));
}

#[test]
fn test_purge_removes_only_expired() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engaged.json");
    let clock = Arc::new(FakeClock::new(midday()));

    let mut tracker = DedupTracker::load(&path, retention(), clock.clone());
    tracker.mark_engaged("old").unwrap();
    clock.advance(Duration::from_secs(6 * 24 * 3600));
    tracker.mark_engaged("recent").unwrap();
    clock.advance(Duration::from_secs(2 * 24 * 3600));

    assert_eq!(tracker.purge().unwrap(), 1);
    assert_eq!(tracker.len(), 1);
    assert!(tracker.already_engaged("recent"));

    let reloaded = DedupTracker::load(&path, retention(), clock);
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn test_missing_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage/nested/engaged.json");
    let clock = Arc::new(FakeClock::new(midday()));

    let mut tracker = DedupTracker::load(&path, retention(), clock);
    assert!(tracker.is_empty());
    tracker.mark_engaged("1001").unwrap();
    assert!(path.exists());
}

#[test]
fn test_corrupt_store_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engaged.json");
    std::fs::write(&path, "{ not json").unwrap();
    let clock = Arc::new(FakeClock::new(midday()));

    let mut tracker = DedupTracker::load(&path, retention(), clock.clone());
    assert!(tracker.is_empty());

    tracker.mark_engaged("1001").unwrap();
    let reloaded = DedupTracker::load(&path, retention(), clock);
    assert!(reloaded.already_engaged("1001"));
}

#[test]
fn test_store_is_json_object_of_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engaged.json");
    let clock = Arc::new(FakeClock::new(midday()));

    let mut tracker = DedupTracker::load(&path, retention(), clock);
    tracker.mark_engaged("1001").unwrap();

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let timestamp = stored["1001"].as_str().unwrap();
    assert!(timestamp.starts_with("2026-10-18T12:30:00"));
}

#[test]
fn test_mark_drops_expired_records_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engaged.json");
    let clock = Arc::new(FakeClock::new(midday()));

    let mut tracker = DedupTracker::load(&path, retention(), clock.clone());
    tracker.mark_engaged("old").unwrap();
    clock.advance(Duration::from_secs(8 * 24 * 3600));
    tracker.mark_engaged("new").unwrap();

    assert_eq!(tracker.len(), 1);
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(stored.get("old").is_none());
    assert!(stored.get("new").is_some());
}

#[test]
fn test_write_failure_keeps_memory_record() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("storage");
    std::fs::write(&blocker, "not a directory").unwrap();
    let clock = Arc::new(FakeClock::new(midday()));

    let mut tracker = DedupTracker::load(blocker.join("engaged.json"), retention(), clock);
    let err = tracker.mark_engaged("1001").unwrap_err();

    assert!(matches!(err.kind, StorageErrorKind::DirectoryCreation(_)));
    assert!(tracker.already_engaged("1001"));
    assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "not a directory");
}

#[test]
fn test_failed_replace_leaves_existing_entry_intact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engaged.json");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep.txt"), "previous").unwrap();
    let clock = Arc::new(FakeClock::new(midday()));

    let mut tracker = DedupTracker::load(&path, retention(), clock);
    let err = tracker.mark_engaged("1001").unwrap_err();

    assert!(matches!(err.kind, StorageErrorKind::FileWrite(_)));
    assert_eq!(
        std::fs::read_to_string(path.join("keep.txt")).unwrap(),
        "previous"
    );
    let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}
