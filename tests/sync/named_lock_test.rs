/*!
 * Named Lock Tests
 */

use accessor_runtime::core::{Guard, LockMode, NamedLockRegistry};
use accessor_runtime::{AccessorError, ExecutionContext};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn wait_for_waiters(registry: &NamedLockRegistry, name: &str, expected: usize) {
    let lock = registry.lock_for(name);
    while lock.waiting() < expected {
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_guard_releases_on_drop() {
    let registry = NamedLockRegistry::new();
    let ctx = ExecutionContext::detached();

    {
        let guard = registry.write(Some("orders"), ctx).unwrap();
        assert_eq!(guard.mode(), LockMode::Write);
        assert_eq!(guard.name(), Some("orders"));
        assert!(guard.is_active());
        assert!(registry.get("orders").unwrap().is_write_locked());
    }

    assert!(!registry.get("orders").unwrap().is_write_locked());
}

#[test]
fn test_explicit_release_is_idempotent_for_drop() {
    let registry = NamedLockRegistry::new();
    let ctx = ExecutionContext::detached();

    let mut guard = registry.read(Some("orders"), ctx).unwrap();
    guard.release().unwrap();
    assert!(!guard.is_active());
    assert_eq!(registry.get("orders").unwrap().reader_count(), 0);
    assert!(guard.release().is_err());
}

#[test]
fn test_unnamed_guard_holds_nothing() {
    let registry = NamedLockRegistry::new();
    let guard = registry.write(None, ExecutionContext::detached()).unwrap();
    assert!(!guard.is_active());
    assert!(registry.is_empty());
}

#[test]
fn test_write_reentrant_then_read() {
    let registry = NamedLockRegistry::new();
    let ctx = ExecutionContext::detached();

    let _outer = registry.write(Some("orders"), ctx).unwrap();
    let _inner = registry.write(Some("orders"), ctx).unwrap();
    let _read = registry.read(Some("orders"), ctx).unwrap();

    let lock = registry.get("orders").unwrap();
    assert_eq!(lock.held_by(ctx), Some(LockMode::Write));
    assert_eq!(lock.held_by(ExecutionContext::detached()), None);
}

#[test]
fn test_upgrade_is_rejected() {
    let registry = NamedLockRegistry::new();
    let ctx = ExecutionContext::detached();

    let _read = registry.read(Some("orders"), ctx).unwrap();
    let err = registry.write(Some("orders"), ctx).unwrap_err();
    assert!(matches!(err, AccessorError::LockUpgrade { .. }));
}

#[test]
fn test_release_unknown_lock() {
    let registry = NamedLockRegistry::new();
    let err = registry
        .release_write(Some("never"), ExecutionContext::detached())
        .unwrap_err();
    assert!(matches!(err, AccessorError::LockNotHeld { .. }));
}

#[test]
fn test_waiting_writer_blocks_later_readers() {
    let registry = Arc::new(NamedLockRegistry::new());
    let holder = ExecutionContext::detached();
    let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

    registry.acquire_read(Some("fair"), holder);

    let writer = {
        let registry = Arc::clone(&registry);
        let order = Arc::clone(&order);
        thread::spawn(move || {
            let _guard = registry.write(Some("fair"), ExecutionContext::current()).unwrap();
            order.lock().push("writer");
        })
    };
    wait_for_waiters(&registry, "fair", 1);

    let reader = {
        let registry = Arc::clone(&registry);
        let order = Arc::clone(&order);
        thread::spawn(move || {
            let _guard = registry.read(Some("fair"), ExecutionContext::current()).unwrap();
            order.lock().push("reader");
        })
    };
    wait_for_waiters(&registry, "fair", 2);

    registry.release_read(Some("fair"), holder).unwrap();
    writer.join().unwrap();
    reader.join().unwrap();

    assert_eq!(*order.lock(), vec!["writer", "reader"]);
}

#[test]
fn test_readers_share_across_threads() {
    let registry = Arc::new(NamedLockRegistry::new());
    let first = registry.read(Some("catalog"), ExecutionContext::detached()).unwrap();

    let other = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            let _guard = registry
                .read(Some("catalog"), ExecutionContext::current())
                .unwrap();
            registry.get("catalog").unwrap().reader_count()
        })
    };

    assert_eq!(other.join().unwrap(), 2);
    drop(first);
    assert_eq!(registry.get("catalog").unwrap().reader_count(), 0);
}
