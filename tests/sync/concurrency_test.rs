/*!
 * Concurrency Tests
 *
 * Accessor calls from several threads on one runtime
 */

use accessor_runtime::{
    Access, AccessorRuntime, ObjectId, RuntimeConfig, SetValue, SharedField,
};
use parking_lot::{Mutex, RwLock};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: u32 = 8;

#[test]
fn test_named_lock_serializes_setters() {
    let runtime = Arc::new(AccessorRuntime::new(RuntimeConfig::strict()));
    let field: SharedField<u32> = Arc::new(RwLock::new(0));
    let log = Arc::new(Mutex::new(Vec::new()));
    let changes = Arc::new(Mutex::new(Vec::new()));
    let owner = ObjectId::from_raw(0x1000);

    let handles: Vec<_> = (1..=THREADS)
        .map(|i| {
            let runtime = Arc::clone(&runtime);
            let field = Arc::clone(&field);
            let log = Arc::clone(&log);
            let changes = Arc::clone(&changes);
            thread::spawn(move || {
                let request = SetValue::new()
                    .before_change(|_: &u32, _: &u32| {
                        log.lock().push(format!("begin {}", i));
                        thread::sleep(Duration::from_millis(2));
                        true
                    })
                    .after_change(|old: &u32, new: &u32| {
                        changes.lock().push((*old, *new));
                        log.lock().push(format!("end {}", i));
                    });

                runtime
                    .set_field(
                        Access::for_owner(owner, "value").with_lock("shared"),
                        &field,
                        i,
                        request,
                    )
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }

    let log = log.lock();
    assert_eq!(log.len(), 2 * THREADS as usize);
    for pair in log.chunks(2) {
        let begin = pair[0].strip_prefix("begin ").expect("begin entry");
        let end = pair[1].strip_prefix("end ").expect("end entry");
        assert_eq!(begin, end);
    }

    // Every old value is the value the previous setter wrote
    let changes = changes.lock();
    assert_eq!(changes[0].0, 0);
    for window in changes.windows(2) {
        assert_eq!(window[0].1, window[1].0);
    }
    assert_eq!(*field.read(), changes[changes.len() - 1].1);
}

#[test]
fn test_modification_guard_does_not_block_other_threads() {
    let runtime = Arc::new(AccessorRuntime::new(RuntimeConfig::strict()));
    let owner = ObjectId::from_raw(0x2000);
    let entered = Arc::new(Barrier::new(2));
    let done = Arc::new(Barrier::new(2));

    let first = {
        let runtime = Arc::clone(&runtime);
        let entered = Arc::clone(&entered);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let request = SetValue::new().before_change(|_: &u32, _: &u32| {
                entered.wait();
                done.wait();
                true
            });
            runtime
                .set_value(Access::for_owner(owner, "value"), 0, 1, request, |_| {})
                .unwrap()
        })
    };

    entered.wait();
    let second = runtime
        .set_value(
            Access::for_owner(owner, "value"),
            0,
            2,
            SetValue::new(),
            |_| {},
        )
        .unwrap();
    done.wait();

    assert!(second);
    assert!(first.join().unwrap());
    assert_eq!(runtime.modifications().active_contexts(), 0);
}

#[test]
fn test_independent_lock_names_do_not_contend() {
    let runtime = Arc::new(AccessorRuntime::new(RuntimeConfig::strict()));
    let inside = Arc::new(Barrier::new(2));

    let handles: Vec<_> = ["left", "right"]
        .into_iter()
        .map(|name| {
            let runtime = Arc::clone(&runtime);
            let inside = Arc::clone(&inside);
            thread::spawn(move || {
                let owner = ObjectId::from_raw(0x3000);
                // Both setters must be inside their hooks at once
                let request = SetValue::new().before_change(|_: &u32, _: &u32| {
                    inside.wait();
                    true
                });
                runtime
                    .set_value(
                        Access::for_owner(owner, name).with_lock(name),
                        0,
                        1,
                        request,
                        |_| {},
                    )
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(runtime.named_locks().len(), 2);
}
