/*!
 * Map Operation Tests
 */

use accessor_runtime::{Access, AccessorError, AccessorRuntime, PutEntries, RuntimeConfig};
use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, HashMap};

fn strict() -> AccessorRuntime {
    AccessorRuntime::new(RuntimeConfig::strict())
}

#[test]
fn test_single_put_returns_previous_value() {
    let runtime = strict();
    let owner = 0u8;
    let mut ranks = HashMap::from([("ada".to_string(), 1u32)]);

    let previous = runtime
        .put_to_map(
            Access::new(&owner, "ranks"),
            &mut ranks,
            vec![("ada".to_string(), 2)],
            PutEntries::new(),
        )
        .unwrap();
    assert_eq!(previous, Some(1));

    let previous = runtime
        .put_to_map(
            Access::new(&owner, "ranks"),
            &mut ranks,
            vec![("bob".to_string(), 5)],
            PutEntries::new(),
        )
        .unwrap();
    assert_eq!(previous, None);
    assert_eq!(ranks.get("ada"), Some(&2));
}

#[test]
fn test_multiple_puts_merge() {
    let runtime = strict();
    let owner = 0u8;
    let mut ranks = BTreeMap::from([("ada", 1u32)]);

    let previous = runtime
        .put_to_map(
            Access::new(&owner, "ranks"),
            &mut ranks,
            vec![("ada", 3), ("bob", 4)],
            PutEntries::new(),
        )
        .unwrap();

    assert_eq!(previous, None);
    assert_eq!(ranks, BTreeMap::from([("ada", 3), ("bob", 4)]));
}

#[test]
fn test_not_null_keys_and_values() {
    let runtime = strict();
    let owner = 0u8;
    let mut scores: HashMap<Option<&str>, Option<u32>> = HashMap::new();

    let err = runtime
        .put_to_map(
            Access::new(&owner, "scores"),
            &mut scores,
            vec![(None, Some(1))],
            PutEntries::new().not_null_keys(),
        )
        .unwrap_err();
    assert!(matches!(err, AccessorError::NullElement { .. }));

    let err = runtime
        .put_to_map(
            Access::new(&owner, "scores"),
            &mut scores,
            vec![(Some("a"), Some(1)), (Some("b"), None)],
            PutEntries::new().not_null_keys().not_null_values(),
        )
        .unwrap_err();
    assert!(matches!(err, AccessorError::NullMapValue { .. }));
    assert!(scores.is_empty());

    // Without the checks null keys and values are ordinary entries
    runtime
        .put_to_map(
            Access::new(&owner, "scores"),
            &mut scores,
            vec![(None, None)],
            PutEntries::new(),
        )
        .unwrap();
    assert_eq!(scores.len(), 1);
}

#[test]
fn test_remove_from_map() {
    let runtime = strict();
    let owner = 0u8;
    let mut ranks = HashMap::from([("ada", 1u32), ("bob", 2)]);

    let removed = runtime
        .remove_from_map(Access::new(&owner, "ranks"), &mut ranks, &"ada")
        .unwrap();
    assert_eq!(removed, Some(1));

    let missing = runtime
        .remove_from_map(Access::new(&owner, "ranks"), &mut ranks, &"zed")
        .unwrap();
    assert_eq!(missing, None);
    assert_eq!(ranks, HashMap::from([("bob", 2)]));
}

#[test]
fn test_clear_map() {
    let runtime = strict();
    let owner = 0u8;
    let access = Access::new(&owner, "ranks").with_lock("ranks");
    let mut ranks: HashMap<&str, u32> = HashMap::new();

    assert!(!runtime.clear_map(access, &mut ranks).unwrap());

    ranks.insert("ada", 1);
    ranks.insert("bob", 2);
    assert!(runtime.clear_map(access, &mut ranks).unwrap());
    assert!(ranks.is_empty());
    assert!(!runtime.named_locks().get("ranks").unwrap().is_write_locked());
}

#[test]
fn test_map_ops_ignore_modification_guard() {
    let runtime = strict();
    let owner = 0u8;
    let access = Access::new(&owner, "ranks");
    let mut ranks = HashMap::from([("ada", 1u32)]);

    let _entry = runtime
        .modifications()
        .try_enter(access.context(), access.owner(), access.field())
        .unwrap();

    let previous = runtime
        .put_to_map(access, &mut ranks, vec![("ada", 2)], PutEntries::new())
        .unwrap();
    assert_eq!(previous, Some(1));
    assert!(runtime.clear_map(access, &mut ranks).unwrap());
}
