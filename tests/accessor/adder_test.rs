/*!
 * Adder Tests
 */

use accessor_runtime::{Access, AccessorError, AccessorRuntime, AddElements, RuntimeConfig};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};

fn strict() -> AccessorRuntime {
    AccessorRuntime::new(RuntimeConfig::strict())
}

#[test]
fn test_add_to_list_appends_at_reported_indices() {
    let runtime = strict();
    let owner = 0u8;
    let mut tags = vec!["a", "b"];
    let reported = RefCell::new(Vec::new());

    let request = AddElements::<&str>::new().after(|elements, indices, old, new| {
        assert_eq!(old.len(), 2);
        for (element, index) in elements.iter().zip(indices.iter()) {
            assert_eq!(new[index], *element);
        }
        reported.borrow_mut().extend(indices.iter());
    });

    let added = runtime
        .add_to_list(Access::new(&owner, "tags"), &mut tags, vec!["c", "d"], request)
        .unwrap();

    assert!(added);
    assert_eq!(tags, vec!["a", "b", "c", "d"]);
    assert_eq!(*reported.borrow(), vec![2, 3]);
}

#[test]
fn test_add_at_start_index() {
    let runtime = strict();
    let owner = 0u8;
    let mut tags = vec!["a", "d"];
    let per_element = RefCell::new(Vec::new());

    let request = AddElements::<&str>::new().after_element(|element, index, _, new| {
        assert_eq!(new[index], *element);
        per_element.borrow_mut().push((*element, index));
    });

    runtime
        .add_to_collection(Access::new(&owner, "tags"), &mut tags, vec!["b", "c"], 1, request)
        .unwrap();

    assert_eq!(tags, vec!["a", "b", "c", "d"]);
    assert_eq!(*per_element.borrow(), vec![("b", 1), ("c", 2)]);
}

#[test]
fn test_start_index_past_end() {
    let runtime = strict();
    let owner = 0u8;
    let mut tags = vec!["a"];

    let err = runtime
        .add_to_collection(Access::new(&owner, "tags"), &mut tags, vec!["b"], 5, AddElements::new())
        .unwrap_err();
    assert!(matches!(err, AccessorError::IndexOutOfBounds { index: 5, len: 1, .. }));
    assert_eq!(tags, vec!["a"]);
}

#[test]
fn test_rejected_elements_do_not_consume_indices() {
    let runtime = strict();
    let owner = 0u8;
    let mut tags = vec!["x", "y"];
    let offered = RefCell::new(Vec::new());
    let batch = RefCell::new(Vec::new());

    let request = AddElements::<&str>::new()
        .before_element(|element, index, old| {
            assert_eq!(old, &["x", "y"]);
            offered.borrow_mut().push((*element, index));
            *element != "b"
        })
        .before(|elements, indices| {
            batch.borrow_mut().push((elements.to_vec(), indices.to_vec()));
            true
        });

    runtime
        .add_to_list(Access::new(&owner, "tags"), &mut tags, vec!["a", "b", "c"], request)
        .unwrap();

    assert_eq!(*offered.borrow(), vec![("a", 2), ("b", 3), ("c", 3)]);
    assert_eq!(*batch.borrow(), vec![(vec!["a", "c"], vec![2, 3])]);
    assert_eq!(tags, vec!["x", "y", "a", "c"]);
}

#[test]
fn test_nothing_accepted_leaves_collection_unchanged() {
    let runtime = strict();
    let owner = 0u8;
    let mut tags = vec!["x"];
    let batch_called = RefCell::new(false);

    let request = AddElements::<&str>::new()
        .before_element(|_, _, _| false)
        .before(|_, _| {
            *batch_called.borrow_mut() = true;
            true
        });

    let added = runtime
        .add_to_list(Access::new(&owner, "tags"), &mut tags, vec!["a", "b"], request)
        .unwrap();

    assert!(!added);
    assert!(!*batch_called.borrow());
    assert_eq!(tags, vec!["x"]);
}

#[test]
fn test_batch_veto() {
    let runtime = strict();
    let owner = 0u8;
    let mut tags = vec!["x"];

    let request = AddElements::<&str>::new()
        .before(|elements, _| elements.len() < 2)
        .after(|_, _, _, _| panic!("vetoed batch must not notify"));

    let added = runtime
        .add_to_list(Access::new(&owner, "tags"), &mut tags, vec!["a", "b"], request)
        .unwrap();
    assert!(!added);
    assert_eq!(tags, vec!["x"]);
}

#[test]
fn test_set_skips_present_and_repeated_candidates() {
    let runtime = strict();
    let owner = 0u8;
    let mut ids = HashSet::from([1, 2]);
    let offered = RefCell::new(Vec::new());

    let request = AddElements::<i32>::new().before_element(|id, _, _| {
        offered.borrow_mut().push(*id);
        true
    });

    let added = runtime
        .add_to_list(Access::new(&owner, "ids"), &mut ids, vec![2, 3, 3, 4], request)
        .unwrap();

    assert!(added);
    assert_eq!(*offered.borrow(), vec![3, 4]);
    assert_eq!(ids, HashSet::from([1, 2, 3, 4]));
}

#[test]
fn test_set_with_only_known_elements() {
    let runtime = strict();
    let owner = 0u8;
    let mut ids = BTreeSet::from([1, 2]);

    let added = runtime
        .add_to_list(Access::new(&owner, "ids"), &mut ids, vec![1, 2, 2], AddElements::new())
        .unwrap();
    assert!(!added);
    assert_eq!(ids, BTreeSet::from([1, 2]));
}

#[test]
fn test_not_null_candidates() {
    let runtime = strict();
    let owner = 0u8;
    let mut scores: Vec<Option<u32>> = vec![Some(1)];

    let err = runtime
        .add_to_list(
            Access::new(&owner, "scores"),
            &mut scores,
            vec![Some(2), None],
            AddElements::new().not_null(),
        )
        .unwrap_err();
    assert!(matches!(err, AccessorError::NullElement { .. }));
    assert_eq!(scores, vec![Some(1)]);
}

#[test]
fn test_nested_add_to_same_field_is_skipped() {
    let runtime = strict();
    let owner = 0u8;
    let access = Access::new(&owner, "tags");
    let mut tags = vec!["a"];
    let mut shadow = vec!["z"];
    let nested = RefCell::new(None);

    let request = AddElements::<&str>::new().before(|_, _| {
        let result = runtime.add_to_list(access, &mut shadow, vec!["q"], AddElements::new());
        *nested.borrow_mut() = Some(result.unwrap());
        true
    });

    assert!(runtime
        .add_to_list(access, &mut tags, vec!["b"], request)
        .unwrap());
    assert_eq!(*nested.borrow(), Some(false));
    assert_eq!(shadow, vec!["z"]);
    assert_eq!(tags, vec!["a", "b"]);
}

#[test]
fn test_write_lock_held_during_hooks() {
    let runtime = strict();
    let owner = 0u8;
    let mut tags: Vec<&str> = Vec::new();

    let request = AddElements::<&str>::new().before(|_, _| {
        runtime.named_locks().get("tags-lock").unwrap().is_write_locked()
    });

    let added = runtime
        .add_to_list(
            Access::new(&owner, "tags").with_lock("tags-lock"),
            &mut tags,
            vec!["a"],
            request,
        )
        .unwrap();
    assert!(added);
    assert!(!runtime.named_locks().get("tags-lock").unwrap().is_write_locked());
}
