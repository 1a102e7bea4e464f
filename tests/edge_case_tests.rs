//! Edge case tests for handle misuse and degenerate heaps
//!
//! These tests target the error paths:
//! - Empty heap operations
//! - Stale handles (deleted or popped items)
//! - Handles from another heap, before and after merging
//! - Equal keys and single element heaps

use hollow_heap::{HeapError, HollowHeap, ItemHandle};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_empty_heap_errors_are_idempotent() {
    init_logging();
    let mut heap: HollowHeap<u32, u32> = HollowHeap::new();

    for _ in 0..3 {
        assert_eq!(heap.get_minimum(), Err(HeapError::Empty));
        assert_eq!(heap.delete_minimum(), Err(HeapError::Empty));
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert!(heap.verify_heap_order());
    }

    // The heap is still usable afterwards
    heap.insert(1, 10);
    assert_eq!(heap.get_minimum(), Ok((&10, &1)));
}

#[test]
fn test_single_element() {
    init_logging();
    let mut heap = HollowHeap::new();
    let only = heap.insert("only", 42);

    assert_eq!(heap.key_of(&only), Ok(42));
    heap.reduce_key(&only, 42).unwrap();
    heap.reduce_key(&only, 41).unwrap();
    assert_eq!(heap.get_minimum(), Ok((&41, &"only")));

    assert_eq!(heap.delete_item(&only), Ok((41, "only")));
    assert!(heap.is_empty());
    assert_eq!(heap.get_minimum(), Err(HeapError::Empty));
    assert!(!only.is_live());
}

#[test]
fn test_popped_handle_is_invalid() {
    init_logging();
    let mut heap = HollowHeap::new();
    let low = heap.insert('a', 1);
    let high = heap.insert('b', 2);

    assert_eq!(heap.delete_minimum(), Ok((1, 'a')));
    assert!(!low.is_live());
    assert!(!heap.contains(&low));
    assert_eq!(heap.key_of(&low), Err(HeapError::InvalidHandle));
    assert_eq!(heap.reduce_key(&low, 0), Err(HeapError::InvalidHandle));
    assert_eq!(heap.delete_item(&low), Err(HeapError::InvalidHandle));

    // The remaining item is untouched
    assert!(heap.contains(&high));
    assert_eq!(heap.len(), 1);
    assert_eq!(heap.get_minimum(), Ok((&2, &'b')));
}

#[test]
fn test_rejected_increase_leaves_heap_unchanged() {
    init_logging();
    let mut heap = HollowHeap::new();
    let handles: Vec<ItemHandle<i32, i32>> = (0..16).map(|i| heap.insert(i, i * 3)).collect();
    assert_eq!(heap.delete_minimum(), Ok((0, 0)));

    for handle in &handles[1..] {
        let key = heap.key_of(handle).unwrap();
        assert_eq!(
            heap.reduce_key(handle, key + 1),
            Err(HeapError::PriorityIncreased)
        );
        assert_eq!(heap.key_of(handle), Ok(key));
    }
    assert_eq!(heap.len(), 15);
    assert!(heap.verify_heap_order());
}

#[test]
fn test_equal_key_reduce_on_interior_node() {
    init_logging();
    let mut heap = HollowHeap::new();
    let handles: Vec<_> = (0..8).map(|i| heap.insert(i, 10 + i)).collect();
    heap.insert(-1, 0);
    assert_eq!(heap.delete_minimum(), Ok((0, -1)));

    // Every item keeps its key but moves to a new node
    for (i, handle) in handles.iter().enumerate() {
        assert_eq!(heap.reduce_key(handle, 10 + i as i32), Ok(()));
    }
    assert!(heap.verify_heap_order());

    let drained: Vec<i32> =
        std::iter::from_fn(|| heap.delete_minimum().ok().map(|(_, v)| v)).collect();
    assert_eq!(drained, (0..8).collect::<Vec<_>>());
}

#[test]
fn test_foreign_handle_after_unrelated_merge() {
    init_logging();
    let mut first = HollowHeap::new();
    let mut second = HollowHeap::new();
    let third_handle = {
        let mut third = HollowHeap::new();
        let handle = third.insert("c", 3);
        second.merge_heap(third);
        handle
    };
    let a = first.insert("a", 1);

    // `third` now lives inside `second`, not `first`
    assert_eq!(
        first.reduce_key(&third_handle, 0),
        Err(HeapError::ForeignHandle)
    );
    assert_eq!(
        first.delete_item(&third_handle),
        Err(HeapError::ForeignHandle)
    );
    assert_eq!(second.key_of(&third_handle), Ok(3));
    assert_eq!(second.reduce_key(&a, 0), Err(HeapError::ForeignHandle));

    // Until `second` is merged into `first` too
    first.merge_heap(second);
    assert_eq!(first.delete_item(&third_handle), Ok((3, "c")));
    assert_eq!(first.len(), 1);
}

#[test]
fn test_stale_handle_reports_invalid_before_foreign() {
    init_logging();
    let mut first: HollowHeap<&str, i32> = HollowHeap::new();
    let mut second: HollowHeap<&str, i32> = HollowHeap::new();
    let a = first.insert("a", 1);
    second.insert("b", 2);

    first.delete_item(&a).unwrap();
    assert_eq!(second.delete_item(&a), Err(HeapError::InvalidHandle));
}

#[test]
fn test_merge_with_empty_heaps() {
    init_logging();
    let mut heap: HollowHeap<&str, i32> = HollowHeap::new();
    heap.merge_heap(HollowHeap::new());
    assert!(heap.is_empty());
    assert!(heap.verify_heap_order());

    let mut other = HollowHeap::new();
    let x = other.insert("x", 5);
    heap.merge_heap(other);
    assert_eq!(heap.len(), 1);
    assert!(heap.contains(&x));

    let mut empty: HollowHeap<&str, i32> = HollowHeap::new();
    empty.merge_heap(heap);
    assert_eq!(empty.get_minimum(), Ok((&5, &"x")));
    assert!(empty.contains(&x));
}

#[test]
fn test_handle_clone_and_equality() {
    init_logging();
    let mut heap = HollowHeap::new();
    let a = heap.insert(1u8, 1);
    let b = heap.insert(2u8, 2);
    let a2 = a.clone();

    assert_eq!(a, a2);
    assert_ne!(a, b);

    heap.reduce_key(&a2, 0).unwrap();
    assert_eq!(heap.key_of(&a), Ok(0));
    assert_eq!(heap.delete_item(&a), Ok((0, 1)));
    assert_eq!(heap.delete_item(&a2), Err(HeapError::InvalidHandle));
}

#[test]
fn test_all_equal_keys() {
    init_logging();
    let mut heap = HollowHeap::new();
    let handles: Vec<_> = (0..100).map(|i| heap.insert(i, 7)).collect();

    for handle in handles.iter().step_by(5) {
        heap.reduce_key(handle, 7).unwrap();
    }
    for handle in handles.iter().skip(2).step_by(5) {
        heap.delete_item(handle).unwrap();
    }

    let mut count = 0;
    while let Ok((key, _)) = heap.delete_minimum() {
        assert_eq!(key, 7);
        count += 1;
    }
    assert_eq!(count, 80);
}

#[test]
fn test_delete_every_item_by_handle() {
    init_logging();
    let mut heap = HollowHeap::new();
    let handles: Vec<_> = (0..64).rev().map(|i| heap.insert(i, i)).collect();

    // Largest keys first, alternating so root and interior deletions mix
    let order = handles.iter().step_by(2).chain(handles.iter().skip(1).step_by(2));
    for handle in order {
        assert!(heap.delete_item(handle).is_ok());
        assert!(heap.verify_heap_order());
    }
    assert!(heap.is_empty());
    assert_eq!(heap.delete_minimum(), Err(HeapError::Empty));
}

#[test]
fn test_error_messages() {
    assert_eq!(HeapError::Empty.to_string(), "heap is empty");
    assert!(HeapError::ForeignHandle.to_string().contains("different heap"));
}
