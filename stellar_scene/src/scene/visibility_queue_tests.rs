use super::*;

#[test]
fn test_push_appends_then_reuses_slots() {
    let mut queue = VisibilityQueue::new();
    queue.begin();
    queue.push(1);
    queue.push(2);
    queue.push(3);
    assert_eq!(queue.live(), &[1, 2, 3]);

    queue.begin();
    queue.push(9);
    assert_eq!(queue.live(), &[9]);
    assert_eq!(queue.slot_count(), 3);
}

#[test]
fn test_trim_drops_one_slot_per_call() {
    let mut queue = VisibilityQueue::new();
    queue.begin();
    for i in 0..4 {
        queue.push(i);
    }
    queue.begin();
    queue.push(7);

    queue.trim();
    assert_eq!(queue.slot_count(), 3);
    queue.trim();
    queue.trim();
    assert_eq!(queue.slot_count(), 1);
    queue.trim();
    assert_eq!(queue.slot_count(), 1);
    assert_eq!(queue.live(), &[7]);
}

#[test]
fn test_grow_after_shrink() {
    let mut queue = VisibilityQueue::new();
    queue.begin();
    queue.push('a');
    queue.begin();
    queue.push('b');
    queue.push('c');
    assert_eq!(queue.live(), &['b', 'c']);
    assert_eq!(queue.len(), 2);
    assert!(!queue.is_empty());
}

#[test]
fn test_clear_releases_slots() {
    let mut queue = VisibilityQueue::new();
    queue.push(1u8);
    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.slot_count(), 0);
}
