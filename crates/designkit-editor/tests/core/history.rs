use designkit_editor::History;
use proptest::prelude::*;

fn seeded(n: usize) -> History {
    let mut history = History::new();
    history.initialize("s0".to_string());
    for i in 1..=n {
        history.checkpoint(format!("s{}", i));
    }
    history
}

#[test]
fn test_initialize_seeds_one_snapshot() {
    let history = seeded(0);
    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), Some(0));
    assert_eq!(history.current(), Some("s0"));
    assert!(!history.can_undo());
}

#[test]
fn test_undo_redo_walk() {
    let mut history = seeded(2);
    assert_eq!(history.undo(), Some("s1"));
    assert_eq!(history.undo(), Some("s0"));
    assert_eq!(history.undo(), None);
    assert_eq!(history.cursor(), Some(0));

    assert_eq!(history.redo(), Some("s1"));
    assert_eq!(history.redo(), Some("s2"));
    assert_eq!(history.redo(), None);
    assert_eq!(history.cursor(), Some(2));
}

#[test]
fn test_checkpoint_after_undo_truncates_redo_tail() {
    let mut history = seeded(3);
    history.undo();
    history.undo();

    let len = history.checkpoint("branch".to_string());
    assert_eq!(len, 3);
    assert_eq!(history.current(), Some("branch"));
    assert!(!history.can_redo());
    assert_eq!(history.undo(), Some("s1"));
}

#[test]
fn test_checkpoint_before_initialize_starts_fresh() {
    let mut history = History::new();
    assert_eq!(history.checkpoint("only".to_string()), 1);
    assert_eq!(history.cursor(), Some(0));
}

proptest! {
    #[test]
    fn prop_truncation_law(n in 1usize..30, back in 0usize..30) {
        let mut history = seeded(n);
        let steps = back.min(n);
        for _ in 0..steps {
            history.undo();
        }
        let k = n - steps;
        prop_assert_eq!(history.cursor(), Some(k));

        history.checkpoint("next".to_string());
        prop_assert_eq!(history.len(), k + 2);
        prop_assert_eq!(history.cursor(), Some(k + 1));
        prop_assert!(!history.can_redo());
    }

    #[test]
    fn prop_limit_is_respected(limit in 1usize..10, n in 0usize..40) {
        let mut history = History::with_limit(Some(limit));
        history.initialize("s0".to_string());
        for i in 1..=n {
            history.checkpoint(format!("s{}", i));
        }
        prop_assert!(history.len() <= limit.max(1));
        let expected = format!("s{}", n);
        prop_assert_eq!(history.current(), Some(expected.as_str()));
    }
}
