use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use designkit_core::{AppEvent, EventBus, EventCategory, EventFilter, SelectionEvent};
use designkit_editor::{Editor, EditorConfig, HeadlessCanvas, ShapeOverrides, Size};
use parking_lot::Mutex;

fn editor_with_events() -> (Editor, Arc<Mutex<Vec<SelectionEvent>>>) {
    let bus = EventBus::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    bus.subscribe(
        EventFilter::Categories(vec![EventCategory::Selection]),
        move |event| {
            if let AppEvent::Selection(e) = event {
                sink.lock().push(e);
            }
        },
    );
    let editor = Editor::new(
        Box::new(HeadlessCanvas::new()),
        Size::new(1000.0, 800.0),
        EditorConfig::default(),
        bus,
    )
    .expect("editor");
    (editor, events)
}

#[test]
fn test_add_publishes_changed_with_new_object() {
    let (mut editor, events) = editor_with_events();
    let id = editor.add_rectangle(&ShapeOverrides::default()).expect("added");

    assert!(editor.is_object_selected(id));
    assert_eq!(
        events.lock().last(),
        Some(&SelectionEvent::Changed { selected: vec![id] })
    );
}

#[test]
fn test_select_all_skips_workspace() {
    let (mut editor, _) = editor_with_events();
    let a = editor.add_circle(&ShapeOverrides::default()).expect("added");
    let b = editor.add_triangle(&ShapeOverrides::default()).expect("added");

    editor.select_all();
    assert_eq!(editor.selection().selected_ids(), &[a, b]);
    assert_eq!(editor.active_objects().len(), 2);
}

#[test]
fn test_clear_runs_callback_and_publishes() {
    let (mut editor, events) = editor_with_events();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    editor.on_selection_cleared(Some(Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })));

    editor.add_rectangle(&ShapeOverrides::default());
    editor.clear_selection();

    assert!(editor.selection().is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(events.lock().last(), Some(&SelectionEvent::Cleared));

    // Clearing an empty selection raises nothing.
    editor.clear_selection();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_delete_removes_from_selection() {
    let (mut editor, _) = editor_with_events();
    let id = editor.add_rectangle(&ShapeOverrides::default()).expect("added");

    assert_eq!(editor.delete_selected(), 1);
    assert!(!editor.is_object_selected(id));
    assert!(editor.surface().object(id).is_none());
}

#[test]
fn test_select_unknown_id_is_ignored() {
    let (mut editor, events) = editor_with_events();
    let before = events.lock().len();
    editor.select(designkit_core::ObjectId::new());
    assert!(editor.selection().is_empty());
    assert_eq!(events.lock().len(), before);
}
