use std::time::{Duration, Instant};

use designkit_core::{AppEvent, EventBus, EventCategory, EventFilter, HistoryEvent};
use designkit_editor::{
    Editor, EditorConfig, EditorMount, HeadlessCanvas, ReorderDirection, ShapeOverrides, Size,
};
use parking_lot::Mutex;
use std::sync::Arc;

fn editor() -> (Editor, HeadlessCanvas) {
    let canvas = HeadlessCanvas::new();
    let editor = Editor::new(
        Box::new(canvas.clone()),
        Size::new(1000.0, 800.0),
        EditorConfig::default(),
        EventBus::new(),
    )
    .expect("editor");
    (editor, canvas)
}

#[test]
fn test_mount_failure_leaves_mount_empty() {
    let mut mount = EditorMount::mount(
        Box::new(HeadlessCanvas::detached()),
        Size::new(1000.0, 800.0),
        EditorConfig::default(),
        EventBus::new(),
    );
    assert!(!mount.is_mounted());
    assert!(mount.editor().is_none());
    mount.unmount();
}

#[test]
fn test_mount_and_unmount() {
    let canvas = HeadlessCanvas::new();
    let mut mount = EditorMount::mount(
        Box::new(canvas.clone()),
        Size::new(1000.0, 800.0),
        EditorConfig::default(),
        EventBus::new(),
    );
    let editor = mount.editor().expect("mounted");
    editor.lock().add_circle(&ShapeOverrides::default());
    mount.unmount();

    assert!(!mount.is_mounted());
    assert!(canvas.state().released);
    assert!(editor.lock().is_disposed());
}

#[test]
fn test_initial_fit_and_history() {
    let (editor, canvas) = editor();
    assert_eq!(editor.history().len(), 1);
    let zoom = editor.surface().viewport().zoom();
    assert!((zoom - 0.85 * (800.0 / 1200.0)).abs() < 1e-9);
    assert_eq!(canvas.state().transform, editor.surface().viewport().transform());
}

#[test]
fn test_every_mutation_checkpoints() {
    let (mut editor, _) = editor();
    let id = editor.add_rectangle(&ShapeOverrides::default()).expect("added");
    assert_eq!(editor.history().len(), 2);

    editor.set_stroke_width(5.0);
    assert_eq!(editor.history().len(), 3);

    editor.reorder(id, ReorderDirection::Backward);
    assert_eq!(editor.history().len(), 3, "no move, no checkpoint");

    editor.bring_forward();
    assert_eq!(editor.history().len(), 4);

    editor.delete_selected();
    assert_eq!(editor.history().len(), 5);
}

#[test]
fn test_reorder_keeps_the_selection_stacking_order() {
    let (mut editor, _) = editor();
    let low = editor.add_rectangle(&ShapeOverrides::default()).expect("low");
    let mid = editor.add_circle(&ShapeOverrides::default()).expect("mid");
    let top = editor.add_triangle(&ShapeOverrides::default()).expect("top");
    let z = |editor: &Editor, id| editor.surface().z_index(id).expect("z");

    // The top object cannot rise, so the one under it stays put too.
    editor.select_many(&[mid, top]);
    assert_eq!(editor.bring_forward(), 0);
    assert_eq!((z(&editor, low), z(&editor, mid), z(&editor, top)), (1, 2, 3));

    editor.select_many(&[low, mid]);
    assert_eq!(editor.bring_forward(), 2);
    assert_eq!((z(&editor, top), z(&editor, low), z(&editor, mid)), (1, 2, 3));

    // Now `top` sits just above the workspace.
    editor.select_many(&[top, low]);
    assert_eq!(editor.send_backwards(), 0);
    assert_eq!((z(&editor, top), z(&editor, low)), (1, 2));
}

#[test]
fn test_undo_redo_restore_objects() {
    let (mut editor, _) = editor();
    let bus_events = Arc::new(Mutex::new(Vec::new()));
    let sink = bus_events.clone();
    editor.bus().subscribe(
        EventFilter::Categories(vec![EventCategory::History]),
        move |event| {
            if let AppEvent::History(e) = event {
                sink.lock().push(e);
            }
        },
    );

    let id = editor.add_circle(&ShapeOverrides::default()).expect("added");
    assert!(editor.can_undo());

    assert!(editor.undo());
    assert!(editor.surface().object(id).is_none());
    assert!(editor.selection().is_empty());
    assert_eq!(editor.history().len(), 2, "undo never checkpoints");

    assert!(editor.redo());
    assert!(editor.surface().object(id).is_some());
    assert!(!editor.redo());

    let events = bus_events.lock();
    assert_eq!(
        events.as_slice(),
        &[
            HistoryEvent::Checkpoint { len: 2, cursor: 1 },
            HistoryEvent::Undo { cursor: 0 },
            HistoryEvent::Redo { cursor: 1 },
        ]
    );
}

#[test]
fn test_checkpoint_after_undo_drops_redo() {
    let (mut editor, _) = editor();
    editor.add_circle(&ShapeOverrides::default());
    editor.add_triangle(&ShapeOverrides::default());
    editor.undo();

    editor.add_diamond(&ShapeOverrides::default());
    assert!(!editor.can_redo());
    assert_eq!(editor.history().len(), 3);
}

#[test]
fn test_identical_resizes_apply_once() {
    let (mut editor, canvas) = editor();
    let renders = canvas.state().render_count;

    assert!(editor.resize(Size::new(1200.0, 900.0)).is_some());
    assert!(editor.resize(Size::new(1200.0, 900.0)).is_none());
    assert_eq!(canvas.state().render_count, renders + 1);
}

#[test]
fn test_resize_burst_is_debounced() {
    let (mut editor, _) = editor();
    let t0 = Instant::now();
    let ms = Duration::from_millis(1);

    editor.request_resize(Size::new(900.0, 700.0), t0);
    editor.request_resize(Size::new(950.0, 700.0), t0 + 20 * ms);
    assert_eq!(editor.poll_resize(t0 + 60 * ms), None);

    let zoom = editor.poll_resize(t0 + 150 * ms).expect("applied");
    assert!((zoom - 0.85 * (700.0 / 1200.0)).abs() < 1e-9);
    assert_eq!(editor.surface().viewport().canvas_width(), 950.0);
    assert_eq!(editor.poll_resize(t0 + 400 * ms), None);
}

#[test]
fn test_dispose_turns_operations_into_no_ops() {
    let (mut editor, canvas) = editor();
    editor.dispose();
    editor.dispose();

    assert!(canvas.state().released);
    assert_eq!(editor.add_rectangle(&ShapeOverrides::default()), None);
    assert_eq!(editor.set_stroke_width(3.0), 0);
    assert!(!editor.undo());
    assert_eq!(editor.resize(Size::new(10.0, 10.0)), None);
    assert_eq!(editor.history().len(), 1);
    assert!(!editor.try_begin_image_processing());
}

#[test]
fn test_image_processing_slot_is_exclusive() {
    let (mut editor, _) = editor();
    assert!(editor.try_begin_image_processing());
    assert!(!editor.try_begin_image_processing());
    editor.finish_image_processing();
    assert!(editor.try_begin_image_processing());
}
