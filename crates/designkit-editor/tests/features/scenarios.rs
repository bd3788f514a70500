//! End-to-end editing sessions.

use designkit_core::EventBus;
use designkit_editor::{
    Editor, EditorConfig, HeadlessCanvas, Paint, ShapeOverrides, Size, TextPreset,
};

fn editor() -> Editor {
    Editor::new(
        Box::new(HeadlessCanvas::new()),
        Size::new(1000.0, 800.0),
        EditorConfig::default(),
        EventBus::new(),
    )
    .expect("editor")
}

#[test]
fn test_recolour_rectangle_then_undo() {
    let mut editor = editor();
    let id = editor.add_rectangle(&ShapeOverrides::default()).expect("rect");
    assert_eq!(editor.fill_color(), "rgba(0, 0, 0, 1)");
    let before = editor.history().len();

    assert_eq!(editor.set_fill_color("#ff0000"), Ok(1));
    assert_eq!(editor.fill_color(), "#ff0000");
    assert_eq!(editor.history().len(), before + 1);

    editor.undo();
    assert_eq!(
        editor.surface().object(id).and_then(|o| o.fill.clone()),
        Some(Paint::solid("rgba(0, 0, 0, 1)"))
    );
}

#[test]
fn test_heading_bold_toggle_round_trip() {
    let mut editor = editor();
    editor.add_text_preset(TextPreset::Heading);
    assert_eq!(editor.font_size(), 80.0);
    assert_eq!(editor.font_weight(), 700);

    editor.toggle_bold();
    assert_eq!(editor.font_weight(), 400);
    editor.toggle_bold();
    assert_eq!(editor.font_weight(), 700);
}

#[test]
fn test_repeated_container_size_refits_once() {
    let mut editor = editor();
    let size = Size::new(1400.0, 1000.0);

    let zoom = editor.resize(size).expect("first resize");
    let history = editor.history().len();
    assert_eq!(editor.resize(size), None);
    assert_eq!(editor.surface().viewport().zoom(), zoom);
    assert_eq!(editor.history().len(), history);
}

#[test]
fn test_zoom_then_same_size_refits_again() {
    let mut editor = editor();
    let size = Size::new(1400.0, 1000.0);
    let fit = editor.resize(size).expect("fit");

    editor.zoom_in();
    assert!(editor.surface().viewport().zoom() > fit);
    assert_eq!(editor.resize(size), Some(fit));
}

#[test]
fn test_group_delete_and_undo() {
    let mut editor = editor();
    let a = editor.add_circle(&ShapeOverrides::default()).expect("a");
    let b = editor.add_triangle(&ShapeOverrides::default()).expect("b");
    editor.select_many(&[a, b]);

    let group = editor.group_selected().expect("group");
    assert_eq!(editor.selection().selected_ids(), &[group]);
    assert_eq!(editor.surface().content().count(), 1);

    assert_eq!(editor.delete_selected(), 1);
    assert_eq!(editor.surface().content().count(), 0);

    editor.undo();
    assert!(editor.surface().object(group).is_some());
}
