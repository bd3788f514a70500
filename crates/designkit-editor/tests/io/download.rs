use chrono::Utc;
use designkit_core::EventBus;
use designkit_editor::export::export_file_name;
use designkit_editor::{Editor, EditorConfig, ExportFormat, HeadlessCanvas, ShapeOverrides, Size};
use tempfile::TempDir;

fn editor() -> Editor {
    let mut editor = Editor::new(
        Box::new(HeadlessCanvas::new()),
        Size::new(1000.0, 800.0),
        EditorConfig::default(),
        EventBus::new(),
    )
    .expect("editor");
    editor.add_diamond(&ShapeOverrides::default());
    editor
}

#[test]
fn test_download_uses_dated_default_name() {
    let dir = TempDir::new().expect("tempdir");
    let editor = editor();

    let path = editor
        .download(ExportFormat::Svg, None, dir.path())
        .expect("download");

    let name = path.file_name().and_then(|n| n.to_str()).expect("name");
    assert_eq!(name, export_file_name(None, ExportFormat::Svg, Utc::now()));
    assert!(name.starts_with("canvas-export-"));
    let written = std::fs::read_to_string(&path).expect("read");
    assert!(written.contains("<polygon"));
}

#[test]
fn test_download_named_json_into_new_directory() {
    let dir = TempDir::new().expect("tempdir");
    let nested = dir.path().join("exports").join("today");
    let editor = editor();

    let path = editor
        .download(ExportFormat::Json, Some("poster.json"), &nested)
        .expect("download");

    assert_eq!(path, nested.join("poster.json"));
    let written = std::fs::read_to_string(&path).expect("read");
    let value: serde_json::Value = serde_json::from_str(&written).expect("json");
    assert_eq!(value["objects"][1]["type"], "polygon");
}

#[test]
fn test_format_parsing() {
    assert_eq!("SVG".parse::<ExportFormat>().ok(), Some(ExportFormat::Svg));
    assert!("png".parse::<ExportFormat>().is_err());
}
