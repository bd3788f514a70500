use designkit_core::{EventBus, ImportError};
use designkit_editor::{
    DesignDocument, Editor, EditorConfig, HeadlessCanvas, ShapeOverrides, Size, TextFlavour,
    TextOverrides,
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
fn test_document_carries_version_and_metadata() {
    let mut editor = editor().with_project_id("proj-42");
    editor.add_rectangle(&ShapeOverrides::default());

    let json = editor.export_document().expect("export");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");

    assert_eq!(value["version"], "5.3.0");
    assert_eq!(value["metadata"]["projectId"], "proj-42");
    assert_eq!(value["metadata"]["workspaceWidth"], 900.0);
    assert_eq!(value["metadata"]["workspaceHeight"], 1200.0);
    assert!(value["metadata"]["exportedAt"].is_string());

    let objects = value["objects"].as_array().expect("objects");
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0]["name"], "clip");
    assert_eq!(objects[0]["selectable"], false);
    assert_eq!(objects[1]["type"], "rect");
}

#[test]
fn test_text_is_exported_as_textbox() {
    let mut editor = editor();
    let overrides = TextOverrides {
        flavour: Some(TextFlavour::Interactive),
        ..Default::default()
    };
    editor.add_text("hello", &overrides);

    let document = editor.document().expect("document");
    let text = document
        .content()
        .find_map(|o| o.text())
        .expect("text object");
    assert_eq!(text.flavour, TextFlavour::Textbox);

    let json = document.to_json().expect("json");
    assert!(json.contains("\"flavour\": \"textbox\""));
}

#[test]
fn test_load_document_replaces_content() {
    let mut source = editor();
    source.add_circle(&ShapeOverrides::default());
    source.add_text("kept", &TextOverrides::default());
    let json = source.export_document().expect("export");

    let mut target = editor();
    target.add_triangle(&ShapeOverrides::default());
    let workspace = target.surface().workspace().map(|w| w.id);

    let loaded = target.load_document(&json).expect("load");
    assert_eq!(loaded, 2);
    assert_eq!(target.surface().workspace().map(|w| w.id), workspace);

    let kinds: Vec<_> = target.surface().content().map(|o| o.type_name()).collect();
    assert_eq!(kinds, vec!["circle", "text"]);
    assert!(target.can_undo());

    assert!(target.undo());
    let kinds: Vec<_> = target.surface().content().map(|o| o.type_name()).collect();
    assert_eq!(kinds, vec!["triangle"]);
}

#[test]
fn test_load_rejects_bad_documents() {
    let mut editor = editor();
    assert!(matches!(
        editor.load_document("{ not json"),
        Err(ImportError::InvalidDocument { .. })
    ));

    let mut document = editor.document().expect("document");
    let extra = document.objects[0].clone();
    document.objects.push(extra);
    let json = document.to_json().expect("json");
    assert!(matches!(
        DesignDocument::from_json(&json),
        Err(ImportError::InvalidDocument { .. })
    ));
    assert_eq!(editor.history().len(), 1);
}
