use designkit_core::{EventBus, ExportError};
use designkit_editor::{
    export_svg, Editor, EditorConfig, GradientDirection, GradientGeometry, GradientRequest,
    HeadlessCanvas, ObjectKind, SceneObject, ShapeOverrides, Size,
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
fn test_root_matches_workspace_bounds() {
    let editor = editor();
    let svg = editor.export_vector().expect("export");

    // 900x1200 workspace centred in a 1000x800 container.
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains(r#"width="900" height="1200" viewBox="50 -200 900 1200""#));
    assert!(svg.contains(
        r#"<clipPath id="workspace-clip"><rect x="50" y="-200" width="900" height="1200"/></clipPath>"#
    ));
    assert!(svg.contains(r#"<g clip-path="url(#workspace-clip)">"#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_objects_outside_workspace_are_omitted() {
    let mut editor = editor();
    editor.add_circle(&ShapeOverrides::default());

    let mut objects = editor.surface().objects().to_vec();
    let far = SceneObject::new(ObjectKind::Rect {
        width: 10.0,
        height: 10.0,
        rx: 0.0,
        ry: 0.0,
    })
    .with_fill("#123456")
    .with_position(5000.0, 5000.0);
    objects.push(far);

    let svg = export_svg(&objects).expect("export");
    assert!(svg.contains("<circle"));
    assert!(!svg.contains("#123456"));
}

#[test]
fn test_text_and_stroke_attributes() {
    let mut editor = editor();
    editor.add_text("Tom & Jerry", &Default::default());
    editor.set_font_underline(true);

    let svg = editor.export_vector().expect("export");
    assert!(svg.contains("<text font-family=\"Arial\""));
    assert!(svg.contains("text-decoration=\"underline\""));
    assert!(svg.contains(">Tom &amp; Jerry</tspan>"));
    assert!(svg.contains("stroke=\"none\""));
}

#[test]
fn test_gradient_fill_is_written_to_defs() {
    let mut editor = editor();
    editor.add_rectangle(&ShapeOverrides::default());
    let request = GradientRequest::two_color(
        GradientGeometry::Direction(GradientDirection::Horizontal),
        "#ff0000",
        "#0000ff",
    )
    .expect("stops");
    editor.apply_gradient(&request).expect("gradient");

    let svg = editor.export_vector().expect("export");
    assert!(svg.contains(
        r#"<linearGradient id="gradient-1" gradientUnits="userSpaceOnUse" x1="-200" y1="0" x2="200" y2="0">"#
    ));
    assert!(svg.contains(r##"<stop offset="0%" stop-color="#ff0000"/>"##));
    assert!(svg.contains(r##"<stop offset="100%" stop-color="#0000ff"/>"##));
    assert!(svg.contains(r#"fill="url(#gradient-1)""#));
}

#[test]
fn test_export_without_workspace_fails() {
    assert!(matches!(
        export_svg(&[]),
        Err(ExportError::WorkspaceNotFound)
    ));
}
