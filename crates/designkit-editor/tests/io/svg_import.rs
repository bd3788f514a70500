use std::io::Cursor;

use designkit_core::{EventBus, ImportError};
use designkit_editor::{
    export_svg, import_raster, Editor, EditorConfig, HeadlessCanvas, ObjectKind, ShapeOverrides,
    Size, SvgImporter,
};

const THREE_PATHS: &str = r##"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" width="1000" height="800" viewBox="0 0 1000 800">
  <!-- <rect width="5" height="5"/> -->
  <defs><linearGradient id="g"><stop offset="0"/></linearGradient></defs>
  <path d="M0 0 L1000 0 L1000 100 Z" fill="#ff0000"/>
  <path d="M0 300 h400 v400 h-400 z" style="fill: #00ff00; stroke: #000000; stroke-width: 4"/>
  <path d="M500,500 C600,400 800,400 900,800" fill="none" stroke="blue"/>
</svg>"##;

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
fn test_multi_path_svg_becomes_one_scaled_group() {
    let object = SvgImporter::default().import_str(THREE_PATHS).expect("import");

    let ObjectKind::Group { objects } = &object.kind else {
        panic!("expected a group, got {}", object.type_name());
    };
    assert_eq!(objects.len(), 3);
    assert!(objects.iter().all(|o| o.type_name() == "path"));

    let bounds = object.bounding_rect();
    assert!(bounds.width.max(bounds.height) <= 500.0 + 1e-6);
    assert!((bounds.width - 500.0).abs() < 1e-6);
}

#[test]
fn test_import_centres_on_workspace_and_selects() {
    let mut editor = editor();
    let id = editor.import_svg(THREE_PATHS).expect("import").expect("added");

    let object = editor.surface().object(id).expect("object");
    let center = object.center();
    let workspace = editor.surface().workspace_center().expect("workspace");
    assert!((center.x - workspace.x).abs() < 1e-6);
    assert!((center.y - workspace.y).abs() < 1e-6);
    assert!(editor.is_object_selected(id));
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn test_single_element_is_not_grouped() {
    let svg = r#"<svg><circle cx="50" cy="50" r="40" fill="red"/></svg>"#;
    let object = SvgImporter::default().import_str(svg).expect("import");
    assert_eq!(object.type_name(), "circle");
    assert_eq!(object.bounding_rect().width, 80.0);
}

#[test]
fn test_element_transform_moves_the_element() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <rect width="10" height="10"/>
  <rect width="10" height="10" transform="translate(300 0)"/>
</svg>"#;
    let object = SvgImporter::default().import_str(svg).expect("import");

    let size = object.scaled_size();
    assert!((size.width - 310.0).abs() < 1e-9);
    assert!((size.height - 10.0).abs() < 1e-9);
}

#[test]
fn test_exported_document_reimports_with_its_placement() {
    let mut editor = editor();
    editor.add_rectangle(&ShapeOverrides::default());
    let mut objects = editor.surface().objects().to_vec();
    let rect = objects.last_mut().expect("rectangle");
    rect.translate(100.0, -50.0);
    rect.transform.angle = 30.0;
    let original = rect.clone();
    let svg = export_svg(&objects).expect("export");

    let object = SvgImporter::new(f64::MAX).import_str(&svg).expect("import");
    let ObjectKind::Group { objects: children } = &object.kind else {
        panic!("expected a group, got {}", object.type_name());
    };
    assert_eq!(children.len(), 2);

    // The workspace rect drives the group size.
    let size = object.scaled_size();
    assert!((size.width - 900.0).abs() < 1e-6);
    assert!((size.height - 1200.0).abs() < 1e-6);

    let (workspace, imported) = (&children[0], &children[1]);
    assert!((imported.transform.angle - 30.0).abs() < 1e-6);
    assert!((imported.scaled_size().width - original.scaled_size().width).abs() < 1e-6);
    assert!((imported.scaled_size().height - original.scaled_size().height).abs() < 1e-6);

    let offset = (
        imported.center().x - workspace.center().x,
        imported.center().y - workspace.center().y,
    );
    let expected = (
        original.center().x - 500.0,
        original.center().y - 400.0,
    );
    assert!((offset.0 - expected.0).abs() < 1e-6);
    assert!((offset.1 - expected.1).abs() < 1e-6);
}

#[test]
fn test_editor_reimports_its_own_export() {
    let mut editor = editor();
    editor.add_circle(&ShapeOverrides::default());
    let svg = editor.export_vector().expect("export");

    let id = editor.import_svg(&svg).expect("import").expect("added");
    let bounds = editor.surface().object(id).expect("object").bounding_rect();
    // 900x1200 workspace fitted to the 500 import limit.
    assert!((bounds.height - 500.0).abs() < 1e-6);
    assert!((bounds.width - 375.0).abs() < 1e-6);
}

#[test]
fn test_svg_without_drawables_is_rejected() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><defs><rect width="1" height="1"/></defs></svg>"#;
    let result = SvgImporter::default().import_str(svg);
    assert!(matches!(result, Err(ImportError::NoDrawableElements)));
}

#[test]
fn test_non_svg_markup_is_rejected() {
    let mut editor = editor();
    let result = editor.import_svg("<html><body/></html>");
    assert!(matches!(result, Err(ImportError::InvalidSvg { .. })));
    assert_eq!(editor.history().len(), 1);
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png)
        .expect("encode png");
    bytes.into_inner()
}

#[test]
fn test_raster_import_embeds_data_url() {
    let object = import_raster(&png(40, 20), 500.0).expect("decode");
    let ObjectKind::Image { src, width, height } = &object.kind else {
        panic!("expected an image");
    };
    assert!(src.starts_with("data:image/png;base64,"));
    assert_eq!((*width, *height), (40.0, 20.0));
    assert_eq!(object.transform.scale_x, 1.0);
}

#[test]
fn test_tall_raster_is_scaled_by_longest_side() {
    let mut editor = editor();
    let id = editor
        .add_image_bytes(&png(100, 2000))
        .expect("decode")
        .expect("added");

    let size = editor.surface().object(id).expect("object").scaled_size();
    assert!((size.height - 500.0).abs() < 1e-9);
    assert!((size.width - 25.0).abs() < 1e-9);
}

#[test]
fn test_tall_remote_image_is_scaled_by_longest_side() {
    let mut editor = editor();
    let id = editor
        .add_image_url("https://cdn.test/poster.jpg", 300.0, 1200.0)
        .expect("added");

    let object = editor.surface().object(id).expect("object");
    assert!((object.transform.scale_x - 500.0 / 1200.0).abs() < 1e-9);
    assert!((object.scaled_size().longest_side() - 500.0).abs() < 1e-9);
}

#[test]
fn test_undecodable_bytes_fail() {
    let mut editor = editor();
    let result = editor.add_image_bytes(b"definitely not an image");
    assert!(matches!(result, Err(ImportError::ImageDecode { .. })));
}
