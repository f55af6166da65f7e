use std::collections::HashSet;

use pdftile::color::{DeviceColor, DeviceColorSpace, PatternColorSpace};
use pdftile::content::ContentEmitter;
use pdftile::geom::{BBox, Transform};
use pdftile::object::{Dict, Name, Object};
use pdftile::path::{emit_polygon, FillRule, LineCap, PaintMode, Polygon, Ring};
use pdftile::pattern::{PaintType, TilingPattern, TilingPatternBuilder, TilingType};
use pdftile::resource::ResourceDictionary;
use pdftile::{Document, SerializeSettings, TileError};

fn diagonal_cell() -> Vec<u8> {
    let mut cell: Vec<u8> = Vec::new();
    let mut emitter = ContentEmitter::new(&mut cell);
    emitter.set_line_cap(LineCap::Square);
    emitter.move_to(0.0, 0.0).unwrap();
    emitter.line_to(12.0, 12.0).unwrap();
    emitter.paint(PaintMode::Stroke);

    cell
}

fn diagonal_pattern() -> TilingPattern {
    TilingPatternBuilder::new(
        PaintType::Uncolored,
        TilingType::ConstantSpacing,
        BBox::new(0.0, 0.0, 12.0, 12.0),
        10.0,
        10.0,
        diagonal_cell(),
    )
    .build()
    .unwrap()
}

fn square_with_hole() -> Polygon {
    Polygon::new(
        Ring::from_xy([(10.0, 10.0), (90.0, 10.0), (90.0, 90.0), (10.0, 90.0)]),
        vec![Ring::from_xy([
            (40.0, 50.0),
            (50.0, 60.0),
            (60.0, 50.0),
            (50.0, 40.0),
        ])],
    )
}

#[test]
fn cell_built_with_emitter() {
    assert_eq!(diagonal_cell(), b"2 J\n0 0 m\n12 12 l\nS\n");

    let pattern = diagonal_pattern();
    assert_eq!(pattern.content(), b"2 J\n0 0 m\n12 12 l\nS\n");
    assert_eq!(pattern.paint_type(), Some(PaintType::Uncolored));
    assert_eq!(pattern.bbox(), Some(BBox::new(0.0, 0.0, 12.0, 12.0)));
    assert_eq!(pattern.x_step(), Some(10.0));
    assert_eq!(pattern.y_step(), Some(10.0));
}

#[test]
fn fill_square_with_hole() {
    let _ = env_logger::builder().is_test(true).try_init();

    let pattern = diagonal_pattern();
    let mut resources = ResourceDictionary::new();
    let cs = resources
        .add_color_space(PatternColorSpace::uncolored(DeviceColorSpace::Cmyk))
        .unwrap();
    let p = resources.add_pattern(&pattern).unwrap();

    let mut content: Vec<u8> = Vec::new();
    let mut emitter = ContentEmitter::new(&mut content);
    emitter.set_fill_color_space(&cs);
    emitter
        .set_fill_pattern(&p, Some(&[1.0, 0.0, 0.0, 0.0]))
        .unwrap();
    emit_polygon(
        &square_with_hole(),
        &mut emitter,
        PaintMode::FillStroke(FillRule::NonZero),
    )
    .unwrap();

    let content = String::from_utf8(content).unwrap();
    assert_eq!(
        content,
        "/cs1 cs\n1 0 0 0 /p1 scn\n\
         10 10 m\n90 10 l\n90 90 l\n10 90 l\nh\n\
         40 50 m\n50 60 l\n60 50 l\n50 40 l\nh\n\
         B\n"
    );
    assert_eq!(content.lines().filter(|line| *line == "h").count(), 2);
    assert_eq!(content.lines().last(), Some("B"));

    let stored = resources.get("Pattern", &p).unwrap();
    assert_eq!(stored, &pattern.to_object());
}

#[test]
fn registered_names_are_unique() {
    let pattern = diagonal_pattern();
    let mut existing = Dict::new();
    existing.insert(Name::new("p2").unwrap(), 0);
    let mut dict = Dict::new();
    dict.insert(Name::new("Pattern").unwrap(), existing);

    let mut resources = ResourceDictionary::from_dict(dict);
    let names = (0..20)
        .map(|_| resources.add_pattern(&pattern).unwrap())
        .collect::<Vec<_>>();

    let unique = names.iter().map(Name::as_str).collect::<HashSet<_>>();
    assert_eq!(unique.len(), 20);
    assert!(!unique.contains("p2"));
    assert_eq!(names[0].as_str(), "p1");
    assert_eq!(names[1].as_str(), "p3");

    let patterns = resources
        .as_dict()
        .get("Pattern")
        .and_then(Object::as_dict)
        .unwrap();
    assert_eq!(patterns.get("p2"), Some(&Object::Integer(0)));
    assert_eq!(patterns.len(), 21);
}

#[test]
fn building_twice_gives_equal_patterns() {
    let builder = TilingPatternBuilder::new(
        PaintType::Colored,
        TilingType::NoDistortion,
        BBox::from_size(600.0, 600.0),
        600.0,
        600.0,
        "0 0 1 rg 0 0 10 10 re f",
    )
    .with_transform(Transform::from_scale(0.125, 0.125));

    let first = builder.clone().build().unwrap();
    let second = builder.build().unwrap();

    assert_eq!(first, second);
    assert!(!first.ptr_eq(&second));
    assert_eq!(first.matrix(), Some([0.125, 0.0, 0.0, 0.125, 0.0, 0.0]));
}

#[test]
fn invalid_input_changes_nothing() {
    let mut resources = ResourceDictionary::new();
    let p = resources.add_pattern(&diagonal_pattern()).unwrap();

    let mut content: Vec<u8> = Vec::new();
    let mut emitter = ContentEmitter::new(&mut content);
    assert!(matches!(
        emitter.set_fill_pattern(&p, Some(&[1.5, 0.0, 0.0, 0.0])),
        Err(TileError::InvalidParameter(_))
    ));
    assert!(matches!(
        emitter.set_fill_color(&DeviceColor::Rgb(0.0, f32::NAN, 0.0).into()),
        Err(TileError::EncodingError(_))
    ));
    assert!(content.is_empty());

    assert!(matches!(
        TilingPatternBuilder::new(
            PaintType::Colored,
            TilingType::ConstantSpacing,
            BBox::from_size(10.0, 10.0),
            0.0,
            10.0,
            "",
        )
        .build(),
        Err(TileError::InvalidParameter(_))
    ));
}

#[test]
fn full_document() {
    let pattern = diagonal_pattern();
    let mut document = Document::new_with(SerializeSettings::default());
    let page = document.start_page(100.0, 100.0).unwrap();
    let (resources, mut content) = page.resources_and_content();

    let cs = resources
        .add_color_space(PatternColorSpace::uncolored(DeviceColorSpace::Cmyk))
        .unwrap();
    let p = resources.add_pattern(&pattern).unwrap();

    content.set_fill_color_space(&cs);
    content
        .set_fill_pattern(&p, Some(&[1.0, 0.0, 0.0, 0.0]))
        .unwrap();
    emit_polygon(
        &square_with_hole(),
        &mut content,
        PaintMode::CloseFillStroke(FillRule::EvenOdd),
    )
    .unwrap();

    let pdf = document.finish().unwrap();
    let text = String::from_utf8_lossy(&pdf);

    assert!(text.starts_with("%PDF-1.7"));
    assert!(text.contains("/PatternType 1"));
    assert!(text.contains("/PaintType 2"));
    assert!(text.contains("/BBox [0 0 12 12]"));
    assert!(text.contains("/Pattern /DeviceCMYK"));
    assert!(text.contains("2 J\n0 0 m\n12 12 l\nS\n"));
    assert!(text.contains("1 0 0 0 /p1 scn\n"));
    assert!(text.contains("b*\n"));
}
