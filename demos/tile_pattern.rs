//! This example fills a square with a hole using an uncolored tiling pattern of
//! diagonal strokes, painted in cyan through a CMYK pattern color space.

use pdftile::color::{DeviceColor, DeviceColorSpace, PatternColorSpace};
use pdftile::content::ContentEmitter;
use pdftile::geom::BBox;
use pdftile::object::{Dict, Name};
use pdftile::path::{emit_polygon, FillRule, LineCap, PaintMode, Polygon, Ring};
use pdftile::pattern::{PaintType, TilingPatternBuilder, TilingType};
use pdftile::Document;

fn main() {
    env_logger::init();

    // The cell strokes a line from (0, 0) to (12, 12), but is repeated every 10 points,
    // so neighbouring cells overlap.
    let mut cell: Vec<u8> = Vec::new();
    let mut emitter = ContentEmitter::new(&mut cell);
    emitter.set_line_cap(LineCap::Square);
    emitter.move_to(0.0, 0.0).unwrap();
    emitter.line_to(12.0, 12.0).unwrap();
    emitter.paint(PaintMode::Stroke);

    let pattern = TilingPatternBuilder::new(
        PaintType::Uncolored,
        TilingType::ConstantSpacing,
        BBox::new(0.0, 0.0, 12.0, 12.0),
        10.0,
        10.0,
        cell,
    )
    .build()
    .unwrap();

    let mut document = Document::new();
    let page = document.start_page(100.0, 100.0).unwrap();
    let (resources, mut content) = page.resources_and_content();

    let color_space = resources
        .add_color_space(PatternColorSpace::uncolored(DeviceColorSpace::Cmyk))
        .unwrap();
    let pattern_name = resources.add_pattern(&pattern).unwrap();

    let mut ext_g_state = Dict::new();
    ext_g_state.insert(Name::new("LW").unwrap(), 0.25f32);
    let thin_lines = resources.add_ext_g_state(ext_g_state).unwrap();

    // Magenta background.
    content
        .set_fill_color(&DeviceColor::Cmyk(0.0, 1.0, 0.0, 0.0).into())
        .unwrap();
    content.rect(0.0, 0.0, 100.0, 100.0).unwrap();
    content.paint(PaintMode::Fill(FillRule::NonZero));

    // Yellow outline.
    content
        .set_stroke_color(&DeviceColor::Cmyk(0.0, 0.0, 1.0, 0.0).into())
        .unwrap();
    content.set_ext_g_state(&thin_lines);

    content.set_fill_color_space(&color_space);
    content
        .set_fill_pattern(&pattern_name, Some(&[1.0, 0.0, 0.0, 0.0]))
        .unwrap();

    let polygon = Polygon::new(
        Ring::from_xy([
            (10.0, 10.0),
            (90.0, 10.0),
            (90.0, 90.0),
            (10.0, 90.0),
            (10.0, 10.0),
        ]),
        vec![Ring::from_xy([
            (40.0, 50.0),
            (50.0, 60.0),
            (60.0, 50.0),
            (50.0, 40.0),
            (40.0, 50.0),
        ])],
    );
    emit_polygon(
        &polygon,
        &mut content,
        PaintMode::CloseFillStroke(FillRule::EvenOdd),
    )
    .unwrap();

    // Create the PDF.
    let pdf = document.finish().unwrap();

    // Write the PDF to a file.
    std::fs::write("target/tilepattern.pdf", &pdf).unwrap();
}
