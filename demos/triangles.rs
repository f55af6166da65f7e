//! This example writes a pattern cell as raw operators instead of using the emitter,
//! scales it down and paints three shapes with it in black.

use pdftile::color::{DeviceColorSpace, PatternColorSpace};
use pdftile::geom::{BBox, Transform};
use pdftile::path::{emit_polygon, PaintMode, Polygon, Ring};
use pdftile::pattern::{PaintType, TilingPatternBuilder, TilingType};
use pdftile::Document;

const TRIANGLES: &str = concat!(
    " 52 508 m  92 400 l 160 472 l f\r\n",
    "  8 352 m  24 240 l 100 320 l f\r\n",
    " 44 184 m 124 104 l 160 196 l f\r\n",
    "236 396 m 292 308 l 348 384 l f\r\n",
    "200 488 m 312 524 l 240 592 l f\r\n",
    "280 172 m 272 60  l 360 100 l f\r\n",
    "444 528 m 500 448 l 556 544 l f\r\n",
    "436 308 m 388 220 l 504 220 l f\r\n",
    "488 84  m 560 8   l 592 92  l f\r\n",
);

fn main() {
    env_logger::init();

    let pattern = TilingPatternBuilder::new(
        PaintType::Uncolored,
        TilingType::ConstantSpacing,
        BBox::from_size(600.0, 600.0),
        600.0,
        600.0,
        TRIANGLES,
    )
    .with_transform(Transform::from_scale(0.125, 0.125))
    .build()
    .unwrap();

    let mut document = Document::new();
    let page = document.start_page(1000.0, 1000.0).unwrap();
    let (resources, mut content) = page.resources_and_content();

    let pattern_name = resources.add_pattern(&pattern).unwrap();
    let color_space = resources
        .add_color_space(PatternColorSpace::uncolored(DeviceColorSpace::Rgb))
        .unwrap();

    content.set_fill_color_space(&color_space);
    content
        .set_fill_pattern(&pattern_name, Some(&[0.0, 0.0, 0.0]))
        .unwrap();

    content.rect(50.0, 50.0, 400.0, 400.0).unwrap();
    content.paint(PaintMode::default());

    let shapes = [
        Ring::from_xy([(50.0, 750.0), (250.0, 550.0), (450.0, 750.0), (250.0, 950.0)]),
        Ring::from_xy([(550.0, 550.0), (950.0, 550.0), (750.0, 950.0)]),
    ];

    for ring in shapes {
        emit_polygon(&Polygon::new(ring, vec![]), &mut content, PaintMode::default()).unwrap();
    }

    let pdf = document.finish().unwrap();
    std::fs::write("target/pdtilingpattern.pdf", &pdf).unwrap();
}
