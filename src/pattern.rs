//! Tiling patterns.
//!
//! A tiling pattern paints a cell, described by its own content stream, repeatedly
//! at a fixed horizontal and vertical pitch. The pitch is independent of the size of
//! the cell's bounding box, so cells can overlap or leave gaps between each other.
//!
//! A pattern is a stream object that doesn't belong to any page. Once it has been
//! built it is immutable and can be registered in as many resource dictionaries as
//! needed, see [`ResourceDictionary::add_pattern`].
//!
//! [`ResourceDictionary::add_pattern`]: crate::resource::ResourceDictionary::add_pattern

use std::sync::Arc;

use log::{debug, warn};

use crate::error::{TileError, TileResult};
use crate::geom::{BBox, Transform};
use crate::object::{Dict, Name, Object, Stream};
use crate::util::{check_finite, TransformExt};

/// The pattern type of tiling patterns.
const TILING_PATTERN_TYPE: i32 = 1;

/// Operators that set a color, which uncolored patterns must not use.
const COLOR_OPERATORS: &[&[u8]] = &[
    b"CS", b"cs", b"SC", b"sc", b"SCN", b"scn", b"G", b"g", b"RG", b"rg", b"K", b"k",
];

/// Whether a pattern carries its own colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintType {
    /// The pattern's content stream sets its own colors.
    Colored,
    /// The pattern's content stream only describes a shape. The color is supplied
    /// whenever the pattern is selected as the current color.
    Uncolored,
}

impl PaintType {
    fn to_int(self) -> i32 {
        match self {
            PaintType::Colored => 1,
            PaintType::Uncolored => 2,
        }
    }

    fn from_int(value: i32) -> Option<Self> {
        match value {
            1 => Some(PaintType::Colored),
            2 => Some(PaintType::Uncolored),
            _ => None,
        }
    }
}

/// How the cells of a pattern are adjusted to the device pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TilingType {
    /// Cells are spaced consistently, the cell may be distorted by up to one device pixel.
    #[default]
    ConstantSpacing,
    /// The cell is not distorted, the spacing may vary by up to one device pixel.
    NoDistortion,
    /// Like [`TilingType::ConstantSpacing`], but allows additional distortion for
    /// faster tiling.
    FastConstantSpacing,
}

impl TilingType {
    fn to_int(self) -> i32 {
        match self {
            TilingType::ConstantSpacing => 1,
            TilingType::NoDistortion => 2,
            TilingType::FastConstantSpacing => 3,
        }
    }

    fn from_int(value: i32) -> Option<Self> {
        match value {
            1 => Some(TilingType::ConstantSpacing),
            2 => Some(TilingType::NoDistortion),
            3 => Some(TilingType::FastConstantSpacing),
            _ => None,
        }
    }
}

/// A builder for [`TilingPattern`]s.
#[derive(Debug, Clone)]
pub struct TilingPatternBuilder {
    paint_type: PaintType,
    tiling_type: TilingType,
    bbox: BBox,
    x_step: f32,
    y_step: f32,
    content: Vec<u8>,
    transform: Transform,
}

impl TilingPatternBuilder {
    /// Create a new builder.
    ///
    /// `content` holds the operators that paint one cell. It is embedded into the
    /// pattern exactly as given, without any validation or compression, so it is up
    /// to the caller to provide a valid content stream.
    pub fn new(
        paint_type: PaintType,
        tiling_type: TilingType,
        bbox: BBox,
        x_step: f32,
        y_step: f32,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            paint_type,
            tiling_type,
            bbox,
            x_step,
            y_step,
            content: content.into(),
            transform: Transform::identity(),
        }
    }

    /// Set the matrix that maps pattern space to the default coordinate space of
    /// the page the pattern is used on. Defaults to the identity.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Build the pattern.
    ///
    /// Fails if a step is not positive or the bounding box is malformed.
    pub fn build(self) -> TileResult<TilingPattern> {
        if !(self.x_step.is_finite() && self.x_step > 0.0) {
            return Err(TileError::InvalidParameter(format!(
                "x step must be positive, but is {}",
                self.x_step
            )));
        }

        if !(self.y_step.is_finite() && self.y_step > 0.0) {
            return Err(TileError::InvalidParameter(format!(
                "y step must be positive, but is {}",
                self.y_step
            )));
        }

        self.bbox.validate()?;

        let matrix = self.transform.to_pdf_transform();
        for entry in matrix {
            check_finite(entry, "matrix entry")?;
        }

        if self.paint_type == PaintType::Uncolored && sets_color(&self.content) {
            warn!("uncolored tiling pattern sets its own color, which will be ignored");
        }

        debug!(
            "building {:?} tiling pattern with bbox {:?} and steps {}x{}",
            self.paint_type, self.bbox, self.x_step, self.y_step
        );

        let mut dict = Dict::new();
        dict.insert(Name::from_static("Type"), Name::from_static("Pattern"));
        dict.insert(Name::from_static("PatternType"), TILING_PATTERN_TYPE);
        dict.insert(Name::from_static("PaintType"), self.paint_type.to_int());
        dict.insert(Name::from_static("TilingType"), self.tiling_type.to_int());
        dict.insert(Name::from_static("BBox"), self.bbox.to_object());
        dict.insert(Name::from_static("XStep"), Object::number(self.x_step));
        dict.insert(Name::from_static("YStep"), Object::number(self.y_step));
        dict.insert(Name::from_static("Resources"), Dict::new());
        dict.insert(Name::from_static("Matrix"), Object::numbers(matrix));

        Ok(TilingPattern(Arc::new(Stream::new(dict, self.content))))
    }
}

/// A tiling pattern.
///
/// Cloning a pattern is cheap and yields a handle to the same stream object.
/// Two patterns compare equal if their dictionaries and contents are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct TilingPattern(Arc<Stream>);

impl TilingPattern {
    /// The paint type.
    pub fn paint_type(&self) -> Option<PaintType> {
        PaintType::from_int(self.get("PaintType")?.as_i32()?)
    }

    /// The tiling type.
    pub fn tiling_type(&self) -> Option<TilingType> {
        TilingType::from_int(self.get("TilingType")?.as_i32()?)
    }

    /// The bounding box of the pattern cell.
    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_object(self.get("BBox")?)
    }

    /// The horizontal spacing between cells.
    pub fn x_step(&self) -> Option<f32> {
        self.get("XStep")?.as_f32()
    }

    /// The vertical spacing between cells.
    pub fn y_step(&self) -> Option<f32> {
        self.get("YStep")?.as_f32()
    }

    /// The pattern matrix as `[a b c d e f]`.
    pub fn matrix(&self) -> Option<[f32; 6]> {
        match self.get("Matrix")?.as_array()? {
            [a, b, c, d, e, f] => Some([
                a.as_f32()?,
                b.as_f32()?,
                c.as_f32()?,
                d.as_f32()?,
                e.as_f32()?,
                f.as_f32()?,
            ]),
            _ => None,
        }
    }

    /// The operators that paint one cell.
    pub fn content(&self) -> &[u8] {
        self.0.data()
    }

    /// The underlying stream object.
    pub fn stream(&self) -> &Arc<Stream> {
        &self.0
    }

    /// The pattern as a node of the object graph.
    pub fn to_object(&self) -> Object {
        Object::Stream(self.0.clone())
    }

    /// Whether both handles refer to the same stream object.
    pub fn ptr_eq(&self, other: &TilingPattern) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn get(&self, key: &str) -> Option<&Object> {
        self.0.dict().get(key)
    }
}

fn sets_color(content: &[u8]) -> bool {
    content
        .split(|b| b.is_ascii_whitespace())
        .any(|token| COLOR_OPERATORS.contains(&token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripes() -> TilingPatternBuilder {
        TilingPatternBuilder::new(
            PaintType::Uncolored,
            TilingType::ConstantSpacing,
            BBox::new(0.0, 0.0, 12.0, 12.0),
            10.0,
            10.0,
            "2 J 0 0 m 12 12 l S",
        )
    }

    #[test]
    fn dictionary_entries() {
        let pattern = stripes().build().unwrap();
        let dict = pattern.stream().dict();

        let keys = dict.keys().map(|k| k.as_str()).collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                "Type",
                "PatternType",
                "PaintType",
                "TilingType",
                "BBox",
                "XStep",
                "YStep",
                "Resources",
                "Matrix"
            ]
        );
        assert_eq!(
            dict.get("Type").and_then(Object::as_name).map(Name::as_str),
            Some("Pattern")
        );
        assert_eq!(dict.get("PatternType"), Some(&Object::Integer(1)));
        assert_eq!(dict.get("PaintType"), Some(&Object::Integer(2)));
        assert_eq!(dict.get("TilingType"), Some(&Object::Integer(1)));
        assert_eq!(dict.get("Resources"), Some(&Object::Dict(Dict::new())));
    }

    #[test]
    fn values_round_trip() {
        let pattern = TilingPatternBuilder::new(
            PaintType::Colored,
            TilingType::FastConstantSpacing,
            BBox::new(-1.5, 0.0, 600.0, 600.25),
            600.0,
            0.75,
            "0 0 m 1 1 l S",
        )
        .with_transform(Transform::from_scale(0.125, 0.125))
        .build()
        .unwrap();

        assert_eq!(pattern.paint_type(), Some(PaintType::Colored));
        assert_eq!(pattern.tiling_type(), Some(TilingType::FastConstantSpacing));
        assert_eq!(pattern.bbox(), Some(BBox::new(-1.5, 0.0, 600.0, 600.25)));
        assert_eq!(pattern.x_step(), Some(600.0));
        assert_eq!(pattern.y_step(), Some(0.75));
        assert_eq!(
            pattern.matrix(),
            Some([0.125, 0.0, 0.0, 0.125, 0.0, 0.0])
        );
    }

    #[test]
    fn identity_is_default_matrix() {
        let pattern = stripes().build().unwrap();
        assert_eq!(pattern.matrix(), Some([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]));
    }

    #[test]
    fn all_tiling_types() {
        for tiling_type in [
            TilingType::ConstantSpacing,
            TilingType::NoDistortion,
            TilingType::FastConstantSpacing,
        ] {
            let pattern = TilingPatternBuilder::new(
                PaintType::Colored,
                tiling_type,
                BBox::from_size(1.0, 1.0),
                1.0,
                1.0,
                Vec::<u8>::new(),
            )
            .build()
            .unwrap();
            assert_eq!(pattern.tiling_type(), Some(tiling_type));
        }
    }

    #[test]
    fn content_is_embedded_verbatim() {
        let content = " 52 508 m  92 400 l 160 472 l f\r\n  8 352 m  24 240 l 100 320 l f\r\n";
        let pattern = TilingPatternBuilder::new(
            PaintType::Uncolored,
            TilingType::ConstantSpacing,
            BBox::from_size(600.0, 600.0),
            600.0,
            600.0,
            content,
        )
        .build()
        .unwrap();

        assert_eq!(pattern.content(), content.as_bytes());
    }

    #[test]
    fn non_positive_steps_are_rejected() {
        for (x_step, y_step) in [(0.0, 10.0), (10.0, 0.0), (-1.0, 10.0), (10.0, -0.5)] {
            let builder = TilingPatternBuilder::new(
                PaintType::Colored,
                TilingType::ConstantSpacing,
                BBox::from_size(12.0, 12.0),
                x_step,
                y_step,
                Vec::<u8>::new(),
            );
            assert!(matches!(
                builder.build(),
                Err(TileError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn nan_step_is_rejected() {
        let builder = TilingPatternBuilder::new(
            PaintType::Colored,
            TilingType::ConstantSpacing,
            BBox::from_size(12.0, 12.0),
            f32::NAN,
            10.0,
            Vec::<u8>::new(),
        );
        assert!(matches!(
            builder.build(),
            Err(TileError::InvalidParameter(_))
        ));
    }

    #[test]
    fn malformed_bbox_is_rejected() {
        let builder = TilingPatternBuilder::new(
            PaintType::Colored,
            TilingType::ConstantSpacing,
            BBox::new(12.0, 12.0, 0.0, 0.0),
            10.0,
            10.0,
            Vec::<u8>::new(),
        );
        assert!(matches!(
            builder.build(),
            Err(TileError::InvalidParameter(_))
        ));
    }

    #[test]
    fn non_finite_matrix_is_rejected() {
        let result = stripes()
            .with_transform(Transform::from_row(1.0, 0.0, 0.0, 1.0, f32::INFINITY, 0.0))
            .build();
        assert!(matches!(result, Err(TileError::EncodingError(_))));
    }

    #[test]
    fn identical_inputs_build_equal_but_distinct_patterns() {
        let first = stripes().build().unwrap();
        let second = stripes().build().unwrap();

        assert_eq!(first, second);
        assert!(!first.ptr_eq(&second));
        assert!(first.ptr_eq(&first.clone()));
    }

    #[test]
    fn uncolored_pattern_with_color_operator_still_builds() {
        let _ = env_logger::builder().is_test(true).try_init();

        let content = "1 0 0 rg 0 0 12 12 re f";
        let pattern = TilingPatternBuilder::new(
            PaintType::Uncolored,
            TilingType::ConstantSpacing,
            BBox::from_size(12.0, 12.0),
            10.0,
            10.0,
            content,
        )
        .build()
        .unwrap();

        assert_eq!(pattern.paint_type(), Some(PaintType::Uncolored));
        assert_eq!(pattern.content(), content.as_bytes());
    }

    #[test]
    fn detects_color_operators() {
        assert!(sets_color(b"1 0 0 rg 0 0 m 1 1 l S"));
        assert!(sets_color(b"/cs1 cs"));
        assert!(!sets_color(b"2 J 0 0 m 12 12 l S"));
        assert!(!sets_color(b"0 0 10 10 re f"));
    }
}
