//! Internal utilities.

use pdf_writer::types::LineCapStyle;
use pdf_writer::Name;

use crate::error::{TileError, TileResult};
use crate::geom::Transform;
use crate::object;
use crate::path::LineCap;

pub(crate) trait NameExt {
    fn to_pdf_name(&self) -> Name<'_>;
}

impl NameExt for object::Name {
    fn to_pdf_name(&self) -> Name<'_> {
        Name(self.as_str().as_bytes())
    }
}

pub(crate) trait TransformExt {
    fn to_pdf_transform(&self) -> [f32; 6];
}

impl TransformExt for Transform {
    fn to_pdf_transform(&self) -> [f32; 6] {
        [self.sx, self.ky, self.kx, self.sy, self.tx, self.ty]
    }
}

pub(crate) trait LineCapExt {
    fn to_pdf_line_cap(&self) -> LineCapStyle;
}

impl LineCapExt for LineCap {
    fn to_pdf_line_cap(&self) -> LineCapStyle {
        match self {
            LineCap::Butt => LineCapStyle::ButtCap,
            LineCap::Round => LineCapStyle::RoundCap,
            LineCap::Square => LineCapStyle::ProjectingSquareCap,
        }
    }
}

/// Make sure a number can be written in PDF syntax.
pub(crate) fn check_finite(value: f32, what: &str) -> TileResult<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TileError::EncodingError(format!(
            "{what} `{value}` is not a finite number"
        )))
    }
}

pub(crate) fn deflate_encode(data: &[u8]) -> Vec<u8> {
    const COMPRESSION_LEVEL: u8 = 6;
    miniz_oxide::deflate::compress_to_vec_zlib(data, COMPRESSION_LEVEL)
}
