//! Geometrical helper structs.

pub use tiny_skia_path::{Point, Transform};

use crate::error::{TileError, TileResult};
use crate::object::Object;

/// The bounding box of a pattern cell in pattern space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    /// The x coordinate of the lower-left corner.
    pub llx: f32,
    /// The y coordinate of the lower-left corner.
    pub lly: f32,
    /// The x coordinate of the upper-right corner.
    pub urx: f32,
    /// The y coordinate of the upper-right corner.
    pub ury: f32,
}

impl BBox {
    /// Create a new bounding box from its corners.
    pub fn new(llx: f32, lly: f32, urx: f32, ury: f32) -> Self {
        Self { llx, lly, urx, ury }
    }

    /// Create a bounding box of the given size, anchored at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// The width of the box.
    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    /// The height of the box.
    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }

    /// Check that the box is finite and encloses a non-empty area.
    pub(crate) fn validate(&self) -> TileResult<()> {
        let rect = tiny_skia_path::Rect::from_ltrb(self.llx, self.lly, self.urx, self.ury)
            .filter(|r| r.width() > 0.0 && r.height() > 0.0);

        if rect.is_none() {
            return Err(TileError::InvalidParameter(format!(
                "malformed bounding box [{} {} {} {}]",
                self.llx, self.lly, self.urx, self.ury
            )));
        }

        Ok(())
    }

    pub(crate) fn to_object(self) -> Object {
        Object::numbers([self.llx, self.lly, self.urx, self.ury])
    }

    pub(crate) fn from_object(object: &Object) -> Option<Self> {
        match object.as_array()? {
            [llx, lly, urx, ury] => Some(Self::new(
                llx.as_f32()?,
                lly.as_f32()?,
                urx.as_f32()?,
                ury.as_f32()?,
            )),
            _ => None,
        }
    }
}
