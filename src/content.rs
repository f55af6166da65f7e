//! A low-level abstraction over a single content stream.
//!
//! Content streams are strictly positional: every operator sees the graphics state
//! left behind by the operators before it. A [`ContentEmitter`] therefore appends
//! each operator to its [`ContentSink`] immediately and in call order. The same
//! emitter can write into the content stream of a page or into the payload of a
//! tiling pattern, since both are just byte sinks.

use pdf_writer::types::ColorSpaceOperand;
use pdf_writer::Content;

use crate::color::{validate_components, Color, DeviceColor};
use crate::error::TileResult;
use crate::object::Name;
use crate::path::{FillRule, LineCap, PaintMode};
use crate::util::{check_finite, LineCapExt, NameExt};

/// An append-only sink for content stream bytes.
pub trait ContentSink {
    /// Append bytes to the end of the stream.
    fn append(&mut self, bytes: &[u8]);
}

impl ContentSink for Vec<u8> {
    fn append(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Writes operators into a [`ContentSink`].
///
/// Every operator is written on its own line, with its operands separated by single
/// spaces and the operator mnemonic last. Methods that take numbers fail with an
/// [`EncodingError`] if a number can't be written, in which case nothing is appended.
///
/// [`EncodingError`]: crate::error::TileError::EncodingError
pub struct ContentEmitter<'a, S: ContentSink + ?Sized> {
    sink: &'a mut S,
}

impl<'a, S: ContentSink + ?Sized> ContentEmitter<'a, S> {
    /// Create a new emitter that appends to `sink`.
    pub fn new(sink: &'a mut S) -> Self {
        Self { sink }
    }

    /// Select a named color space for filling (`cs`).
    pub fn set_fill_color_space(&mut self, name: &Name) {
        self.emit(|c| {
            c.set_fill_color_space(ColorSpaceOperand::Named(name.to_pdf_name()));
        });
    }

    /// Select a named color space for stroking (`CS`).
    pub fn set_stroke_color_space(&mut self, name: &Name) {
        self.emit(|c| {
            c.set_stroke_color_space(ColorSpaceOperand::Named(name.to_pdf_name()));
        });
    }

    /// Select a pattern as the fill color (`scn`).
    ///
    /// For uncolored patterns, `components` holds the color the pattern is painted
    /// with, in the underlying color space of the current pattern color space. For
    /// colored patterns it must be `None`.
    pub fn set_fill_pattern(&mut self, name: &Name, components: Option<&[f32]>) -> TileResult<()> {
        let components = components.unwrap_or_default();
        validate_components(components)?;

        self.emit(|c| {
            c.set_fill_pattern(components.iter().copied(), name.to_pdf_name());
        });

        Ok(())
    }

    /// Select a pattern as the stroke color (`SCN`).
    ///
    /// See [`ContentEmitter::set_fill_pattern`].
    pub fn set_stroke_pattern(
        &mut self,
        name: &Name,
        components: Option<&[f32]>,
    ) -> TileResult<()> {
        let components = components.unwrap_or_default();
        validate_components(components)?;

        self.emit(|c| {
            c.set_stroke_pattern(components.iter().copied(), name.to_pdf_name());
        });

        Ok(())
    }

    /// Set the fill color.
    pub fn set_fill_color(&mut self, color: &Color) -> TileResult<()> {
        match color {
            Color::Device(device) => {
                validate_components(&device.components())?;
                self.emit(|c| match *device {
                    DeviceColor::Gray(g) => {
                        c.set_fill_gray(g);
                    }
                    DeviceColor::Rgb(r, g, b) => {
                        c.set_fill_rgb(r, g, b);
                    }
                    DeviceColor::Cmyk(cy, m, y, k) => {
                        c.set_fill_cmyk(cy, m, y, k);
                    }
                });

                Ok(())
            }
            Color::Pattern { name, components } => {
                self.set_fill_pattern(name, components.as_deref())
            }
        }
    }

    /// Set the stroke color.
    pub fn set_stroke_color(&mut self, color: &Color) -> TileResult<()> {
        match color {
            Color::Device(device) => {
                validate_components(&device.components())?;
                self.emit(|c| match *device {
                    DeviceColor::Gray(g) => {
                        c.set_stroke_gray(g);
                    }
                    DeviceColor::Rgb(r, g, b) => {
                        c.set_stroke_rgb(r, g, b);
                    }
                    DeviceColor::Cmyk(cy, m, y, k) => {
                        c.set_stroke_cmyk(cy, m, y, k);
                    }
                });

                Ok(())
            }
            Color::Pattern { name, components } => {
                self.set_stroke_pattern(name, components.as_deref())
            }
        }
    }

    /// Set the line width (`w`).
    pub fn set_line_width(&mut self, width: f32) -> TileResult<()> {
        let width = check_finite(width, "line width")?;
        self.emit(|c| {
            c.set_line_width(width);
        });

        Ok(())
    }

    /// Apply a named external graphics state (`gs`).
    pub fn set_ext_g_state(&mut self, name: &Name) {
        self.emit(|c| {
            c.set_parameters(name.to_pdf_name());
        });
    }

    /// Set the line cap (`J`).
    pub fn set_line_cap(&mut self, line_cap: LineCap) {
        self.emit(|c| {
            c.set_line_cap(line_cap.to_pdf_line_cap());
        });
    }

    /// Begin a new subpath (`m`).
    pub fn move_to(&mut self, x: f32, y: f32) -> TileResult<()> {
        let x = check_finite(x, "x coordinate")?;
        let y = check_finite(y, "y coordinate")?;
        self.emit(|c| {
            c.move_to(x, y);
        });

        Ok(())
    }

    /// Append a straight line to the current subpath (`l`).
    pub fn line_to(&mut self, x: f32, y: f32) -> TileResult<()> {
        let x = check_finite(x, "x coordinate")?;
        let y = check_finite(y, "y coordinate")?;
        self.emit(|c| {
            c.line_to(x, y);
        });

        Ok(())
    }

    /// Append a rectangle as a complete subpath (`re`).
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> TileResult<()> {
        let x = check_finite(x, "x coordinate")?;
        let y = check_finite(y, "y coordinate")?;
        let width = check_finite(width, "width")?;
        let height = check_finite(height, "height")?;
        self.emit(|c| {
            c.rect(x, y, width, height);
        });

        Ok(())
    }

    /// Close the current subpath (`h`).
    pub fn close_path(&mut self) {
        self.emit(|c| {
            c.close_path();
        });
    }

    /// Paint the current path and end it.
    pub fn paint(&mut self, mode: PaintMode) {
        self.emit(|c| {
            match mode {
                PaintMode::Fill(FillRule::NonZero) => c.fill_nonzero(),
                PaintMode::Fill(FillRule::EvenOdd) => c.fill_even_odd(),
                PaintMode::FillStroke(FillRule::NonZero) => c.fill_nonzero_and_stroke(),
                PaintMode::FillStroke(FillRule::EvenOdd) => c.fill_even_odd_and_stroke(),
                PaintMode::CloseFillStroke(FillRule::NonZero) => {
                    c.close_fill_nonzero_and_stroke()
                }
                PaintMode::CloseFillStroke(FillRule::EvenOdd) => {
                    c.close_fill_even_odd_and_stroke()
                }
                PaintMode::Stroke => c.stroke(),
            };
        });
    }

    fn emit(&mut self, op: impl FnOnce(&mut Content)) {
        let mut content = Content::new();
        op(&mut content);

        // Terminate every operator with exactly one newline.
        let mut bytes = content.finish().to_vec();
        while bytes.last() == Some(&b'\n') {
            bytes.pop();
        }
        bytes.push(b'\n');

        self.sink.append(&bytes);
    }
}
