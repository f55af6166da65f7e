/*!
A low-level builder for PDF tiling patterns.

A tiling pattern paints a small cell of graphics over and over, at a fixed
horizontal and vertical pitch, to fill an area. pdftile builds the pieces that are
needed to use one as a fill or stroke color:

- the pattern object itself, a stream with the pattern dictionary and the
  operators of one cell ([`pattern`]),
- the entries in a page's resource dictionary that make the pattern and its color
  space addressable by name ([`resource`]),
- the content stream operators that select the pattern as the current color and
  construct and paint the paths it is applied to ([`content`], [`path`]).

Patterns come in two flavors. _Colored_ patterns carry their own colors. _Uncolored_
patterns only describe a shape, and are painted in whatever color is supplied when
the pattern is selected. To use an uncolored pattern, register a
[`PatternColorSpace`] with an underlying device color space, select it with
[`ContentEmitter::set_fill_color_space`] and then select the pattern together with
the color components with [`ContentEmitter::set_fill_pattern`].

Everything operates on a small, closed [`Object`] graph and on append-only byte
sinks, so the same code can write into a page's content stream or into the cell of
another pattern. The [`document`] module contains a minimal writer that turns pages
into a PDF file.

[`PatternColorSpace`]: color::PatternColorSpace
[`ContentEmitter::set_fill_color_space`]: content::ContentEmitter::set_fill_color_space
[`ContentEmitter::set_fill_pattern`]: content::ContentEmitter::set_fill_pattern
[`Object`]: object::Object
*/

#![deny(missing_docs)]

pub mod color;
pub mod content;
pub mod document;
pub mod error;
pub mod geom;
pub mod object;
pub mod path;
pub mod pattern;
pub mod resource;
pub mod serialize;

mod util;

pub use document::{Document, Page};
pub use error::{TileError, TileResult};
pub use serialize::SerializeSettings;
