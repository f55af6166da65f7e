//! Colors and color spaces.
//!
//! Tiling patterns are selected as a color through a color space whose family is
//! `/Pattern`. Colored patterns carry their own colors, so the plain `/Pattern`
//! family is enough for them. Uncolored patterns instead need an underlying device
//! color space, whose components are supplied every time the pattern is selected.

use crate::error::{TileError, TileResult};
use crate::object::{Name, Object};
use crate::util::check_finite;

/// A device color space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceColorSpace {
    /// The `DeviceGray` color space.
    Gray,
    /// The `DeviceRGB` color space.
    Rgb,
    /// The `DeviceCMYK` color space.
    Cmyk,
}

impl DeviceColorSpace {
    /// The number of components of a color in this space.
    pub fn num_components(self) -> usize {
        match self {
            DeviceColorSpace::Gray => 1,
            DeviceColorSpace::Rgb => 3,
            DeviceColorSpace::Cmyk => 4,
        }
    }

    pub(crate) fn to_name(self) -> Name {
        Name::from_static(match self {
            DeviceColorSpace::Gray => "DeviceGray",
            DeviceColorSpace::Rgb => "DeviceRGB",
            DeviceColorSpace::Cmyk => "DeviceCMYK",
        })
    }
}

/// A color in one of the device color spaces. All components are in the range 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceColor {
    /// A gray level.
    Gray(f32),
    /// A red, green and blue color.
    Rgb(f32, f32, f32),
    /// A cyan, magenta, yellow and black color.
    Cmyk(f32, f32, f32, f32),
}

impl DeviceColor {
    /// The color space of the color.
    pub fn color_space(&self) -> DeviceColorSpace {
        match self {
            DeviceColor::Gray(_) => DeviceColorSpace::Gray,
            DeviceColor::Rgb(..) => DeviceColorSpace::Rgb,
            DeviceColor::Cmyk(..) => DeviceColorSpace::Cmyk,
        }
    }

    /// The components of the color, in the order they are written.
    pub fn components(&self) -> Vec<f32> {
        match *self {
            DeviceColor::Gray(g) => vec![g],
            DeviceColor::Rgb(r, g, b) => vec![r, g, b],
            DeviceColor::Cmyk(c, m, y, k) => vec![c, m, y, k],
        }
    }
}

/// A color that can be used as a fill or stroke color source.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// A plain device color.
    Device(DeviceColor),
    /// A pattern, referenced by its name in the resource dictionary.
    Pattern {
        /// The name of the pattern resource.
        name: Name,
        /// The color to paint an uncolored pattern with. Must be `None` for
        /// colored patterns.
        components: Option<Vec<f32>>,
    },
}

impl From<DeviceColor> for Color {
    fn from(value: DeviceColor) -> Self {
        Color::Device(value)
    }
}

/// A color space of the `/Pattern` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternColorSpace {
    underlying: Option<DeviceColorSpace>,
}

impl PatternColorSpace {
    /// The color space for colored patterns.
    pub fn colored() -> Self {
        Self { underlying: None }
    }

    /// The color space for uncolored patterns, painted with colors
    /// from `underlying`.
    pub fn uncolored(underlying: DeviceColorSpace) -> Self {
        Self {
            underlying: Some(underlying),
        }
    }

    /// The underlying color space, if there is one.
    pub fn underlying(&self) -> Option<DeviceColorSpace> {
        self.underlying
    }

    /// The color space as an object, `/Pattern` or e.g. `[/Pattern /DeviceCMYK]`.
    pub fn to_object(&self) -> Object {
        let family = Object::Name(Name::from_static("Pattern"));
        match self.underlying {
            None => family,
            Some(underlying) => Object::Array(vec![family, Object::Name(underlying.to_name())]),
        }
    }
}

impl From<PatternColorSpace> for Object {
    fn from(value: PatternColorSpace) -> Self {
        value.to_object()
    }
}

/// Check that all components of a color are finite and in the range 0..=1.
pub(crate) fn validate_components(components: &[f32]) -> TileResult<()> {
    for &component in components {
        check_finite(component, "color component")?;

        if !(0.0..=1.0).contains(&component) {
            return Err(TileError::InvalidParameter(format!(
                "color component {component} is outside of 0..=1"
            )));
        }
    }

    Ok(())
}
