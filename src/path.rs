//! Turning rings of points into path-construction operators.
//!
//! A shape is described by an exterior [`Ring`] and any number of hole rings. Each
//! ring becomes one closed subpath, and all subpaths of a shape are painted by a
//! single painting operator, so that its fill rule applies to all of them at once.
//!
//! The fill rule is never inferred from the geometry. Holes only stay empty if the
//! painting operator uses [`FillRule::EvenOdd`], or if the hole rings wind in the
//! opposite direction of the exterior ring and [`FillRule::NonZero`] is used.

use crate::content::{ContentEmitter, ContentSink};
use crate::error::{TileError, TileResult};
use crate::geom::Point;
use crate::util::check_finite;

/// A fill rule.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default, Hash)]
pub enum FillRule {
    /// The `non-zero` fill rule.
    #[default]
    NonZero,
    /// The `even-odd` fill rule.
    EvenOdd,
}

/// A line cap.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default, Hash)]
pub enum LineCap {
    /// The butt line cap.
    #[default]
    Butt,
    /// The round line cap.
    Round,
    /// The square line cap.
    Square,
}

/// How the current path should be painted.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PaintMode {
    /// Fill the path (`f`, `f*`).
    Fill(FillRule),
    /// Fill and then stroke the path (`B`, `B*`).
    FillStroke(FillRule),
    /// Close, fill and then stroke the path (`b`, `b*`).
    CloseFillStroke(FillRule),
    /// Stroke the path (`S`).
    Stroke,
}

impl Default for PaintMode {
    fn default() -> Self {
        PaintMode::Fill(FillRule::default())
    }
}

/// An ordered sequence of points forming one closed subpath.
///
/// The ring is closed implicitly, the first point does not need to be repeated at
/// the end. If it is, the repeated point is emitted like any other.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring(Vec<Point>);

impl Ring {
    /// Create a new ring from its points.
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Create a new ring from `(x, y)` pairs.
    pub fn from_xy(points: impl IntoIterator<Item = (f32, f32)>) -> Self {
        Self(
            points
                .into_iter()
                .map(|(x, y)| Point::from_xy(x, y))
                .collect(),
        )
    }

    /// The points of the ring.
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// The number of points.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the ring has no points.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validate(&self) -> TileResult<()> {
        if self.is_empty() {
            return Err(TileError::InvalidGeometry("empty ring".to_string()));
        }

        for point in &self.0 {
            check_finite(point.x, "x coordinate")?;
            check_finite(point.y, "y coordinate")?;
        }

        Ok(())
    }
}

/// A polygon with an exterior boundary and optional holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    /// The exterior boundary.
    pub exterior: Ring,
    /// The holes.
    pub holes: Vec<Ring>,
}

impl Polygon {
    /// Create a new polygon.
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    /// Iterate over all rings, the exterior first.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }
}

/// Emit one ring as a closed subpath: a `m` for the first point, a `l` for each
/// further point and a final `h`.
///
/// Nothing is painted, the caller finishes the path with
/// [`ContentEmitter::paint`] after all rings of the shape have been emitted.
/// Fails without emitting anything if the ring is empty or contains a point that
/// isn't finite.
pub fn emit_ring<S: ContentSink + ?Sized>(
    ring: &Ring,
    emitter: &mut ContentEmitter<'_, S>,
) -> TileResult<()> {
    ring.validate()?;
    emit_validated_ring(ring, emitter)
}

/// Emit all rings of a polygon, followed by a single painting operator.
///
/// Every ring needs at least three points. All rings are checked before the first
/// operator is emitted.
pub fn emit_polygon<S: ContentSink + ?Sized>(
    polygon: &Polygon,
    emitter: &mut ContentEmitter<'_, S>,
    mode: PaintMode,
) -> TileResult<()> {
    for ring in polygon.rings() {
        ring.validate()?;

        if ring.len() < 3 {
            return Err(TileError::InvalidGeometry(format!(
                "degenerate ring with {} points",
                ring.len()
            )));
        }
    }

    for ring in polygon.rings() {
        emit_validated_ring(ring, emitter)?;
    }

    emitter.paint(mode);

    Ok(())
}

fn emit_validated_ring<S: ContentSink + ?Sized>(
    ring: &Ring,
    emitter: &mut ContentEmitter<'_, S>,
) -> TileResult<()> {
    let mut points = ring.points().iter();

    if let Some(first) = points.next() {
        emitter.move_to(first.x, first.y)?;
    }

    for point in points {
        emitter.line_to(point.x, point.y)?;
    }

    emitter.close_path();

    Ok(())
}
