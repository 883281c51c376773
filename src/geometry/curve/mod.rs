mod arc;
mod line;
mod polyline;

pub use arc::Arc;
pub use line::Line;
pub use polyline::Polyline;

use crate::error::Result;
use crate::math::Point2;
use crate::tessellation::TessellationParams;

/// Trait for bounded planar curves used as boundary segments.
pub trait Curve2 {
    /// Returns the point at the start of the curve.
    fn start(&self) -> Point2;

    /// Returns the point at the end of the curve.
    fn end(&self) -> Point2;

    /// Returns the arc length of the curve.
    fn length(&self) -> f64;

    /// Samples the curve into an ordered point list from start to end,
    /// both endpoints included.
    fn sample(&self, params: &TessellationParams) -> Vec<Point2>;
}

/// The curve of one boundary segment.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryCurve {
    Line(Line),
    Arc(Arc),
    /// A general curve already sampled by the host.
    Polyline(Polyline),
}

impl BoundaryCurve {
    /// Creates a straight segment.
    #[must_use]
    pub fn line(start: Point2, end: Point2) -> Self {
        Self::Line(Line::new(start, end))
    }

    /// Creates a circular arc from center-radius-angle form.
    ///
    /// # Errors
    ///
    /// See [`Arc::new`].
    pub fn arc(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        Ok(Self::Arc(Arc::new(center, radius, start_angle, sweep)?))
    }

    /// Creates a segment from a bulge-encoded polyline vertex pair.
    ///
    /// A zero bulge (or a zero-length chord) yields a straight segment.
    #[must_use]
    pub fn from_bulge(start: Point2, end: Point2, bulge: f64) -> Self {
        match Arc::from_bulge(&start, &end, bulge) {
            Some(arc) => Self::Arc(arc),
            None => Self::line(start, end),
        }
    }

    /// Creates a general curve from host-sampled points.
    ///
    /// # Errors
    ///
    /// See [`Polyline::new`].
    pub fn polyline(points: Vec<Point2>) -> Result<Self> {
        Ok(Self::Polyline(Polyline::new(points)?))
    }

    /// Returns `true` for straight segments.
    #[must_use]
    pub fn is_straight(&self) -> bool {
        matches!(self, Self::Line(_))
    }
}

impl Curve2 for BoundaryCurve {
    fn start(&self) -> Point2 {
        match self {
            Self::Line(c) => c.start(),
            Self::Arc(c) => c.start(),
            Self::Polyline(c) => c.start(),
        }
    }

    fn end(&self) -> Point2 {
        match self {
            Self::Line(c) => c.end(),
            Self::Arc(c) => c.end(),
            Self::Polyline(c) => c.end(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Self::Line(c) => c.length(),
            Self::Arc(c) => c.length(),
            Self::Polyline(c) => c.length(),
        }
    }

    fn sample(&self, params: &TessellationParams) -> Vec<Point2> {
        match self {
            Self::Line(c) => c.sample(params),
            Self::Arc(c) => c.sample(params),
            Self::Polyline(c) => c.sample(params),
        }
    }
}
