use crate::math::Point2;
use crate::tessellation::TessellationParams;

use super::Curve2;

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    start: Point2,
    end: Point2,
}

impl Line {
    /// Creates a new segment. Zero-length segments are accepted and left to
    /// boundary validation.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }
}

impl Curve2 for Line {
    fn start(&self) -> Point2 {
        self.start
    }

    fn end(&self) -> Point2 {
        self.end
    }

    fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    fn sample(&self, _params: &TessellationParams) -> Vec<Point2> {
        vec![self.start, self.end]
    }
}
