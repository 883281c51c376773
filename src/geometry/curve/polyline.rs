use crate::error::{GeometryError, Result};
use crate::math::Point2;
use crate::tessellation::TessellationParams;

use super::Curve2;

/// An open piecewise-linear curve, used for host curves (splines, ellipses)
/// that arrive pre-sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point2>,
}

impl Polyline {
    /// Creates a new polyline.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if fewer than 2 points are given.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 2 {
            return Err(
                GeometryError::Degenerate("polyline needs at least 2 points".into()).into(),
            );
        }
        Ok(Self { points })
    }

    /// Returns the polyline vertices.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }
}

impl Curve2 for Polyline {
    fn start(&self) -> Point2 {
        self.points[0]
    }

    fn end(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    fn sample(&self, _params: &TessellationParams) -> Vec<Point2> {
        self.points.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_single_point() {
        assert!(Polyline::new(vec![Point2::new(0.0, 0.0)]).is_err());
    }

    #[test]
    fn length_and_endpoints() {
        let pl = Polyline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 4.0),
        ])
        .unwrap();
        assert!((pl.length() - 7.0).abs() < 1e-12);
        assert_eq!(pl.start(), Point2::new(0.0, 0.0));
        assert_eq!(pl.end(), Point2::new(3.0, 4.0));
        assert_eq!(pl.sample(&TessellationParams::default()).len(), 3);
    }
}
