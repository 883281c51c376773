use crate::geometry::{BoundaryCurve, Curve2};
use crate::math::Point2;

use super::segment::{BoundarySegment, ElementId};

/// An ordered, cyclic sequence of boundary segments.
///
/// The end of segment `i` is expected to meet the start of segment
/// `i + 1 mod n`; this is checked during extraction, never repaired.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryLoop {
    /// The ordered segments of the loop.
    pub segments: Vec<BoundarySegment>,
}

impl BoundaryLoop {
    /// Creates a loop from its segments.
    #[must_use]
    pub fn new(segments: Vec<BoundarySegment>) -> Self {
        Self { segments }
    }

    /// Creates a closed loop of straight segments through `points`.
    ///
    /// The closing segment from the last point back to the first is added.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let n = points.len();
        let segments = (0..n)
            .map(|i| BoundarySegment::new(BoundaryCurve::line(points[i], points[(i + 1) % n])))
            .collect();
        Self { segments }
    }

    /// Creates a closed loop of straight segments, each bounded by the
    /// element and thickness given alongside its start point.
    #[must_use]
    pub fn from_walls(points: &[(Point2, Option<ElementId>, f64)]) -> Self {
        let n = points.len();
        let segments = (0..n)
            .map(|i| {
                let (start, element, thickness) = points[i];
                let end = points[(i + 1) % n].0;
                BoundarySegment {
                    curve: BoundaryCurve::line(start, end),
                    element,
                    thickness,
                }
            })
            .collect();
        Self { segments }
    }

    /// Creates a closed loop from bulge-encoded vertices.
    ///
    /// Each vertex carries the bulge of the segment that leaves it, so the
    /// last vertex describes the closing segment back to the first.
    #[must_use]
    pub fn from_bulges(vertices: &[(Point2, f64)]) -> Self {
        let n = vertices.len();
        let segments = (0..n)
            .map(|i| {
                let (start, bulge) = vertices[i];
                let end = vertices[(i + 1) % n].0;
                BoundarySegment::new(BoundaryCurve::from_bulge(start, end, bulge))
            })
            .collect();
        Self { segments }
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the loop has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the start point of every segment, in order.
    #[must_use]
    pub fn start_points(&self) -> Vec<Point2> {
        self.segments.iter().map(|s| s.curve.start()).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_points_closes_the_loop() {
        let lp = BoundaryLoop::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 3.0),
        ]);
        assert_eq!(lp.len(), 3);
        assert_eq!(lp.segments[2].curve.end(), Point2::new(0.0, 0.0));
        assert!(lp.segments.iter().all(|s| s.curve.is_straight()));
    }

    #[test]
    fn from_bulges_mixes_lines_and_arcs() {
        let lp = BoundaryLoop::from_bulges(&[
            (Point2::new(0.0, 0.0), 0.0),
            (Point2::new(2.0, 0.0), 1.0),
            (Point2::new(2.0, 2.0), 0.0),
            (Point2::new(0.0, 2.0), 0.0),
        ]);
        assert_eq!(lp.len(), 4);
        assert!(lp.segments[0].curve.is_straight());
        assert!(!lp.segments[1].curve.is_straight());
        let arc_end = lp.segments[1].curve.end();
        assert!((arc_end - Point2::new(2.0, 2.0)).norm() < 1e-9);
    }

    #[test]
    fn from_walls_keeps_elements_and_thickness() {
        let lp = BoundaryLoop::from_walls(&[
            (Point2::new(0.0, 0.0), Some(ElementId(7)), 0.2),
            (Point2::new(1.0, 0.0), None, 0.0),
            (Point2::new(1.0, 1.0), Some(ElementId(9)), 0.1),
        ]);
        assert_eq!(lp.segments[0].element, Some(ElementId(7)));
        assert_eq!(lp.segments[1].element, None);
        assert!((lp.segments[2].thickness - 0.1).abs() < 1e-12);
        assert_eq!(lp.start_points()[1], Point2::new(1.0, 0.0));
    }
}
