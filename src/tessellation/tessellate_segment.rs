use crate::error::{GeometryError, Result};
use crate::geometry::Curve2;
use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::{Point2, TOLERANCE};
use crate::region::{BoundarySegment, SegmentKey};

use super::{Tessellation, TessellationParams};

/// Tessellates a boundary segment and derives its midpoint frame.
#[derive(Debug)]
pub struct TessellateSegment<'a> {
    key: SegmentKey,
    segment: &'a BoundarySegment,
    params: TessellationParams,
}

impl<'a> TessellateSegment<'a> {
    /// Creates a new `TessellateSegment` operation.
    #[must_use]
    pub fn new(key: SegmentKey, segment: &'a BoundarySegment, params: TessellationParams) -> Self {
        Self {
            key,
            segment,
            params,
        }
    }

    /// Executes the tessellation.
    ///
    /// Straight segments yield their two endpoints; curves are sampled so
    /// that every chord stays within the chord tolerance. The midpoint is the
    /// center sample (odd count) or the mean of the two center samples (even
    /// count), and the tangent runs from the sample before the midpoint to
    /// the sample after it.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the segment has zero length,
    /// so no tangent can be derived.
    pub fn execute(&self) -> Result<Tessellation> {
        let mut points = self.segment.curve.sample(&self.params);
        points.dedup_by(|b, a| (*b - *a).norm() < TOLERANCE);

        let n = points.len();
        if n < 2 {
            return Err(GeometryError::Degenerate("zero-length boundary segment".into()).into());
        }

        let (midpoint, before, after) = if n % 2 == 0 {
            let a = points[n / 2 - 1];
            let b = points[n / 2];
            (Point2::from((a.coords + b.coords) * 0.5), a, b)
        } else {
            let m = n / 2;
            (points[m], points[m - 1], points[m + 1])
        };

        let tangent = segment_direction(&before, &after).ok_or(GeometryError::ZeroVector)?;
        let normal = left_normal(&tangent);

        Ok(Tessellation {
            key: self.key,
            points,
            midpoint,
            tangent,
            normal,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::BoundaryCurve;
    use crate::region::RegionId;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn key() -> SegmentKey {
        SegmentKey::new(RegionId::default(), 0, 0)
    }

    #[test]
    fn straight_segment_uses_endpoints() {
        let seg = BoundarySegment::new(BoundaryCurve::line(
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        ));
        let t = TessellateSegment::new(key(), &seg, TessellationParams::default())
            .execute()
            .unwrap();
        assert_eq!(t.points.len(), 2);
        assert_abs_diff_eq!(t.midpoint.x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.midpoint.y, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.tangent.y, 1.0, epsilon = 1e-12);
        // Left of an upward segment is -x.
        assert_abs_diff_eq!(t.normal.x, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.signed_normal(true).x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn arc_midpoint_lies_on_curve() {
        // Upper semicircle from (1, 0) to (-1, 0).
        let seg = BoundarySegment::new(BoundaryCurve::arc(Point2::origin(), 1.0, 0.0, PI).unwrap());
        let params = TessellationParams::default().with_tolerance(1e-3);
        let t = TessellateSegment::new(key(), &seg, params).execute().unwrap();
        assert!(t.points.len() > 2);

        // Apex at (0, 1), tangent pointing -x, normal pointing toward the center.
        assert_abs_diff_eq!(t.midpoint.y, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(t.midpoint.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.tangent.x, -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.normal.y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn odd_sample_count_uses_center_sample() {
        let seg = BoundarySegment::new(
            BoundaryCurve::polyline(vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(2.0, 0.0),
            ])
            .unwrap(),
        );
        let t = TessellateSegment::new(key(), &seg, TessellationParams::default())
            .execute()
            .unwrap();
        assert_eq!(t.midpoint, Point2::new(1.0, 1.0));
        assert_abs_diff_eq!(t.tangent.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_length_segment_fails() {
        let p = Point2::new(3.0, 3.0);
        let seg = BoundarySegment::new(BoundaryCurve::line(p, p));
        assert!(TessellateSegment::new(key(), &seg, TessellationParams::default())
            .execute()
            .is_err());
    }
}
