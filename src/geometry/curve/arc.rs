use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{arc_from_bulge, arc_point_at, arc_subdivision_count};
use crate::math::{Point2, TOLERANCE};
use crate::tessellation::TessellationParams;

use super::Curve2;

/// A circular arc in the working plane.
///
/// The arc sweeps from `start_angle` by `sweep` radians around `center`;
/// a positive sweep runs counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    center: Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the arc circle
    /// * `radius` - Radius (must be positive)
    /// * `start_angle` - Start angle in radians
    /// * `sweep` - Signed sweep in radians, non-zero and at most a full turn
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the radius is non-positive or
    /// the sweep is zero or exceeds a full turn.
    pub fn new(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        if !(radius.is_finite() && radius > TOLERANCE) {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if sweep.abs() < TOLERANCE || sweep.abs() > TAU + TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "arc sweep {sweep} must be non-zero and within one turn"
            ))
            .into());
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Creates an arc from its endpoints and center, running counter-clockwise
    /// when `ccw` is set.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the endpoints are not
    /// equidistant from the center (within `1e-6` relative) or coincide.
    pub fn from_endpoints(start: Point2, end: Point2, center: Point2, ccw: bool) -> Result<Self> {
        let r0 = (start - center).norm();
        let r1 = (end - center).norm();
        if (r0 - r1).abs() > 1e-6 * r0.max(1.0) {
            return Err(
                GeometryError::Degenerate(format!("arc endpoints at radii {r0} and {r1}")).into(),
            );
        }
        let start_angle = (start.y - center.y).atan2(start.x - center.x);
        let end_angle = (end.y - center.y).atan2(end.x - center.x);

        let mut sweep = end_angle - start_angle;
        if ccw {
            if sweep <= 0.0 {
                sweep += TAU;
            }
        } else if sweep >= 0.0 {
            sweep -= TAU;
        }
        Self::new(center, r0, start_angle, sweep)
    }

    /// Creates an arc from a bulge-encoded vertex pair, or `None` when the
    /// pair describes a straight segment.
    #[must_use]
    pub fn from_bulge(start: &Point2, end: &Point2, bulge: f64) -> Option<Self> {
        let (center, radius, start_angle, sweep) = arc_from_bulge(start, end, bulge)?;
        Self::new(center, radius, start_angle, sweep).ok()
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the signed sweep angle.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Evaluates the arc at normalized parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        arc_point_at(&self.center, self.radius, self.start_angle, self.sweep, t)
    }
}

impl Curve2 for Arc {
    fn start(&self) -> Point2 {
        self.point_at(0.0)
    }

    fn end(&self) -> Point2 {
        self.point_at(1.0)
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    fn sample(&self, params: &TessellationParams) -> Vec<Point2> {
        let n = arc_subdivision_count(
            self.radius,
            self.sweep.abs(),
            params.tolerance,
            params.min_segments,
            params.max_segments,
        );
        (0..=n)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / n as f64;
                self.point_at(t)
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn rejects_degenerate() {
        assert!(Arc::new(Point2::origin(), 0.0, 0.0, 1.0).is_err());
        assert!(Arc::new(Point2::origin(), 1.0, 0.0, 0.0).is_err());
        assert!(Arc::new(Point2::origin(), 1.0, 0.0, 7.0).is_err());
    }

    #[test]
    fn quarter_circle_endpoints_and_length() {
        let arc = Arc::new(Point2::origin(), 2.0, 0.0, FRAC_PI_2).unwrap();
        assert_abs_diff_eq!(arc.start().x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.end().x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.end().y, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.length(), std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn from_endpoints_clockwise() {
        let arc = Arc::from_endpoints(
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::origin(),
            false,
        )
        .unwrap();
        assert_abs_diff_eq!(arc.sweep(), -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.end().x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn from_endpoints_rejects_unequal_radii() {
        assert!(Arc::from_endpoints(
            Point2::new(0.0, 1.0),
            Point2::new(2.0, 0.0),
            Point2::origin(),
            true
        )
        .is_err());
    }

    #[test]
    fn samples_stay_within_chord_tolerance() {
        let arc = Arc::new(Point2::origin(), 5.0, 0.0, FRAC_PI_2).unwrap();
        let params = TessellationParams::default();
        let pts = arc.sample(&params);
        assert!(pts.len() >= params.min_segments + 1);
        assert_abs_diff_eq!(pts[0].x, 5.0, epsilon = 1e-12);
        for w in pts.windows(2) {
            let mid = Point2::from((w[0].coords + w[1].coords) * 0.5);
            let sagitta = 5.0 - mid.coords.norm();
            assert!(sagitta <= params.tolerance + 1e-12, "sagitta={sagitta}");
        }
    }
}
