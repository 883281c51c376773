/// 2D arc/bulge math utilities.
///
/// Arcs are stored in center-radius-angle form: a center, a radius, a start
/// angle and a signed sweep (positive = counter-clockwise).
///
/// Bulge convention: `bulge = tan(sweep_angle / 4)`.
/// - `bulge = 0`: straight line
/// - `bulge > 0`: counter-clockwise arc
/// - `bulge < 0`: clockwise arc
/// - `|bulge| = 1`: semicircle
use std::f64::consts::{PI, TAU};

use super::Point2;

/// Converts a bulge-defined arc segment to center-radius-angle form.
///
/// Returns `(center, radius, start_angle, sweep_angle)`, or `None` when the
/// chord has zero length or the bulge is zero (straight segment).
#[must_use]
pub fn arc_from_bulge(p0: &Point2, p1: &Point2, bulge: f64) -> Option<(Point2, f64, f64, f64)> {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let chord_len = (dx * dx + dy * dy).sqrt();

    if chord_len < 1e-12 || bulge.abs() < 1e-12 {
        return None;
    }

    // Distance from chord midpoint to center, as a multiple of the half chord.
    let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
    let mx = (p0.x + p1.x) * 0.5;
    let my = (p0.y + p1.y) * 0.5;

    // Normal to chord pointing toward center (for positive bulge, center is left of chord).
    let nx = -dy / chord_len;
    let ny = dx / chord_len;

    let center = Point2::new(
        mx + sagitta_ratio * (chord_len * 0.5) * nx,
        my + sagitta_ratio * (chord_len * 0.5) * ny,
    );

    // r = d*(1+b²)/(4*|b|) derived from r = d/(2*sin(θ/2)) with θ=4*atan(b)
    let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());
    let start_angle = (p0.y - center.y).atan2(p0.x - center.x);
    let sweep = (4.0 * bulge.atan()).clamp(-TAU, TAU);

    Some((center, radius, start_angle, sweep))
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Computes the number of chords needed to approximate an arc so that the
/// sagitta of each chord stays within `tolerance`.
///
/// The count is clamped to `[min, max]`.
#[must_use]
pub fn arc_subdivision_count(
    radius: f64,
    abs_sweep: f64,
    tolerance: f64,
    min: usize,
    max: usize,
) -> usize {
    let min = min.max(1);
    let max = max.max(min);
    if radius < 1e-12 || abs_sweep < 1e-12 || tolerance <= 0.0 {
        return min;
    }
    // sagitta = r * (1 - cos(θ/2))  =>  θ = 2 * acos(1 - tolerance/r)
    let max_angle = if tolerance >= radius {
        PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (abs_sweep / max_angle).ceil() as usize;
    n.clamp(min, max)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bulge_semicircle() {
        let (c, r, start, sweep) =
            arc_from_bulge(&Point2::new(0.0, 0.0), &Point2::new(2.0, 0.0), 1.0).unwrap();
        assert_abs_diff_eq!(c.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(start, PI, epsilon = 1e-12);
        assert_abs_diff_eq!(sweep, PI, epsilon = 1e-12);

        // CCW from angle π by π ends at angle 2π, i.e. (2, 0).
        let end = arc_point_at(&c, r, start, sweep, 1.0);
        assert_abs_diff_eq!(end.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(end.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn bulge_zero_is_not_an_arc() {
        assert!(arc_from_bulge(&Point2::new(0.0, 0.0), &Point2::new(1.0, 0.0), 0.0).is_none());
        assert!(arc_from_bulge(&Point2::new(1.0, 1.0), &Point2::new(1.0, 1.0), 0.5).is_none());
    }

    #[test]
    fn subdivision_respects_bounds() {
        // Quarter circle of radius 10 at 0.01 tolerance needs ~18 chords.
        let n = arc_subdivision_count(10.0, PI / 2.0, 0.01, 4, 64);
        assert!((4..=64).contains(&n));
        assert!(n > 4, "n={n}");

        // Huge tolerance falls back to the minimum.
        assert_eq!(arc_subdivision_count(1.0, PI / 2.0, 5.0, 4, 64), 4);

        // Tiny tolerance is capped.
        assert_eq!(arc_subdivision_count(1000.0, TAU, 1e-9, 4, 64), 64);
    }
}
