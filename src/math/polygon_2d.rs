use super::{cross_2d, Point2, Vector2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Length of the closed polygon outline, including the closing edge.
#[must_use]
pub fn perimeter(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| (points[(i + 1) % n] - points[i]).norm())
        .sum()
}

/// Removes consecutive duplicate vertices (within `eps`) from a closed
/// polygon, including a duplicate closing vertex.
#[must_use]
pub fn dedup_consecutive(points: &[Point2], eps: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_some_and(|q| (p - q).norm() <= eps) {
            continue;
        }
        out.push(*p);
    }
    while out.len() > 1 && (out[out.len() - 1] - out[0]).norm() <= eps {
        out.pop();
    }
    out
}

/// Winding number of `point` with respect to the closed polygon `verts`.
///
/// Non-zero => inside, zero => outside.
#[must_use]
pub fn winding_number(point: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        let edge = b - a;
        let to_point = point - a;

        if a.y <= point.y {
            if b.y > point.y && cross_2d(&edge, &to_point) > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && cross_2d(&edge, &to_point) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Point-in-region test over a set of loops using the even-odd rule.
///
/// A point is inside when it lies inside an odd number of loops, so holes
/// are subtracted regardless of their winding direction.
#[must_use]
pub fn point_in_loops(point: &Point2, loops: &[Vec<Point2>]) -> bool {
    let hits = loops
        .iter()
        .filter(|verts| verts.len() >= 3 && winding_number(point, verts) != 0)
        .count();
    hits % 2 == 1
}

/// Returns the normalized direction from point `a` to point `b`, or `None`
/// for a zero-length segment.
#[must_use]
pub fn segment_direction(a: &Point2, b: &Point2) -> Option<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return None;
    }
    Some(d / len)
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}
