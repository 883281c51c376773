mod tessellate_segment;

pub use tessellate_segment::TessellateSegment;

use crate::error::{ensure_positive, ParameterError, Result};
use crate::math::{Point2, Vector2};
use crate::region::SegmentKey;

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationParams {
    /// Maximum allowed chord deviation from the true curve.
    pub tolerance: f64,
    /// Minimum number of chords for curved segments.
    pub min_segments: usize,
    /// Maximum number of chords for curved segments.
    pub max_segments: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            min_segments: 4,
            max_segments: 64,
        }
    }
}

impl TessellationParams {
    /// Returns a copy with the given chord tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Checks the parameters for consistency.
    ///
    /// # Errors
    ///
    /// Returns a `ParameterError` if the tolerance is not positive or the
    /// segment bounds are empty or inverted.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("tessellation.tolerance", self.tolerance)?;
        if self.min_segments == 0 || self.min_segments > self.max_segments {
            return Err(ParameterError::Tessellation(format!(
                "segment bounds [{}, {}] are invalid",
                self.min_segments, self.max_segments
            ))
            .into());
        }
        Ok(())
    }
}

/// Piecewise-linear sampling of one boundary segment with the frame used
/// for nearest-segment matching.
#[derive(Debug, Clone, PartialEq)]
pub struct Tessellation {
    /// The segment this tessellation was computed from.
    pub key: SegmentKey,
    /// Sampled points from start to end.
    pub points: Vec<Point2>,
    /// Midpoint of the two center samples.
    pub midpoint: Point2,
    /// Unit tangent across the midpoint.
    pub tangent: Vector2,
    /// Unit normal, the tangent rotated a quarter turn counter-clockwise.
    ///
    /// Whether it points out of the owning region is not known here; the
    /// classifier probes both signs.
    pub normal: Vector2,
}

impl Tessellation {
    /// Returns the normal with the requested sign.
    #[must_use]
    pub fn signed_normal(&self, flipped: bool) -> Vector2 {
        if flipped {
            -self.normal
        } else {
            self.normal
        }
    }
}
