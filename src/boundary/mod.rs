use crate::error::BoundaryError;
use crate::geometry::Curve2;
use crate::math::polygon_2d::{dedup_consecutive, perimeter, signed_area};
use crate::math::Point2;
use crate::region::{BoundaryLoop, Region, RegionId};

/// A boundary loop that passed validation, as a normalized polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLoop {
    /// Index of the loop within its region.
    pub loop_index: usize,
    /// Segment start points with consecutive duplicates removed.
    pub vertices: Vec<Point2>,
    /// Number of segments in the source loop.
    pub segment_count: usize,
}

impl ExtractedLoop {
    /// Signed area of the vertex polygon (positive when counter-clockwise).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// Length of the vertex polygon outline.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        perimeter(&self.vertices)
    }
}

/// The validated boundary of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRegion {
    /// The region the loops belong to.
    pub id: RegionId,
    /// Validated loops, outer perimeter first.
    pub loops: Vec<ExtractedLoop>,
}

impl ExtractedRegion {
    /// Returns `true` when the region has no loops (unbounded or unplaced).
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.loops.is_empty()
    }
}

/// Validates a region's boundary loops.
///
/// Every loop must have at least 3 segments, each segment must end where
/// the next one starts (within `epsilon`), and at least 3 distinct vertices
/// must remain after removing consecutive duplicates. Loops are never
/// repaired or reordered.
#[derive(Debug)]
pub struct ExtractBoundary<'a> {
    id: RegionId,
    region: &'a Region,
    epsilon: f64,
}

impl<'a> ExtractBoundary<'a> {
    /// Creates a new `ExtractBoundary` operation.
    #[must_use]
    pub fn new(id: RegionId, region: &'a Region, epsilon: f64) -> Self {
        Self {
            id,
            region,
            epsilon,
        }
    }

    /// Executes the extraction.
    ///
    /// A region without loops is returned with an empty loop list.
    ///
    /// # Errors
    ///
    /// Returns the first `BoundaryError` found; the whole region is then
    /// considered malformed.
    pub fn execute(&self) -> Result<ExtractedRegion, BoundaryError> {
        let loops = self
            .region
            .loops
            .iter()
            .enumerate()
            .map(|(loop_index, boundary)| self.extract_loop(loop_index, boundary))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ExtractedRegion { id: self.id, loops })
    }

    fn extract_loop(
        &self,
        loop_index: usize,
        boundary: &BoundaryLoop,
    ) -> Result<ExtractedLoop, BoundaryError> {
        let count = boundary.len();
        if count < 3 {
            return Err(BoundaryError::TooFewSegments { loop_index, count });
        }

        for (segment_index, seg) in boundary.segments.iter().enumerate() {
            let next = &boundary.segments[(segment_index + 1) % count];
            let gap = (next.curve.start() - seg.curve.end()).norm();
            if gap > self.epsilon {
                return Err(BoundaryError::Discontinuous {
                    loop_index,
                    segment_index,
                    gap,
                });
            }
        }

        let vertices = dedup_consecutive(&boundary.start_points(), self.epsilon);
        if vertices.len() < 3 {
            return Err(BoundaryError::Degenerate { loop_index });
        }

        Ok(ExtractedLoop {
            loop_index,
            vertices,
            segment_count: count,
        })
    }
}
