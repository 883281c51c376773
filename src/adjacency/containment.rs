use slotmap::SecondaryMap;

use crate::geometry::Curve2;
use crate::math::polygon_2d::{dedup_consecutive, point_in_loops};
use crate::math::{Point2, TOLERANCE};
use crate::region::{BoundaryLoop, RegionId, RegionStore};
use crate::tessellation::TessellationParams;

/// Answers "is this point inside that region".
///
/// Supplied by whatever geometric substrate owns the regions: a host solid
/// test, a 2D polygon test, or [`PolygonContainment`]. Resolution treats it
/// as an opaque oracle and may call it from several threads.
pub trait ContainsPoint {
    /// Returns `true` if `point` lies inside `region`.
    fn contains_point(&self, region: RegionId, point: &Point2) -> bool;
}

impl<F> ContainsPoint for F
where
    F: Fn(RegionId, &Point2) -> bool,
{
    fn contains_point(&self, region: RegionId, point: &Point2) -> bool {
        self(region, point)
    }
}

/// Planar containment over the tessellated boundary loops of each region.
///
/// Uses the even-odd rule across all loops, so hole loops are subtracted
/// whatever their winding.
///
/// Rings are rebuilt from the raw loops of every region, independently of
/// boundary extraction. A resolution run only asks about regions that own
/// tessellated segments, so the rings of a skipped region are never queried.
#[derive(Debug, Default)]
pub struct PolygonContainment {
    loops: SecondaryMap<RegionId, Vec<Vec<Point2>>>,
}

impl PolygonContainment {
    /// Builds the polygons of every region in `store`.
    #[must_use]
    pub fn from_store(store: &RegionStore, params: &TessellationParams) -> Self {
        let mut loops = SecondaryMap::new();
        for (id, region) in store.iter() {
            let polygons: Vec<Vec<Point2>> = region
                .loops
                .iter()
                .map(|boundary| loop_polygon(boundary, params))
                .filter(|poly| poly.len() >= 3)
                .collect();
            loops.insert(id, polygons);
        }
        Self { loops }
    }

    /// Returns the polygons built for `region`.
    #[must_use]
    pub fn polygons(&self, region: RegionId) -> Option<&[Vec<Point2>]> {
        self.loops.get(region).map(Vec::as_slice)
    }
}

impl ContainsPoint for PolygonContainment {
    fn contains_point(&self, region: RegionId, point: &Point2) -> bool {
        self.loops
            .get(region)
            .is_some_and(|polygons| point_in_loops(point, polygons))
    }
}

/// Concatenates the samples of every segment of a loop into one closed
/// vertex ring.
fn loop_polygon(boundary: &BoundaryLoop, params: &TessellationParams) -> Vec<Point2> {
    let mut ring = Vec::new();
    for seg in &boundary.segments {
        let samples = seg.curve.sample(params);
        // The end of each segment is the start of the next.
        ring.extend_from_slice(&samples[..samples.len().saturating_sub(1)]);
    }
    dedup_consecutive(&ring, TOLERANCE)
}
