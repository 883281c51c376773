use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::math::{distance_squared, Point2};
use crate::tessellation::Tessellation;

/// An entry in the candidate index: a midpoint tagged with the position of
/// its tessellation in the run's tessellation list.
type MidpointEntry = GeomWithData<[f64; 2], usize>;

/// Read-only spatial index over the midpoints of all tessellated segments,
/// backed by an R*-tree.
///
/// The index only narrows the candidate set; selection uses the same
/// squared-distance metric and lowest-index tie-break as a brute-force scan,
/// so both produce the same nearest segment. Built once per run, then
/// queried concurrently.
#[derive(Debug)]
pub struct CandidateIndex {
    tree: RTree<MidpointEntry>,
}

impl CandidateIndex {
    /// Builds the index from the tessellations of one run.
    #[must_use]
    pub fn build(tessellations: &[Tessellation]) -> Self {
        let entries = tessellations
            .iter()
            .enumerate()
            .map(|(i, t)| MidpointEntry::new([t.midpoint.x, t.midpoint.y], i))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Returns the number of indexed segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Returns `true` if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Returns the indices of all segments whose midpoint lies within
    /// `radius` of `point`, in ascending index order.
    #[must_use]
    pub fn within_radius(&self, point: &Point2, radius: f64) -> Vec<usize> {
        let r2 = radius * radius;
        let mut hits: Vec<usize> = self
            .tree
            .nearest_neighbor_iter(&[point.x, point.y])
            .map(|entry| (entry.data, distance_squared(point, &entry_point(entry))))
            .take_while(|&(_, d2)| d2 <= r2)
            .map(|(i, _)| i)
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Finds the nearest segment midpoint to `point` among segments accepted
    /// by `accept`, returning its index and squared distance.
    ///
    /// Candidates are visited in order of increasing distance; the walk stops
    /// once it passes the best accepted distance. Ties on distance resolve to
    /// the lowest index.
    pub fn nearest_accepted(
        &self,
        point: &Point2,
        mut accept: impl FnMut(usize) -> bool,
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for entry in self.tree.nearest_neighbor_iter(&[point.x, point.y]) {
            let d2 = distance_squared(point, &entry_point(entry));
            match best {
                Some((_, best_d2)) if d2 > best_d2 => break,
                Some((best_i, _)) if entry.data > best_i => continue,
                _ => {}
            }
            if accept(entry.data) {
                best = Some((entry.data, d2));
            }
        }
        best
    }
}

fn entry_point(entry: &MidpointEntry) -> Point2 {
    let [x, y] = *entry.geom();
    Point2::new(x, y)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector2;
    use crate::region::{RegionId, SegmentKey};

    fn tess(i: usize, x: f64, y: f64) -> Tessellation {
        Tessellation {
            key: SegmentKey::new(RegionId::default(), 0, i),
            points: vec![Point2::new(x, y - 0.5), Point2::new(x, y + 0.5)],
            midpoint: Point2::new(x, y),
            tangent: Vector2::new(0.0, 1.0),
            normal: Vector2::new(-1.0, 0.0),
        }
    }

    #[test]
    fn radius_query_sorted() {
        let ts = vec![tess(0, 0.0, 0.0), tess(1, 5.0, 0.0), tess(2, 1.0, 0.0)];
        let index = CandidateIndex::build(&ts);
        assert_eq!(index.len(), 3);
        assert_eq!(index.within_radius(&Point2::new(0.0, 0.0), 1.5), vec![0, 2]);
    }

    #[test]
    fn nearest_respects_filter_and_ties() {
        let ts = vec![
            tess(0, 0.0, 0.0),
            tess(1, 2.0, 0.0),
            tess(2, -2.0, 0.0),
            tess(3, 9.0, 0.0),
        ];
        let index = CandidateIndex::build(&ts);
        let q = Point2::new(0.0, 0.0);

        // Segment 0 excluded; 1 and 2 tie at distance 2, the lower index wins.
        let (i, d2) = index.nearest_accepted(&q, |j| j != 0).unwrap();
        assert_eq!(i, 1);
        assert!((d2 - 4.0).abs() < 1e-12);

        assert_eq!(index.nearest_accepted(&q, |j| j == 3).unwrap().0, 3);
        assert!(index.nearest_accepted(&q, |_| false).is_none());
    }

    #[test]
    fn empty_index() {
        let index = CandidateIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.nearest_accepted(&Point2::origin(), |_| true).is_none());
    }
}
