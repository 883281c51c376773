use crate::math::{Point2, Vector2};
use crate::region::{ElementId, RegionStore, SegmentKey};
use crate::tessellation::Tessellation;

use super::containment::ContainsPoint;
use super::matcher::Pairing;

/// A pairing that passed both the distance and the containment checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfirmedPairing {
    /// The segment the probe started from.
    pub source: SegmentKey,
    /// The segment on the other side.
    pub target: SegmentKey,
    /// Midpoint-to-midpoint distance.
    pub distance: f64,
    /// Separating element recorded on the source segment.
    pub element: Option<ElementId>,
    /// The probe point that landed in the target region.
    pub probe: Point2,
    /// Unit normal of the source segment pointing toward the target region.
    pub outward: Vector2,
}

/// Why a pairing was not confirmed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropReason {
    /// The segments are at least the maximum partition thickness apart.
    TooFar { distance: f64 },
    /// Neither probe direction landed in the target region.
    AmbiguousContainment,
}

/// Outcome of classifying one pairing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    Confirmed(ConfirmedPairing),
    Dropped(DropReason),
}

/// Decides whether a nearest-segment pairing is a genuine adjacency.
///
/// The pairing must be closer than `max_partition_thickness` (strictly).
/// A probe point is then placed beyond the source midpoint along the segment
/// normal, at the segment's wall thickness (capped by the measured gap) plus
/// `probe_offset`. The normal sign is not known in advance, so the opposite
/// sign is tried when the first probe does not land in the target region.
#[derive(Debug)]
pub struct AdjacencyClassifier<'a, C: ?Sized> {
    store: &'a RegionStore,
    tessellations: &'a [Tessellation],
    oracle: &'a C,
    max_partition_thickness: f64,
    probe_offset: f64,
}

impl<'a, C: ContainsPoint + ?Sized> AdjacencyClassifier<'a, C> {
    /// Creates a new classifier.
    #[must_use]
    pub fn new(
        store: &'a RegionStore,
        tessellations: &'a [Tessellation],
        oracle: &'a C,
        max_partition_thickness: f64,
        probe_offset: f64,
    ) -> Self {
        Self {
            store,
            tessellations,
            oracle,
            max_partition_thickness,
            probe_offset,
        }
    }

    /// Classifies one pairing.
    ///
    /// A pairing whose source is not among this classifier's tessellations
    /// is dropped as ambiguous.
    #[must_use]
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn classify(&self, pairing: &Pairing) -> Classification {
        if !(pairing.distance < self.max_partition_thickness) {
            return Classification::Dropped(DropReason::TooFar {
                distance: pairing.distance,
            });
        }

        let Some(source) = self
            .tessellations
            .get(pairing.source_index)
            .filter(|t| t.key == pairing.source)
        else {
            return Classification::Dropped(DropReason::AmbiguousContainment);
        };
        let segment = self.store.segment(pairing.source);
        // Rooms bounded on the wall centreline touch; the wall must not push
        // the probe past a shallow neighbour.
        let thickness = segment.map_or(0.0, |s| s.thickness.max(0.0));
        let reach = thickness.min(pairing.distance) + self.probe_offset;

        for flipped in [false, true] {
            let outward = source.signed_normal(flipped);
            let probe = source.midpoint + outward * reach;
            if self.oracle.contains_point(pairing.target.region, &probe) {
                return Classification::Confirmed(ConfirmedPairing {
                    source: pairing.source,
                    target: pairing.target,
                    distance: pairing.distance,
                    element: segment.and_then(|s| s.element),
                    probe,
                    outward,
                });
            }
        }
        Classification::Dropped(DropReason::AmbiguousContainment)
    }
}
