use crate::geometry::BoundaryCurve;

use super::RegionId;

/// Host reference to the physical element (wall, partition, room separation
/// line) that bounds a segment.
///
/// Opaque to the resolver: it is carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// One curve of a boundary loop.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySegment {
    /// The geometric curve of this segment.
    pub curve: BoundaryCurve,
    /// The separating element on this side of the region, if known.
    pub element: Option<ElementId>,
    /// Thickness of the separating element, `0.0` when unknown.
    pub thickness: f64,
}

impl BoundarySegment {
    /// Creates a segment with no separating element and zero thickness.
    #[must_use]
    pub fn new(curve: BoundaryCurve) -> Self {
        Self {
            curve,
            element: None,
            thickness: 0.0,
        }
    }

    /// Sets the separating element.
    #[must_use]
    pub fn with_element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    /// Sets the separating element thickness.
    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }
}

/// Address of a segment inside a [`RegionStore`](super::RegionStore).
///
/// Segments refer back to their owning region through this key rather
/// than holding a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentKey {
    /// The owning region.
    pub region: RegionId,
    /// Index of the loop within the region.
    pub loop_index: usize,
    /// Index of the segment within the loop.
    pub segment_index: usize,
}

impl SegmentKey {
    /// Creates a new segment key.
    #[must_use]
    pub fn new(region: RegionId, loop_index: usize, segment_index: usize) -> Self {
        Self {
            region,
            loop_index,
            segment_index,
        }
    }
}
