mod boundary_loop;
mod segment;

pub use boundary_loop::BoundaryLoop;
pub use segment::{BoundarySegment, ElementId, SegmentKey};

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Unique identifier for a region in the region store.
    pub struct RegionId;
}

/// A bounded planar space (room, area, zone).
///
/// The first loop is the outer perimeter, any further loops are holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    /// Display name, used only in diagnostics.
    pub name: String,
    /// Boundary loops of the region.
    pub loops: Vec<BoundaryLoop>,
}

impl Region {
    /// Creates a region without boundary loops.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loops: Vec::new(),
        }
    }

    /// Adds a boundary loop.
    #[must_use]
    pub fn with_loop(mut self, boundary: BoundaryLoop) -> Self {
        self.loops.push(boundary);
        self
    }

    /// Returns `true` if the region has no boundary at all.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.loops.is_empty()
    }
}

/// Arena that owns the regions of one resolution run.
///
/// Regions are referenced by [`RegionId`] (generational indices); iteration
/// order is insertion order for a store that only ever grows, which keeps
/// resolution deterministic.
#[derive(Debug, Default)]
pub struct RegionStore {
    regions: SlotMap<RegionId, Region>,
}

impl RegionStore {
    /// Creates a new, empty region store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a region and returns its ID.
    pub fn insert(&mut self, region: Region) -> RegionId {
        self.regions.insert(region)
    }

    /// Returns the region, if present.
    #[must_use]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Returns the segment addressed by `key`, if present.
    #[must_use]
    pub fn segment(&self, key: SegmentKey) -> Option<&BoundarySegment> {
        self.regions
            .get(key.region)?
            .loops
            .get(key.loop_index)?
            .segments
            .get(key.segment_index)
    }

    /// Iterates over all regions.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions.iter()
    }

    /// Returns the number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if the store holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns the display name of a region, or an empty string.
    #[must_use]
    pub fn name(&self, id: RegionId) -> &str {
        self.regions.get(id).map_or("", |r| r.name.as_str())
    }
}
