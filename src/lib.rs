pub mod adjacency;
pub mod boundary;
pub mod error;
pub mod geometry;
pub mod index;
pub mod math;
pub mod region;
pub mod tessellation;

pub use adjacency::{AdjacencyGraph, AdjacencyResolver, ContainsPoint, Resolution, ResolverParams};
pub use error::{Result, RoomgraphError};
pub use region::{BoundaryLoop, BoundarySegment, ElementId, Region, RegionId, RegionStore};
