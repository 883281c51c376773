pub mod classify;
pub mod containment;
pub mod graph;
pub mod matcher;
mod resolver;

pub use classify::{AdjacencyClassifier, Classification, ConfirmedPairing, DropReason};
pub use containment::{ContainsPoint, PolygonContainment};
pub use graph::AdjacencyGraph;
pub use matcher::{MatchOutcome, MatchStrategy, NearestSegmentMatcher, Pairing};
pub use resolver::{
    AdjacencyResolver, Diagnostics, DroppedPairing, Resolution, ResolverParams, SkippedRegion,
};

use rayon::prelude::*;

/// Maps `f` over `items`, on the rayon pool when `parallel` is set.
///
/// Output order always follows input order.
pub(crate) fn map_ordered<T, R, F>(items: &[T], parallel: bool, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if parallel {
        items.par_iter().map(f).collect()
    } else {
        items.iter().map(f).collect()
    }
}
