use std::collections::{BTreeMap, BTreeSet};

use crate::region::{ElementId, RegionId, RegionStore};

use super::classify::ConfirmedPairing;

/// Region-to-neighbours mapping produced by a resolution run.
///
/// Each direction is recorded independently: `b` being a neighbour of `a`
/// does not make `a` a neighbour of `b`. Ordered collections keep equality
/// and iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    neighbors: BTreeMap<RegionId, BTreeSet<RegionId>>,
    separators: BTreeMap<(RegionId, RegionId), BTreeSet<ElementId>>,
}

impl AdjacencyGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from confirmed pairings.
    ///
    /// Every region in `regions` gets an entry, even with no neighbours.
    #[must_use]
    pub fn from_confirmed(
        regions: impl IntoIterator<Item = RegionId>,
        confirmed: &[ConfirmedPairing],
    ) -> Self {
        let mut graph = Self::new();
        for id in regions {
            graph.add_region(id);
        }
        for pairing in confirmed {
            graph.insert(
                pairing.source.region,
                pairing.target.region,
                pairing.element,
            );
        }
        graph
    }

    /// Builds the graph implied by shared separating elements: two regions
    /// are neighbours (both ways) when boundary segments of both reference
    /// the same element.
    ///
    /// Only regions listed in `regions` take part.
    #[must_use]
    pub fn from_shared_elements(store: &RegionStore, regions: &[RegionId]) -> Self {
        let mut by_element: BTreeMap<ElementId, BTreeSet<RegionId>> = BTreeMap::new();
        let mut graph = Self::new();
        for &id in regions {
            graph.add_region(id);
            let Some(region) = store.get(id) else {
                continue;
            };
            let elements = region
                .loops
                .iter()
                .flat_map(|l| l.segments.iter())
                .filter_map(|s| s.element);
            for element in elements {
                by_element.entry(element).or_default().insert(id);
            }
        }
        for (element, owners) in by_element {
            for &a in &owners {
                for &b in &owners {
                    if a != b {
                        graph.insert(a, b, Some(element));
                    }
                }
            }
        }
        graph
    }

    /// Ensures `region` has an entry.
    pub fn add_region(&mut self, region: RegionId) {
        self.neighbors.entry(region).or_default();
    }

    /// Records `to` as a neighbour of `from`, optionally through `element`.
    ///
    /// Self-adjacency is ignored.
    pub fn insert(&mut self, from: RegionId, to: RegionId, element: Option<ElementId>) {
        if from == to {
            return;
        }
        self.neighbors.entry(from).or_default().insert(to);
        let separators = self.separators.entry((from, to)).or_default();
        if let Some(element) = element {
            separators.insert(element);
        }
    }

    /// Returns the neighbours of `region`, or `None` if the region is not
    /// part of the graph.
    #[must_use]
    pub fn neighbors(&self, region: RegionId) -> Option<&BTreeSet<RegionId>> {
        self.neighbors.get(&region)
    }

    /// Returns `true` if `to` is a neighbour of `from`.
    #[must_use]
    pub fn are_adjacent(&self, from: RegionId, to: RegionId) -> bool {
        self.neighbors.get(&from).is_some_and(|n| n.contains(&to))
    }

    /// Returns the separating elements through which `from` reaches `to`.
    #[must_use]
    pub fn separators(&self, from: RegionId, to: RegionId) -> Vec<ElementId> {
        self.separators
            .get(&(from, to))
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Iterates over the regions in the graph.
    pub fn regions(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.neighbors.keys().copied()
    }

    /// Returns the number of regions in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns `true` if the graph has no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Returns the number of directed neighbour relations.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.neighbors.values().map(BTreeSet::len).sum()
    }

    /// Returns the directed relations `(a, b)` for which `b` does not list
    /// `a` back.
    #[must_use]
    pub fn asymmetric_pairs(&self) -> Vec<(RegionId, RegionId)> {
        self.neighbors
            .iter()
            .flat_map(|(&a, ns)| ns.iter().map(move |&b| (a, b)))
            .filter(|&(a, b)| !self.are_adjacent(b, a))
            .collect()
    }

    /// Returns `true` if every relation is mirrored.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.asymmetric_pairs().is_empty()
    }

    /// Returns a copy with every relation mirrored.
    ///
    /// Never applied by the resolver itself; one-sided proximity is a valid
    /// result.
    #[must_use]
    pub fn symmetrized(&self) -> Self {
        let mut out = self.clone();
        for (a, b) in self.asymmetric_pairs() {
            let elements = self.separators(a, b);
            if elements.is_empty() {
                out.insert(b, a, None);
            }
            for element in elements {
                out.insert(b, a, Some(element));
            }
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::region::{BoundaryLoop, Region};

    fn ids(n: usize) -> (RegionStore, Vec<RegionId>) {
        let mut store = RegionStore::new();
        let ids = (0..n)
            .map(|i| store.insert(Region::new(format!("R{i}"))))
            .collect();
        (store, ids)
    }

    #[test]
    fn insert_deduplicates() {
        let (_, r) = ids(2);
        let mut g = AdjacencyGraph::new();
        g.insert(r[0], r[1], Some(ElementId(1)));
        g.insert(r[0], r[1], Some(ElementId(1)));
        g.insert(r[0], r[1], Some(ElementId(2)));
        g.insert(r[0], r[0], None);
        assert_eq!(g.neighbors(r[0]).unwrap().len(), 1);
        assert_eq!(g.separators(r[0], r[1]), vec![ElementId(1), ElementId(2)]);
        assert!(g.separators(r[1], r[0]).is_empty());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn asymmetry_is_reported_not_fixed() {
        let (_, r) = ids(3);
        let mut g = AdjacencyGraph::from_confirmed(r.iter().copied(), &[]);
        g.insert(r[0], r[1], None);
        g.insert(r[1], r[0], None);
        g.insert(r[2], r[1], Some(ElementId(9)));

        assert_eq!(g.len(), 3);
        assert!(!g.is_symmetric());
        assert_eq!(g.asymmetric_pairs(), vec![(r[2], r[1])]);

        let sym = g.symmetrized();
        assert!(sym.is_symmetric());
        assert!(sym.are_adjacent(r[1], r[2]));
        assert_eq!(sym.separators(r[1], r[2]), vec![ElementId(9)]);
        // `g` itself is untouched.
        assert!(!g.are_adjacent(r[1], r[2]));
    }

    #[test]
    fn shared_elements_link_regions() {
        let mut store = RegionStore::new();
        let wall = ElementId(42);
        let square = |x0: f64, shared: Option<ElementId>| {
            BoundaryLoop::from_walls(&[
                (Point2::new(x0, 0.0), None, 0.0),
                (Point2::new(x0 + 1.0, 0.0), shared, 0.2),
                (Point2::new(x0 + 1.0, 1.0), None, 0.0),
                (Point2::new(x0, 1.0), None, 0.0),
            ])
        };
        let a = store.insert(Region::new("A").with_loop(square(0.0, Some(wall))));
        let b = store.insert(Region::new("B").with_loop(square(1.0, Some(wall))));
        let c = store.insert(Region::new("C").with_loop(square(5.0, None)));

        let g = AdjacencyGraph::from_shared_elements(&store, &[a, b, c]);
        assert!(g.are_adjacent(a, b));
        assert!(g.are_adjacent(b, a));
        assert_eq!(g.separators(a, b), vec![wall]);
        assert!(g.neighbors(c).unwrap().is_empty());
        assert!(g.is_symmetric());
    }
}
