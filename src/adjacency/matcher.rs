use crate::index::CandidateIndex;
use crate::math::distance_squared;
use crate::region::SegmentKey;
use crate::tessellation::Tessellation;

use super::map_ordered;

/// How the matcher finds nearest candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Compare every pair of segments.
    BruteForce,
    /// Query an R*-tree over segment midpoints.
    #[default]
    Indexed,
}

/// A segment paired with its nearest segment owned by another region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pairing {
    /// The segment the search started from.
    pub source: SegmentKey,
    /// Its nearest cross-region segment.
    pub target: SegmentKey,
    /// Midpoint-to-midpoint distance.
    pub distance: f64,
    /// Position of the source in the run's tessellation list.
    pub source_index: usize,
    /// Position of the target in the run's tessellation list.
    pub target_index: usize,
}

/// Result of matching every tessellated segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    /// One pairing per segment that has a cross-region candidate, in
    /// tessellation order.
    pub pairings: Vec<Pairing>,
    /// Segments with no cross-region candidate at all.
    pub unmatched: Vec<SegmentKey>,
}

/// Pairs every segment with the closest segment of a different region,
/// measured midpoint to midpoint.
///
/// Ties resolve to the candidate that comes first in the tessellation list,
/// whichever strategy is used and whether or not the search runs in
/// parallel.
#[derive(Debug)]
pub struct NearestSegmentMatcher<'a> {
    tessellations: &'a [Tessellation],
    strategy: MatchStrategy,
    parallel: bool,
}

impl<'a> NearestSegmentMatcher<'a> {
    /// Creates a new matcher over the tessellations of one run.
    #[must_use]
    pub fn new(tessellations: &'a [Tessellation], strategy: MatchStrategy, parallel: bool) -> Self {
        Self {
            tessellations,
            strategy,
            parallel,
        }
    }

    /// Executes the matching.
    #[must_use]
    pub fn execute(&self) -> MatchOutcome {
        let ts = self.tessellations;
        let indices: Vec<usize> = (0..ts.len()).collect();

        let nearest: Vec<Option<(usize, f64)>> = match self.strategy {
            MatchStrategy::BruteForce => {
                map_ordered(&indices, self.parallel, |&i| nearest_brute_force(ts, i))
            }
            MatchStrategy::Indexed => {
                let index = CandidateIndex::build(ts);
                map_ordered(&indices, self.parallel, |&i| {
                    let region = ts[i].key.region;
                    index.nearest_accepted(&ts[i].midpoint, |j| ts[j].key.region != region)
                })
            }
        };

        let mut outcome = MatchOutcome::default();
        for (i, found) in nearest.into_iter().enumerate() {
            match found {
                Some((j, d2)) => outcome.pairings.push(Pairing {
                    source: ts[i].key,
                    target: ts[j].key,
                    distance: d2.sqrt(),
                    source_index: i,
                    target_index: j,
                }),
                None => outcome.unmatched.push(ts[i].key),
            }
        }
        outcome
    }
}

fn nearest_brute_force(ts: &[Tessellation], i: usize) -> Option<(usize, f64)> {
    let source = &ts[i];
    let mut best: Option<(usize, f64)> = None;
    for (j, candidate) in ts.iter().enumerate() {
        if candidate.key.region == source.key.region {
            continue;
        }
        let d2 = distance_squared(&source.midpoint, &candidate.midpoint);
        let closer = match best {
            Some((_, best_d2)) => d2 < best_d2,
            None => true,
        };
        if closer {
            best = Some((j, d2));
        }
    }
    best
}
