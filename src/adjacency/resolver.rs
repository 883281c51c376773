use tracing::{debug, info, warn};

use crate::boundary::{ExtractBoundary, ExtractedRegion};
use crate::error::{ensure_positive, BoundaryError, Result};
use crate::region::{ElementId, Region, RegionId, RegionStore, SegmentKey};
use crate::tessellation::{TessellateSegment, Tessellation, TessellationParams};

use super::classify::{AdjacencyClassifier, Classification, ConfirmedPairing, DropReason};
use super::containment::{ContainsPoint, PolygonContainment};
use super::graph::AdjacencyGraph;
use super::map_ordered;
use super::matcher::{MatchStrategy, NearestSegmentMatcher, Pairing};

/// Millimetres per foot, for the imperial preset.
const MM_PER_FOOT: f64 = 304.8;

/// Parameters of one resolution run, in model working units.
///
/// ```
/// use roomgraph::adjacency::ResolverParams;
///
/// let params = ResolverParams::default();
/// assert!((params.probe_offset - 0.002).abs() < 1e-12);
///
/// let mm = ResolverParams::for_millimetres();
/// assert!((mm.probe_offset - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverParams {
    /// Thickest plausible partition; pairings at or beyond this distance
    /// are not adjacent.
    pub max_partition_thickness: f64,
    /// Distance the containment probe travels past the segment's own wall.
    pub probe_offset: f64,
    /// Loop continuity and duplicate-vertex tolerance.
    pub epsilon: f64,
    /// Curve tessellation quality.
    pub tessellation: TessellationParams,
    /// Nearest-segment search strategy.
    pub strategy: MatchStrategy,
    /// Whether per-region and per-segment stages run on the rayon pool.
    pub parallel: bool,
}

impl Default for ResolverParams {
    /// Parameters for models in metres.
    fn default() -> Self {
        Self {
            max_partition_thickness: 1.0,
            probe_offset: 0.002,
            epsilon: 1e-6,
            tessellation: TessellationParams::default(),
            strategy: MatchStrategy::Indexed,
            parallel: true,
        }
    }
}

impl ResolverParams {
    /// Parameters for models in millimetres.
    #[must_use]
    pub fn for_millimetres() -> Self {
        Self {
            max_partition_thickness: 1000.0,
            probe_offset: 2.0,
            epsilon: 1e-3,
            tessellation: TessellationParams::default().with_tolerance(10.0),
            ..Self::default()
        }
    }

    /// Parameters for models in decimal feet.
    #[must_use]
    pub fn for_feet() -> Self {
        Self {
            max_partition_thickness: 1000.0 / MM_PER_FOOT,
            probe_offset: 2.0 / MM_PER_FOOT,
            epsilon: 1e-6,
            tessellation: TessellationParams::default().with_tolerance(10.0 / MM_PER_FOOT),
            ..Self::default()
        }
    }

    /// Sets the maximum partition thickness.
    #[must_use]
    pub fn with_max_partition_thickness(mut self, thickness: f64) -> Self {
        self.max_partition_thickness = thickness;
        self
    }

    /// Sets the probe offset.
    #[must_use]
    pub fn with_probe_offset(mut self, offset: f64) -> Self {
        self.probe_offset = offset;
        self
    }

    /// Sets the search strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enables or disables parallel stages.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// Returns a `ParameterError` for non-positive or non-finite scalars or
    /// invalid tessellation bounds.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("max_partition_thickness", self.max_partition_thickness)?;
        ensure_positive("probe_offset", self.probe_offset)?;
        ensure_positive("epsilon", self.epsilon)?;
        self.tessellation.validate()
    }
}

/// A region left out of the graph because its boundary is malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRegion {
    pub region: RegionId,
    pub name: String,
    pub error: BoundaryError,
}

/// A nearest-segment pairing the classifier rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroppedPairing {
    pub pairing: Pairing,
    pub reason: DropReason,
}

/// Everything a run skipped or rejected, for reporting to the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    /// Regions excluded because a loop failed validation.
    pub skipped_regions: Vec<SkippedRegion>,
    /// Regions with no boundary loops; they stay in the graph without
    /// neighbours.
    pub unbounded_regions: Vec<RegionId>,
    /// Zero-length segments that could not be tessellated.
    pub degenerate_segments: Vec<SegmentKey>,
    /// Segments with no candidate in any other region.
    pub unmatched_segments: Vec<SegmentKey>,
    /// Pairings rejected by distance or containment.
    pub dropped_pairings: Vec<DroppedPairing>,
}

/// The output of a resolution run.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Region-to-neighbours mapping.
    pub graph: AdjacencyGraph,
    /// Every confirmed segment pairing, in segment order.
    pub confirmed: Vec<ConfirmedPairing>,
    /// What was skipped along the way.
    pub diagnostics: Diagnostics,
}

impl Resolution {
    /// Returns `true` if `region` was excluded for a malformed boundary.
    #[must_use]
    pub fn is_skipped(&self, region: RegionId) -> bool {
        self.diagnostics
            .skipped_regions
            .iter()
            .any(|s| s.region == region)
    }

    /// Returns the separating elements through which `from` reaches `to`.
    #[must_use]
    pub fn separating_elements(&self, from: RegionId, to: RegionId) -> Vec<ElementId> {
        self.graph.separators(from, to)
    }
}

/// Determines which regions lie across each boundary segment.
///
/// Runs a single forward pass: boundary extraction, segment tessellation,
/// nearest-segment matching, containment classification and graph
/// building. Failures are isolated per region or per segment and reported
/// in [`Diagnostics`]; only invalid parameters fail the run.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyResolver {
    params: ResolverParams,
}

impl AdjacencyResolver {
    /// Creates a new resolver.
    #[must_use]
    pub fn new(params: ResolverParams) -> Self {
        Self { params }
    }

    /// Returns the run parameters.
    #[must_use]
    pub fn params(&self) -> &ResolverParams {
        &self.params
    }

    /// Resolves adjacency using the planar [`PolygonContainment`] oracle
    /// built from the regions' own loops.
    ///
    /// # Errors
    ///
    /// Returns a `ParameterError` if the parameters are invalid.
    pub fn resolve_planar(&self, store: &RegionStore) -> Result<Resolution> {
        let oracle = PolygonContainment::from_store(store, &self.params.tessellation);
        self.resolve(store, &oracle)
    }

    /// Resolves adjacency for every region in `store`, asking `oracle`
    /// which region contains each probe point.
    ///
    /// # Errors
    ///
    /// Returns a `ParameterError` if the parameters are invalid.
    pub fn resolve<C>(&self, store: &RegionStore, oracle: &C) -> Result<Resolution>
    where
        C: ContainsPoint + Sync + ?Sized,
    {
        let params = &self.params;
        params.validate()?;

        let entries: Vec<(RegionId, &Region)> = store.iter().collect();
        info!(
            regions = entries.len(),
            max_partition_thickness = params.max_partition_thickness,
            probe_offset = params.probe_offset,
            strategy = ?params.strategy,
            "Starting adjacency resolution"
        );

        let mut diagnostics = Diagnostics::default();
        let extracted = self.extract(&entries, &mut diagnostics);
        let tessellations = self.tessellate(store, &extracted, &mut diagnostics);

        let outcome =
            NearestSegmentMatcher::new(&tessellations, params.strategy, params.parallel).execute();
        for key in &outcome.unmatched {
            debug!(
                region = store.name(key.region),
                segment = key.segment_index,
                "No cross-region candidate"
            );
        }
        diagnostics.unmatched_segments = outcome.unmatched;

        let classifier = AdjacencyClassifier::new(
            store,
            &tessellations,
            oracle,
            params.max_partition_thickness,
            params.probe_offset,
        );
        let classes = map_ordered(&outcome.pairings, params.parallel, |p| {
            classifier.classify(p)
        });

        let mut confirmed = Vec::new();
        for (pairing, class) in outcome.pairings.iter().zip(classes) {
            match class {
                Classification::Confirmed(c) => confirmed.push(c),
                Classification::Dropped(reason) => {
                    debug!(
                        source = store.name(pairing.source.region),
                        target = store.name(pairing.target.region),
                        distance = pairing.distance,
                        reason = ?reason,
                        "Dropped pairing"
                    );
                    diagnostics.dropped_pairings.push(DroppedPairing {
                        pairing: *pairing,
                        reason,
                    });
                }
            }
        }

        let graph = AdjacencyGraph::from_confirmed(extracted.iter().map(|e| e.id), &confirmed);

        info!(
            segments = tessellations.len(),
            confirmed = confirmed.len(),
            dropped = diagnostics.dropped_pairings.len(),
            skipped_regions = diagnostics.skipped_regions.len(),
            relations = graph.edge_count(),
            "Adjacency resolution finished"
        );

        Ok(Resolution {
            graph,
            confirmed,
            diagnostics,
        })
    }

    /// Validates every region's loops; malformed regions are reported and
    /// dropped.
    fn extract(
        &self,
        entries: &[(RegionId, &Region)],
        diagnostics: &mut Diagnostics,
    ) -> Vec<ExtractedRegion> {
        let epsilon = self.params.epsilon;
        let results = map_ordered(entries, self.params.parallel, |&(id, region)| {
            ExtractBoundary::new(id, region, epsilon).execute()
        });

        let mut extracted = Vec::with_capacity(entries.len());
        for (&(id, region), result) in entries.iter().zip(results) {
            match result {
                Ok(ex) => {
                    if ex.is_unbounded() {
                        warn!(region = %region.name, "Region has no boundary loops");
                        diagnostics.unbounded_regions.push(id);
                    } else if let Some(outer) = ex.loops.first() {
                        debug!(
                            region = %region.name,
                            loops = ex.loops.len(),
                            area = outer.signed_area().abs(),
                            perimeter = outer.perimeter(),
                            "Extracted boundary"
                        );
                    }
                    extracted.push(ex);
                }
                Err(error) => {
                    warn!(
                        region = %region.name,
                        error = %error,
                        "Skipping region with malformed boundary"
                    );
                    diagnostics.skipped_regions.push(SkippedRegion {
                        region: id,
                        name: region.name.clone(),
                        error,
                    });
                }
            }
        }
        extracted
    }

    /// Tessellates every segment of the extracted regions, in region, loop,
    /// segment order.
    fn tessellate(
        &self,
        store: &RegionStore,
        extracted: &[ExtractedRegion],
        diagnostics: &mut Diagnostics,
    ) -> Vec<Tessellation> {
        let keys: Vec<SegmentKey> = extracted
            .iter()
            .flat_map(|ex| {
                ex.loops.iter().flat_map(move |lp| {
                    (0..lp.segment_count).map(move |i| SegmentKey::new(ex.id, lp.loop_index, i))
                })
            })
            .collect();

        let tess_params = self.params.tessellation;
        let results = map_ordered(&keys, self.params.parallel, |&key| {
            store
                .segment(key)
                .and_then(|seg| TessellateSegment::new(key, seg, tess_params).execute().ok())
        });

        let mut tessellations = Vec::with_capacity(keys.len());
        for (key, result) in keys.into_iter().zip(results) {
            if let Some(t) = result {
                tessellations.push(t);
            } else {
                debug!(
                    region = store.name(key.region),
                    segment = key.segment_index,
                    "Degenerate segment"
                );
                diagnostics.degenerate_segments.push(key);
            }
        }
        tessellations
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert!(ResolverParams::default().validate().is_ok());
        assert!(ResolverParams::for_millimetres().validate().is_ok());
        assert!(ResolverParams::for_feet().validate().is_ok());
    }

    #[test]
    fn invalid_parameters_fail_the_run() {
        let store = RegionStore::new();
        for params in [
            ResolverParams::default().with_max_partition_thickness(0.0),
            ResolverParams::default().with_probe_offset(f64::NAN),
            ResolverParams {
                tessellation: TessellationParams {
                    min_segments: 8,
                    max_segments: 4,
                    ..TessellationParams::default()
                },
                ..ResolverParams::default()
            },
        ] {
            assert!(AdjacencyResolver::new(params).resolve_planar(&store).is_err());
        }
    }

    #[test]
    fn empty_store_gives_empty_graph() {
        let store = RegionStore::new();
        let res = AdjacencyResolver::default().resolve_planar(&store).unwrap();
        assert!(res.graph.is_empty());
        assert!(res.confirmed.is_empty());
        assert_eq!(res.diagnostics, Diagnostics::default());
    }
}
