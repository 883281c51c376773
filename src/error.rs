use thiserror::Error;

/// Top-level error type for room adjacency resolution.
#[derive(Debug, Error)]
pub enum RoomgraphError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

/// Errors related to geometric construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// A boundary loop that cannot be used for resolution.
///
/// Reported per region; the offending region is skipped, never repaired.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundaryError {
    #[error("loop {loop_index} has {count} segments, at least 3 are required")]
    TooFewSegments { loop_index: usize, count: usize },

    #[error("loop {loop_index} is discontinuous after segment {segment_index} (gap {gap})")]
    Discontinuous {
        loop_index: usize,
        segment_index: usize,
        gap: f64,
    },

    #[error("loop {loop_index} has fewer than 3 distinct vertices")]
    Degenerate { loop_index: usize },
}

/// Errors related to invalid run parameters.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("parameter {name} = {value} must be finite and positive")]
    NotPositive { name: &'static str, value: f64 },

    #[error("invalid tessellation parameters: {0}")]
    Tessellation(String),
}

/// Convenience type alias for results using [`RoomgraphError`].
pub type Result<T> = std::result::Result<T, RoomgraphError>;

/// Checks that a scalar parameter is finite and strictly positive.
///
/// # Errors
///
/// Returns `ParameterError::NotPositive` otherwise.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive { name, value }.into())
    }
}
