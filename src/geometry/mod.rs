pub mod curve;

pub use curve::{Arc, BoundaryCurve, Curve2, Line, Polyline};
