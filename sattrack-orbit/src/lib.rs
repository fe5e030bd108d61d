//! Orbit propagation from two-line element sets.
//!
//! The pipeline decodes TLE records into [`Element`]s, initializes the
//! SGP4 kernel per element, and streams [`TrackResult`]s of annotated
//! [`TemePoint`]s: eclipse state from the solar geometry and an optional
//! region-crossing flag from a caller-supplied [`Region`].

pub mod element;
pub mod errors;
pub mod kernel;
pub mod point;
pub mod propagator;
pub mod tle;
pub mod trajectory;

pub use element::Element;
pub use errors::{OrbitError, OrbitResult};
pub use kernel::Kernel;
pub use point::{GeoPoint, LatLonRect, Region, TemePoint};
pub use propagator::TrackResult;
pub use trajectory::{ElementWindow, Trajectory};
