//! Solar position and geometric eclipse classification.

pub mod eclipse;
pub mod sun;

pub use eclipse::{classify, classify_track, EclipseStatus};
pub use sun::sun_position;
