//! Post-hoc analysis of annotated trajectories: streaming point reader,
//! composable accept predicates, and crossing-pass aggregation.

pub mod config;
pub mod errors;
pub mod pass;
pub mod point;
pub mod predicate;
pub mod reader;

pub use config::{Area, Settings};
pub use errors::{AnalysisError, AnalysisResult};
pub use pass::{Pass, PassTracker};
pub use point::Point;
pub use predicate::{Conjunction, Eclipse, Predicate, Square, Window};
pub use reader::read_points;
