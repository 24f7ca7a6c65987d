//! Built-in detection stages.
//!
//! - `SeriesStage`: Looks titles up in a series map
//! - `HeuristicStage`: Infers sequels from the shape of the title

pub mod heuristics;
mod series;

pub use heuristics::{HeuristicRule, HeuristicStage, Inference, RULES};
pub use series::SeriesStage;
