//! Detection cascade.
//!
//! The cascade runs a series of stages in order, returning as soon as any
//! stage reaches a decision. The default pipeline is series lookup followed
//! by the heuristic rules.
//!
//! # Example
//!
//! ```
//! use prequel::cascade::{Cascade, Rule};
//! use prequel::SeriesMap;
//!
//! let map: SeriesMap = vec![("Toy Story", vec!["Toy Story", "Toy Story 2"])]
//!     .into_iter()
//!     .collect();
//! let cascade = Cascade::with_series(&map);
//!
//! let result = cascade.detect("Toy Story 2");
//! assert_eq!(result.first_title(), Some("Toy Story"));
//!
//! let result = cascade.detect("Rocky IV");
//! assert_eq!(result.rule(), Some(Rule::RomanNumeral));
//! ```

mod stage;
pub mod stages;
mod types;


pub use stage::Stage;
pub use stages::{HeuristicStage, SeriesStage};
pub use types::{Detection, HeuristicMatch, Rule, SeriesMatch};

use log::debug;

use crate::series::SeriesMap;

/// A cascade that runs stages in order until one decides.
pub struct Cascade<'a> {
    stages: Vec<Box<dyn Stage + 'a>>,
}

impl<'a> Cascade<'a> {
    /// Create an empty cascade (no stages).
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create a cascade with the given stages.
    pub fn with_stages(stages: Vec<Box<dyn Stage + 'a>>) -> Self {
        Self { stages }
    }

    /// Add a stage to the end of the cascade.
    pub fn add_stage<S: Stage + 'a>(&mut self, stage: S) {
        self.stages.push(Box::new(stage));
    }

    /// Detect whether `title` is a sequel.
    ///
    /// Blank titles are never sequels and skip every stage. Falls back to
    /// [`Detection::NotSequel`] when no stage decides.
    pub fn detect(&self, title: &str) -> Detection {
        if title.trim().is_empty() {
            return Detection::NotSequel;
        }

        for stage in &self.stages {
            if let Some(result) = stage.detect(title) {
                debug!("Stage {} decided {:?}", stage.name(), title);
                return result;
            }
        }

        Detection::NotSequel
    }

    /// Get the number of stages in the cascade.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl Default for Cascade<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Cascade<'static> {
    /// Create a cascade with only the heuristic rules.
    pub fn default_heuristics() -> Self {
        let mut cascade = Self::new();
        cascade.add_stage(HeuristicStage::new());
        cascade
    }

    /// Series lookup over an owned map, then heuristics.
    pub fn with_owned_series(map: SeriesMap) -> Self {
        let mut cascade = Self::new();
        cascade.add_stage(SeriesStage::owned(map));
        cascade.add_stage(HeuristicStage::new());
        cascade
    }
}

impl<'a> Cascade<'a> {
    /// Series lookup over `map`, then heuristics.
    ///
    /// Stages: SeriesStage → HeuristicStage → fallback
    pub fn with_series(map: &'a SeriesMap) -> Self {
        let mut cascade = Self::new();
        cascade.add_stage(SeriesStage::new(map));
        cascade.add_stage(HeuristicStage::new());
        cascade
    }
}
