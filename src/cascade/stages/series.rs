//! Series map lookup stage.
//!
//! Resolves a title against known series data. A hit on the first
//! installment is a definite "not a sequel" and stops the cascade, so a
//! first movie whose title happens to look like a sequel ("Kill Bill:
//! Volume 1") is never second-guessed by the heuristics.

use std::borrow::Cow;

use log::debug;

use crate::cascade::{Detection, SeriesMatch, Stage};
use crate::series::SeriesMap;

/// Stage that looks titles up in a [`SeriesMap`].
pub struct SeriesStage<'a> {
    map: Cow<'a, SeriesMap>,
}

impl<'a> SeriesStage<'a> {
    /// Create a stage borrowing `map`.
    pub fn new(map: &'a SeriesMap) -> Self {
        Self {
            map: Cow::Borrowed(map),
        }
    }

    /// Create a stage that owns its map.
    pub fn owned(map: SeriesMap) -> SeriesStage<'static> {
        SeriesStage {
            map: Cow::Owned(map),
        }
    }

    pub fn map(&self) -> &SeriesMap {
        &self.map
    }
}

impl Stage for SeriesStage<'_> {
    fn name(&self) -> &'static str {
        "series"
    }

    fn detect(&self, title: &str) -> Option<Detection> {
        let hit = self.map.lookup(title)?;
        let series = hit.series.name();

        if hit.index == 0 {
            debug!("{:?} is the first installment of {:?}", title, series);
            return Some(Detection::NotSequel);
        }

        debug!(
            "{:?} is installment {} of {:?} ({:?} match)",
            title,
            hit.position(),
            series,
            hit.kind
        );
        Some(Detection::Series(SeriesMatch {
            series: series.to_string(),
            position: hit.position(),
            first_title: hit.series.first_title()?.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> SeriesMap {
        vec![
            ("Toy Story", vec!["Toy Story", "Toy Story 2", "Toy Story 3"]),
            ("Kill Bill", vec!["Kill Bill: Volume 1", "Kill Bill: Volume 2"]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_sequel_position_is_one_based() {
        let map = map();
        let stage = SeriesStage::new(&map);

        let result = stage.detect("Toy Story 3").unwrap();
        assert_eq!(
            result,
            Detection::Series(SeriesMatch {
                series: "Toy Story".to_string(),
                position: 3,
                first_title: "Toy Story".to_string(),
            })
        );
    }

    #[test]
    fn test_first_installment_is_final() {
        let map = map();
        let stage = SeriesStage::new(&map);
        assert_eq!(stage.detect("Toy Story"), Some(Detection::NotSequel));
        assert_eq!(stage.detect("kill bill volume 1"), Some(Detection::NotSequel));
    }

    #[test]
    fn test_unknown_title_passes() {
        let map = map();
        let stage = SeriesStage::new(&map);
        assert_eq!(stage.detect("Inception"), None);
        assert_eq!(stage.detect(""), None);
    }

    #[test]
    fn test_empty_map_passes() {
        let stage = SeriesStage::owned(SeriesMap::new());
        assert_eq!(stage.detect("Toy Story 2"), None);
        assert!(stage.map().is_empty());
    }
}
