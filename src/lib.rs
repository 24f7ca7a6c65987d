//! Prequel - Sequel detection for movie titles
//!
//! Decides whether a free-text movie title is a sequel, and if so which
//! movie to start with instead.
//!
//! # Architecture
//!
//! Detection runs as a cascade:
//! 1. Series lookup against known series data (exact, then fuzzy match)
//! 2. Heuristic rules on the shape of the title (numbers, Roman numerals,
//!    "Part N", "Chapter"/"Volume", subtitle and sequel keywords)
//!
//! Detection is pure and never fails: anything unrecognized, including
//! empty input, is simply not a sequel.
//!
//! # Example
//!
//! ```
//! use prequel::{detect_sequel, Detector};
//!
//! // Heuristics only
//! let result = detect_sequel("Paranormal Activity 3", None);
//! assert!(result.is_sequel());
//! assert_eq!(result.first_title(), Some("Paranormal Activity"));
//! assert_eq!(result.position(), Some(3));
//!
//! // With the bundled series data
//! let detector = Detector::bundled();
//! let result = detector.detect("The Matrix Revolutions");
//! assert_eq!(result.first_title(), Some("The Matrix"));
//! assert_eq!(result.position(), Some(3));
//! ```

pub mod cascade;
pub mod error;
pub mod normalize;
pub mod series;

pub use cascade::{Cascade, Detection, HeuristicMatch, Rule, SeriesMatch};
pub use error::{Error, Result};
pub use series::{find_movie_in_series, Series, SeriesMap};

/// Detect whether `title` is a sequel.
///
/// `series` defaults to an empty map, in which case only the heuristic rules
/// run.
pub fn detect_sequel(title: &str, series: Option<&SeriesMap>) -> Detection {
    match series {
        Some(map) => Cascade::with_series(map).detect(title),
        None => Cascade::default_heuristics().detect(title),
    }
}

/// Reusable detector owning its series data.
pub struct Detector {
    cascade: Cascade<'static>,
}

impl Detector {
    /// Create a detector over `series`.
    pub fn new(series: SeriesMap) -> Self {
        Self {
            cascade: Cascade::with_owned_series(series),
        }
    }

    /// Create a detector over the bundled series map.
    pub fn bundled() -> Self {
        Self {
            cascade: Cascade::with_series(SeriesMap::bundled()),
        }
    }

    /// Create a detector that only runs the heuristic rules.
    pub fn heuristics_only() -> Self {
        Self {
            cascade: Cascade::default_heuristics(),
        }
    }

    /// Detect whether `title` is a sequel.
    pub fn detect(&self, title: &str) -> Detection {
        self.cascade.detect(title)
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::bundled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;
    use std::thread;

    static DETECTOR: LazyLock<Detector> = LazyLock::new(Detector::bundled);

    fn bundled() -> &'static SeriesMap {
        SeriesMap::bundled()
    }

    #[test]
    fn test_detect_is_deterministic() {
        let map = bundled();
        for title in ["Toy Story 3", "Rocky IV", "Inception", "Batman Returns", ""] {
            assert_eq!(detect_sequel(title, Some(map)), detect_sequel(title, Some(map)));
        }
    }

    #[test]
    fn test_detect_does_not_mutate_map() {
        let map: SeriesMap = vec![("Shrek", vec!["Shrek", "Shrek 2"])]
            .into_iter()
            .collect();
        let before: Vec<Vec<String>> = map.iter().map(|s| s.movies().to_vec()).collect();
        detect_sequel("Shrek 2", Some(&map));
        let after: Vec<Vec<String>> = map.iter().map(|s| s.movies().to_vec()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_first_movie_is_never_a_sequel() {
        for series in bundled().iter() {
            let first = &series.movies()[0];
            let result = detect_sequel(first, Some(bundled()));
            assert!(!result.is_sequel(), "{:?} reported as {:?}", first, result);
        }
    }

    #[test]
    fn test_known_sequel_resolves_to_first_title() {
        for series in bundled().iter() {
            let first = &series.movies()[0];
            for (i, title) in series.movies().iter().enumerate().skip(1) {
                let result = detect_sequel(title, Some(bundled()));
                assert!(result.is_sequel(), "{:?} not a sequel", title);
                assert!(!result.is_heuristic(), "{:?} fell through to heuristics", title);
                assert_eq!(result.first_title(), Some(first.as_str()), "{:?}", title);
                assert_eq!(result.series(), Some(series.name()), "{:?}", title);
                assert_eq!(result.position(), Some(i + 1), "{:?}", title);
            }
        }
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        for series in bundled().iter() {
            for title in series.movies() {
                let padded = format!("  {}  ", title.to_uppercase());
                assert_eq!(
                    detect_sequel(&padded, Some(bundled())),
                    detect_sequel(title, Some(bundled())),
                    "{:?}",
                    title
                );
            }
        }
    }

    #[test]
    fn test_heuristic_number_rule() {
        let result = detect_sequel("Paranormal Activity 3", None);
        assert!(result.is_sequel());
        assert!(result.is_heuristic());
        assert_eq!(result.series(), Some("Paranormal Activity"));
        assert_eq!(result.first_title(), Some("Paranormal Activity"));
        assert_eq!(result.position(), Some(3));

        assert!(!detect_sequel("Iron Man 1", None).is_sequel());
    }

    #[test]
    fn test_heuristic_roman_rule() {
        let result = detect_sequel("Rocky IV", None);
        assert!(result.is_sequel());
        assert_eq!(result.position(), Some(4));
        assert_eq!(result.first_title(), Some("Rocky"));
    }

    #[test]
    fn test_colon_subtitle_gate() {
        assert!(detect_sequel("The Matrix: Reloaded", None).is_sequel());
        assert!(!detect_sequel("Se7en: The Director's Cut", None).is_sequel());
    }

    #[test]
    fn test_no_match() {
        assert_eq!(detect_sequel("Inception", None), Detection::NotSequel);
        assert_eq!(detect_sequel("Inception", Some(bundled())), Detection::NotSequel);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(detect_sequel("", None), Detection::NotSequel);
        assert_eq!(detect_sequel("   ", Some(bundled())), Detection::NotSequel);
    }

    #[test]
    fn test_empty_map_uses_heuristics() {
        let empty = SeriesMap::new();
        assert_eq!(
            detect_sequel("Rocky IV", Some(&empty)),
            detect_sequel("Rocky IV", None)
        );
    }

    #[test]
    fn test_detector_variants() {
        assert!(DETECTOR.detect("Shrek Forever After").is_sequel());
        assert!(!Detector::heuristics_only().detect("Shrek Forever After").is_sequel());
        assert!(Detector::default().detect("Toy Story 2").is_sequel());
    }

    #[test]
    fn test_heuristic_json_has_exact_shape() {
        let value = serde_json::to_value(DETECTOR.detect("Shrek 5")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "isSequel": true,
                "series": "Shrek",
                "position": 5,
                "firstTitle": "Shrek",
                "heuristic": true
            })
        );
    }

    #[test]
    fn test_detector_is_shareable_across_threads() {
        let handles: Vec<_> = ["Toy Story 2", "Frozen II", "Alien 3", "Aliens"]
            .into_iter()
            .map(|title| thread::spawn(move || DETECTOR.detect(title)))
            .collect();

        for handle in handles {
            let result = handle.join().unwrap();
            assert!(result.is_sequel());
            assert!(!result.is_heuristic());
        }
    }
}
