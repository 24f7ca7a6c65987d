//! Core types for the detection cascade.

use std::fmt;

use serde::{Serialize, Serializer};

/// Heuristic rule that recognized a sequel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// "Paranormal Activity 3"
    TrailingNumber,
    /// "Rocky IV"
    RomanNumeral,
    /// "Back to the Future Part Two"
    PartSuffix,
    /// "John Wick: Chapter Two", "Kill Bill: Volume 2"
    ChapterVolume,
    /// "The Matrix: Reloaded"
    SubtitleKeyword,
    /// "Batman Returns"
    SequelKeyword,
}

impl Rule {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::TrailingNumber => "trailing_number",
            Rule::RomanNumeral => "roman_numeral",
            Rule::PartSuffix => "part_suffix",
            Rule::ChapterVolume => "chapter_volume",
            Rule::SubtitleKeyword => "subtitle_keyword",
            Rule::SequelKeyword => "sequel_keyword",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sequel found in the series map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesMatch {
    /// Series name as keyed in the map.
    pub series: String,
    /// 1-based position within the series, always >= 2.
    pub position: usize,
    /// First installment of the series.
    pub first_title: String,
}

/// A sequel inferred from the shape of the title alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicMatch {
    /// Presumed first movie, also used as the series name.
    pub base_title: String,
    /// Inferred installment number, 2 when the title does not say.
    pub position: usize,
    /// Rule that fired.
    pub rule: Rule,
}

/// Outcome of sequel detection.
///
/// `NotSequel` is the common, unremarkable answer and is also what any
/// malformed input produces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Detection {
    #[default]
    NotSequel,
    Series(SeriesMatch),
    Heuristic(HeuristicMatch),
}

impl Detection {
    pub fn is_sequel(&self) -> bool {
        !matches!(self, Detection::NotSequel)
    }

    /// True when the result came from the heuristic rules rather than
    /// series data.
    pub fn is_heuristic(&self) -> bool {
        matches!(self, Detection::Heuristic(_))
    }

    /// Series name; for heuristic matches this is the inferred base title.
    pub fn series(&self) -> Option<&str> {
        match self {
            Detection::NotSequel => None,
            Detection::Series(m) => Some(&m.series),
            Detection::Heuristic(m) => Some(&m.base_title),
        }
    }

    /// Title of the first movie to watch instead.
    pub fn first_title(&self) -> Option<&str> {
        match self {
            Detection::NotSequel => None,
            Detection::Series(m) => Some(&m.first_title),
            Detection::Heuristic(m) => Some(&m.base_title),
        }
    }

    /// 1-based installment number.
    pub fn position(&self) -> Option<usize> {
        match self {
            Detection::NotSequel => None,
            Detection::Series(m) => Some(m.position),
            Detection::Heuristic(m) => Some(m.position),
        }
    }

    /// Heuristic rule responsible, if any.
    pub fn rule(&self) -> Option<Rule> {
        match self {
            Detection::Heuristic(m) => Some(m.rule),
            _ => None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectionWire<'a> {
    is_sequel: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    series: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_title: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    heuristic: bool,
}

impl Serialize for Detection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        DetectionWire {
            is_sequel: self.is_sequel(),
            series: self.series(),
            position: self.position(),
            first_title: self.first_title(),
            heuristic: self.is_heuristic(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn heuristic() -> Detection {
        Detection::Heuristic(HeuristicMatch {
            base_title: "Rocky".to_string(),
            position: 4,
            rule: Rule::RomanNumeral,
        })
    }

    #[test]
    fn test_rule_as_str() {
        assert_eq!(Rule::TrailingNumber.as_str(), "trailing_number");
        assert_eq!(Rule::SubtitleKeyword.to_string(), "subtitle_keyword");
    }

    #[test]
    fn test_not_sequel_accessors() {
        let d = Detection::default();
        assert!(!d.is_sequel());
        assert!(!d.is_heuristic());
        assert_eq!(d.series(), None);
        assert_eq!(d.first_title(), None);
        assert_eq!(d.position(), None);
    }

    #[test]
    fn test_heuristic_series_equals_first_title() {
        let d = heuristic();
        assert!(d.is_sequel());
        assert!(d.is_heuristic());
        assert_eq!(d.series(), Some("Rocky"));
        assert_eq!(d.first_title(), Some("Rocky"));
        assert_eq!(d.position(), Some(4));
        assert_eq!(d.rule(), Some(Rule::RomanNumeral));
    }

    #[test]
    fn test_serialize_not_sequel() {
        let value = serde_json::to_value(Detection::NotSequel).unwrap();
        assert_eq!(value, json!({ "isSequel": false }));
    }

    #[test]
    fn test_serialize_series_match() {
        let d = Detection::Series(SeriesMatch {
            series: "Toy Story".to_string(),
            position: 3,
            first_title: "Toy Story".to_string(),
        });
        let value = serde_json::to_value(d).unwrap();
        assert_eq!(
            value,
            json!({
                "isSequel": true,
                "series": "Toy Story",
                "position": 3,
                "firstTitle": "Toy Story"
            })
        );
    }

    #[test]
    fn test_serialize_heuristic_match() {
        let value = serde_json::to_value(heuristic()).unwrap();
        assert_eq!(
            value,
            json!({
                "isSequel": true,
                "series": "Rocky",
                "position": 4,
                "firstTitle": "Rocky",
                "heuristic": true
            })
        );
    }
}
