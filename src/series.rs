//! Series map: known series and their installments in release order.
//!
//! A [`SeriesMap`] is read-only reference data, usually loaded from a JSON
//! document of the shape `{ "<series>": ["<title 1>", "<title 2>", ...] }`.
//! Loading is forgiving: entries that are not arrays, titles that are not
//! strings, blank titles and duplicate titles are skipped with a warning so
//! the map can be built from arbitrary externally supplied JSON.

use std::fmt;
use std::fs;
use std::path::Path;

use log::warn;
use once_cell::sync::Lazy;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::normalize;

// Default series data, embedded at compile time
const BUNDLED_SERIES: &str = include_str!("../data/series.json");

static BUNDLED: Lazy<SeriesMap> = Lazy::new(|| match SeriesMap::from_json_str(BUNDLED_SERIES) {
    Ok(map) => map,
    Err(e) => {
        warn!("Bundled series map unavailable: {}", e);
        SeriesMap::new()
    }
});

// Words that set one installment apart from another
const INSTALLMENT_MARKERS: &[&str] = &[
    "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "two", "three", "four", "five", "six",
    "seven", "eight", "nine", "ten", "part", "pt", "chapter", "volume", "vol", "episode",
];

/// One series and its installments, with precomputed comparison keys.
#[derive(Debug, Clone)]
pub struct Series {
    name: String,
    movies: Vec<String>,
    loose_keys: Vec<String>,
    strict_keys: Vec<String>,
}

impl Series {
    /// Build a series, dropping blank and duplicate titles.
    ///
    /// Duplicates are detected by loose key; the first occurrence wins so the
    /// original release order is kept.
    pub fn new<I, S>(name: impl Into<String>, movies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut series = Self {
            name,
            movies: Vec::new(),
            loose_keys: Vec::new(),
            strict_keys: Vec::new(),
        };

        for movie in movies {
            let movie = movie.into();
            let key = normalize::loose(&movie);
            if key.is_empty() {
                warn!("Skipping blank title in series {:?}", series.name);
                continue;
            }
            if series.loose_keys.contains(&key) {
                warn!(
                    "Skipping duplicate title {:?} in series {:?}",
                    movie, series.name
                );
                continue;
            }
            series.strict_keys.push(normalize::strict(&movie));
            series.loose_keys.push(key);
            series.movies.push(movie.trim().to_string());
        }

        series
    }

    /// Series name (the map key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Installments in release order.
    pub fn movies(&self) -> &[String] {
        &self.movies
    }

    /// The first installment, if the series has any.
    pub fn first_title(&self) -> Option<&str> {
        self.movies.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    fn locate(&self, loose_key: &str, strict_key: &str) -> Option<(usize, MatchKind)> {
        locate(loose_key, strict_key, &self.loose_keys, &self.strict_keys)
    }
}

/// How a title was matched against a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Loose keys are equal.
    Exact,
    /// Strict keys are equal (article or year differs).
    Strict,
    /// One strict key contains the other as whole words.
    Fuzzy,
}

/// A title located inside a series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesHit<'a> {
    pub series: &'a Series,
    /// 0-based index into [`Series::movies`].
    pub index: usize,
    pub kind: MatchKind,
}

impl SeriesHit<'_> {
    /// 1-based position within the series.
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

/// Ordered collection of series.
///
/// Iteration and lookup follow insertion order, which for JSON input is
/// document order.
#[derive(Debug, Clone, Default)]
pub struct SeriesMap {
    series: Vec<Series>,
}

impl SeriesMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self { series: Vec::new() }
    }

    /// The series map embedded in the crate.
    pub fn bundled() -> &'static SeriesMap {
        &BUNDLED
    }

    /// Parse a series map from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(json_error)
    }

    /// Parse a series map from a JSON value.
    ///
    /// Note that without serde_json's `preserve_order` feature a `Value`
    /// object is key-sorted, so series order follows the keys. Prefer
    /// [`SeriesMap::from_json_str`] when document order matters.
    pub fn from_value(value: Value) -> Result<Self> {
        Self::deserialize(value).map_err(json_error)
    }

    /// Load a series map from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::SeriesFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Add a series. A series with the same name is replaced in place;
    /// otherwise the new one goes last. Empty series are ignored.
    pub fn insert(&mut self, series: Series) {
        if series.is_empty() {
            warn!("Skipping empty series {:?}", series.name);
            return;
        }
        match self.series.iter_mut().find(|s| s.name == series.name) {
            Some(existing) => *existing = series,
            None => self.series.push(series),
        }
    }

    /// Insert every series of `other`, overriding same-named ones.
    pub fn merge(&mut self, other: SeriesMap) {
        for series in other.series {
            self.insert(series);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Locate `title` in the map.
    ///
    /// Series are tried in map order and the first one containing the title
    /// wins. Within a series, loose-key equality is tried first, then
    /// strict-key equality, then fuzzy containment.
    pub fn lookup(&self, title: &str) -> Option<SeriesHit<'_>> {
        let loose_key = normalize::loose(title);
        if loose_key.is_empty() {
            return None;
        }
        let strict_key = normalize::strict(title);

        self.series.iter().find_map(|series| {
            let (index, kind) = series.locate(&loose_key, &strict_key)?;
            Some(SeriesHit {
                series,
                index,
                kind,
            })
        })
    }
}

impl<S: Into<String>, M: Into<String>> FromIterator<(S, Vec<M>)> for SeriesMap {
    fn from_iter<T: IntoIterator<Item = (S, Vec<M>)>>(iter: T) -> Self {
        let mut map = SeriesMap::new();
        for (name, movies) in iter {
            map.insert(Series::new(name, movies));
        }
        map
    }
}

/// Find `title` in a single ordered list of installments.
///
/// Returns the 0-based index of the first loose-key match, else the first
/// strict-key match, else the first fuzzy match, else `None`.
pub fn find_movie_in_series(title: &str, movies: &[String]) -> Option<usize> {
    let loose_key = normalize::loose(title);
    if loose_key.is_empty() {
        return None;
    }
    let loose_keys: Vec<String> = movies.iter().map(|m| normalize::loose(m)).collect();
    let strict_keys: Vec<String> = movies.iter().map(|m| normalize::strict(m)).collect();

    locate(&loose_key, &normalize::strict(title), &loose_keys, &strict_keys)
        .map(|(index, _)| index)
}

// The one matcher behind both `find_movie_in_series` and `SeriesMap::lookup`
fn locate(
    loose_key: &str,
    strict_key: &str,
    loose_keys: &[String],
    strict_keys: &[String],
) -> Option<(usize, MatchKind)> {
    if let Some(index) = loose_keys.iter().position(|k| k == loose_key) {
        return Some((index, MatchKind::Exact));
    }
    if let Some(index) = strict_keys.iter().position(|k| k == strict_key) {
        return Some((index, MatchKind::Strict));
    }
    strict_keys
        .iter()
        .position(|k| fuzzy_match(strict_key, k))
        .map(|index| (index, MatchKind::Fuzzy))
}

/// Whole-word containment between two normalized keys.
///
/// The shorter key must appear as a contiguous run of words in the longer
/// one, and the words trailing that run must not carry an installment
/// marker. So "toy story" does not match "toy story 3", while "ragnarok"
/// matches "thor ragnarok" and "return of the jedi" matches "star wars
/// episode vi return of the jedi".
fn fuzzy_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }

    let a_words: Vec<&str> = a.split(' ').collect();
    let b_words: Vec<&str> = b.split(' ').collect();
    let (shorter, longer) = if a_words.len() <= b_words.len() {
        (a_words, b_words)
    } else {
        (b_words, a_words)
    };

    let n = shorter.len();
    (0..=longer.len() - n).any(|start| {
        longer[start..start + n] == shorter[..]
            && !longer[start + n..].iter().any(|w| is_installment_marker(w))
    })
}

fn is_installment_marker(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_digit()) || INSTALLMENT_MARKERS.contains(&word)
}

fn json_error(e: serde_json::Error) -> Error {
    if e.classify() == serde_json::error::Category::Data {
        Error::InvalidSeriesMap(e.to_string())
    } else {
        Error::Json(e)
    }
}

impl<'de> Deserialize<'de> for SeriesMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SeriesMapVisitor)
    }
}

struct SeriesMapVisitor;

impl<'de> Visitor<'de> for SeriesMapVisitor {
    type Value = SeriesMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping series names to arrays of titles")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = SeriesMap::new();

        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            let Value::Array(items) = value else {
                warn!("Skipping series {:?}: expected an array of titles", name);
                continue;
            };

            let movies = items.into_iter().filter_map(|item| match item {
                Value::String(title) => Some(title),
                other => {
                    warn!("Skipping non-string title {} in series {:?}", other, name);
                    None
                }
            });
            map.insert(Series::new(name.clone(), movies));
        }

        Ok(map)
    }

    fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        // `null` means no series data
        Ok(SeriesMap::new())
    }
}
