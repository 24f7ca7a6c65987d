//! Title normalization.
//!
//! Produces comparison keys for free-text titles so matching is robust to
//! case, punctuation and whitespace. Two strictness levels are provided:
//!
//! - [`loose`]: lower-case, strip punctuation, collapse whitespace. Used for
//!   exact series matching.
//! - [`strict`]: everything `loose` does, plus dropping a leading article and
//!   a trailing bracketed year. Used where two spellings of the same movie
//!   should collapse to one key ("The Matrix (1999)" and "Matrix").

use once_cell::sync::Lazy;
use regex::Regex;

// "(1999)", "[2010]" at the very end of a title
static TRAILING_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[\(\[]\s*(1[89]\d{2}|20\d{2})\s*[\)\]]\s*$").unwrap());

const ARTICLES: &[&str] = &["the", "a", "an"];

/// Loose normalization: lower-case, punctuation removed, whitespace collapsed.
///
/// Apostrophes are dropped outright ("Don't" -> "dont"); every other
/// non-alphanumeric character becomes a word break ("Spider-Man" ->
/// "spider man").
pub fn loose(title: &str) -> String {
    let mut cleaned = String::with_capacity(title.len());
    for c in title.chars() {
        if c == '\'' || c == '\u{2019}' {
            continue;
        }
        if c.is_alphanumeric() {
            cleaned.extend(c.to_lowercase());
        } else {
            cleaned.push(' ');
        }
    }
    collapse_whitespace(&cleaned)
}

/// Strict normalization: [`loose`] plus leading-article and trailing-year
/// removal.
///
/// A title that consists of nothing but an article keeps it, so "The" does
/// not normalize to an empty key.
pub fn strict(title: &str) -> String {
    let without_year = TRAILING_YEAR.replace(title, "");
    let key = loose(&without_year);

    match key.split_once(' ') {
        Some((first, rest)) if ARTICLES.contains(&first) => rest.to_string(),
        _ => key,
    }
}

/// Trim and collapse internal runs of whitespace to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove a trailing bracketed year annotation, preserving case.
pub(crate) fn strip_trailing_year(title: &str) -> String {
    TRAILING_YEAR.replace(title, "").into_owned()
}

/// Returns true when `title` is empty once a leading article is ignored.
pub(crate) fn is_blank_or_article(title: &str) -> bool {
    let key = loose(title);
    key.is_empty() || ARTICLES.contains(&key.as_str())
}
