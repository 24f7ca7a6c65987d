//! Heuristic sequel rules.
//!
//! Used when series data has nothing to say about a title. Infers from the
//! shape of the title alone whether it is a sequel, and what the first movie
//! is probably called.
//!
//! Rules are an ordered table ([`RULES`]); the first rule that produces a
//! usable base title wins. A rule whose base title comes out empty (or as a
//! bare article) is treated as not matching and the next rule is tried.

use std::fmt;

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cascade::{Detection, HeuristicMatch, Rule, Stage};
use crate::normalize;

// Placeholder installment number when the title does not carry one
const UNKNOWN_POSITION: usize = 2;

const WORD_NUMBERS: &[(&str, usize)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

const ROMAN_NUMERALS: &[(&str, usize)] = &[
    ("i", 1),
    ("ii", 2),
    ("iii", 3),
    ("iv", 4),
    ("v", 5),
    ("vi", 6),
    ("vii", 7),
    ("viii", 8),
    ("ix", 9),
    ("x", 10),
];

// "... The Movie", "... Film" at the end of a title
static MOVIE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[\s:,\-–—]*\b(?:the\s+)?(?:movie|film)$").unwrap());

// Installment label left hanging once its number is cut off
static DANGLING_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\s:,\-–—]*\b(?:part|pt|chapter|ch|volume|vol|episode|ep)\.?$").unwrap()
});

static TRAILING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<base>.+?)\s+(?P<num>\d+)$").unwrap());

static TRAILING_ROMAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<base>.+?)\s+(?P<num>ii|iii|iv|v|vi|vii|viii|ix|x)$").unwrap()
});

static PART_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        ^(?P<base>.+?)[\s:,\-–—]*
        \bpart\s+
        (?P<num>\d+|one|two|three|four|five|six|seven|eight|nine|ten)$
        ",
    )
    .unwrap()
});

static CHAPTER_VOLUME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:chapter|volume|vol)\b\.?(?:\s*(?P<tok>\w+))?").unwrap());

static SUBTITLE_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        \b(
            returns? | revenge | rise | strikes\s+back | awakens |
            continues | reloaded | revolutions | resurrections
        )\b
        ",
    )
    .unwrap()
});

static SEQUEL_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:sequel|returns?)\b").unwrap());

/// What a rule inferred from a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub base_title: String,
    pub position: usize,
}

/// One entry of the ordered rule table.
#[derive(Clone, Copy)]
pub struct HeuristicRule {
    pub rule: Rule,
    pub infer: fn(&str) -> Option<Inference>,
}

impl fmt::Debug for HeuristicRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeuristicRule")
            .field("rule", &self.rule)
            .finish_non_exhaustive()
    }
}

/// Default rules, highest priority first.
pub static RULES: &[HeuristicRule] = &[
    HeuristicRule {
        rule: Rule::TrailingNumber,
        infer: trailing_number,
    },
    HeuristicRule {
        rule: Rule::RomanNumeral,
        infer: roman_numeral,
    },
    HeuristicRule {
        rule: Rule::PartSuffix,
        infer: part_suffix,
    },
    HeuristicRule {
        rule: Rule::ChapterVolume,
        infer: chapter_volume,
    },
    HeuristicRule {
        rule: Rule::SubtitleKeyword,
        infer: subtitle_keyword,
    },
    HeuristicRule {
        rule: Rule::SequelKeyword,
        infer: sequel_keyword,
    },
];

/// Stage that classifies titles with an ordered rule table.
#[derive(Debug)]
pub struct HeuristicStage {
    rules: &'static [HeuristicRule],
}

impl HeuristicStage {
    /// Create a stage running the default [`RULES`].
    pub fn new() -> Self {
        Self { rules: RULES }
    }

    /// Create a stage running a custom rule table, in order.
    pub fn with_rules(rules: &'static [HeuristicRule]) -> Self {
        Self { rules }
    }

    /// Run the rules against `title`.
    pub fn classify(&self, title: &str) -> Option<HeuristicMatch> {
        let title = normalize::collapse_whitespace(&normalize::strip_trailing_year(title));
        if title.is_empty() {
            return None;
        }

        for entry in self.rules {
            let Some(inference) = (entry.infer)(&title) else {
                trace!("{} did not match {:?}", entry.rule, title);
                continue;
            };
            if normalize::is_blank_or_article(&inference.base_title) {
                trace!("{} left no base title for {:?}", entry.rule, title);
                continue;
            }

            debug!(
                "{} matched {:?}: base {:?}, position {}",
                entry.rule, title, inference.base_title, inference.position
            );
            return Some(HeuristicMatch {
                base_title: inference.base_title,
                position: inference.position,
                rule: entry.rule,
            });
        }

        None
    }
}

impl Default for HeuristicStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for HeuristicStage {
    fn name(&self) -> &'static str {
        "heuristics"
    }

    fn detect(&self, title: &str) -> Option<Detection> {
        self.classify(title).map(Detection::Heuristic)
    }
}

// "Paranormal Activity 3"; a trailing 1 marks a first movie
fn trailing_number(title: &str) -> Option<Inference> {
    let core = MOVIE_SUFFIX.replace(title, "");
    let caps = TRAILING_NUMBER.captures(&core)?;
    let position: usize = caps["num"].parse().ok()?;
    if position < 2 {
        return None;
    }
    Some(Inference {
        base_title: installment_base(&caps["base"]),
        position,
    })
}

// "Rocky IV"
fn roman_numeral(title: &str) -> Option<Inference> {
    let core = MOVIE_SUFFIX.replace(title, "");
    let caps = TRAILING_ROMAN.captures(&core)?;
    let position = resolve_number(&caps["num"])?;
    Some(Inference {
        base_title: installment_base(&caps["base"]),
        position,
    })
}

// "Back to the Future Part Two"
fn part_suffix(title: &str) -> Option<Inference> {
    let core = MOVIE_SUFFIX.replace(title, "");
    let caps = PART_SUFFIX.captures(&core)?;
    let position = resolve_number(&caps["num"])?;
    if position < 2 {
        return None;
    }
    Some(Inference {
        base_title: trim_separators(&caps["base"]).to_string(),
        position,
    })
}

// "John Wick: Chapter Two". The label is enough; the number is not used
// beyond ruling out an explicit first installment.
fn chapter_volume(title: &str) -> Option<Inference> {
    let caps = CHAPTER_VOLUME.captures(title)?;
    if caps.name("tok").and_then(|tok| resolve_number(tok.as_str())) == Some(1) {
        return None;
    }
    let start = caps.get(0)?.start();
    Some(Inference {
        base_title: trim_separators(&title[..start]).to_string(),
        position: UNKNOWN_POSITION,
    })
}

// "The Matrix: Reloaded". A bare colon is not evidence of a sequel.
fn subtitle_keyword(title: &str) -> Option<Inference> {
    let (base, subtitle) = title.split_once(':')?;
    if !SUBTITLE_KEYWORDS.is_match(subtitle) {
        return None;
    }
    Some(Inference {
        base_title: trim_separators(base).to_string(),
        position: UNKNOWN_POSITION,
    })
}

// "Batman Returns"
fn sequel_keyword(title: &str) -> Option<Inference> {
    let m = SEQUEL_KEYWORD.find(title)?;
    Some(Inference {
        base_title: trim_separators(&title[..m.start()]).to_string(),
        position: UNKNOWN_POSITION,
    })
}

/// Base title for rules that cut a trailing number: separators and a
/// dangling "Part"/"Chapter"/"Vol." label go too.
fn installment_base(base: &str) -> String {
    let base = trim_separators(base);
    trim_separators(&DANGLING_LABEL.replace(base, "")).to_string()
}

fn trim_separators(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '–' | '—' | ','))
}

fn resolve_number(token: &str) -> Option<usize> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return token.parse().ok();
    }
    let token = token.to_lowercase();
    WORD_NUMBERS
        .iter()
        .chain(ROMAN_NUMERALS)
        .find(|(word, _)| *word == token)
        .map(|(_, n)| *n)
}
