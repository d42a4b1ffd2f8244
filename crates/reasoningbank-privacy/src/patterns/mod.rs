//! Compiled detection patterns and the shared scan.
//!
//! Patterns compile lazily. One that fails to compile yields `None` and is
//! reported by [`failed_patterns`] instead of aborting the scan.

pub mod connection_strings;
pub mod secrets;

use regex::Regex;
use std::sync::LazyLock;

/// A named pattern and the placeholder that replaces its matches.
pub struct Pattern {
    pub name: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub placeholder: &'static str,
}

impl Pattern {
    pub const fn new(
        name: &'static str,
        regex: &'static LazyLock<Option<Regex>>,
        placeholder: &'static str,
    ) -> Self {
        Self {
            name,
            regex,
            placeholder,
        }
    }
}

/// One pattern hit on the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub category: &'static str,
    pub pattern_name: &'static str,
    pub placeholder: &'static str,
    pub start: usize,
    pub end: usize,
}

impl RawMatch {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Every pattern, in precedence order, tagged with its category.
fn categorized() -> Vec<(&'static str, Pattern)> {
    connection_strings::all_patterns()
        .into_iter()
        .map(|p| ("connection_string", p))
        .chain(secrets::all_patterns().into_iter().map(|p| ("secret", p)))
        .collect()
}

/// Run every pattern and return non-overlapping matches in ascending start order.
pub fn scan_all(text: &str) -> Vec<RawMatch> {
    let mut matches = Vec::new();
    for (rank, (category, pattern)) in categorized().into_iter().enumerate() {
        let Some(re) = pattern.regex.as_ref() else {
            continue;
        };
        for m in re.find_iter(text) {
            matches.push((
                rank,
                RawMatch {
                    category,
                    pattern_name: pattern.name,
                    placeholder: pattern.placeholder,
                    start: m.start(),
                    end: m.end(),
                },
            ));
        }
    }
    resolve_overlaps(matches)
}

/// Keep the longest match of each overlapping cluster; ties go to the
/// higher-precedence pattern.
fn resolve_overlaps(mut matches: Vec<(usize, RawMatch)>) -> Vec<RawMatch> {
    matches.sort_by(|(ra, a), (rb, b)| {
        a.start
            .cmp(&b.start)
            .then(b.len().cmp(&a.len()))
            .then(ra.cmp(rb))
    });

    let mut kept: Vec<(usize, RawMatch)> = Vec::with_capacity(matches.len());
    for (rank, m) in matches {
        match kept.last_mut() {
            Some((last_rank, last)) if m.start < last.end => {
                if m.len() > last.len() || (m.len() == last.len() && rank < *last_rank) {
                    *last_rank = rank;
                    *last = m;
                }
            }
            _ => kept.push((rank, m)),
        }
    }
    kept.into_iter().map(|(_, m)| m).collect()
}

/// Names of patterns whose regex failed to compile.
pub fn failed_patterns() -> Vec<&'static str> {
    categorized()
        .into_iter()
        .filter(|(_, p)| p.regex.is_none())
        .map(|(_, p)| p.name)
        .collect()
}
