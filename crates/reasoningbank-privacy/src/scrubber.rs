use reasoningbank_core::errors::RbResult;
use reasoningbank_core::traits::{Finding, ISanitizer, ScrubResult};

use crate::patterns::{self, RawMatch};

/// Pattern-based [`ISanitizer`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SecretScrubber;

impl SecretScrubber {
    pub fn new() -> Self {
        Self
    }

    /// Patterns that are not active because their regex failed to compile.
    pub fn degraded_patterns(&self) -> Vec<&'static str> {
        patterns::failed_patterns()
    }
}

impl ISanitizer for SecretScrubber {
    fn scrub(&self, text: &str) -> RbResult<ScrubResult> {
        let matches = patterns::scan_all(text);
        if matches.is_empty() {
            return Ok(ScrubResult {
                scrubbed: text.to_string(),
                findings: Vec::new(),
            });
        }
        let scrubbed = apply_replacements(text, &matches);
        let findings = matches
            .into_iter()
            .map(|m| Finding {
                category: format!("{}:{}", m.category, m.pattern_name),
                placeholder: m.placeholder.to_string(),
                start: m.start,
                end: m.end,
            })
            .collect();
        Ok(ScrubResult { scrubbed, findings })
    }
}

/// Rebuild the text with each match replaced. `matches` must be ascending and disjoint.
fn apply_replacements(text: &str, matches: &[RawMatch]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for m in matches {
        out.push_str(&text[cursor..m.start]);
        out.push_str(m.placeholder);
        cursor = m.end;
    }
    out.push_str(&text[cursor..]);
    out
}
