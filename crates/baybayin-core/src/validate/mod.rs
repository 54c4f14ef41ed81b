//! Baybayin well-formedness check and advisory conversion diagnostics.

use serde::Serialize;
use tracing::debug_span;

use crate::settings::settings;
use crate::unicode::{contains_baybayin, contains_latin, is_baybayin, is_latin_letter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Advisory note about a conversion. Never changes the converted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionDiagnostic {
    pub severity: Severity,
    pub message: String,
}

impl ConversionDiagnostic {
    fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Letters with no Baybayin equivalent, with the usual substitution.
const LOSSY_LETTERS: [(char, &str); 7] = [
    ('c', "'c' has no Baybayin character; write it as 'k' or 's' depending on the sound"),
    ('f', "'f' has no Baybayin character; it is usually written as 'p'"),
    ('j', "'j' has no Baybayin character; it is usually written as 'dy'"),
    ('q', "'q' has no Baybayin character; it is usually written as 'k'"),
    ('v', "'v' has no Baybayin character; it is usually written as 'b'"),
    ('x', "'x' has no Baybayin character; it is usually written as 'ks'"),
    ('z', "'z' has no Baybayin character; it is usually written as 's'"),
];

/// True when every character is Baybayin, whitespace, or allowed
/// punctuation. The empty string is valid.
pub fn is_valid_baybayin(text: &str) -> bool {
    let allowed = &settings().punctuation;
    text.chars()
        .all(|c| is_baybayin(c) || c.is_whitespace() || allowed.is_allowed(c))
}

/// Diagnostics for converting `original` into `converted`, in a fixed order:
/// leftover Latin letters, mixed script, then one note per lossy letter.
pub fn diagnostics(original: &str, converted: &str) -> Vec<ConversionDiagnostic> {
    let _span = debug_span!("diagnostics", original = original.len(), converted = converted.len())
        .entered();
    let mut out = Vec::new();

    let leftovers = distinct_latin_letters(converted);
    if !leftovers.is_empty() {
        let list = leftovers
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        out.push(ConversionDiagnostic::warning(format!(
            "Latin letters left unconverted: {list}"
        )));
    }

    if contains_baybayin(converted) && contains_latin(converted) {
        out.push(ConversionDiagnostic::info(
            "Result mixes Baybayin and Latin script",
        ));
    }

    let lowered = original.to_lowercase();
    for (letter, message) in LOSSY_LETTERS {
        if lowered.contains(letter) {
            out.push(ConversionDiagnostic::info(message));
        }
    }

    out
}

/// Latin letters in first-occurrence order, without repeats.
fn distinct_latin_letters(s: &str) -> Vec<char> {
    let mut seen = Vec::new();
    for c in s.chars().filter(|&c| is_latin_letter(c)) {
        if !seen.contains(&c) {
            seen.push(c);
        }
    }
    seen
}
