//! Latin ↔ Baybayin conversion.
//!
//! Forward conversion splits text on whitespace, resolves whole words through
//! the lexicon, and scans the rest with an ordered list of syllable rules.
//! Reverse conversion is a greedy longest match over glyph-table spellings,
//! with lexicon spellings tried first on whole Baybayin words.

mod forward;
mod reverse;
mod rules;

#[cfg(test)]
mod tests;

pub use forward::{segment_forward, to_baybayin, ConvertOptions, Segment, SegmentKind};
pub use reverse::{to_latin, ReverseIndex};
pub use rules::{match_syllable, RuleKind, RuleMatch};
