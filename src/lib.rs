//! Latin ↔ Baybayin transliteration.
//!
//! Thin function API over `baybayin_core`. Conversions never fail: anything
//! without a Baybayin spelling is copied through unchanged, and
//! [`get_diagnostics`] explains what was lost.

mod trace_init;

use baybayin_core::segment::{self, ConvertOptions};
use baybayin_core::validate;
use tracing::debug;

pub use baybayin_core::validate::{ConversionDiagnostic, Severity};
pub use trace_init::{init_tracing, TraceGuard};

/// Convert Latin-script Filipino text to Baybayin.
///
/// With `use_word_mapping`, known words use their lexicon spelling before
/// syllable rules apply.
pub fn to_baybayin(text: &str, use_word_mapping: bool) -> String {
    segment::to_baybayin(text, &ConvertOptions { use_word_mapping })
}

/// Convert Baybayin text back to Latin script. Lossy: case is not restored
/// and `e`/`o` come back as `i`/`u` outside lexicon words.
pub fn to_latin(text: &str) -> String {
    segment::to_latin(text)
}

pub fn is_valid_baybayin(text: &str) -> bool {
    validate::is_valid_baybayin(text)
}

/// Advisory notes for a conversion of `original` into `converted`.
pub fn get_diagnostics(original: &str, converted: &str) -> Vec<ConversionDiagnostic> {
    let diags = validate::diagnostics(original, converted);
    debug!(count = diags.len(), "diagnostics");
    diags
}
