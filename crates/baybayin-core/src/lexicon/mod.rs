//! Whole-word Baybayin spellings that override syllable segmentation.
//!
//! Loaded with the same OnceLock pattern as the glyph table. Spellings are
//! validated against [`GlyphTable::global()`], so a custom glyph table must
//! be installed before a custom lexicon.

mod config;

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::glyphs::GlyphTable;

pub use config::{parse_lexicon_toml, LexiconError};

pub const DEFAULT_TOML: &str = include_str!("default_lexicon.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<Lexicon> = OnceLock::new();

/// Returns the embedded default lexicon TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub word: String,
    pub glyphs: String,
}

#[derive(Debug)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    by_word: HashMap<String, usize>,
    by_glyphs: HashMap<String, usize>,
}

impl Lexicon {
    /// Build a lexicon, keeping entry order. When several words share a
    /// spelling, reverse lookup resolves to the first of them.
    pub fn from_entries(
        entries: impl IntoIterator<Item = LexiconEntry>,
        glyphs: &GlyphTable,
    ) -> Result<Self, LexiconError> {
        let max_glyph_chars = glyphs
            .entries()
            .iter()
            .map(|e| e.glyph.chars().count())
            .max()
            .unwrap_or(0);

        let mut lexicon = Lexicon {
            entries: Vec::new(),
            by_word: HashMap::new(),
            by_glyphs: HashMap::new(),
        };
        for (index, entry) in entries.into_iter().enumerate() {
            if entry.word.is_empty() {
                return Err(LexiconError::EmptyWord { index });
            }
            if !entry.word.bytes().all(|b| b.is_ascii_lowercase()) {
                return Err(LexiconError::InvalidWord(entry.word));
            }
            if lexicon.by_word.contains_key(&entry.word) {
                return Err(LexiconError::DuplicateWord(entry.word));
            }
            if entry.glyphs.is_empty() {
                return Err(LexiconError::EmptyGlyphs(entry.word));
            }
            if !is_composable(&entry.glyphs, glyphs, max_glyph_chars) {
                return Err(LexiconError::NotComposable {
                    word: entry.word,
                    glyphs: entry.glyphs,
                });
            }

            let idx = lexicon.entries.len();
            lexicon.by_word.insert(entry.word.clone(), idx);
            lexicon.by_glyphs.entry(entry.glyphs.clone()).or_insert(idx);
            lexicon.entries.push(entry);
        }
        Ok(lexicon)
    }

    /// Install a custom lexicon before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), LexiconError> {
        // Validate eagerly
        parse_lexicon_toml(&toml_content, GlyphTable::global())?;
        if INSTANCE.get().is_some() {
            return Err(LexiconError::AlreadyInitialized);
        }
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| LexiconError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static Lexicon {
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let lexicon = parse_lexicon_toml(toml_str, GlyphTable::global())
                .expect("lexicon TOML must be valid");
            debug!(words = lexicon.len(), "lexicon built");
            lexicon
        })
    }

    /// Exact whole-word lookup, case-insensitive.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        let key: Cow<'_, str> = if word.chars().any(char::is_uppercase) {
            Cow::Owned(word.to_lowercase())
        } else {
            Cow::Borrowed(word)
        };
        self.by_word
            .get(key.as_ref())
            .map(|&i| self.entries[i].glyphs.as_str())
    }

    pub fn reverse_lookup(&self, glyphs: &str) -> Option<&str> {
        self.by_glyphs
            .get(glyphs)
            .map(|&i| self.entries[i].word.as_str())
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Greedy longest-match decomposition into glyph-table glyphs. Marks never
/// stand alone as glyphs, so the greedy choice is the only one.
fn is_composable(s: &str, table: &GlyphTable, max_glyph_chars: usize) -> bool {
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let mut pos = 0;
    'outer: while pos < chars.len() {
        let start = chars[pos].0;
        for len in (1..=max_glyph_chars.min(chars.len() - pos)).rev() {
            let end = chars.get(pos + len).map_or(s.len(), |&(i, _)| i);
            if table.lookup_reverse(&s[start..end]).is_some() {
                pos += len;
                continue 'outer;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, glyphs: &str) -> LexiconEntry {
        LexiconEntry {
            word: word.to_string(),
            glyphs: glyphs.to_string(),
        }
    }

    fn build(entries: Vec<LexiconEntry>) -> Result<Lexicon, LexiconError> {
        Lexicon::from_entries(entries, GlyphTable::global())
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let lexicon = Lexicon::global();
        assert_eq!(lexicon.lookup("ako"), Some("ᜀᜃᜓ"));
        assert_eq!(lexicon.lookup("AKO"), Some("ᜀᜃᜓ"));
        assert_eq!(lexicon.lookup("Kumusta"), Some("ᜃᜓᜋᜓᜐ᜔ᜆ"));
    }

    #[test]
    fn test_lookup_whole_word_only() {
        let lexicon = Lexicon::global();
        assert_eq!(lexicon.lookup("ak"), None);
        assert_eq!(lexicon.lookup("akoo"), None);
        assert_eq!(lexicon.lookup("ako."), None);
        assert_eq!(lexicon.lookup(""), None);
    }

    #[test]
    fn test_reverse_lookup() {
        let lexicon = Lexicon::global();
        assert_eq!(lexicon.reverse_lookup("ᜀᜃᜓ"), Some("ako"));
        assert_eq!(lexicon.reverse_lookup("ᜀᜃ"), None);
    }

    #[test]
    fn shared_spelling_resolves_to_first_word() {
        let lexicon = build(vec![entry("kita", "ᜃᜒᜆ"), entry("keta", "ᜃᜒᜆ")]).unwrap();
        assert_eq!(lexicon.reverse_lookup("ᜃᜒᜆ"), Some("kita"));
        assert_eq!(lexicon.lookup("keta"), Some("ᜃᜒᜆ"));
        assert_eq!(lexicon.len(), 2);
    }

    #[test]
    fn pamudpod_spelling_is_rejected_by_default_table() {
        let err = build(vec![entry("at", "ᜀᜆ\u{1715}")]).unwrap_err();
        assert!(matches!(err, LexiconError::NotComposable { .. }));
    }

    #[test]
    fn error_empty_word() {
        let err = build(vec![entry("ako", "ᜀᜃᜓ"), entry("", "ᜀ")]).unwrap_err();
        assert!(matches!(err, LexiconError::EmptyWord { index: 1 }));
    }

    #[test]
    fn error_word_with_space() {
        let err = build(vec![entry("salamat po", "ᜐᜎᜋᜆ᜔ᜉᜓ")]).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidWord(_)));
    }

    #[test]
    fn error_word_with_accent() {
        let err = build(vec![entry("opò", "ᜂᜉᜓ")]).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidWord(_)));
    }

    #[test]
    fn error_duplicate_word() {
        let err = build(vec![entry("ako", "ᜀᜃᜓ"), entry("ako", "ᜀᜃ")]).unwrap_err();
        assert!(matches!(err, LexiconError::DuplicateWord(ref w) if w == "ako"));
    }

    #[test]
    fn error_empty_glyphs() {
        let err = build(vec![entry("ako", "")]).unwrap_err();
        assert!(matches!(err, LexiconError::EmptyGlyphs(_)));
    }

    #[test]
    fn error_dangling_mark() {
        let err = build(vec![entry("ako", "ᜓᜀᜃ")]).unwrap_err();
        assert!(matches!(err, LexiconError::NotComposable { .. }));
    }

    #[test]
    fn init_custom_after_global_is_rejected() {
        let _ = Lexicon::global();
        let err = Lexicon::init_custom(DEFAULT_TOML.to_string()).unwrap_err();
        assert!(matches!(err, LexiconError::AlreadyInitialized));
    }
}
