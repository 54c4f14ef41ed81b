use serde::Deserialize;

use super::{Lexicon, LexiconEntry};
use crate::glyphs::GlyphTable;

#[derive(Deserialize)]
struct LexiconConfig {
    #[serde(default)]
    words: Vec<(String, String)>,
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("entry {index} has an empty word")]
    EmptyWord { index: usize },
    #[error("invalid word {0:?}: must be lowercase ASCII letters")]
    InvalidWord(String),
    #[error("duplicate word: {0}")]
    DuplicateWord(String),
    #[error("word {0} has an empty glyph sequence")]
    EmptyGlyphs(String),
    #[error("glyphs {glyphs} for {word} are not composed of glyph table entries")]
    NotComposable { word: String, glyphs: String },
    #[error("lexicon already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a validated [`Lexicon`], checking every spelling
/// against `glyphs`.
pub fn parse_lexicon_toml(toml_str: &str, glyphs: &GlyphTable) -> Result<Lexicon, LexiconError> {
    let config: LexiconConfig =
        toml::from_str(toml_str).map_err(|e| LexiconError::Parse(e.to_string()))?;
    let entries = config
        .words
        .into_iter()
        .map(|(word, glyphs)| LexiconEntry { word, glyphs });
    Lexicon::from_entries(entries, glyphs)
}

#[cfg(test)]
mod tests {
    use super::super::DEFAULT_TOML;
    use super::*;

    fn table() -> &'static GlyphTable {
        GlyphTable::global()
    }

    #[test]
    fn parse_default_toml() {
        let lexicon = parse_lexicon_toml(DEFAULT_TOML, table()).unwrap();
        assert!(lexicon.len() >= 40);
        assert_eq!(lexicon.lookup("ako"), Some("ᜀᜃᜓ"));
    }

    #[test]
    fn default_glyph_sequences_are_unique_and_multi_glyph() {
        let lexicon = parse_lexicon_toml(DEFAULT_TOML, table()).unwrap();
        for entry in lexicon.entries() {
            assert_eq!(
                lexicon.reverse_lookup(&entry.glyphs),
                Some(entry.word.as_str()),
                "{} shares its spelling with an earlier word",
                entry.word
            );
            assert!(
                table().lookup_reverse(&entry.glyphs).is_none(),
                "{} is spelled with a single glyph",
                entry.word
            );
        }
    }

    #[test]
    fn empty_words_list() {
        let lexicon = parse_lexicon_toml("words = []\n", table()).unwrap();
        assert!(lexicon.is_empty());
        let lexicon = parse_lexicon_toml("", table()).unwrap();
        assert!(lexicon.is_empty());
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_lexicon_toml("not valid toml {{{", table()).unwrap_err();
        assert!(matches!(err, LexiconError::Parse(_)));
    }

    #[test]
    fn error_wrong_shape() {
        let err = parse_lexicon_toml("words = [[\"ako\"]]\n", table()).unwrap_err();
        assert!(matches!(err, LexiconError::Parse(_)));
    }

    #[test]
    fn error_uppercase_word() {
        let toml = "words = [[\"Ako\", \"ᜀᜃᜓ\"]]\n";
        let err = parse_lexicon_toml(toml, table()).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidWord(ref w) if w == "Ako"));
    }

    #[test]
    fn error_not_composable() {
        let toml = "words = [[\"ako\", \"ᜀᜃᜓx\"]]\n";
        let err = parse_lexicon_toml(toml, table()).unwrap_err();
        assert!(matches!(err, LexiconError::NotComposable { .. }));
    }
}
