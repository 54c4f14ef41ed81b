use std::collections::BTreeMap;

use serde::Deserialize;

use super::table::{GlyphEntry, GlyphTable};

#[derive(Deserialize)]
struct GlyphConfig {
    mappings: BTreeMap<String, String>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GlyphTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("glyph {glyph} is used by both {first} and {second}")]
    DuplicateGlyph {
        glyph: String,
        first: String,
        second: String,
    },
    #[error("unknown key: {0}")]
    UnknownKey(String),
    #[error("missing key: {0}")]
    MissingKey(String),
    #[error("malformed glyph for {key}: {reason}")]
    Malformed { key: String, reason: String },
    #[error("invalid vowel alias {letter}: {reason}")]
    InvalidAlias { letter: String, reason: String },
    #[error("glyph table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a validated [`GlyphTable`].
///
/// `[mappings]` holds key → glyph pairs, `[aliases]` holds single-letter
/// vowel aliases (e.g. `e = "i"`). Duplicate keys are rejected by the TOML
/// parser itself and surface as [`GlyphTableError::Parse`].
pub fn parse_glyph_toml(toml_str: &str) -> Result<GlyphTable, GlyphTableError> {
    let config: GlyphConfig =
        toml::from_str(toml_str).map_err(|e| GlyphTableError::Parse(e.to_string()))?;

    let mut aliases = Vec::with_capacity(config.aliases.len());
    for (letter, target) in &config.aliases {
        let letter_char = single_char(letter).ok_or_else(|| GlyphTableError::InvalidAlias {
            letter: letter.clone(),
            reason: "alias must be a single letter".to_string(),
        })?;
        let target_char = single_char(target).ok_or_else(|| GlyphTableError::InvalidAlias {
            letter: letter.clone(),
            reason: "target must be a single vowel".to_string(),
        })?;
        aliases.push((letter_char, target_char));
    }

    let entries = config
        .mappings
        .into_iter()
        .map(|(key, glyph)| GlyphEntry { key, glyph });
    GlyphTable::from_entries(entries, &aliases)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::DEFAULT_TOML;
    use super::*;

    #[test]
    fn parse_default_toml() {
        let table = parse_glyph_toml(DEFAULT_TOML).unwrap();
        assert_eq!(table.len(), 63);
        assert_eq!(table.canonical_vowel('e'), Some('i'));
        assert_eq!(table.canonical_vowel('o'), Some('u'));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_glyph_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, GlyphTableError::Parse(_)));
    }

    #[test]
    fn error_missing_mappings_section() {
        let err = parse_glyph_toml("[aliases]\ne = \"i\"\n").unwrap_err();
        assert!(matches!(err, GlyphTableError::Parse(_)));
    }

    #[test]
    fn error_duplicate_key_in_toml() {
        let toml = "[mappings]\na = \"ᜀ\"\na = \"ᜁ\"\n";
        let err = parse_glyph_toml(toml).unwrap_err();
        assert!(matches!(err, GlyphTableError::Parse(_)));
    }

    #[test]
    fn error_incomplete_table() {
        let toml = "[mappings]\na = \"ᜀ\"\ni = \"ᜁ\"\nu = \"ᜂ\"\n";
        let err = parse_glyph_toml(toml).unwrap_err();
        assert!(matches!(err, GlyphTableError::MissingKey(_)));
    }

    #[test]
    fn error_multi_letter_alias() {
        let toml = DEFAULT_TOML.replace("e = \"i\"", "ee = \"i\"");
        let err = parse_glyph_toml(&toml).unwrap_err();
        assert!(matches!(err, GlyphTableError::InvalidAlias { .. }));
        assert!(err.to_string().contains("ee"));
    }

    #[test]
    fn error_alias_to_non_vowel() {
        let toml = DEFAULT_TOML.replace("o = \"u\"", "o = \"k\"");
        let err = parse_glyph_toml(&toml).unwrap_err();
        assert!(matches!(err, GlyphTableError::InvalidAlias { .. }));
    }

    #[test]
    fn aliases_are_optional() {
        let toml = DEFAULT_TOML
            .replace("e = \"i\"", "")
            .replace("o = \"u\"", "");
        let table = parse_glyph_toml(&toml).unwrap();
        assert_eq!(table.canonical_vowel('e'), None);
        assert_eq!(table.canonical_vowel('a'), Some('a'));
    }
}
