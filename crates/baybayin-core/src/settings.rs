//! Engine settings loaded from TOML, following the same OnceLock pattern as
//! the glyph table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::unicode::is_baybayin;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<Settings> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    if INSTANCE.get().is_some() {
        return Err(SettingsError::AlreadyInitialized);
    }
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub conversion: ConversionSettings,
    pub punctuation: PunctuationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionSettings {
    /// Whether whole-word lexicon spellings override syllable segmentation.
    pub use_word_mapping: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PunctuationSettings {
    /// Stripped from the end of a word before the lexicon lookup.
    trailing: Vec<String>,
    /// Tolerated alongside Baybayin by the validity check.
    allowed: Vec<String>,
    #[serde(skip)]
    trailing_chars: Vec<char>,
    #[serde(skip)]
    allowed_chars: Vec<char>,
}

impl PunctuationSettings {
    pub fn is_trailing(&self, c: char) -> bool {
        self.trailing_chars.contains(&c)
    }

    pub fn is_allowed(&self, c: char) -> bool {
        self.allowed_chars.contains(&c)
    }

    pub fn trailing(&self) -> &[char] {
        &self.trailing_chars
    }

    pub fn allowed(&self) -> &[char] {
        &self.allowed_chars
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    s.punctuation.trailing_chars =
        parse_punctuation("punctuation.trailing", &s.punctuation.trailing)?;
    s.punctuation.allowed_chars =
        parse_punctuation("punctuation.allowed", &s.punctuation.allowed)?;
    Ok(s)
}

fn parse_punctuation(field: &str, raw: &[String]) -> Result<Vec<char>, SettingsError> {
    let mut result = Vec::with_capacity(raw.len());
    for (i, entry) in raw.iter().enumerate() {
        let invalid = |reason: &str| SettingsError::InvalidValue {
            field: format!("{field}[{i}]"),
            reason: reason.to_string(),
        };
        let mut chars = entry.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(invalid("must be exactly one character")),
        };
        if c.is_whitespace() || c.is_alphanumeric() || is_baybayin(c) {
            return Err(invalid("must be a punctuation or symbol character"));
        }
        if !result.contains(&c) {
            result.push(c);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert!(s.conversion.use_word_mapping);
        assert_eq!(s.punctuation.trailing(), &['.', ',', '!', '?', ';', ':']);
        assert_eq!(s.punctuation.allowed().len(), 11);
        assert!(s.punctuation.is_allowed('"'));
        assert!(s.punctuation.is_allowed('-'));
        assert!(!s.punctuation.is_trailing('-'));
        assert!(!s.punctuation.is_allowed('#'));
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[conversion]
use_word_mapping = false

[punctuation]
trailing = ["."]
allowed = [".", "«", "»"]
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert!(!s.conversion.use_word_mapping);
        assert!(s.punctuation.is_trailing('.'));
        assert!(!s.punctuation.is_trailing(','));
        assert!(s.punctuation.is_allowed('«'));
    }

    #[test]
    fn duplicate_punctuation_is_collapsed() {
        let toml = r#"
[conversion]
use_word_mapping = true

[punctuation]
trailing = [".", "."]
allowed = []
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.punctuation.trailing(), &['.']);
        assert!(s.punctuation.allowed().is_empty());
    }

    #[test]
    fn error_multi_char_punctuation() {
        let toml = r#"
[conversion]
use_word_mapping = true

[punctuation]
trailing = [".", "..."]
allowed = ["."]
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("punctuation.trailing[1]"));
    }

    #[test]
    fn error_letter_as_punctuation() {
        let toml = r#"
[conversion]
use_word_mapping = true

[punctuation]
trailing = ["."]
allowed = ["a"]
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("punctuation.allowed[0]"));
    }

    #[test]
    fn error_baybayin_as_punctuation() {
        let toml = r#"
[conversion]
use_word_mapping = true

[punctuation]
trailing = ["᜔"]
allowed = []
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn error_whitespace_as_punctuation() {
        let toml = r#"
[conversion]
use_word_mapping = true

[punctuation]
trailing = [" "]
allowed = []
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[conversion]
use_word_mapping = true
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
