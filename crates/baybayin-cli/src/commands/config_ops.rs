use std::fs;
use std::io;
use std::process;

use baybayin_core::glyphs::{self, GlyphTable, GlyphTableError};
use baybayin_core::lexicon::{self, Lexicon, LexiconError};
use baybayin_core::settings::{self, SettingsError};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path}: {source}")]
    Glyphs {
        path: String,
        #[source]
        source: GlyphTableError,
    },
    #[error("{path}: {source}")]
    Lexicon {
        path: String,
        #[source]
        source: LexiconError,
    },
    #[error("{path}: {source}")]
    Settings {
        path: String,
        #[source]
        source: SettingsError,
    },
}

fn read(path: &str) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })
}

/// Install custom tables before any conversion runs. The glyph table goes
/// first because lexicon spellings are checked against it.
pub fn install_custom(
    glyphs_path: Option<&str>,
    lexicon_path: Option<&str>,
    settings_path: Option<&str>,
) -> Result<(), ConfigError> {
    if let Some(path) = glyphs_path {
        GlyphTable::init_custom(read(path)?).map_err(|source| ConfigError::Glyphs {
            path: path.to_string(),
            source,
        })?;
    }
    if let Some(path) = lexicon_path {
        Lexicon::init_custom(read(path)?).map_err(|source| ConfigError::Lexicon {
            path: path.to_string(),
            source,
        })?;
    }
    if let Some(path) = settings_path {
        settings::init_custom(read(path)?).map_err(|source| ConfigError::Settings {
            path: path.to_string(),
            source,
        })?;
    }
    Ok(())
}

pub fn glyphs_export() {
    print!("{}", glyphs::default_toml());
}

pub fn glyphs_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let table = die!(glyphs::parse_glyph_toml(&content), "Error: {}");
    println!("OK: {} glyphs", table.len());
}

pub fn lexicon_export() {
    print!("{}", lexicon::default_toml());
}

pub fn lexicon_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let words = die!(
        lexicon::parse_lexicon_toml(&content, GlyphTable::global()),
        "Error: {}"
    );
    println!("OK: {} words", words.len());
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: conversion.use_word_mapping={}, {} trailing, {} allowed punctuation",
        s.conversion.use_word_mapping,
        s.punctuation.trailing().len(),
        s.punctuation.allowed().len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_nothing_is_ok() {
        assert!(install_custom(None, None, None).is_ok());
    }

    #[test]
    fn install_missing_file_reports_path() {
        let err = install_custom(None, None, Some("/nonexistent/settings.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/settings.toml"));
    }
}
