//! Syllable ↔ glyph table for the Baybayin block.
//!
//! The table is loaded from TOML following the same OnceLock pattern as the
//! settings module:
//!
//! - `GlyphTable::init_custom(toml_content)` installs a table before first use
//! - `GlyphTable::global()` returns `&'static GlyphTable` (lazy-init singleton)
//! - the default table is embedded via `include_str!("default_glyphs.toml")`

mod config;
mod table;

pub use config::{parse_glyph_toml, GlyphTableError};
pub use table::{GlyphEntry, GlyphTable, CONSONANTS, VOWELS};

pub const DEFAULT_TOML: &str = include_str!("default_glyphs.toml");

/// Returns the embedded default glyph table TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}
