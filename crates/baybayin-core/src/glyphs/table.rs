use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use super::config::{parse_glyph_toml, GlyphTableError};
use super::DEFAULT_TOML;
use crate::unicode::{is_baybayin, is_vowel_killer, KUDLIT_I, KUDLIT_U, VIRAMA, PAMUDPOD};

/// Vowels with their own Baybayin base character.
pub const VOWELS: [char; 3] = ['a', 'i', 'u'];

/// Supported consonants. `ng` is a single letter of the script.
pub const CONSONANTS: [&str; 15] = [
    "k", "g", "ng", "t", "d", "n", "p", "b", "m", "y", "r", "l", "w", "s", "h",
];

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<GlyphTable> = OnceLock::new();

/// One syllable key and its Baybayin spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphEntry {
    pub key: String,
    pub glyph: String,
}

/// Shape of a syllable key, as far as table validation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyShape<'a> {
    Vowel,
    Syllable(&'a str, char),
    Killed(&'a str),
}

fn key_shape(key: &str) -> Option<KeyShape<'_>> {
    if CONSONANTS.contains(&key) {
        return Some(KeyShape::Killed(key));
    }
    let last = key.chars().last()?;
    if !VOWELS.contains(&last) {
        return None;
    }
    let onset = &key[..key.len() - last.len_utf8()];
    if onset.is_empty() {
        Some(KeyShape::Vowel)
    } else if CONSONANTS.contains(&onset) {
        Some(KeyShape::Syllable(onset, last))
    } else {
        None
    }
}

/// Every key the table must define, in canonical order: standalone vowels,
/// then each consonant's `a`, `i`, `u` and killed forms.
fn expected_keys() -> Vec<String> {
    let mut keys: Vec<String> = VOWELS.iter().map(|v| v.to_string()).collect();
    for c in CONSONANTS {
        for v in VOWELS {
            keys.push(format!("{c}{v}"));
        }
        keys.push(c.to_string());
    }
    keys
}

/// Bidirectional syllable ↔ glyph table.
///
/// The reverse index is derived from the forward entries when the table is
/// built, so the two directions cannot drift apart.
#[derive(Debug)]
pub struct GlyphTable {
    entries: Vec<GlyphEntry>,
    forward: HashMap<String, usize>,
    reverse: HashMap<String, usize>,
    aliases: HashMap<char, char>,
}

impl GlyphTable {
    /// Build and validate a table.
    ///
    /// Fails on duplicate keys or glyphs, keys outside the consonant/vowel
    /// inventory, missing keys, glyphs that do not follow the base + kudlit /
    /// base + killer structure, and invalid vowel aliases.
    pub fn from_entries(
        entries: impl IntoIterator<Item = GlyphEntry>,
        aliases: &[(char, char)],
    ) -> Result<Self, GlyphTableError> {
        let mut by_key: HashMap<String, String> = HashMap::new();
        let mut glyph_owner: HashMap<String, String> = HashMap::new();
        let mut bases: HashMap<&'static str, char> = HashMap::new();

        for entry in entries {
            let shape = key_shape(&entry.key)
                .ok_or_else(|| GlyphTableError::UnknownKey(entry.key.clone()))?;
            if by_key.contains_key(&entry.key) {
                return Err(GlyphTableError::DuplicateKey(entry.key));
            }
            let base = check_glyph_structure(&entry.key, &entry.glyph, shape)?;
            if let Some(consonant) = consonant_of(shape) {
                match bases.get(consonant) {
                    Some(&existing) if existing != base => {
                        return Err(GlyphTableError::Malformed {
                            key: entry.key,
                            reason: format!("base character differs from other {consonant} forms"),
                        });
                    }
                    Some(_) => {}
                    None => {
                        bases.insert(consonant, base);
                    }
                }
            }
            if let Some(first) = glyph_owner.get(&entry.glyph) {
                return Err(GlyphTableError::DuplicateGlyph {
                    glyph: entry.glyph,
                    first: first.clone(),
                    second: entry.key,
                });
            }
            glyph_owner.insert(entry.glyph.clone(), entry.key.clone());
            by_key.insert(entry.key, entry.glyph);
        }

        let mut ordered = Vec::with_capacity(by_key.len());
        for key in expected_keys() {
            let glyph = by_key
                .remove(&key)
                .ok_or_else(|| GlyphTableError::MissingKey(key.clone()))?;
            ordered.push(GlyphEntry { key, glyph });
        }

        let alias_map = validate_aliases(aliases)?;

        let forward = ordered
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key.clone(), i))
            .collect();
        let reverse = ordered
            .iter()
            .enumerate()
            .map(|(i, e)| (e.glyph.clone(), i))
            .collect();

        Ok(Self {
            entries: ordered,
            forward,
            reverse,
            aliases: alias_map,
        })
    }

    /// Install a custom table before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), GlyphTableError> {
        // Validate eagerly
        parse_glyph_toml(&toml_content)?;
        if INSTANCE.get().is_some() {
            return Err(GlyphTableError::AlreadyInitialized);
        }
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| GlyphTableError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static GlyphTable {
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let table = parse_glyph_toml(toml_str).expect("glyph table TOML must be valid");
            debug!(entries = table.len(), aliases = table.aliases.len(), "glyph table built");
            table
        })
    }

    pub fn lookup_forward(&self, key: &str) -> Option<&str> {
        self.forward
            .get(key)
            .map(|&i| self.entries[i].glyph.as_str())
    }

    pub fn lookup_reverse(&self, glyph: &str) -> Option<&str> {
        self.reverse
            .get(glyph)
            .map(|&i| self.entries[i].key.as_str())
    }

    /// Map a Latin vowel letter to the base vowel it is written with.
    pub fn canonical_vowel(&self, c: char) -> Option<char> {
        if VOWELS.contains(&c) {
            Some(c)
        } else {
            self.aliases.get(&c).copied()
        }
    }

    /// Entries in canonical order (vowels, then consonants in inventory order).
    pub fn entries(&self) -> &[GlyphEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn consonant_of(shape: KeyShape<'_>) -> Option<&'static str> {
    let c = match shape {
        KeyShape::Vowel => return None,
        KeyShape::Syllable(c, _) | KeyShape::Killed(c) => c,
    };
    CONSONANTS.iter().copied().find(|&known| known == c)
}

/// Check that `glyph` has the shape its key demands and return its base
/// character.
fn check_glyph_structure(
    key: &str,
    glyph: &str,
    shape: KeyShape<'_>,
) -> Result<char, GlyphTableError> {
    let malformed = |reason: &str| GlyphTableError::Malformed {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    let chars: Vec<char> = glyph.chars().collect();
    let Some(&base) = chars.first() else {
        return Err(malformed("glyph is empty"));
    };
    if !chars.iter().all(|&c| is_baybayin(c)) {
        return Err(malformed("glyph contains characters outside the Baybayin block"));
    }
    if [KUDLIT_I, KUDLIT_U, VIRAMA, PAMUDPOD].contains(&base) {
        return Err(malformed("glyph starts with a combining mark"));
    }

    let expected_mark = match shape {
        KeyShape::Vowel | KeyShape::Syllable(_, 'a') => None,
        KeyShape::Syllable(_, 'i') => Some(KUDLIT_I),
        KeyShape::Syllable(_, _) => Some(KUDLIT_U),
        KeyShape::Killed(_) => Some(VIRAMA),
    };

    match (expected_mark, chars.len()) {
        (None, 1) => Ok(base),
        (None, _) => Err(malformed("expected a single base character")),
        (Some(VIRAMA), 2) if is_vowel_killer(chars[1]) => Ok(base),
        (Some(VIRAMA), _) => Err(malformed("expected base character followed by a vowel killer")),
        (Some(mark), 2) if chars[1] == mark => Ok(base),
        (Some(_), _) => Err(malformed("expected base character followed by its kudlit")),
    }
}

fn validate_aliases(aliases: &[(char, char)]) -> Result<HashMap<char, char>, GlyphTableError> {
    let mut map = HashMap::with_capacity(aliases.len());
    for &(letter, target) in aliases {
        let invalid = |reason: &str| GlyphTableError::InvalidAlias {
            letter: letter.to_string(),
            reason: reason.to_string(),
        };
        if !letter.is_ascii_lowercase() {
            return Err(invalid("alias must be a lowercase ASCII letter"));
        }
        if VOWELS.contains(&letter) {
            return Err(invalid("letter is already a base vowel"));
        }
        let mut buf = [0u8; 4];
        if CONSONANTS.contains(&&*letter.encode_utf8(&mut buf)) {
            return Err(invalid("letter is a consonant"));
        }
        if !VOWELS.contains(&target) {
            return Err(invalid("target must be one of a, i, u"));
        }
        if map.insert(letter, target).is_some() {
            return Err(invalid("alias defined twice"));
        }
    }
    Ok(map)
}
