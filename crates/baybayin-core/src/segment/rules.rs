use serde::Serialize;

use crate::glyphs::GlyphTable;

/// Which syllable rule produced a forward segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// `nga`, `ngi`, `ngu` (and their `e`/`o` spellings).
    DigraphVowel,
    /// Bare `ng`.
    DigraphKilled,
    ConsonantVowel,
    /// Consonant not followed by a vowel, written with the vowel killer.
    ConsonantKilled,
    Vowel,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::DigraphVowel => "digraph+vowel",
            RuleKind::DigraphKilled => "digraph",
            RuleKind::ConsonantVowel => "consonant+vowel",
            RuleKind::ConsonantKilled => "consonant",
            RuleKind::Vowel => "vowel",
        }
    }
}

/// A successful rule match at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub kind: RuleKind,
    /// Glyph-table key the matched letters spell.
    pub key: String,
    /// Number of input chars consumed.
    pub consumed: usize,
}

type Matcher = fn(&[char], &GlyphTable) -> Option<(String, usize)>;

/// Tried in order; the first match wins. Reordering changes output
/// (`ng` before `n`, syllables before killed consonants).
const RULES: [(RuleKind, Matcher); 5] = [
    (RuleKind::DigraphVowel, digraph_vowel),
    (RuleKind::DigraphKilled, digraph_killed),
    (RuleKind::ConsonantVowel, consonant_vowel),
    (RuleKind::ConsonantKilled, consonant_killed),
    (RuleKind::Vowel, vowel),
];

/// Match the first rule that applies at the start of `rest` (lowercase input).
pub fn match_syllable(rest: &[char], table: &GlyphTable) -> Option<RuleMatch> {
    RULES.iter().find_map(|&(kind, matcher)| {
        matcher(rest, table).map(|(key, consumed)| RuleMatch {
            kind,
            key,
            consumed,
        })
    })
}

fn is_digraph(rest: &[char]) -> bool {
    matches!(rest, ['n', 'g', ..])
}

/// Single-letter consonants. `ng` is handled by the digraph rules.
fn single_consonant(c: char) -> bool {
    matches!(
        c,
        'k' | 'g' | 't' | 'd' | 'n' | 'p' | 'b' | 'm' | 'y' | 'r' | 'l' | 'w' | 's' | 'h'
    )
}

fn digraph_vowel(rest: &[char], table: &GlyphTable) -> Option<(String, usize)> {
    if !is_digraph(rest) {
        return None;
    }
    let v = table.canonical_vowel(*rest.get(2)?)?;
    Some((format!("ng{v}"), 3))
}

fn digraph_killed(rest: &[char], _table: &GlyphTable) -> Option<(String, usize)> {
    is_digraph(rest).then(|| ("ng".to_string(), 2))
}

fn consonant_vowel(rest: &[char], table: &GlyphTable) -> Option<(String, usize)> {
    let (&c, tail) = rest.split_first()?;
    if !single_consonant(c) {
        return None;
    }
    let v = table.canonical_vowel(*tail.first()?)?;
    Some((format!("{c}{v}"), 2))
}

fn consonant_killed(rest: &[char], _table: &GlyphTable) -> Option<(String, usize)> {
    let &c = rest.first()?;
    single_consonant(c).then(|| (c.to_string(), 1))
}

fn vowel(rest: &[char], table: &GlyphTable) -> Option<(String, usize)> {
    let v = table.canonical_vowel(*rest.first()?)?;
    Some((v.to_string(), 1))
}
