//! Character-level Unicode classification for Baybayin and Latin text.

/// Vowel sign I / E (kudlit above).
pub const KUDLIT_I: char = '\u{1712}';

/// Vowel sign U / O (kudlit below).
pub const KUDLIT_U: char = '\u{1713}';

/// Virama, the modern vowel killer.
pub const VIRAMA: char = '\u{1714}';

/// Pamudpod, an alternative vowel killer encoded since Unicode 14.
pub const PAMUDPOD: char = '\u{1715}';

/// Check the full Baybayin (Tagalog) block (U+1700..U+171F). The block has a
/// few unassigned codepoints at the end but they never appear in converted
/// text, so the block-level check is used as the "already converted" test.
pub fn is_baybayin(c: char) -> bool {
    ('\u{1700}'..='\u{171F}').contains(&c)
}

/// True for the vowel-killer marks accepted at the end of a bare consonant.
pub fn is_vowel_killer(c: char) -> bool {
    c == VIRAMA || c == PAMUDPOD
}

/// Alphabetic characters from the Latin blocks: Basic Latin, Latin-1
/// Supplement, Latin Extended-A/B and Latin Extended Additional.
///
/// Accented letters such as `é` or `ñ` count as Latin; they are never
/// converted and are reported as leftovers by the validator.
pub fn is_latin_letter(c: char) -> bool {
    if !c.is_alphabetic() {
        return false;
    }
    c.is_ascii_alphabetic()
        || ('\u{00C0}'..='\u{024F}').contains(&c)
        || ('\u{1E00}'..='\u{1EFF}').contains(&c)
}

pub fn contains_baybayin(s: &str) -> bool {
    s.chars().any(is_baybayin)
}

pub fn contains_latin(s: &str) -> bool {
    s.chars().any(is_latin_letter)
}
