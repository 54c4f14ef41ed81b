use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::{debug, debug_span};

use crate::glyphs::GlyphTable;
use crate::lexicon::Lexicon;
use crate::unicode::{is_baybayin, PAMUDPOD, VIRAMA};

/// Glyph-sequence → Latin candidates for Baybayin → Latin conversion.
///
/// Lexicon spellings only match a whole Baybayin word, one with no Baybayin
/// character directly before or after it. Glyph-table entries match anywhere.
/// When a word is both a lexicon spelling and a run of table glyphs, the
/// lexicon word wins.
#[derive(Debug)]
pub struct ReverseIndex {
    words: Candidates,
    glyphs: Candidates,
}

#[derive(Debug)]
struct Candidates {
    by_sequence: HashMap<String, String>,
    /// Distinct candidate lengths in chars, longest first.
    lengths: Vec<usize>,
}

impl Candidates {
    fn new<'a>(pairs: impl Iterator<Item = (&'a String, &'a String)>) -> Self {
        let mut by_sequence: HashMap<String, String> = HashMap::new();
        for (glyphs, latin) in pairs {
            by_sequence
                .entry(fold_killers(glyphs))
                .or_insert_with(|| latin.clone());
        }
        let mut lengths: Vec<usize> = by_sequence.keys().map(|k| k.chars().count()).collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths.dedup();
        Self {
            by_sequence,
            lengths,
        }
    }

    /// Longest candidate starting at char `pos` whose end position passes
    /// `accept_end`.
    fn longest(
        &self,
        scan: &Scan<'_>,
        pos: usize,
        accept_end: impl Fn(usize) -> bool,
    ) -> Option<(&str, usize)> {
        self.lengths.iter().find_map(|&len| {
            let end = pos + len;
            if end > scan.indexed.len() || !accept_end(end) {
                return None;
            }
            self.by_sequence
                .get(scan.folded(pos, end))
                .map(|latin| (latin.as_str(), len))
        })
    }
}

/// Input with both vowel killers folded to the virama. U+1714 and U+1715
/// are both three bytes in UTF-8, so byte offsets match the original text.
struct Scan<'a> {
    original: &'a str,
    folded: String,
    indexed: Vec<(usize, char)>,
}

impl<'a> Scan<'a> {
    fn new(original: &'a str) -> Self {
        let folded = fold_killers(original);
        let indexed = folded.char_indices().collect();
        Self {
            original,
            folded,
            indexed,
        }
    }

    fn byte_at(&self, pos: usize) -> usize {
        self.indexed
            .get(pos)
            .map_or(self.folded.len(), |&(b, _)| b)
    }

    fn folded(&self, start: usize, end: usize) -> &str {
        &self.folded[self.byte_at(start)..self.byte_at(end)]
    }

    fn original(&self, start: usize, end: usize) -> &'a str {
        &self.original[self.byte_at(start)..self.byte_at(end)]
    }

    fn is_boundary_before(&self, pos: usize) -> bool {
        pos == 0 || !is_baybayin(self.indexed[pos - 1].1)
    }

    fn is_boundary_after(&self, end: usize) -> bool {
        self.indexed.get(end).map_or(true, |&(_, c)| !is_baybayin(c))
    }
}

fn fold_killers(s: &str) -> String {
    s.chars()
        .map(|c| if c == PAMUDPOD { VIRAMA } else { c })
        .collect()
}

impl ReverseIndex {
    pub fn new(table: &GlyphTable, lexicon: &Lexicon) -> Self {
        let words = Candidates::new(lexicon.entries().iter().map(|e| (&e.glyphs, &e.word)));
        let glyphs = Candidates::new(table.entries().iter().map(|e| (&e.glyph, &e.key)));
        debug!(
            words = words.by_sequence.len(),
            glyphs = glyphs.by_sequence.len(),
            word_lengths = ?words.lengths,
            "reverse index built"
        );
        Self { words, glyphs }
    }

    /// Index over the global glyph table and lexicon.
    pub fn global() -> &'static ReverseIndex {
        static INSTANCE: OnceLock<ReverseIndex> = OnceLock::new();
        INSTANCE.get_or_init(|| ReverseIndex::new(GlyphTable::global(), Lexicon::global()))
    }

    /// Greedy longest-match conversion. Characters no candidate covers are
    /// copied through.
    pub fn convert(&self, text: &str) -> String {
        let scan = Scan::new(text);
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while pos < scan.indexed.len() {
            let word = if scan.is_boundary_before(pos) {
                self.words
                    .longest(&scan, pos, |end| scan.is_boundary_after(end))
            } else {
                None
            };
            match word.or_else(|| self.glyphs.longest(&scan, pos, |_| true)) {
                Some((latin, len)) => {
                    out.push_str(latin);
                    pos += len;
                }
                None => {
                    out.push_str(scan.original(pos, pos + 1));
                    pos += 1;
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.words.by_sequence.len() + self.glyphs.by_sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Convert Baybayin text back to Latin script (best effort, lossy).
pub fn to_latin(text: &str) -> String {
    let _span = debug_span!("to_latin", len = text.len()).entered();
    ReverseIndex::global().convert(text)
}
