use serde::Serialize;
use tracing::{debug, debug_span};

use super::rules::{match_syllable, RuleKind};
use crate::glyphs::GlyphTable;
use crate::lexicon::Lexicon;
use crate::settings::{settings, PunctuationSettings};
use crate::unicode::is_baybayin;

/// Options for Latin → Baybayin conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Resolve whole words through the lexicon before applying syllable rules.
    pub use_word_mapping: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            use_word_mapping: settings().conversion.use_word_mapping,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Whitespace,
    Lexicon,
    Rule(RuleKind),
    Passthrough,
}

/// One unit of forward output. `source` is the lowercased input it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub source: String,
    pub output: String,
    pub kind: SegmentKind,
}

/// Convert Latin-script text to Baybayin.
///
/// Total: characters with no Baybayin spelling are copied through, and text
/// that is already Baybayin is left as is.
pub fn to_baybayin(text: &str, opts: &ConvertOptions) -> String {
    let _span = debug_span!(
        "to_baybayin",
        len = text.len(),
        use_word_mapping = opts.use_word_mapping
    )
    .entered();
    let mut out = String::with_capacity(text.len() * 3);
    walk(text, opts, &mut |_: &str, output: &str, _: SegmentKind| {
        out.push_str(output)
    });
    out
}

/// Same conversion as [`to_baybayin`], reported segment by segment.
/// Consecutive passthrough characters are grouped into one segment.
pub fn segment_forward(text: &str, opts: &ConvertOptions) -> Vec<Segment> {
    let _span = debug_span!("segment_forward", len = text.len()).entered();
    let mut segments: Vec<Segment> = Vec::new();
    walk(text, opts, &mut |source: &str, output: &str, kind: SegmentKind| {
        if let Some(last) = segments.last_mut() {
            if kind == SegmentKind::Passthrough && last.kind == SegmentKind::Passthrough {
                last.source.push_str(source);
                last.output.push_str(output);
                return;
            }
        }
        segments.push(Segment {
            source: source.to_string(),
            output: output.to_string(),
            kind,
        });
    });
    segments
}

type Emit<'a> = dyn FnMut(&str, &str, SegmentKind) + 'a;

fn walk(text: &str, opts: &ConvertOptions, emit: &mut Emit<'_>) {
    let table = GlyphTable::global();
    let lexicon = Lexicon::global();
    let punctuation = &settings().punctuation;

    let lowered = text.to_lowercase();
    for (is_space, token) in whitespace_runs(&lowered) {
        if is_space {
            emit(token, token, SegmentKind::Whitespace);
            continue;
        }
        let from_lexicon =
            opts.use_word_mapping && emit_lexicon_word(token, lexicon, punctuation, emit);
        if !from_lexicon {
            emit_syllables(token, table, emit);
        }
    }
}

/// Split into alternating runs of whitespace and non-whitespace, keeping
/// every run verbatim.
fn whitespace_runs(s: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (i, c) in s.char_indices() {
        let is_space = c.is_whitespace();
        match current {
            Some(prev) if prev == is_space => {}
            Some(prev) => {
                runs.push((prev, &s[start..i]));
                start = i;
                current = Some(is_space);
            }
            None => current = Some(is_space),
        }
    }
    if let Some(prev) = current {
        runs.push((prev, &s[start..]));
    }
    runs
}

/// Emit `token` through the lexicon if its stem (trailing punctuation
/// removed) is a known word. Returns false on a miss, emitting nothing.
fn emit_lexicon_word(
    token: &str,
    lexicon: &Lexicon,
    punctuation: &PunctuationSettings,
    emit: &mut Emit<'_>,
) -> bool {
    let stem = token.trim_end_matches(|c| punctuation.is_trailing(c));
    if stem.is_empty() {
        return false;
    }
    let Some(glyphs) = lexicon.lookup(stem) else {
        return false;
    };
    debug!(word = stem, glyphs, "lexicon hit");
    emit(stem, glyphs, SegmentKind::Lexicon);
    let tail = &token[stem.len()..];
    for (i, c) in tail.char_indices() {
        let ch = &tail[i..i + c.len_utf8()];
        emit(ch, ch, SegmentKind::Passthrough);
    }
    true
}

fn emit_syllables(token: &str, table: &GlyphTable, emit: &mut Emit<'_>) {
    let indexed: Vec<(usize, char)> = token.char_indices().collect();
    let byte_at = |pos: usize| indexed.get(pos).map_or(token.len(), |&(b, _)| b);
    let chars: Vec<char> = indexed.iter().map(|&(_, c)| c).collect();

    let mut pos = 0;
    while pos < chars.len() {
        let start = byte_at(pos);
        let matched = if is_baybayin(chars[pos]) {
            None
        } else {
            match_syllable(&chars[pos..], table).and_then(|m| {
                table
                    .lookup_forward(&m.key)
                    .map(|glyph| (glyph, m.kind, m.consumed))
            })
        };
        match matched {
            Some((glyph, kind, consumed)) => {
                let source = &token[start..byte_at(pos + consumed)];
                emit(source, glyph, SegmentKind::Rule(kind));
                pos += consumed;
            }
            None => {
                let ch = &token[start..byte_at(pos + 1)];
                emit(ch, ch, SegmentKind::Passthrough);
                pos += 1;
            }
        }
    }
}
