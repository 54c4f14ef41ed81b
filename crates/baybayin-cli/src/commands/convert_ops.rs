use std::io::{self, BufRead, Write};
use std::process;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use baybayin_core::segment::{segment_forward, ConvertOptions, Segment, SegmentKind};
use baybayin_engine::{
    get_diagnostics, is_valid_baybayin, to_baybayin, to_latin, ConversionDiagnostic,
};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToBaybayin,
    ToLatin,
}

/// One converted line, as printed by `convert --json`.
#[derive(Debug, Serialize)]
pub struct ConvertRecord {
    pub input: String,
    pub output: String,
    pub diagnostics: Vec<ConversionDiagnostic>,
}

pub fn convert_line(direction: Direction, use_word_mapping: bool, input: &str) -> ConvertRecord {
    let (output, diagnostics) = match direction {
        Direction::ToBaybayin => {
            let output = to_baybayin(input, use_word_mapping);
            let diagnostics = get_diagnostics(input, &output);
            (output, diagnostics)
        }
        Direction::ToLatin => (to_latin(input), Vec::new()),
    };
    ConvertRecord {
        input: input.to_string(),
        output,
        diagnostics,
    }
}

/// Convert `text`, or every stdin line when no text is given.
pub fn convert_cmd(direction: Direction, use_word_mapping: bool, json: bool, text: Option<&str>) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut emit = |line: &str| {
        let record = convert_line(direction, use_word_mapping, line);
        if json {
            let encoded = die!(serde_json::to_string(&record), "Error encoding JSON: {}");
            die!(writeln!(out, "{encoded}"), "Error writing output: {}");
        } else {
            die!(writeln!(out, "{}", record.output), "Error writing output: {}");
            for d in &record.diagnostics {
                eprintln!("{}: {}", d.severity.as_str(), d.message);
            }
        }
    };

    match text {
        Some(text) => emit(text),
        None => {
            for line in io::stdin().lock().lines() {
                let line = die!(line, "Error reading stdin: {}");
                emit(&line);
            }
        }
    }
}

pub fn validate_cmd(text: &str) {
    if is_valid_baybayin(text) {
        println!("valid");
    } else {
        println!("invalid");
    }
}

pub fn explain_cmd(text: &str, use_word_mapping: bool, json: bool) {
    let segments = segment_forward(text, &ConvertOptions { use_word_mapping });
    if json {
        let encoded = die!(
            serde_json::to_string_pretty(&segments),
            "Error encoding JSON: {}"
        );
        println!("{encoded}");
        return;
    }
    for line in render_segments(&segments) {
        println!("{line}");
    }
}

fn kind_label(kind: SegmentKind) -> &'static str {
    match kind {
        SegmentKind::Whitespace => "whitespace",
        SegmentKind::Lexicon => "lexicon",
        SegmentKind::Rule(rule) => rule.as_str(),
        SegmentKind::Passthrough => "passthrough",
    }
}

fn display(s: &Segment, text: &str) -> String {
    if s.kind == SegmentKind::Whitespace {
        format!("{text:?}")
    } else {
        text.to_string()
    }
}

/// One aligned `source  output  kind` line per segment.
pub fn render_segments(segments: &[Segment]) -> Vec<String> {
    let rows: Vec<(String, String, &str)> = segments
        .iter()
        .map(|s| (display(s, &s.source), display(s, &s.output), kind_label(s.kind)))
        .collect();
    let source_width = rows.iter().map(|r| r.0.width()).max().unwrap_or(0);
    let output_width = rows.iter().map(|r| r.1.width()).max().unwrap_or(0);

    rows.iter()
        .map(|(source, output, kind)| {
            let source_pad = " ".repeat(source_width - source.width());
            let output_pad = " ".repeat(output_width - output.width());
            format!("{source}{source_pad}  {output}{output_pad}  {kind}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_line_to_baybayin_collects_diagnostics() {
        let record = convert_line(Direction::ToBaybayin, false, "café");
        assert_eq!(record.output, "cᜀfé");
        assert!(!record.diagnostics.is_empty());
        assert_eq!(record.input, "café");
    }

    #[test]
    fn convert_line_to_latin() {
        let record = convert_line(Direction::ToLatin, true, "ᜀᜃᜓ");
        assert_eq!(record.output, "ako");
        assert!(record.diagnostics.is_empty());
    }

    #[test]
    fn record_json_shape() {
        let record = convert_line(Direction::ToBaybayin, true, "c");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["output"], "c");
        assert_eq!(value["diagnostics"][0]["severity"], "warning");
        assert_eq!(value["diagnostics"][1]["severity"], "info");
    }

    #[test]
    fn render_aligns_columns() {
        let segments = segment_forward("ako ka", &ConvertOptions { use_word_mapping: true });
        let lines = render_segments(&segments);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ako"));
        assert!(lines[0].ends_with("lexicon"));
        assert!(lines[1].starts_with("\" \""));
        assert!(lines[1].ends_with("whitespace"));
        assert!(lines[2].ends_with("consonant+vowel"));
        let kind_col = |l: &str| l.width() - l.split_whitespace().last().unwrap().width();
        assert_eq!(kind_col(&lines[0]), kind_col(&lines[2]));
    }

    #[test]
    fn segments_json_shape() {
        let segments = segment_forward("ng", &ConvertOptions { use_word_mapping: false });
        let value = serde_json::to_value(&segments).unwrap();
        assert_eq!(value[0]["kind"]["rule"], "digraph_killed");
        assert_eq!(value[0]["output"], "ᜅ᜔");
    }
}
