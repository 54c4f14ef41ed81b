use std::path::Path;
use std::process;

use clap::{Args, Parser, Subcommand};

use baybayin_cli::commands::convert_ops::{self, Direction};
use baybayin_cli::commands::config_ops;
use baybayin_core::settings::settings;

#[derive(Parser)]
#[command(name = "baybayin", about = "Latin ↔ Baybayin transliteration")]
struct Cli {
    /// Custom glyph table TOML (installed before the lexicon)
    #[arg(long, global = true)]
    glyphs: Option<String>,
    /// Custom lexicon TOML
    #[arg(long, global = true)]
    lexicon: Option<String>,
    /// Custom settings TOML
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Write JSON trace logs to this directory
    #[arg(long, global = true)]
    trace_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct DirectionArgs {
    /// Latin → Baybayin
    #[arg(long)]
    to_baybayin: bool,
    /// Baybayin → Latin
    #[arg(long)]
    to_latin: bool,
}

impl DirectionArgs {
    fn direction(&self) -> Direction {
        if self.to_latin {
            Direction::ToLatin
        } else {
            Direction::ToBaybayin
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert text (or stdin, line by line)
    Convert {
        #[command(flatten)]
        direction: DirectionArgs,
        /// Skip whole-word lexicon spellings
        #[arg(long)]
        no_word_mapping: bool,
        /// Print one JSON object per line, with diagnostics
        #[arg(long)]
        json: bool,
        /// Text to convert; reads stdin when omitted
        text: Option<String>,
    },
    /// Check that text is well-formed Baybayin
    Validate { text: String },
    /// Show how text is segmented for Latin → Baybayin conversion
    Explain {
        /// Skip whole-word lexicon spellings
        #[arg(long)]
        no_word_mapping: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        text: String,
    },
    /// Print the default glyph table TOML
    GlyphsExport,
    /// Validate a glyph table TOML file
    GlyphsValidate { file: String },
    /// Print the default lexicon TOML
    LexiconExport,
    /// Validate a lexicon TOML file
    LexiconValidate { file: String },
    /// Print the default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate { file: String },
}

fn word_mapping(no_word_mapping: bool) -> bool {
    !no_word_mapping && settings().conversion.use_word_mapping
}

fn main() {
    let cli = Cli::parse();

    let _trace = cli
        .trace_dir
        .as_deref()
        .map(|dir| baybayin_engine::init_tracing(Path::new(dir)));

    if let Err(e) = config_ops::install_custom(
        cli.glyphs.as_deref(),
        cli.lexicon.as_deref(),
        cli.settings.as_deref(),
    ) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    match cli.command {
        Command::Convert {
            direction,
            no_word_mapping,
            json,
            text,
        } => convert_ops::convert_cmd(
            direction.direction(),
            word_mapping(no_word_mapping),
            json,
            text.as_deref(),
        ),
        Command::Validate { text } => convert_ops::validate_cmd(&text),
        Command::Explain {
            no_word_mapping,
            json,
            text,
        } => convert_ops::explain_cmd(&text, word_mapping(no_word_mapping), json),
        Command::GlyphsExport => config_ops::glyphs_export(),
        Command::GlyphsValidate { file } => config_ops::glyphs_validate(&file),
        Command::LexiconExport => config_ops::lexicon_export(),
        Command::LexiconValidate { file } => config_ops::lexicon_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
