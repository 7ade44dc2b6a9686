use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use std::fs;
use std::path::PathBuf;

use lyrictag::config::{EmbedConfig, EntryGranularity};
use lyrictag::embedder::LyricsEmbedder;
use lyrictag::timed_word::TimedWord;

fn main() -> Result<()> {
    lyrictag::logging::init();
    let params = Params::parse();

    match params.command {
        Command::Embed {
            audio,
            words,
            text,
            out,
            language,
            id3v24,
            per_line,
        } => {
            let words = read_words(&words)?;
            let full_text = match text {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("failed to read '{}'", path.display()))?,
                // No edited transcript supplied; fall back to joining the words.
                None => words
                    .iter()
                    .map(|w| w.text.trim())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" "),
            };

            let config = EmbedConfig {
                language,
                tag_version: if id3v24 {
                    id3::Version::Id3v24
                } else {
                    id3::Version::Id3v23
                },
                granularity: match per_line {
                    Some(max_words_per_line) => EntryGranularity::PerLine { max_words_per_line },
                    None => EntryGranularity::PerWord,
                },
                ..EmbedConfig::default()
            };

            let embedder = LyricsEmbedder::with_config(config)?;
            let output_name = out
                .file_name()
                .and_then(|n| n.to_str())
                .context("output path must end in a file name")?
                .to_owned();
            let produced = embedder.embed(&audio, &words, &full_text, &output_name)?;

            // The embedder's scratch directory disappears on drop, so move the
            // result to the user's destination before that happens.
            fs::copy(&produced, &out)
                .with_context(|| format!("failed to write '{}'", out.display()))?;

            let report = embedder.verify(&out);
            serde_json::to_writer_pretty(std::io::stdout(), &report)?;
            println!();
        }

        Command::Verify { audio } => {
            let embedder = LyricsEmbedder::new()?;
            let report = embedder.verify(&audio);
            serde_json::to_writer_pretty(std::io::stdout(), &report)?;
            println!();
        }

        Command::Extract { audio } => {
            let embedder = LyricsEmbedder::new()?;
            let entries = embedder.extract(&audio);
            serde_json::to_writer_pretty(std::io::stdout(), &entries)?;
            println!();
        }

        Command::Lrc {
            words,
            out,
            words_per_line,
        } => {
            let words = read_words(&words)?;
            let embedder = LyricsEmbedder::with_config(EmbedConfig {
                lrc_words_per_line: words_per_line,
                ..EmbedConfig::default()
            })?;
            let path = embedder.export_captions(&words, &out)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Read a JSON array of `{word, start, end}` objects and validate each record.
fn read_words(path: &PathBuf) -> Result<Vec<TimedWord>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let raw: Vec<TimedWord> =
        serde_json::from_str(&data).with_context(|| format!("invalid words JSON in '{}'", path.display()))?;

    raw.into_iter()
        .map(|w| TimedWord::new(w.text, w.start_seconds, w.end_seconds))
        .collect()
}

#[derive(Parser, Debug)]
#[command(name = "lyrictag")]
#[command(about = "Embed synchronized lyrics into MP3 files")]
struct Params {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Embed SYLT/USLT lyrics into a copy of an audio file.
    Embed {
        /// Source audio file (MP3, or anything ffmpeg can convert).
        #[arg(short = 'a', long = "audio")]
        audio: PathBuf,

        /// JSON file holding an array of {word, start, end} objects.
        #[arg(short = 'w', long = "words")]
        words: PathBuf,

        /// Optional edited transcript for the unsynchronized frame.
        /// Defaults to the joined words.
        #[arg(short = 't', long = "text")]
        text: Option<PathBuf>,

        /// Destination path for the tagged file.
        #[arg(short = 'o', long = "out")]
        out: PathBuf,

        /// ISO 639-2 language code for the lyrics frames.
        #[arg(long = "language", default_value = "eng")]
        language: String,

        /// Persist as ID3v2.4 (UTF-8 frames) instead of the more compatible v2.3.
        #[arg(long = "id3v24", default_value_t = false)]
        id3v24: bool,

        /// Group words into lines of up to N words instead of one entry per word.
        #[arg(long = "per-line", value_name = "N")]
        per_line: Option<usize>,
    },

    /// Report which lyrics frames a file carries.
    Verify {
        #[arg(short = 'a', long = "audio")]
        audio: PathBuf,
    },

    /// Read embedded SYLT entries back as (text, seconds) pairs.
    Extract {
        #[arg(short = 'a', long = "audio")]
        audio: PathBuf,
    },

    /// Export an LRC caption file from word timestamps.
    Lrc {
        /// JSON file holding an array of {word, start, end} objects.
        #[arg(short = 'w', long = "words")]
        words: PathBuf,

        /// Destination path for the LRC file.
        #[arg(short = 'o', long = "out")]
        out: PathBuf,

        #[arg(long = "words-per-line", default_value_t = lyrictag::config::DEFAULT_LRC_WORDS_PER_LINE)]
        words_per_line: usize,
    },
}
