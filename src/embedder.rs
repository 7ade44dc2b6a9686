//! High-level API for embedding synchronized lyrics with Lyrictag.
//!
//! We expose a single, ergonomic entry point (`LyricsEmbedder`) that wires up
//! container preparation → entry construction → tag writing, plus the
//! read-back (`verify`/`extract`) and caption-export surfaces.
//!
//! The intent is:
//! - One embedder instance owns one scratch directory; every output lands
//!   under it and is released when the instance drops.
//! - `embed` never hands back a half-written file: tag failures degrade to a
//!   clean copy of the untouched source, under a name that makes the degrade
//!   visible.
//! - Read-back operations are best-effort diagnostics and never fail.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;
use tracing::{debug, warn};

use crate::Result;
use crate::config::{EmbedConfig, EntryGranularity};
use crate::entries::{self, TimedLyricsEntry};
use crate::lrc_encoder::LrcEncoder;
use crate::prepare::prepare_container;
use crate::sylt::write_lyrics_tags;
use crate::timed_word::TimedWord;
use crate::transcode::{FfmpegTranscoder, Transcoder};
use crate::verify::{ExtractedEntry, VerificationReport};

/// The main high-level embedding entry point.
///
/// `LyricsEmbedder` owns the resources one export session needs:
/// - an [`EmbedConfig`] (language, tag version, entry granularity)
/// - a transcoder for non-MP3 sources
/// - a scoped scratch directory where every output file is written
///
/// Typical usage:
/// - Construct once per export session (the scratch directory is created here).
/// - Call `embed`, then `verify` the returned path for user-facing confirmation.
/// - Drop the instance once the outputs have been consumed; the scratch
///   directory is deleted best-effort on drop (deletion failures are swallowed,
///   never propagated).
///
/// Instances share no state, so two embedders never contend — but two `embed`
/// calls on the *same* instance with the same output name are last-write-wins;
/// callers wanting isolation use distinct names or distinct instances.
pub struct LyricsEmbedder<T: Transcoder = FfmpegTranscoder> {
    transcoder: T,
    config: EmbedConfig,
    scratch: TempDir,
}

impl LyricsEmbedder<FfmpegTranscoder> {
    /// Create an embedder with default configuration and the ffmpeg transcoder.
    pub fn new() -> Result<Self> {
        Self::with_config(EmbedConfig::default())
    }

    /// Create an embedder with the given configuration and the ffmpeg transcoder.
    pub fn with_config(config: EmbedConfig) -> Result<Self> {
        Self::with_transcoder(FfmpegTranscoder::new(), config)
    }
}

impl<T: Transcoder> LyricsEmbedder<T> {
    /// Create an embedder with a custom transcoder.
    pub fn with_transcoder(transcoder: T, config: EmbedConfig) -> Result<Self> {
        let scratch = TempDir::new().context("failed to create scratch directory")?;
        Ok(Self {
            transcoder,
            config,
            scratch,
        })
    }

    /// The scratch directory outputs are written under.
    ///
    /// This is primarily intended for diagnostics and tests; the directory
    /// disappears when the embedder drops.
    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    /// Access the active configuration.
    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Embed synchronized (SYLT) and unsynchronized (USLT) lyrics into a copy
    /// of `source`, returning the path of the produced file.
    ///
    /// The returned file is always playable audio. Failures degrade down an
    /// explicit ladder rather than propagating:
    ///
    /// 1. Prepare an MP3 copy and write both lyrics frames into it. An empty
    ///    entry list (nothing but whitespace words) skips tag writing and
    ///    returns the plain copy — valid output, just without timing.
    /// 2. If tagging fails, copy the untouched source to `<stem>_backup.mp3`
    ///    so the degrade is visible from the filename.
    /// 3. If even that copy fails, try once more under `copy_<output_name>`.
    ///
    /// Only when every rung fails does `embed` return an error.
    pub fn embed(
        &self,
        source: &Path,
        words: &[TimedWord],
        full_text: &str,
        output_name: &str,
    ) -> Result<PathBuf> {
        let entries = self.build_entries(words);
        let output_path = self.scratch.path().join(output_name);

        let rungs: Vec<Rung<'_>> = vec![
            Rung {
                label: "tagged",
                step: Box::new(|| {
                    let prepared = prepare_container(&self.transcoder, source, &output_path)?;
                    if entries.is_empty() {
                        debug!("no usable timed words; returning untagged copy");
                        return Ok(prepared);
                    }
                    write_lyrics_tags(&prepared, &entries, full_text, &self.config)?;
                    Ok(prepared)
                }),
            },
            Rung {
                label: "backup copy",
                step: Box::new(|| {
                    self.copy_source_to(source, &backup_name(output_name))
                }),
            },
            Rung {
                label: "last-resort copy",
                step: Box::new(|| {
                    self.copy_source_to(source, &format!("copy_{output_name}"))
                }),
            },
        ];

        Ok(descend(rungs)?)
    }

    /// Report which lyrics frames the file at `path` carries. Never fails.
    pub fn verify(&self, path: &Path) -> VerificationReport {
        crate::verify::verify(path)
    }

    /// Read embedded SYLT entries back as (text, seconds) pairs. Never fails.
    pub fn extract(&self, path: &Path) -> Vec<ExtractedEntry> {
        crate::verify::extract(path)
    }

    /// Write an LRC caption file for `words` at `output_path`.
    ///
    /// Words are grouped into lines with the same policy as per-line SYLT
    /// construction, using the configured LRC group size. Unlike `embed`, this
    /// is a direct user-requested export with no fallback rung: a write failure
    /// is returned to the caller.
    pub fn export_captions(&self, words: &[TimedWord], output_path: &Path) -> Result<PathBuf> {
        let lines = entries::line_entries(words, self.config.lrc_words_per_line);

        let file = fs::File::create(output_path)
            .with_context(|| format!("failed to create '{}'", output_path.display()))?;
        let mut encoder = LrcEncoder::new(BufWriter::new(file));
        for line in &lines {
            encoder.write_entry(line)?;
        }
        encoder.close()?;

        Ok(output_path.to_path_buf())
    }

    fn build_entries(&self, words: &[TimedWord]) -> Vec<TimedLyricsEntry> {
        match self.config.granularity {
            EntryGranularity::PerWord => entries::word_entries(words),
            EntryGranularity::PerLine { max_words_per_line } => {
                entries::line_entries(words, max_words_per_line)
            }
        }
    }

    fn copy_source_to(&self, source: &Path, name: &str) -> anyhow::Result<PathBuf> {
        let dest = self.scratch.path().join(name);
        fs::copy(source, &dest)
            .with_context(|| format!("failed to copy '{}'", source.display()))?;
        Ok(dest)
    }
}

/// One attempt in the fallback ladder: a label for logging plus the step itself.
struct Rung<'a> {
    label: &'static str,
    step: Box<dyn FnOnce() -> anyhow::Result<PathBuf> + 'a>,
}

/// Run rungs in order, returning the first success.
///
/// Each failure is logged and absorbed; only the final rung's error escapes.
/// This keeps the ladder and its termination explicit instead of expressing
/// it through nested unwinding.
fn descend(rungs: Vec<Rung<'_>>) -> anyhow::Result<PathBuf> {
    let total = rungs.len();
    let mut last_err = None;

    for (i, rung) in rungs.into_iter().enumerate() {
        match (rung.step)() {
            Ok(path) => return Ok(path),
            Err(err) => {
                warn!(
                    rung = rung.label,
                    remaining = total - i - 1,
                    error = %format!("{err:#}"),
                    "embed rung failed"
                );
                last_err = Some(err);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("fallback ladder had no rungs")))
}

/// Derive the visible-degrade output name: `song.mp3` → `song_backup.mp3`.
fn backup_name(output_name: &str) -> String {
    match output_name.strip_suffix(".mp3") {
        Some(stem) => format!("{stem}_backup.mp3"),
        None => format!("{output_name}_backup"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;

    #[test]
    fn descend_returns_first_success() -> anyhow::Result<()> {
        let visited = RefCell::new(Vec::new());
        let rungs = vec![
            Rung {
                label: "a",
                step: Box::new(|| {
                    visited.borrow_mut().push("a");
                    bail!("a failed")
                }),
            },
            Rung {
                label: "b",
                step: Box::new(|| {
                    visited.borrow_mut().push("b");
                    Ok(PathBuf::from("b-output"))
                }),
            },
            Rung {
                label: "c",
                step: Box::new(|| {
                    visited.borrow_mut().push("c");
                    Ok(PathBuf::from("c-output"))
                }),
            },
        ];

        let out = descend(rungs)?;
        assert_eq!(out, PathBuf::from("b-output"));
        // The third rung is never entered once the second succeeds.
        assert_eq!(*visited.borrow(), vec!["a", "b"]);
        Ok(())
    }

    #[test]
    fn descend_surfaces_the_final_error_when_all_rungs_fail() {
        let rungs = vec![
            Rung {
                label: "first",
                step: Box::new(|| bail!("first failed")),
            },
            Rung {
                label: "second",
                step: Box::new(|| bail!("second failed")),
            },
        ];

        let err = descend(rungs).unwrap_err();
        assert!(err.to_string().contains("second failed"));
    }

    #[test]
    fn backup_name_marks_the_degrade_before_the_extension() {
        assert_eq!(backup_name("song.mp3"), "song_backup.mp3");
        assert_eq!(backup_name("weird.ogg"), "weird.ogg_backup");
    }
}
