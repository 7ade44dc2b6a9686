use std::fs;
use std::path::{Path, PathBuf};

use lyrictag::config::{EmbedConfig, EntryGranularity};
use lyrictag::embedder::LyricsEmbedder;
use lyrictag::timed_word::TimedWord;
use lyrictag::transcode::Transcoder;

/// The tag library treats the audio payload as opaque, so a handful of MPEG
/// frame-sync bytes stands in for real audio in these tests.
fn fake_mp3(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, [0xFF, 0xFB, 0x90, 0x64, 0x00, 0x11, 0x22, 0x33]).unwrap();
    path
}

fn word(text: &str, start: f32) -> TimedWord {
    TimedWord::new(text, start, start + 0.25).unwrap()
}

#[test]
fn embed_then_verify_reports_both_frames() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = fake_mp3(dir.path(), "song.mp3");
    let words = vec![word("hello", 0.0), word("world", 0.5)];

    let embedder = LyricsEmbedder::new()?;
    let out = embedder.embed(&source, &words, "hello world", "synced_song.mp3")?;

    assert_eq!(out.file_name().unwrap(), "synced_song.mp3");
    let report = embedder.verify(&out);
    assert!(report.has_sylt);
    assert!(report.has_uslt);
    assert_eq!(report.sylt_entries, 2);
    assert!(report.error.is_none());
    Ok(())
}

#[test]
fn embed_then_extract_round_trips_entries() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = fake_mp3(dir.path(), "song.mp3");
    let words = vec![word("hello", 0.0), word("world", 0.5)];

    let embedder = LyricsEmbedder::new()?;
    let out = embedder.embed(&source, &words, "hello world", "synced_song.mp3")?;

    let extracted = embedder.extract(&out);
    assert_eq!(extracted.len(), 2);
    assert_eq!(extracted[0].text, "hello");
    assert_eq!(extracted[0].offset_seconds, 0.0);
    assert_eq!(extracted[1].text, "world");
    assert_eq!(extracted[1].offset_seconds, 0.5);
    Ok(())
}

#[test]
fn embedding_twice_never_accumulates_frames() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = fake_mp3(dir.path(), "song.mp3");
    let words = vec![word("again", 1.0)];

    let embedder = LyricsEmbedder::new()?;
    embedder.embed(&source, &words, "again", "out.mp3")?;
    let out = embedder.embed(&source, &words, "again", "out.mp3")?;

    let report = embedder.verify(&out);
    assert!(report.has_sylt);
    assert_eq!(report.sylt_entries, 1);
    Ok(())
}

#[test]
fn whitespace_only_words_yield_an_untagged_copy() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = fake_mp3(dir.path(), "song.mp3");
    let words = vec![word("   ", 0.0), word("", 1.0)];

    let embedder = LyricsEmbedder::new()?;
    let out = embedder.embed(&source, &words, "", "out.mp3")?;

    // No synchronized data is a success path: the copy is byte-identical audio.
    assert_eq!(fs::read(&out)?, fs::read(&source)?);
    let report = embedder.verify(&out);
    assert!(!report.has_sylt);
    assert!(!report.has_uslt);
    assert_eq!(report.sylt_entries, 0);
    Ok(())
}

#[test]
fn empty_word_list_yields_an_untagged_copy() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = fake_mp3(dir.path(), "song.mp3");

    let embedder = LyricsEmbedder::new()?;
    let out = embedder.embed(&source, &[], "some text", "out.mp3")?;

    assert_eq!(fs::read(&out)?, fs::read(&source)?);
    assert!(!embedder.verify(&out).has_sylt);
    Ok(())
}

#[test]
fn tag_failure_degrades_to_byte_identical_backup() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    // An ID3 header claiming an unsupported tag version (v2.255.255) makes
    // the tag library fail the read outright, which is exactly the rung the
    // ladder exists for.
    let source = dir.path().join("song.mp3");
    let mut bytes = b"ID3\xff\xff\x00\x00\x00\x00\x20".to_vec();
    bytes.extend_from_slice(&[0u8; 64]);
    fs::write(&source, &bytes)?;

    let embedder = LyricsEmbedder::new()?;
    let out = embedder.embed(&source, &[word("hi", 0.0)], "hi", "out.mp3")?;

    // The degrade is visible from the filename, and the bytes are the
    // untouched source, not a half-written tag.
    assert_eq!(out.file_name().unwrap(), "out_backup.mp3");
    assert_eq!(fs::read(&out)?, bytes);
    Ok(())
}

#[test]
fn missing_source_exhausts_the_ladder() -> anyhow::Result<()> {
    let embedder = LyricsEmbedder::new()?;
    let err = embedder
        .embed(
            Path::new("/nonexistent/song.mp3"),
            &[word("hi", 0.0)],
            "hi",
            "out.mp3",
        )
        .unwrap_err();
    assert!(err.to_string().contains("failed to copy"));
    Ok(())
}

struct FailingTranscoder;

impl Transcoder for FailingTranscoder {
    fn transcode_to_mp3(&self, _source: &Path, _dest: &Path) -> anyhow::Result<()> {
        anyhow::bail!("transcoder unavailable")
    }
}

#[test]
fn non_mp3_source_with_no_transcoder_still_gets_tagged() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = fake_mp3(dir.path(), "song.wav");
    let words = vec![word("degrade", 0.0)];

    let embedder = LyricsEmbedder::with_transcoder(FailingTranscoder, EmbedConfig::default())?;
    let out = embedder.embed(&source, &words, "degrade", "out.mp3")?;

    // Preparation degraded to a byte copy, but tagging still succeeded.
    let report = embedder.verify(&out);
    assert!(report.has_sylt);
    assert_eq!(report.sylt_entries, 1);
    Ok(())
}

#[test]
fn per_line_granularity_groups_entries() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = fake_mp3(dir.path(), "song.mp3");
    let words: Vec<TimedWord> = (0..7).map(|i| word(&format!("w{i}"), i as f32)).collect();

    let config = EmbedConfig {
        granularity: EntryGranularity::PerLine {
            max_words_per_line: 3,
        },
        ..EmbedConfig::default()
    };
    let embedder = LyricsEmbedder::with_config(config)?;
    let out = embedder.embed(&source, &words, "seven words", "out.mp3")?;

    let extracted = embedder.extract(&out);
    assert_eq!(extracted.len(), 3);
    assert_eq!(extracted[0].text, "w0 w1 w2");
    assert_eq!(extracted[2].text, "w6");
    assert_eq!(extracted[2].offset_seconds, 6.0);
    Ok(())
}

#[test]
fn caption_export_groups_eight_words_per_line() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let words: Vec<TimedWord> = (0..9)
        .map(|i| word(&format!("w{i}"), i as f32 * 2.0))
        .collect();

    let embedder = LyricsEmbedder::new()?;
    let out = embedder.export_captions(&words, &dir.path().join("song.lrc"))?;

    let content = fs::read_to_string(&out)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "[00:00.00]w0 w1 w2 w3 w4 w5 w6 w7");
    // The ninth word gets its own line with its own timestamp (16s in).
    assert_eq!(lines[1], "[00:16.00]w8");
    Ok(())
}

#[test]
fn caption_export_failure_is_surfaced() -> anyhow::Result<()> {
    let embedder = LyricsEmbedder::new()?;
    let err = embedder
        .export_captions(
            &[word("hi", 0.0)],
            Path::new("/nonexistent/dir/song.lrc"),
        )
        .unwrap_err();
    assert!(err.to_string().contains("failed to create"));
    Ok(())
}

#[test]
fn scratch_directory_is_removed_on_drop() -> anyhow::Result<()> {
    let embedder = LyricsEmbedder::new()?;
    let scratch = embedder.scratch_dir().to_path_buf();
    assert!(scratch.exists());
    drop(embedder);
    assert!(!scratch.exists());
    Ok(())
}
