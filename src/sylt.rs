//! The tag-set core: writing SYLT/USLT frames into an MP3's ID3 tag.
//!
//! Design:
//! - We re-read whatever tag the file already carries (or start from an empty
//!   one) so unrelated frames survive the rewrite.
//! - We delete stale SYLT/USLT frames of our kind before attaching new ones,
//!   so re-embedding the same file never accumulates duplicates.
//! - Timestamps are absolute milliseconds and the content type is "lyrics";
//!   both are fixed by the frame contract, not configurable.

use std::path::Path;

use anyhow::{Context, Result};
use id3::frame::{Content, Frame, Lyrics, SynchronisedLyrics, SynchronisedLyricsType, TimestampFormat};
use id3::{Tag, TagLike};

use crate::config::EmbedConfig;
use crate::entries::TimedLyricsEntry;

/// Open the file's existing tag, or start an empty one if it has none.
pub(crate) fn open_or_empty_tag(path: &Path) -> Result<Tag> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(tag),
        Err(id3::Error {
            kind: id3::ErrorKind::NoTag,
            ..
        }) => Ok(Tag::new()),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read tag from '{}'", path.display()))
        }
    }
}

/// Write one SYLT frame (from `entries`) and one USLT frame (from `full_text`)
/// into the file at `path`, replacing any existing lyrics frames.
pub(crate) fn write_lyrics_tags(
    path: &Path,
    entries: &[TimedLyricsEntry],
    full_text: &str,
    config: &EmbedConfig,
) -> Result<()> {
    let mut tag = open_or_empty_tag(path)?;

    // Idempotent overwrite: drop every lyrics frame of our kind first.
    tag.remove("SYLT");
    tag.remove("USLT");

    let synchronized = SynchronisedLyrics {
        lang: config.language.clone(),
        timestamp_format: TimestampFormat::Ms,
        content_type: SynchronisedLyricsType::Lyrics,
        description: String::new(),
        content: entries
            .iter()
            .map(|e| (e.offset_ms, e.text.clone()))
            .collect(),
    };
    tag.add_frame(Frame::with_content(
        "SYLT",
        Content::SynchronisedLyrics(synchronized),
    ));

    // Plain-text fallback for players that don't render SYLT.
    let unsynchronized = Lyrics {
        lang: config.language.clone(),
        description: String::new(),
        text: full_text.to_owned(),
    };
    tag.add_frame(Frame::with_content("USLT", Content::Lyrics(unsynchronized)));

    tag.write_to_path(path, config.tag_version)
        .with_context(|| format!("failed to persist tag to '{}'", path.display()))?;

    Ok(())
}
