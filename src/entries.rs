//! Construction of time-coded lyric entries from recognized words.
//!
//! This is the first stage of the embedding pipeline: it turns a `TimedWord`
//! sequence into the `(text, millisecond-offset)` pairs that go into a SYLT
//! frame or an LRC line.
//!
//! Error policy: construction never fails. Words with empty trimmed text are
//! skipped silently, and a degenerate input simply yields fewer (or zero)
//! entries. Downstream treats an empty sequence as "no synchronized data
//! available", not as an error.

use crate::timed_word::TimedWord;

/// One `(text, offset)` pair destined for a synchronized-lyrics frame.
///
/// Offsets are absolute milliseconds from the start of the audio. If the input
/// words are time-ordered, offsets are non-decreasing; we trust input order
/// rather than re-sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedLyricsEntry {
    pub text: String,
    pub offset_ms: u32,
}

/// Convert a start time in seconds to an absolute-millisecond offset.
///
/// We round (rather than truncate) so 0.9995s lands on 1000ms, matching the
/// millisecond precision SYLT actually stores.
fn offset_ms(start_seconds: f32) -> u32 {
    let ms = (f64::from(start_seconds) * 1000.0).round();
    if ms < 0.0 { 0 } else { ms as u32 }
}

/// Build one entry per word (the default granularity).
///
/// Words whose trimmed text is empty produce no entry. Order is preserved.
pub fn word_entries(words: &[TimedWord]) -> Vec<TimedLyricsEntry> {
    words
        .iter()
        .filter_map(|w| {
            let text = w.text.trim();
            if text.is_empty() {
                return None;
            }
            Some(TimedLyricsEntry {
                text: text.to_owned(),
                offset_ms: offset_ms(w.start_seconds),
            })
        })
        .collect()
}

/// Build one entry per line, grouping up to `max_words_per_line` consecutive words.
///
/// Each line's timestamp is the start time of the *first* word in its group; the
/// line text is the space-joined trimmed words. A trailing partial group still
/// emits a line. Groups whose joined text ends up empty are skipped.
pub fn line_entries(words: &[TimedWord], max_words_per_line: usize) -> Vec<TimedLyricsEntry> {
    // A zero group size would never flush; treat it as "one word per line".
    let group = max_words_per_line.max(1);

    words
        .chunks(group)
        .filter_map(|chunk| {
            let text = chunk
                .iter()
                .map(|w| w.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if text.is_empty() {
                return None;
            }
            Some(TimedLyricsEntry {
                text,
                // chunks() never yields an empty slice.
                offset_ms: offset_ms(chunk[0].start_seconds),
            })
        })
        .collect()
}
