use std::io::Write;

use crate::Result;
use crate::entries::TimedLyricsEntry;

/// Streams timed lyric lines in LRC format (`[mm:ss.hh]text`).
///
/// Design:
/// - We stream output directly to a `Write` implementation.
/// - Entries are written as-is; grouping words into lines happens upstream
///   (the embedder reuses the same line-construction logic as the SYLT path).
pub struct LrcEncoder<W: Write> {
    /// The underlying writer we stream LRC into.
    w: W,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> LrcEncoder<W> {
    /// Create a new LRC encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self { w, closed: false }
    }

    /// Write a single timed line.
    pub fn write_entry(&mut self, entry: &TimedLyricsEntry) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write entry: encoder is already closed",
            ));
        }

        let stamp = format_timestamp_lrc(entry.offset_ms);
        writeln!(&mut self.w, "{stamp}{}", entry.text)?;
        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}

/// Format a millisecond offset as an LRC timestamp (`[mm:ss.hh]`).
///
/// LRC stores hundredths of a second; we round rather than truncate so
/// 999ms becomes `.100` carry → `01.00`, not `.99` drift.
fn format_timestamp_lrc(offset_ms: u32) -> String {
    let total_cs = (u64::from(offset_ms) + 5) / 10;

    let cs = total_cs % 100;
    let total_s = total_cs / 100;

    let s = total_s % 60;
    let m = total_s / 60;

    format!("[{m:02}:{s:02}.{cs:02}]")
}
