//! Read-back verification and extraction of embedded lyrics.
//!
//! Both operations re-open the file on disk rather than trusting any in-memory
//! tag we just wrote: the point is to prove the bytes that will be handed to
//! the user are correct. Both are best-effort diagnostics and never fail; a
//! read problem becomes an empty/neutral result plus a log line.

use std::path::Path;

use id3::Tag;
use serde::Serialize;
use tracing::warn;

/// Summary of the lyrics frames present in a file.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct VerificationReport {
    /// Whether a synchronized (SYLT) lyrics frame is present.
    pub has_sylt: bool,

    /// Whether an unsynchronized (USLT) lyrics frame is present.
    pub has_uslt: bool,

    /// Entry count of the first SYLT frame; 0 if absent or empty.
    pub sylt_entries: usize,

    /// Read failure detail, if the file could not be inspected.
    pub error: Option<String>,
}

impl VerificationReport {
    fn empty() -> Self {
        Self {
            has_sylt: false,
            has_uslt: false,
            sylt_entries: 0,
            error: None,
        }
    }
}

/// One extracted synchronized-lyrics pair, with the offset converted back to seconds.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ExtractedEntry {
    pub text: String,
    pub offset_seconds: f64,
}

/// Report which lyrics frames `path` carries.
///
/// A file with no tag at all is a normal all-false report, not an error.
pub fn verify(path: &Path) -> VerificationReport {
    let tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(id3::Error {
            kind: id3::ErrorKind::NoTag,
            ..
        }) => return VerificationReport::empty(),
        Err(err) => {
            return VerificationReport {
                error: Some(err.to_string()),
                ..VerificationReport::empty()
            };
        }
    };

    let mut report = VerificationReport::empty();
    if let Some(sylt) = tag.synchronised_lyrics().next() {
        report.has_sylt = true;
        report.sylt_entries = sylt.content.len();
    }
    report.has_uslt = tag.lyrics().next().is_some();
    report
}

/// Read every SYLT entry in `path` back as (text, seconds) pairs.
///
/// Diagnostic utility for round-trip checks; returns an empty sequence on any
/// failure.
pub fn extract(path: &Path) -> Vec<ExtractedEntry> {
    let tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read tag for extraction");
            return Vec::new();
        }
    };

    tag.synchronised_lyrics()
        .flat_map(|frame| frame.content.iter())
        .map(|(offset_ms, text)| ExtractedEntry {
            text: text.clone(),
            offset_seconds: f64::from(*offset_ms) / 1000.0,
        })
        .collect()
}
