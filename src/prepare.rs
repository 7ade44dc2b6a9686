//! Container preparation: produce a working MP3 copy of the source audio in the
//! embedder's scratch directory.
//!
//! Policy:
//! - `.mp3` sources are copied verbatim.
//! - Anything else is handed to the external transcoder; if that is unavailable
//!   or fails we degrade to a verbatim byte copy. The copy may then carry a
//!   container that disagrees with its `.mp3` extension, so the degrade is
//!   logged rather than silent.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::transcode::Transcoder;

/// Whether the path already names an MP3 container, judged by extension.
fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}

/// Copy or convert `source` into `dest`, returning `dest`.
pub(crate) fn prepare_container<T: Transcoder>(
    transcoder: &T,
    source: &Path,
    dest: &Path,
) -> Result<PathBuf> {
    if is_mp3(source) {
        fs::copy(source, dest)
            .with_context(|| format!("failed to copy '{}'", source.display()))?;
        return Ok(dest.to_path_buf());
    }

    match transcoder.transcode_to_mp3(source, dest) {
        Ok(()) => Ok(dest.to_path_buf()),
        Err(err) => {
            warn!(
                source = %source.display(),
                error = %format!("{err:#}"),
                "transcode failed, falling back to a verbatim byte copy"
            );
            fs::copy(source, dest)
                .with_context(|| format!("failed to copy '{}'", source.display()))?;
            Ok(dest.to_path_buf())
        }
    }
}
