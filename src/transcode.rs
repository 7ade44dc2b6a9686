//! Interface boundary for the external audio transcoding capability.
//!
//! Container preparation (`prepare`) only needs one operation: "turn this
//! source file into MP3 bytes at this destination". We keep that behind a
//! trait so tests can stub it out and so deployments without `ffmpeg` can
//! supply their own converter.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Converts a source audio file into an MP3 at the destination path.
pub trait Transcoder {
    fn transcode_to_mp3(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// A `Transcoder` that shells out to `ffmpeg`.
///
/// We invoke the system binary rather than linking a codec: transcoding is an
/// external collaborator here, and the fallback path in `prepare` already
/// handles the binary being absent.
#[derive(Debug, Default, Clone)]
pub struct FfmpegTranscoder {
    /// Binary name or path. Defaults to `ffmpeg` resolved via `PATH`.
    program: Option<String>,
}

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific ffmpeg binary instead of resolving `ffmpeg` from `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode_to_mp3(&self, source: &Path, dest: &Path) -> Result<()> {
        let program = self.program.as_deref().unwrap_or("ffmpeg");

        // `-y` so re-exports into the same scratch path don't hang on the
        // overwrite prompt; stdin is closed for the same reason.
        let output = Command::new(program)
            .arg("-y")
            .arg("-i")
            .arg(source)
            .arg("-codec:a")
            .arg("libmp3lame")
            .arg(dest)
            .stdin(std::process::Stdio::null())
            .output()
            .with_context(|| format!("failed to launch '{program}'"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim().lines().last().unwrap_or("no output")
            );
        }

        Ok(())
    }
}
