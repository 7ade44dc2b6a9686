//! `lyrictag` — embed synchronized lyrics into MP3 files.
//!
//! This crate provides:
//! - Construction of time-coded lyric entries from word-level timestamps
//! - SYLT/USLT frame writing with an explicit fallback ladder, so callers
//!   always get playable audio back even when tagging fails
//! - Read-back verification and extraction of embedded lyrics
//! - LRC caption export as a portable alternative to embedded metadata
//!
//! The library is designed to be driven by UIs, services, or CLI tools,
//! with an emphasis on graceful degradation and minimal surprises.

// High-level API (most consumers should start here).
pub mod config;
pub mod embedder;

// Core data structures of the embedding pipeline.
pub mod entries;
pub mod timed_word;

// Tag-set writing (crate-internal) and read-back.
mod sylt;
pub mod verify;

// Caption export.
pub mod lrc_encoder;

// Container preparation (crate-internal) and external-collaborator boundaries.
mod prepare;
pub mod transcode;
pub mod transcriber;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use config::{EmbedConfig, EntryGranularity};
pub use embedder::LyricsEmbedder;
pub use error::{Error, Result};
pub use timed_word::TimedWord;
pub use verify::{ExtractedEntry, VerificationReport};
