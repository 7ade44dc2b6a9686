use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// A single recognized word and its temporal bounds, as produced by an ASR backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimedWord {
    /// Word text. May carry surrounding whitespace from the recognizer; consumers trim.
    #[serde(rename = "word")]
    pub text: String,
    /// Start time in seconds.
    #[serde(rename = "start")]
    pub start_seconds: f32,
    /// End time in seconds.
    #[serde(rename = "end")]
    pub end_seconds: f32,
}

impl TimedWord {
    /// Create a validated timed word.
    ///
    /// We require `0 <= start <= end` and finite timestamps. We deliberately do *not*
    /// enforce ordering or non-overlap across consecutive words: recognizers produce
    /// both gaps and overlaps, and the embedding layer tolerates them as-is.
    pub fn new(text: impl Into<String>, start_seconds: f32, end_seconds: f32) -> Result<Self> {
        ensure!(
            start_seconds.is_finite() && end_seconds.is_finite(),
            "word timestamps must be finite, got start={start_seconds} end={end_seconds}"
        );
        ensure!(
            start_seconds >= 0.0,
            "word start must be >= 0, got {start_seconds}"
        );
        ensure!(
            start_seconds <= end_seconds,
            "word start {start_seconds} is after its end {end_seconds}"
        );

        Ok(Self {
            text: text.into(),
            start_seconds,
            end_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_ordinary_words() -> anyhow::Result<()> {
        let w = TimedWord::new("hello", 0.5, 0.9)?;
        assert_eq!(w.text, "hello");
        assert_eq!(w.start_seconds, 0.5);
        assert_eq!(w.end_seconds, 0.9);
        Ok(())
    }

    #[test]
    fn new_accepts_zero_length_words() {
        // Some recognizers emit identical start/end for very short tokens.
        assert!(TimedWord::new("a", 1.0, 1.0).is_ok());
    }

    #[test]
    fn new_rejects_negative_start() {
        assert!(TimedWord::new("x", -0.1, 0.2).is_err());
    }

    #[test]
    fn new_rejects_reversed_bounds() {
        assert!(TimedWord::new("x", 2.0, 1.0).is_err());
    }

    #[test]
    fn new_rejects_non_finite_timestamps() {
        assert!(TimedWord::new("x", f32::NAN, 1.0).is_err());
        assert!(TimedWord::new("x", 0.0, f32::INFINITY).is_err());
    }

    #[test]
    fn serde_uses_recognizer_field_names() -> anyhow::Result<()> {
        let w: TimedWord = serde_json::from_str(r#"{"word":"hi","start":0.25,"end":0.75}"#)?;
        assert_eq!(w.text, "hi");
        assert_eq!(w.start_seconds, 0.25);
        Ok(())
    }
}
