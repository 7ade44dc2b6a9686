use std::path::Path;

use crate::Result;
use crate::timed_word::TimedWord;

/// The result of one transcription pass: the full text plus word-level timing.
#[derive(Debug, Clone)]
pub struct Transcription {
    /// The full transcript, as a single editable string.
    pub text: String,

    /// Word-level timestamps, in recognition order.
    pub words: Vec<TimedWord>,
}

/// Pluggable speech-to-text collaborator.
///
/// Lyrictag does not perform speech recognition itself; an orchestration layer
/// supplies an implementation (Whisper, a hosted API, a test stub) and feeds the
/// resulting [`Transcription`] into [`crate::LyricsEmbedder`]. The trait exists
/// so that layer and the tests share one seam.
///
/// A failed transcription means the embedder is simply never invoked; no
/// fallback lives at this boundary.
pub trait Transcriber {
    fn transcribe(&mut self, audio_path: &Path) -> Result<Transcription>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedTranscriber(Vec<TimedWord>);

    impl Transcriber for CannedTranscriber {
        fn transcribe(&mut self, _audio_path: &Path) -> Result<Transcription> {
            Ok(Transcription {
                text: self
                    .0
                    .iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
                words: self.0.clone(),
            })
        }
    }

    #[test]
    fn transcription_output_feeds_entry_construction() -> anyhow::Result<()> {
        let words = vec![
            TimedWord::new("hello", 0.0, 0.4)?,
            TimedWord::new("world", 0.5, 0.9)?,
        ];
        let mut transcriber = CannedTranscriber(words);

        let transcription = transcriber.transcribe(Path::new("unused.mp3"))?;
        assert_eq!(transcription.text, "hello world");

        let entries = crate::entries::word_entries(&transcription.words);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].offset_ms, 500);
        Ok(())
    }
}
