use id3::Version;

/// How timed words are turned into synchronized-lyrics entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryGranularity {
    /// One entry per recognized word (karaoke-style highlighting).
    PerWord,

    /// One entry per line of up to `max_words_per_line` consecutive words.
    ///
    /// The line's timestamp is the start time of its first word.
    PerLine { max_words_per_line: usize },
}

impl EntryGranularity {
    /// Per-line granularity with the default group size.
    pub fn per_line() -> Self {
        Self::PerLine {
            max_words_per_line: DEFAULT_WORDS_PER_LINE,
        }
    }
}

/// Options that control how lyrics are embedded.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (APIs, tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// ISO 639-2 language code written into the SYLT and USLT frames.
    pub language: String,

    /// ID3 tag version used when persisting.
    ///
    /// Frame text encoding follows from this choice (the tag library picks the
    /// densest encoding the version allows: UTF-16 under v2.3, UTF-8 under v2.4).
    /// We default to v2.3 because legacy mobile players are far more reliable
    /// with it; select v2.4 to get UTF-8 frames.
    pub tag_version: Version,

    /// Granularity of the synchronized entries.
    pub granularity: EntryGranularity,

    /// Words per line in LRC caption exports.
    pub lrc_words_per_line: usize,
}

/// Default words per line when `EntryGranularity::PerLine` is selected.
pub const DEFAULT_WORDS_PER_LINE: usize = 6;

/// Default words per line for LRC caption exports.
pub const DEFAULT_LRC_WORDS_PER_LINE: usize = 8;

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_owned(),
            tag_version: Version::Id3v23,
            granularity: EntryGranularity::PerWord,
            lrc_words_per_line: DEFAULT_LRC_WORDS_PER_LINE,
        }
    }
}
