//! Append-only conversation transcript.
//!
//! The transcript is derived from state-machine transitions and exists for
//! rendering; it is never consulted for business decisions and never mutated
//! retroactively, except for being cleared wholesale on a full restart.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Bot,
    User,
}

/// One displayed chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: Timestamp,
}

impl TranscriptEntry {
    /// Creates a bot entry stamped now.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
            at: Timestamp::now(),
        }
    }

    /// Creates a user entry stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            at: Timestamp::now(),
        }
    }
}

/// Ordered log of displayed entries; index order is chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the end.
    pub fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Clears all entries. Only legal as part of a full session restart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in chronological order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been displayed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with the given speaker.
    pub fn count_by(&self, speaker: Speaker) -> usize {
        self.entries.iter().filter(|e| e.speaker == speaker).count()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}
