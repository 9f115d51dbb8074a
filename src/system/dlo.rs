//! Dead-letter office: the system-wide destination for envelopes no mailbox
//! could deliver (§4.2, §4.5).
//!
//! Every [`crate::mailbox::BoundedMailboxSender`] in a system reports drops
//! to one shared [`DeadLetterSink`] — this module is that sink's concrete
//! implementation, a small unbounded store behind a `parking_lot::RwLock`
//! that never blocks a producer (the same "never blocks the hot path"
//! contract `AtomicMetrics` honors for mailbox counters).

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::RwLock;

// Layer 3: Internal module imports
use crate::mailbox::{DeadLetter, DeadLetterSink};

/// Default number of recent dead letters retained before the oldest is
/// discarded to make room for a new one.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Stores the most recent dead letters, oldest-first eviction once full.
///
/// `offer` never blocks: it takes a write lock just long enough to push
/// (and possibly pop) a `Vec` entry, the same critical-section discipline
/// the rest of this crate uses `parking_lot` for.
pub struct DeadLetterOffice {
    letters: RwLock<Vec<DeadLetter>>,
    capacity: usize,
}

impl DeadLetterOffice {
    /// Build an office retaining up to `capacity` letters.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            letters: RwLock::new(Vec::new()),
            capacity,
        }
    }

    /// Wrap `self` for sharing across every mailbox in a system.
    pub fn into_sink(self) -> Arc<dyn DeadLetterSink> {
        Arc::new(self)
    }

    /// Snapshot of everything currently retained, oldest first.
    pub fn snapshot(&self) -> Vec<DeadLetter> {
        self.letters.read().clone()
    }

    /// How many letters are currently retained.
    pub fn len(&self) -> usize {
        self.letters.read().len()
    }

    /// Whether no letters are currently retained.
    pub fn is_empty(&self) -> bool {
        self.letters.read().is_empty()
    }
}

impl Default for DeadLetterOffice {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl DeadLetterSink for DeadLetterOffice {
    fn offer(&self, letter: DeadLetter) {
        let mut letters = self.letters.write();
        if letters.len() >= self.capacity {
            letters.remove(0);
        }
        letters.push(letter);
    }
}
