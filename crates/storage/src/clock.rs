//! Commit timestamp allocation
//!
//! Store-assigned timestamps follow wall-clock time but must never repeat or
//! go backwards, otherwise two writes to the same column could collide and
//! one would silently replace the other.

use std::sync::atomic::{AtomicU64, Ordering};

use rowstore_core::Timestamp;

/// Strictly increasing microsecond clock
#[derive(Debug, Default)]
pub struct CommitClock {
    last: AtomicU64,
}

impl CommitClock {
    /// Create a clock that has issued nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next commit timestamp: `max(now, last + 1)`.
    pub fn next(&self) -> Timestamp {
        let now = Timestamp::now().as_micros();
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return Timestamp::from_micros(candidate),
                Err(observed) => last = observed,
            }
        }
    }

    /// Ensure future timestamps are strictly greater than `ts`.
    ///
    /// Called for every caller-chosen cell timestamp, whether it arrives in
    /// a live mutation or from a loaded snapshot.
    pub fn observe(&self, ts: Timestamp) {
        self.last.fetch_max(ts.as_micros(), Ordering::SeqCst);
    }
}
