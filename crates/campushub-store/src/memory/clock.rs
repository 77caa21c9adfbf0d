//! Commit clock.

use chrono::{DateTime, Duration, Utc};

/// Hands out strictly increasing commit times.
#[derive(Debug, Clone)]
pub struct CommitClock {
    last: DateTime<Utc>,
}

impl CommitClock {
    /// A clock that has not issued anything yet.
    pub fn new() -> Self {
        Self {
            last: DateTime::<Utc>::MIN_UTC,
        }
    }

    /// Resume after the given instant, e.g. the newest time in a loaded file.
    pub fn resume_after(last: DateTime<Utc>) -> Self {
        Self { last }
    }

    /// The next commit time, later than every previous one.
    pub fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        self.last = if now > self.last {
            now
        } else {
            self.last + Duration::nanoseconds(1)
        };
        self.last
    }

    /// The most recent commit time.
    pub fn last(&self) -> DateTime<Utc> {
        self.last
    }
}

impl Default for CommitClock {
    fn default() -> Self {
        Self::new()
    }
}
