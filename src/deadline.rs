use chrono::{DateTime, Duration, Utc};

/// The single voting deadline, fixed when the process starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VotingDeadline {
    closes_at: DateTime<Utc>,
}

impl VotingDeadline {
    pub fn new(closes_at: DateTime<Utc>) -> Self {
        Self { closes_at }
    }

    pub fn starting_at(start: DateTime<Utc>, duration: Duration) -> Self {
        Self::new(start + duration)
    }

    pub fn closes_at(&self) -> DateTime<Utc> {
        self.closes_at
    }

    /// Votes are accepted up to and including the deadline instant.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        now <= self.closes_at
    }

    /// Whole seconds until the deadline, floored at zero.
    pub fn seconds_left(&self, now: DateTime<Utc>) -> i64 {
        (self.closes_at - now).num_seconds().max(0)
    }
}
