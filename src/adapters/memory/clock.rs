//! Fixed clock.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
