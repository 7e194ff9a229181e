//! Single-slot debounce for keystroke-driven search: only the most recent
//! query within the delay window ever reaches evaluation.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    query: String,
    due_at: Instant,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `query` for evaluation after the delay, cancelling any
    /// query already waiting in the slot.
    pub fn submit(&mut self, query: &str, now: Instant) {
        self.pending = Some(Pending {
            query: query.to_string(),
            due_at: now + self.delay,
        });
    }

    /// Takes the pending query once its deadline has passed. Yields each
    /// scheduled query at most once.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.due_at => {
                self.pending.take().map(|pending| pending.query)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }
}
