use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pomodoro::SessionType;
use crate::streak::{FeatureKey, StreakRecord};

/// Every user-visible state change in the system produces an Event.
/// Views subscribe to them; the CLI prints them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A feature streak changed (advanced, started over, or was reset).
    /// Carries the full updated record so views can refresh without
    /// re-querying the tracker.
    StreakUpdated {
        key: FeatureKey,
        record: StreakRecord,
        at: DateTime<Utc>,
    },
    SessionStarted {
        session_type: SessionType,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The running session reached zero on its own. Emitted exactly once
    /// per completion; a focus session completing this way is the
    /// pomodoro completion action for streak purposes.
    SessionCompleted {
        session_type: SessionType,
        at: DateTime<Utc>,
    },
    SessionReset {
        session_type: SessionType,
        at: DateTime<Utc>,
    },
}

/// Synchronous observer list.
///
/// Listeners are invoked in registration order. Each invocation is
/// isolated: a panicking listener must not prevent delivery to the
/// listeners registered after it.
#[derive(Default)]
pub struct Listeners {
    inner: Vec<Box<dyn Fn(&Event)>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F: Fn(&Event) + 'static>(&mut self, listener: F) {
        self.inner.push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Deliver `event` to every listener, fire-and-forget.
    pub fn emit(&self, event: &Event) {
        for listener in &self.inner {
            let delivery =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| listener(event)));
            if delivery.is_err() {
                tracing::warn!("event listener panicked; continuing delivery");
            }
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.inner.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_event() -> Event {
        Event::SessionReset {
            session_type: SessionType::Focus,
            at: Utc::now(),
        }
    }

    #[test]
    fn listeners_called_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        for tag in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            listeners.subscribe(move |_| seen.borrow_mut().push(tag));
        }

        listeners.emit(&sample_event());
        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn panicking_listener_does_not_block_later_ones() {
        let seen = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();
        listeners.subscribe(|_| panic!("listener bug"));
        {
            let seen = Rc::clone(&seen);
            listeners.subscribe(move |_| *seen.borrow_mut() += 1);
        }

        listeners.emit(&sample_event());
        assert_eq!(*seen.borrow(), 1);
    }
}
