//! Multi-feature streak tracking.
//!
//! One streak counter per feature (notes, todos, habits, pomodoro), at
//! day resolution. The whole transition logic is the three-way branch in
//! [`StreakTracker::register_activity`]:
//!
//! ```text
//! last_active == today      -> no-op (idempotent within a day)
//! last_active == yesterday  -> current += 1
//! anything else             -> current = 1
//! ```
//!
//! Records are mutated only through `register_activity` and `reset`;
//! a record with a stale `last_active_date` keeps its last value until
//! the next activity starts a new streak.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::CoreError;
use crate::events::{Event, Listeners};
use crate::storage::{load_snapshot, save_snapshot, SnapshotStore};

/// Length of the derived activity history window.
pub const HISTORY_DAYS: usize = 7;

/// The fixed set of streak-tracked features. Keys never interact:
/// completing a note does not touch the todos streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKey {
    Notes,
    Todos,
    Habits,
    Pomodoro,
}

impl FeatureKey {
    /// Enumeration order, also the display order on the streaks view.
    pub const ALL: [FeatureKey; 4] = [
        FeatureKey::Notes,
        FeatureKey::Todos,
        FeatureKey::Habits,
        FeatureKey::Pomodoro,
    ];

    /// Fixed persisted identifier. These match the keys the original
    /// browser build used, so an existing data directory keeps working.
    pub fn storage_key(&self) -> &'static str {
        match self {
            FeatureKey::Notes => "notesStreak",
            FeatureKey::Todos => "todosStreak",
            FeatureKey::Habits => "habitsStreak",
            FeatureKey::Pomodoro => "pomodoroStreak",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeatureKey::Notes => "Notes",
            FeatureKey::Todos => "Todos",
            FeatureKey::Habits => "Habits",
            FeatureKey::Pomodoro => "Pomodoro",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FeatureKey::Notes => "📝",
            FeatureKey::Todos => "✅",
            FeatureKey::Habits => "🎯",
            FeatureKey::Pomodoro => "🍅",
        }
    }

    pub fn accent_color(&self) -> &'static str {
        match self {
            FeatureKey::Notes => "#4CAF50",
            FeatureKey::Todos => "#2196F3",
            FeatureKey::Habits => "#FF9800",
            FeatureKey::Pomodoro => "#F44336",
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureKey::Notes => "notes",
            FeatureKey::Todos => "todos",
            FeatureKey::Habits => "habits",
            FeatureKey::Pomodoro => "pomodoro",
        };
        f.write_str(name)
    }
}

impl FromStr for FeatureKey {
    type Err = CoreError;

    /// Boundary parser for host inputs. Unknown names are rejected, not
    /// coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notes" => Ok(FeatureKey::Notes),
            "todos" => Ok(FeatureKey::Todos),
            "habits" => Ok(FeatureKey::Habits),
            "pomodoro" => Ok(FeatureKey::Pomodoro),
            other => Err(CoreError::UnknownFeatureKey(other.to_string())),
        }
    }
}

/// Per-feature streak state.
///
/// Invariant: `current == 0` exactly when `last_active_date` is `None`.
/// Persisted as JSON with camelCase fields and an ISO calendar date,
/// matching the stored layout of the original browser build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    /// Count of consecutive active days.
    pub current: u32,
    /// Most recent date on which the feature registered activity.
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
}

/// One row of the streaks overview: static display metadata paired with
/// the current record.
#[derive(Debug, Clone, Serialize)]
pub struct StreakSummary {
    pub key: FeatureKey,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub record: StreakRecord,
}

/// Owns the per-feature streak records, their persistence and the
/// change-notification listeners.
///
/// Constructed explicitly with its store and clock injected so hosts and
/// tests can run isolated instances; there is no ambient singleton.
pub struct StreakTracker {
    store: Box<dyn SnapshotStore>,
    clock: Box<dyn Clock>,
    listeners: Listeners,
}

impl StreakTracker {
    pub fn new(store: Box<dyn SnapshotStore>, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            listeners: Listeners::new(),
        }
    }

    /// Register a listener for change notifications. Listeners are
    /// called synchronously, in registration order, after every
    /// mutating operation.
    pub fn subscribe<F: Fn(&Event) + 'static>(&mut self, listener: F) {
        self.listeners.subscribe(listener);
    }

    /// Current calendar date as seen by this tracker's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Read the record for `key`. Returns the zero record when nothing
    /// is stored or the stored value is unreadable.
    pub fn get(&self, key: FeatureKey) -> StreakRecord {
        load_snapshot(self.store.as_ref(), key.storage_key()).unwrap_or_default()
    }

    /// Record a user-visible completion action for `key`.
    ///
    /// Multiple activities on the same calendar day are a no-op after
    /// the first; activity on the day after `last_active_date` extends
    /// the streak; any other prior state (no record, a gap of two or
    /// more days, or a future-dated record from clock skew) starts a new
    /// one-day streak.
    pub fn register_activity(&mut self, key: FeatureKey) -> StreakRecord {
        let today = self.clock.today();
        let record = self.get(key);

        if record.last_active_date == Some(today) {
            return record;
        }

        let current = match (record.last_active_date, today.pred_opt()) {
            // Saturate so a hand-edited snapshot near u32::MAX cannot panic.
            (Some(last), Some(yesterday)) if last == yesterday => record.current.saturating_add(1),
            _ => 1,
        };
        let updated = StreakRecord {
            current,
            last_active_date: Some(today),
        };

        self.persist(key, &updated);
        self.notify(key, &updated);
        updated
    }

    /// Clear the record for `key` back to zero.
    pub fn reset(&mut self, key: FeatureKey) -> StreakRecord {
        let cleared = StreakRecord::default();
        self.persist(key, &cleared);
        self.notify(key, &cleared);
        cleared
    }

    /// Display metadata and current record for every feature, in
    /// enumeration order.
    pub fn all(&self) -> Vec<StreakSummary> {
        FeatureKey::ALL
            .iter()
            .map(|&key| StreakSummary {
                key,
                label: key.label(),
                icon: key.icon(),
                color: key.accent_color(),
                record: self.get(key),
            })
            .collect()
    }

    /// Approximate activity for the trailing [`HISTORY_DAYS`] days, most
    /// recent last: the trailing `min(current, 7)` slots are marked
    /// active.
    ///
    /// Known limitation: this is derived from the scalar counter alone
    /// (no per-day log exists), so it is only accurate while the streak
    /// is current through today. A stale record still marks the most
    /// recent slots active even though those days had no activity. The
    /// behavior is kept as-is for parity with the original build.
    pub fn history(&self, key: FeatureKey) -> [bool; HISTORY_DAYS] {
        let record = self.get(key);
        let mut days = [false; HISTORY_DAYS];
        if record.current == 0 || record.last_active_date.is_none() {
            return days;
        }
        let filled = (record.current as usize).min(HISTORY_DAYS);
        for slot in days.iter_mut().rev().take(filled) {
            *slot = true;
        }
        days
    }

    /// A failed save is logged and dropped: the completion action that
    /// triggered the update must still succeed from the user's point of
    /// view.
    fn persist(&self, key: FeatureKey, record: &StreakRecord) {
        if let Err(error) = save_snapshot(self.store.as_ref(), key.storage_key(), record) {
            tracing::warn!(%key, %error, "failed to persist streak record");
        }
    }

    fn notify(&self, key: FeatureKey, record: &StreakRecord) {
        self.listeners.emit(&Event::StreakUpdated {
            key,
            record: record.clone(),
            at: self.clock.now(),
        });
    }
}

impl fmt::Debug for StreakTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreakTracker")
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

/// Tiered motivational message for a streak count. Tier boundaries are
/// inclusive below, exclusive above: 0, 1, 2-6 (count shown), 7-29,
/// 30-99, 100+.
pub fn streak_message(current: u32) -> String {
    match current {
        0 => "Start your streak today! 🚀".to_string(),
        1 => "Great start! Keep it going! 💪".to_string(),
        2..=6 => format!("{current} days strong! 🔥"),
        7..=29 => format!("Amazing {current}-day streak! 🌟"),
        30..=99 => format!("Incredible {current}-day streak! 🏆"),
        _ => format!("Legendary {current}-day streak! 👑"),
    }
}
