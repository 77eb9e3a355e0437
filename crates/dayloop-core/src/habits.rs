//! Habit board: fixed-length habits with a same-day completion guard.
//!
//! Each habit has a target day count; marking it done decrements the
//! remaining count at most once per calendar day. When the count reaches
//! zero the habit moves to the completed list. Marking a day done is a
//! habits completion action and registers activity on the habits streak.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{load_snapshot, save_snapshot, SnapshotStore};
use crate::streak::{FeatureKey, StreakTracker};

const HABITS_KEY: &str = "habit_tracker";

const DEFAULT_TOTAL_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub total_days: u32,
    pub remaining: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_done: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedHabit {
    #[serde(flatten)]
    pub habit: Habit,
    pub finished_at: DateTime<Utc>,
}

/// Outcome of marking a habit done for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// Already marked today; nothing changed.
    AlreadyDoneToday,
    /// One more day logged; this many days remain.
    Progressed { remaining: u32 },
    /// The habit reached its target and moved to the completed list.
    Finished,
    /// No habit with that id.
    NotFound,
}

/// Both lists persist together as one snapshot, matching the stored
/// layout of the original build.
#[derive(Debug, Default, Serialize, Deserialize)]
struct HabitSnapshot {
    #[serde(default)]
    habits: Vec<Habit>,
    #[serde(default)]
    completed: Vec<CompletedHabit>,
}

/// The habit board, loaded from and persisted to a snapshot store.
pub struct Habits {
    store: Box<dyn SnapshotStore>,
    active: Vec<Habit>,
    completed: Vec<CompletedHabit>,
}

impl Habits {
    /// Load the board; a missing or unreadable snapshot starts empty.
    pub fn load(store: Box<dyn SnapshotStore>) -> Self {
        let snapshot: HabitSnapshot =
            load_snapshot(store.as_ref(), HABITS_KEY).unwrap_or_default();
        Self {
            store,
            active: snapshot.habits,
            completed: snapshot.completed,
        }
    }

    pub fn active(&self) -> &[Habit] {
        &self.active
    }

    pub fn completed(&self) -> &[CompletedHabit] {
        &self.completed
    }

    /// Create a habit, newest first. A zero target falls back to the
    /// default of 30 days.
    pub fn add(&mut self, name: &str, total_days: u32) -> Habit {
        let total_days = if total_days == 0 {
            DEFAULT_TOTAL_DAYS
        } else {
            total_days
        };
        let habit = Habit {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            total_days,
            remaining: total_days,
            created_at: Utc::now(),
            last_done: None,
        };
        self.active.insert(0, habit.clone());
        self.persist();
        habit
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.active.len();
        self.active.retain(|h| h.id != id);
        if self.active.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Mark a habit done for the tracker's current date. At most one
    /// decrement per calendar day per habit.
    pub fn mark_done(&mut self, tracker: &mut StreakTracker, id: Uuid) -> MarkOutcome {
        let today = tracker.today();
        let Some(index) = self.active.iter().position(|h| h.id == id) else {
            return MarkOutcome::NotFound;
        };
        if self.active[index].last_done == Some(today) {
            return MarkOutcome::AlreadyDoneToday;
        }

        let remaining = {
            let habit = &mut self.active[index];
            habit.remaining = habit.remaining.saturating_sub(1);
            habit.last_done = Some(today);
            habit.remaining
        };

        let outcome = if remaining == 0 {
            let finished = self.active.remove(index);
            // Guard against duplicates in the completed list.
            if !self.completed.iter().any(|c| c.habit.id == finished.id) {
                self.completed.insert(
                    0,
                    CompletedHabit {
                        habit: finished,
                        finished_at: Utc::now(),
                    },
                );
            }
            MarkOutcome::Finished
        } else {
            MarkOutcome::Progressed { remaining }
        };

        self.persist();
        tracker.register_activity(FeatureKey::Habits);
        outcome
    }

    pub fn clear_completed(&mut self) {
        self.completed.clear();
        self.persist();
    }

    pub fn clear_active(&mut self) {
        self.active.clear();
        self.persist();
    }

    /// Drop the whole board, including the stored snapshot.
    pub fn clear_all(&mut self) {
        self.active.clear();
        self.completed.clear();
        if let Err(error) = self.store.remove(HABITS_KEY) {
            tracing::warn!(%error, "failed to remove habit snapshot");
        }
    }

    fn persist(&self) {
        let snapshot = HabitSnapshot {
            habits: self.active.clone(),
            completed: self.completed.clone(),
        };
        if let Err(error) = save_snapshot(self.store.as_ref(), HABITS_KEY, &snapshot) {
            tracing::warn!(%error, "failed to persist habits");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (Habits, StreakTracker, Rc<FixedClock>) {
        let store = MemoryStore::new();
        let clock = Rc::new(FixedClock::new(date(2024, 6, 1)));
        let tracker = StreakTracker::new(Box::new(store.clone()), Box::new(Rc::clone(&clock)));
        let habits = Habits::load(Box::new(store));
        (habits, tracker, clock)
    }

    #[test]
    fn add_defaults_zero_target_to_thirty() {
        let (mut habits, _, _) = setup();
        let habit = habits.add("read", 0);
        assert_eq!(habit.total_days, 30);
        assert_eq!(habit.remaining, 30);
    }

    #[test]
    fn mark_done_decrements_once_per_day() {
        let (mut habits, mut tracker, clock) = setup();
        let habit = habits.add("stretch", 3);

        assert_eq!(
            habits.mark_done(&mut tracker, habit.id),
            MarkOutcome::Progressed { remaining: 2 }
        );
        assert_eq!(
            habits.mark_done(&mut tracker, habit.id),
            MarkOutcome::AlreadyDoneToday
        );

        clock.advance_days(1);
        assert_eq!(
            habits.mark_done(&mut tracker, habit.id),
            MarkOutcome::Progressed { remaining: 1 }
        );
        assert_eq!(tracker.get(FeatureKey::Habits).current, 2);
    }

    #[test]
    fn finishing_moves_habit_to_completed() {
        let (mut habits, mut tracker, clock) = setup();
        let habit = habits.add("journal", 2);
        habits.mark_done(&mut tracker, habit.id);
        clock.advance_days(1);

        assert_eq!(habits.mark_done(&mut tracker, habit.id), MarkOutcome::Finished);
        assert!(habits.active().is_empty());
        assert_eq!(habits.completed().len(), 1);
        assert_eq!(habits.completed()[0].habit.name, "journal");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (mut habits, mut tracker, _) = setup();
        assert_eq!(
            habits.mark_done(&mut tracker, Uuid::new_v4()),
            MarkOutcome::NotFound
        );
        assert_eq!(tracker.get(FeatureKey::Habits).current, 0);
    }

    #[test]
    fn clear_operations() {
        let (mut habits, mut tracker, clock) = setup();
        let one_day = habits.add("done quickly", 1);
        habits.mark_done(&mut tracker, one_day.id);
        clock.advance_days(1);
        habits.add("still active", 5);

        habits.clear_completed();
        assert!(habits.completed().is_empty());
        assert_eq!(habits.active().len(), 1);

        habits.clear_active();
        assert!(habits.active().is_empty());
    }

    #[test]
    fn clear_all_removes_snapshot() {
        let store = MemoryStore::new();
        let mut habits = Habits::load(Box::new(store.clone()));
        habits.add("gone", 5);

        habits.clear_all();
        assert!(store.read(HABITS_KEY).unwrap().is_none());
        let reloaded = Habits::load(Box::new(store));
        assert!(reloaded.active().is_empty());
    }

    #[test]
    fn board_survives_reload() {
        let store = MemoryStore::new();
        {
            let mut habits = Habits::load(Box::new(store.clone()));
            habits.add("water plants", 10);
        }
        let reloaded = Habits::load(Box::new(store));
        assert_eq!(reloaded.active().len(), 1);
        assert_eq!(reloaded.active()[0].remaining, 10);
    }

    #[test]
    fn snapshot_flattens_completed_habit() {
        let habit = Habit {
            id: Uuid::new_v4(),
            name: "n".into(),
            total_days: 1,
            remaining: 0,
            created_at: Utc::now(),
            last_done: Some(date(2024, 6, 1)),
        };
        let completed = CompletedHabit {
            habit,
            finished_at: Utc::now(),
        };
        let json = serde_json::to_value(&completed).unwrap();
        // Habit fields sit at the top level next to finishedAt.
        assert!(json.get("name").is_some());
        assert!(json.get("finishedAt").is_some());
    }
}
