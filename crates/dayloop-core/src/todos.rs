//! Todo list with date-based categorization.
//!
//! Marking a todo complete (the false -> true transition only) is a
//! todos completion action and registers activity on the todos streak.
//! Un-completing does not.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{load_snapshot, save_snapshot, SnapshotStore};
use crate::streak::{FeatureKey, StreakTracker};

const TODOS_KEY: &str = "todos";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Open todos bucketed for display. Overdue items land in `today`;
/// undated items in `upcoming`.
#[derive(Debug, Default, Serialize)]
pub struct TodoBuckets<'a> {
    pub today: Vec<&'a Todo>,
    pub upcoming: Vec<&'a Todo>,
    pub completed: Vec<&'a Todo>,
}

/// The todo collection, loaded from and persisted to a snapshot store.
pub struct Todos {
    store: Box<dyn SnapshotStore>,
    todos: Vec<Todo>,
}

impl Todos {
    /// Load the collection; a missing or unreadable snapshot starts empty.
    pub fn load(store: Box<dyn SnapshotStore>) -> Self {
        let todos = load_snapshot(store.as_ref(), TODOS_KEY).unwrap_or_default();
        Self { store, todos }
    }

    /// All todos, newest first.
    pub fn all(&self) -> &[Todo] {
        &self.todos
    }

    /// Create an open todo. Adding is not a completion action.
    pub fn add(&mut self, title: &str, description: &str, due_date: Option<NaiveDate>) -> Todo {
        let todo = Todo {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            due_date,
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
        };
        self.todos.insert(0, todo.clone());
        self.persist();
        todo
    }

    /// Replace title, description and due date. Returns false when `id`
    /// is unknown.
    pub fn edit(
        &mut self,
        id: Uuid,
        title: &str,
        description: &str,
        due_date: Option<NaiveDate>,
    ) -> bool {
        let Some(index) = self.todos.iter().position(|t| t.id == id) else {
            return false;
        };
        let todo = &mut self.todos[index];
        todo.title = title.trim().to_string();
        todo.description = description.trim().to_string();
        todo.due_date = due_date;
        self.persist();
        true
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        if self.todos.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Set the completion state. Registers todos activity only when the
    /// todo transitions from open to completed. Returns false when `id`
    /// is unknown.
    pub fn set_completed(&mut self, tracker: &mut StreakTracker, id: Uuid, completed: bool) -> bool {
        let Some(index) = self.todos.iter().position(|t| t.id == id) else {
            return false;
        };
        let todo = &mut self.todos[index];
        if todo.completed == completed {
            return true;
        }
        todo.completed = completed;
        todo.completed_at = if completed { Some(Utc::now()) } else { None };
        self.persist();
        if completed {
            tracker.register_activity(FeatureKey::Todos);
        }
        true
    }

    /// Bucket todos for display relative to `today`.
    pub fn categorize(&self, today: NaiveDate) -> TodoBuckets<'_> {
        let mut buckets = TodoBuckets::default();
        for todo in &self.todos {
            if todo.completed {
                buckets.completed.push(todo);
            } else {
                match todo.due_date {
                    // Overdue counts as today so it stays in view.
                    Some(due) if due <= today => buckets.today.push(todo),
                    // Dated later, or undated.
                    _ => buckets.upcoming.push(todo),
                }
            }
        }
        buckets
    }

    fn persist(&self) {
        if let Err(error) = save_snapshot(self.store.as_ref(), TODOS_KEY, &self.todos) {
            tracing::warn!(%error, "failed to persist todos");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (Todos, StreakTracker) {
        let store = MemoryStore::new();
        let clock = FixedClock::new(date(2024, 6, 15));
        let tracker = StreakTracker::new(Box::new(store.clone()), Box::new(clock));
        let todos = Todos::load(Box::new(store));
        (todos, tracker)
    }

    #[test]
    fn completing_registers_streak_once() {
        let (mut todos, mut tracker) = setup();
        let todo = todos.add("ship release", "", None);

        assert!(todos.set_completed(&mut tracker, todo.id, true));
        assert_eq!(tracker.get(FeatureKey::Todos).current, 1);

        // Already completed, no transition, no extra registration needed
        // (same-day registration would be a no-op anyway).
        assert!(todos.set_completed(&mut tracker, todo.id, true));
        assert_eq!(tracker.get(FeatureKey::Todos).current, 1);
    }

    #[test]
    fn uncompleting_does_not_register() {
        let (mut todos, mut tracker) = setup();
        let todo = todos.add("task", "", None);
        todos.set_completed(&mut tracker, todo.id, true);
        let before = tracker.get(FeatureKey::Todos);

        todos.set_completed(&mut tracker, todo.id, false);
        assert_eq!(tracker.get(FeatureKey::Todos), before);
        assert!(!todos.all()[0].completed);
        assert!(todos.all()[0].completed_at.is_none());
    }

    #[test]
    fn unknown_id_is_rejected() {
        let (mut todos, mut tracker) = setup();
        assert!(!todos.set_completed(&mut tracker, Uuid::new_v4(), true));
        assert!(!todos.edit(Uuid::new_v4(), "x", "", None));
        assert!(!todos.delete(Uuid::new_v4()));
    }

    #[test]
    fn categorize_buckets_by_due_date() {
        let (mut todos, mut tracker) = setup();
        let today = date(2024, 6, 15);
        todos.add("due today", "", Some(today));
        todos.add("overdue", "", Some(date(2024, 6, 10)));
        todos.add("later", "", Some(date(2024, 6, 20)));
        todos.add("someday", "", None);
        let done = todos.add("done", "", Some(today));
        todos.set_completed(&mut tracker, done.id, true);

        let buckets = todos.categorize(today);
        let titles = |items: &[&Todo]| -> Vec<String> {
            items.iter().map(|t| t.title.clone()).collect()
        };
        assert_eq!(titles(&buckets.today), vec!["due today", "overdue"]);
        assert_eq!(titles(&buckets.upcoming), vec!["later", "someday"]);
        assert_eq!(titles(&buckets.completed), vec!["done"]);
    }

    #[test]
    fn edit_replaces_fields() {
        let (mut todos, _) = setup();
        let todo = todos.add("old", "desc", None);
        assert!(todos.edit(todo.id, "new", "desc2", Some(date(2024, 7, 1))));
        let edited = &todos.all()[0];
        assert_eq!(edited.title, "new");
        assert_eq!(edited.due_date, Some(date(2024, 7, 1)));
    }

    #[test]
    fn collection_survives_reload() {
        let store = MemoryStore::new();
        {
            let mut todos = Todos::load(Box::new(store.clone()));
            todos.add("persisted", "", None);
        }
        let reloaded = Todos::load(Box::new(store));
        assert_eq!(reloaded.all().len(), 1);
    }
}
