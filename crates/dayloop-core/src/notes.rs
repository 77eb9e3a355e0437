//! Notes with title/content search.
//!
//! The collection is persisted as one snapshot, newest first. Creating
//! or editing a note is a notes completion action and registers activity
//! on the notes streak.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{load_snapshot, save_snapshot, SnapshotStore};
use crate::streak::{FeatureKey, StreakTracker};

const NOTES_KEY: &str = "notes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The notes collection, loaded from and persisted to a snapshot store.
pub struct Notes {
    store: Box<dyn SnapshotStore>,
    notes: Vec<Note>,
}

impl Notes {
    /// Load the collection; a missing or unreadable snapshot starts empty.
    pub fn load(store: Box<dyn SnapshotStore>) -> Self {
        let notes = load_snapshot(store.as_ref(), NOTES_KEY).unwrap_or_default();
        Self { store, notes }
    }

    /// All notes, newest first.
    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    /// Create a note. Title and content are trimmed.
    pub fn add(&mut self, tracker: &mut StreakTracker, title: &str, content: &str) -> Note {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        self.notes.insert(0, note.clone());
        self.persist();
        tracker.register_activity(FeatureKey::Notes);
        note
    }

    /// Replace a note's title and content. Returns false when `id` is
    /// unknown; no activity is registered in that case.
    pub fn edit(&mut self, tracker: &mut StreakTracker, id: Uuid, title: &str, content: &str) -> bool {
        let Some(index) = self.notes.iter().position(|n| n.id == id) else {
            return false;
        };
        let note = &mut self.notes[index];
        note.title = title.trim().to_string();
        note.content = content.trim().to_string();
        note.updated_at = Utc::now();
        self.persist();
        tracker.register_activity(FeatureKey::Notes);
        true
    }

    /// Delete a note. Deletion is not a completion action.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Case-insensitive title/content search. A blank query matches
    /// everything.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.notes.iter().collect();
        }
        self.notes
            .iter()
            .filter(|n| {
                n.title.to_lowercase().contains(&query)
                    || n.content.to_lowercase().contains(&query)
            })
            .collect()
    }

    fn persist(&self) {
        if let Err(error) = save_snapshot(self.store.as_ref(), NOTES_KEY, &self.notes) {
            tracing::warn!(%error, "failed to persist notes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn setup() -> (Notes, StreakTracker, MemoryStore) {
        let store = MemoryStore::new();
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let tracker = StreakTracker::new(Box::new(store.clone()), Box::new(clock));
        let notes = Notes::load(Box::new(store.clone()));
        (notes, tracker, store)
    }

    #[test]
    fn add_trims_and_registers_streak() {
        let (mut notes, mut tracker, _) = setup();
        let note = notes.add(&mut tracker, "  Groceries  ", " milk, eggs ");
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk, eggs");
        assert_eq!(tracker.get(FeatureKey::Notes).current, 1);
    }

    #[test]
    fn newest_note_comes_first() {
        let (mut notes, mut tracker, _) = setup();
        notes.add(&mut tracker, "first", "");
        notes.add(&mut tracker, "second", "");
        assert_eq!(notes.all()[0].title, "second");
    }

    #[test]
    fn edit_updates_in_place() {
        let (mut notes, mut tracker, _) = setup();
        let note = notes.add(&mut tracker, "draft", "old");
        assert!(notes.edit(&mut tracker, note.id, "draft", "new"));
        assert_eq!(notes.all()[0].content, "new");
        assert_eq!(notes.all().len(), 1);
    }

    #[test]
    fn edit_unknown_id_is_noop() {
        let (mut notes, mut tracker, _) = setup();
        assert!(!notes.edit(&mut tracker, Uuid::new_v4(), "x", "y"));
        assert_eq!(tracker.get(FeatureKey::Notes).current, 0);
    }

    #[test]
    fn delete_does_not_touch_streak() {
        let (mut notes, mut tracker, _) = setup();
        let note = notes.add(&mut tracker, "temp", "");
        let before = tracker.get(FeatureKey::Notes);
        assert!(notes.delete(note.id));
        assert!(notes.all().is_empty());
        assert_eq!(tracker.get(FeatureKey::Notes), before);
    }

    #[test]
    fn search_is_case_insensitive() {
        let (mut notes, mut tracker, _) = setup();
        notes.add(&mut tracker, "Meeting notes", "discuss Roadmap");
        notes.add(&mut tracker, "Shopping", "bread");
        assert_eq!(notes.search("roadmap").len(), 1);
        assert_eq!(notes.search("MEETING").len(), 1);
        assert_eq!(notes.search("  ").len(), 2);
    }

    #[test]
    fn collection_survives_reload() {
        let (mut notes, mut tracker, store) = setup();
        notes.add(&mut tracker, "keep me", "");
        let reloaded = Notes::load(Box::new(store));
        assert_eq!(reloaded.all().len(), 1);
        assert_eq!(reloaded.all()[0].title, "keep me");
    }

    #[test]
    fn corrupt_snapshot_starts_empty() {
        let store = MemoryStore::new();
        store.write(NOTES_KEY, "not json at all").unwrap();
        let notes = Notes::load(Box::new(store));
        assert!(notes.all().is_empty());
    }
}
