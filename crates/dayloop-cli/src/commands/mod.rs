pub mod config;
pub mod habit;
pub mod note;
pub mod streak;
pub mod timer;
pub mod todo;

use dayloop_core::{JsonStore, StreakTracker, SystemClock};

/// Open the shared store and a tracker over it.
pub(crate) fn open_tracker() -> Result<(StreakTracker, JsonStore), Box<dyn std::error::Error>> {
    let store = JsonStore::open()?;
    let tracker = StreakTracker::new(Box::new(store.clone()), Box::new(SystemClock));
    Ok((tracker, store))
}
