//! # Dayloop Core Library
//!
//! This library provides the core business logic for Dayloop, a personal
//! productivity tracker. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary; any GUI is a
//! thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Streak engine**: a day-resolution consecutive-activity counter
//!   per feature, with injected persistence and clock so day transitions
//!   are testable
//! - **Feature modules**: notes, todos and habits, each persisting its
//!   collection as one JSON snapshot and registering streak activity on
//!   its completion actions
//! - **Session timer**: a wall-clock pomodoro state machine that
//!   requires the caller to periodically invoke `tick()`
//! - **Storage**: flat key-value JSON snapshots and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: the streak state machine
//! - [`SessionTimer`]: pomodoro session timer
//! - [`SnapshotStore`]: persistence seam (file-backed or in-memory)
//! - [`Clock`]: injectable date source

pub mod clock;
pub mod error;
pub mod events;
pub mod habits;
pub mod notes;
pub mod pomodoro;
pub mod storage;
pub mod streak;
pub mod todos;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, Result, StoreError};
pub use events::Event;
pub use habits::{Habit, Habits, MarkOutcome};
pub use notes::{Note, Notes};
pub use pomodoro::{SessionDurations, SessionTimer, SessionType, TimerState};
pub use storage::{Config, JsonStore, MemoryStore, SnapshotStore};
pub use streak::{
    streak_message, FeatureKey, StreakRecord, StreakSummary, StreakTracker, HISTORY_DAYS,
};
pub use todos::{Todo, TodoBuckets, Todos};
