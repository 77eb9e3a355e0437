//! Pomodoro session timer.
//!
//! A wall-clock-based state machine with no internal threads: the caller
//! is responsible for calling `tick()` periodically. State is serde-
//! serializable so a host can persist the timer between invocations.
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> Completed
//! ```
//!
//! A focus session that reaches zero on its own is the pomodoro
//! completion action: the host registers pomodoro streak activity when
//! `tick()` hands back `SessionCompleted { session_type: Focus, .. }`.
//! Switching away or resetting mid-session registers nothing.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionType {
    Focus,
    ShortBreak,
    LongBreak,
}

impl SessionType {
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Focus => "Focus",
            SessionType::ShortBreak => "Short Break",
            SessionType::LongBreak => "Long Break",
        }
    }
}

/// Session lengths in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDurations {
    pub focus_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
}

impl SessionDurations {
    pub fn for_session(&self, session_type: SessionType) -> u64 {
        match session_type {
            SessionType::Focus => self.focus_secs,
            SessionType::ShortBreak => self.short_break_secs,
            SessionType::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for SessionDurations {
    fn default() -> Self {
        Self {
            focus_secs: 25 * 60,
            short_break_secs: 10 * 60,
            long_break_secs: 15 * 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Core session timer.
///
/// Operates on wall-clock deltas between ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    durations: SessionDurations,
    session_type: SessionType,
    state: TimerState,
    /// Remaining time in milliseconds for the current session.
    remaining_ms: u64,
    /// Timestamp (ms since epoch) when the timer was last resumed or
    /// started. Used to compute elapsed time between ticks.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl SessionTimer {
    /// Create an idle focus timer with the given durations.
    pub fn new(durations: SessionDurations) -> Self {
        Self {
            durations,
            session_type: SessionType::Focus,
            state: TimerState::Idle,
            remaining_ms: durations.focus_secs.saturating_mul(1000),
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_ms / 1000
    }

    pub fn total_ms(&self) -> u64 {
        self.durations
            .for_session(self.session_type)
            .saturating_mul(1000)
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms as f64 / total as f64)
    }

    /// Remaining time as `MM:SS` for display.
    pub fn format_remaining(&self) -> String {
        let secs = self.remaining_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Completed => {
                if self.state == TimerState::Completed {
                    // Restart the same session type from the top.
                    self.remaining_ms = self.total_ms();
                }
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now_ms());
                Some(Event::SessionStarted {
                    session_type: self.session_type,
                    duration_secs: self.remaining_ms / 1000,
                    at: Utc::now(),
                })
            }
            TimerState::Paused => self.resume(),
            TimerState::Running => None, // Already running.
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        // Flush elapsed time first.
        self.flush_elapsed();
        self.state = TimerState::Paused;
        self.last_tick_epoch_ms = None;
        Some(Event::SessionPaused {
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        self.last_tick_epoch_ms = Some(now_ms());
        Some(Event::SessionResumed {
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Stop and reload the current session's full duration.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.remaining_ms = self.total_ms();
        self.last_tick_epoch_ms = None;
        Event::SessionReset {
            session_type: self.session_type,
            at: Utc::now(),
        }
    }

    /// Switch to another session type. Stops the timer; no completion is
    /// credited for the abandoned session.
    pub fn switch(&mut self, session_type: SessionType) -> Event {
        self.session_type = session_type;
        self.reset()
    }

    /// Replace the configured session lengths. The running countdown is
    /// untouched; the new lengths apply from the next `reset` or
    /// `switch`.
    pub fn set_durations(&mut self, durations: SessionDurations) {
        self.durations = durations;
    }

    /// Add minutes to the current session. Only honored while the timer
    /// is not running, as in the original build.
    pub fn add_minutes(&mut self, minutes: u64) -> bool {
        if self.state == TimerState::Running {
            return false;
        }
        self.remaining_ms = self
            .remaining_ms
            .saturating_add(minutes.saturating_mul(60_000));
        if self.state == TimerState::Completed {
            self.state = TimerState::Paused;
        }
        true
    }

    /// Call periodically. Returns `Some(SessionCompleted)` exactly once
    /// when the running session reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed();
        if self.remaining_ms == 0 {
            self.state = TimerState::Completed;
            self.last_tick_epoch_ms = None;
            return Some(Event::SessionCompleted {
                session_type: self.session_type,
                at: Utc::now(),
            });
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self) {
        if let Some(last) = self.last_tick_epoch_ms {
            let now = now_ms();
            let elapsed = now.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_epoch_ms = Some(now);
        }
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(SessionDurations::default())
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
