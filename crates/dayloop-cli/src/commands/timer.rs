use clap::{Subcommand, ValueEnum};
use dayloop_core::storage::{load_snapshot, save_snapshot, Config};
use dayloop_core::{streak_message, Event, FeatureKey, SessionTimer, SessionType, TimerState};

/// Stored key for the timer snapshot, so a session survives between CLI
/// invocations.
const TIMER_KEY: &str = "pomodoroSession";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or restart) the current session
    Start,
    /// Show the current session state
    Status,
    /// Pause the running session
    Pause,
    /// Resume a paused session
    Resume,
    /// Stop and reload the session's full duration
    Reset,
    /// Switch session type (stops the timer)
    Switch { session: SessionArg },
    /// Add minutes while the timer is not running
    Add { minutes: u64 },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SessionArg {
    Focus,
    Short,
    Long,
}

impl From<SessionArg> for SessionType {
    fn from(arg: SessionArg) -> Self {
        match arg {
            SessionArg::Focus => SessionType::Focus,
            SessionArg::Short => SessionType::ShortBreak,
            SessionArg::Long => SessionType::LongBreak,
        }
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut tracker, store) = super::open_tracker()?;
    let config = Config::load()?;
    let mut timer: SessionTimer = load_snapshot(&store, TIMER_KEY)
        .unwrap_or_else(|| SessionTimer::new(config.session.durations()));

    // Catch up on wall-clock time before applying the command. A focus
    // session that ran out on its own counts toward the pomodoro streak.
    if let Some(Event::SessionCompleted { session_type, .. }) = timer.tick() {
        if session_type == SessionType::Focus {
            let record = tracker.register_activity(FeatureKey::Pomodoro);
            println!("Focus session complete! {}", streak_message(record.current));
        } else {
            println!("{} complete.", session_type.label());
        }
    }

    match action {
        TimerAction::Start => {
            timer.start();
        }
        TimerAction::Status => {}
        TimerAction::Pause => {
            if timer.pause().is_none() {
                println!("Nothing to pause.");
            }
        }
        TimerAction::Resume => {
            if timer.resume().is_none() {
                println!("Nothing to resume.");
            }
        }
        TimerAction::Reset => {
            // Reset reloads from the current config, so duration changes
            // made after the snapshot was written take effect here.
            timer.set_durations(config.session.durations());
            timer.reset();
        }
        TimerAction::Switch { session } => {
            timer.set_durations(config.session.durations());
            timer.switch(session.into());
        }
        TimerAction::Add { minutes } => {
            if !timer.add_minutes(minutes) {
                println!("Pause the timer before adding time.");
            }
        }
    }

    save_snapshot(&store, TIMER_KEY, &timer)?;

    let state = match timer.state() {
        TimerState::Idle => "idle",
        TimerState::Running => "running",
        TimerState::Paused => "paused",
        TimerState::Completed => "completed",
    };
    println!(
        "{} {} [{}]",
        timer.session_type().label(),
        timer.format_remaining(),
        state
    );
    Ok(())
}
