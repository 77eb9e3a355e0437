use clap::Subcommand;
use dayloop_core::{streak_message, FeatureKey};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Current streak for one feature
    Show { key: String },
    /// All streaks with display metadata
    All,
    /// Trailing 7-day activity history
    History { key: String },
    /// Reset a streak back to zero
    Reset { key: String },
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut tracker, _store) = super::open_tracker()?;

    match action {
        StreakAction::Show { key } => {
            let key: FeatureKey = key.parse()?;
            let record = tracker.get(key);
            println!("{}", serde_json::to_string_pretty(&record)?);
            println!("{}", streak_message(record.current));
        }
        StreakAction::All => {
            let summaries = tracker.all();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        StreakAction::History { key } => {
            let key: FeatureKey = key.parse()?;
            let history = tracker.history(key);
            let row: String = history
                .iter()
                .map(|&active| if active { '●' } else { '○' })
                .collect();
            println!("{} {row}  (oldest to newest)", key.icon());
        }
        StreakAction::Reset { key } => {
            let key: FeatureKey = key.parse()?;
            tracker.reset(key);
            println!("{} streak reset.", key.label());
        }
    }
    Ok(())
}
