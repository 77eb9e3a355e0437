use clap::Subcommand;
use dayloop_core::storage::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Update session durations (minutes)
    Set {
        #[arg(long)]
        focus: Option<u64>,
        #[arg(long)]
        short_break: Option<u64>,
        #[arg(long)]
        long_break: Option<u64>,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigAction::Set {
            focus,
            short_break,
            long_break,
        } => {
            let mut config = Config::load()?;
            if let Some(minutes) = focus {
                config.session.focus_min = minutes;
            }
            if let Some(minutes) = short_break {
                config.session.short_break_min = minutes;
            }
            if let Some(minutes) = long_break {
                config.session.long_break_min = minutes;
            }
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
