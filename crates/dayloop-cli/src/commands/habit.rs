use clap::{Subcommand, ValueEnum};
use dayloop_core::{Habits, MarkOutcome};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a habit with a target day count
    Add {
        name: String,
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Mark a habit done for today
    Done { id: Uuid },
    /// List active and completed habits
    List,
    /// Remove an active habit
    Remove { id: Uuid },
    /// Clear parts of the board
    Clear { target: ClearTarget },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ClearTarget {
    Completed,
    Active,
    All,
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut tracker, store) = super::open_tracker()?;
    let mut habits = Habits::load(Box::new(store));

    match action {
        HabitAction::Add { name, days } => {
            let habit = habits.add(&name, days);
            println!("Habit created: {} ({} days)", habit.id, habit.total_days);
        }
        HabitAction::Done { id } => match habits.mark_done(&mut tracker, id) {
            MarkOutcome::Progressed { remaining } => {
                println!("Done for today. {remaining} days to go.");
            }
            MarkOutcome::Finished => println!("Habit finished! 🎉"),
            MarkOutcome::AlreadyDoneToday => println!("Already done today."),
            MarkOutcome::NotFound => return Err(format!("no habit with id {id}").into()),
        },
        HabitAction::List => {
            println!("Active:");
            println!("{}", serde_json::to_string_pretty(habits.active())?);
            println!("Completed:");
            println!("{}", serde_json::to_string_pretty(habits.completed())?);
        }
        HabitAction::Remove { id } => {
            if habits.remove(id) {
                println!("Habit removed: {id}");
            } else {
                return Err(format!("no habit with id {id}").into());
            }
        }
        HabitAction::Clear { target } => {
            match target {
                ClearTarget::Completed => habits.clear_completed(),
                ClearTarget::Active => habits.clear_active(),
                ClearTarget::All => habits.clear_all(),
            }
            println!("Cleared.");
        }
    }
    Ok(())
}
