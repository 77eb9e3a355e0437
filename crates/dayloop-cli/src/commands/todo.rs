use chrono::NaiveDate;
use clap::Subcommand;
use dayloop_core::Todos;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum TodoAction {
    /// Create an open todo
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Replace title, description and due date
    Edit {
        id: Uuid,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// List todos, optionally bucketed by due date
    List {
        #[arg(long)]
        by_category: bool,
    },
    /// Mark a todo complete
    Done { id: Uuid },
    /// Mark a todo open again
    Undone { id: Uuid },
    /// Delete a todo
    Delete { id: Uuid },
}

pub fn run(action: TodoAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut tracker, store) = super::open_tracker()?;
    let mut todos = Todos::load(Box::new(store));

    match action {
        TodoAction::Add {
            title,
            description,
            due,
        } => {
            let todo = todos.add(&title, &description, due);
            println!("Todo created: {}", todo.id);
        }
        TodoAction::Edit {
            id,
            title,
            description,
            due,
        } => {
            if todos.edit(id, &title, &description, due) {
                println!("Todo updated: {id}");
            } else {
                return Err(format!("no todo with id {id}").into());
            }
        }
        TodoAction::List { by_category } => {
            if by_category {
                let buckets = todos.categorize(tracker.today());
                println!("{}", serde_json::to_string_pretty(&buckets)?);
            } else {
                println!("{}", serde_json::to_string_pretty(todos.all())?);
            }
        }
        TodoAction::Done { id } => {
            if todos.set_completed(&mut tracker, id, true) {
                println!("Todo completed: {id}");
            } else {
                return Err(format!("no todo with id {id}").into());
            }
        }
        TodoAction::Undone { id } => {
            if todos.set_completed(&mut tracker, id, false) {
                println!("Todo reopened: {id}");
            } else {
                return Err(format!("no todo with id {id}").into());
            }
        }
        TodoAction::Delete { id } => {
            if todos.delete(id) {
                println!("Todo deleted: {id}");
            } else {
                return Err(format!("no todo with id {id}").into());
            }
        }
    }
    Ok(())
}
