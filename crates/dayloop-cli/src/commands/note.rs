use clap::Subcommand;
use dayloop_core::Notes;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum NoteAction {
    /// Create a note
    Add {
        title: String,
        #[arg(default_value = "")]
        content: String,
    },
    /// Replace a note's title and content
    Edit {
        id: Uuid,
        title: String,
        #[arg(default_value = "")]
        content: String,
    },
    /// List notes, newest first
    List {
        /// Case-insensitive title/content filter
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a note
    Delete { id: Uuid },
}

pub fn run(action: NoteAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut tracker, store) = super::open_tracker()?;
    let mut notes = Notes::load(Box::new(store));

    match action {
        NoteAction::Add { title, content } => {
            let note = notes.add(&mut tracker, &title, &content);
            println!("Note created: {}", note.id);
        }
        NoteAction::Edit { id, title, content } => {
            if notes.edit(&mut tracker, id, &title, &content) {
                println!("Note updated: {id}");
            } else {
                return Err(format!("no note with id {id}").into());
            }
        }
        NoteAction::List { search } => {
            let matches = notes.search(search.as_deref().unwrap_or(""));
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
        NoteAction::Delete { id } => {
            if notes.delete(id) {
                println!("Note deleted: {id}");
            } else {
                return Err(format!("no note with id {id}").into());
            }
        }
    }
    Ok(())
}
