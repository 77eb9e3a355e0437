mod config;
mod store;

pub use config::{Config, SessionConfig};
pub use store::{load_snapshot, save_snapshot, JsonStore, MemoryStore, SnapshotStore};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/dayloop[-dev]/` based on DAYLOOP_ENV.
///
/// Set DAYLOOP_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAYLOOP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dayloop-dev")
    } else {
        base_dir.join("dayloop")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StoreError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
