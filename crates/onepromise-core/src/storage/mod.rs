mod config;
pub mod database;
pub mod history;
pub mod kv;
pub mod today;

pub use config::Config;
pub use database::Database;
pub use history::{HistoryEntry, HistoryLedger, WeekSummary};
pub use kv::{KvStore, MemoryKv};
pub use today::{PromiseRecord, ReflectionRecord, TodaySlot};

use std::path::PathBuf;

/// Returns `~/.config/onepromise[-dev]/` based on ONEPROMISE_ENV.
///
/// Set ONEPROMISE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ONEPROMISE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("onepromise-dev")
    } else {
        base_dir.join("onepromise")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
