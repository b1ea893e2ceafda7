pub mod auth;
pub mod config;
pub mod history;
pub mod notify;
pub mod suggest;
pub mod today;

use onepromise_core::storage::{self, Config, Database};

/// Loaded configuration plus the opened database.
pub struct Context {
    pub config: Config,
    pub db: Database,
}

/// Open the store the way every data command does: config first, then
/// the database file it points at.
pub fn open() -> Result<Context, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let dir = storage::data_dir()?;
    let db = Database::open_at(&dir.join(&config.storage.database_file))?;
    Ok(Context { config, db })
}
