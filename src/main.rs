//! Prints the current cycle forecast for a user as JSON.
//!
//! Usage: `wellcycle <user-id> [data-dir]`
//!
//! Uses PostgreSQL when `WELLCYCLE__DATABASE__URL` is set, otherwise a YAML
//! log under `data-dir`, otherwise an empty in-memory log.

use std::path::PathBuf;
use std::sync::Arc;

use wellcycle::adapters::{
    FileCycleLogStore, InMemoryCycleLogStore, PostgresCycleLogStore, SessionAuthContext,
    SystemClock,
};
use wellcycle::application::CycleTrackerController;
use wellcycle::config::AppConfig;
use wellcycle::domain::foundation::UserId;
use wellcycle::ports::CycleLogStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_validated()?;
    config.logging.init_tracing()?;

    let mut args = std::env::args().skip(1);
    let user_id = UserId::new(args.next().unwrap_or_default())
        .map_err(|e| format!("usage: wellcycle <user-id> [data-dir] ({e})"))?;
    let data_dir = args.next().map(PathBuf::from);

    let store: Arc<dyn CycleLogStore> = if config.database.is_configured() {
        tracing::info!("using PostgreSQL cycle log");
        Arc::new(PostgresCycleLogStore::connect(&config.database).await?)
    } else if let Some(dir) = data_dir {
        tracing::info!(dir = %dir.display(), "using file cycle log");
        Arc::new(FileCycleLogStore::new(dir))
    } else {
        tracing::info!("using in-memory cycle log");
        Arc::new(InMemoryCycleLogStore::new())
    };

    let auth = Arc::new(SessionAuthContext::signed_in(user_id));
    let mut controller = CycleTrackerController::new(store, auth, Arc::new(SystemClock))
        .with_cycle_length(config.tracker.cycle_length_days);

    let forecast = controller.load().await?;
    println!("{}", serde_json::to_string_pretty(forecast)?);
    Ok(())
}
