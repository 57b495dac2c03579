pub mod challenge;
pub mod log;
pub mod migrate;
pub mod milestones;
pub mod reset;

use std::sync::Arc;

use everwell_core::{
    HttpSyncClient, JsonFileStore, ProgressEngine, SyncDispatcher, TaskCatalog,
};
use url::Url;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Build the engine over the on-disk store, with the cloud mirror wired
/// up when EVERWELL_SYNC_URL is set.
pub async fn engine() -> Result<ProgressEngine<JsonFileStore>, Box<dyn std::error::Error>> {
    let store = JsonFileStore::open()?;
    let sync = match std::env::var("EVERWELL_SYNC_URL") {
        Ok(raw) => {
            let base = Url::parse(&raw)?;
            SyncDispatcher::new(Arc::new(HttpSyncClient::new(base)))
        }
        Err(_) => SyncDispatcher::disabled(),
    };
    let (engine, _) = ProgressEngine::initialize(store, TaskCatalog::builtin(), sync).await?;
    Ok(engine)
}
