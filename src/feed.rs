use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crate::catalog;
use crate::state::Delta;

#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub source: String,
    pub id_category: String,
    pub timeout: Option<Duration>,
}

/// One-shot catalog load off the UI thread. No retry: a failure is reported once.
pub fn spawn_catalog_loader(tx: Sender<Delta>, request: LoadRequest) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Loading player data from {}",
            request.source
        )));
        let delta = match catalog::load_catalog(
            &request.source,
            &request.id_category,
            request.timeout,
        ) {
            Ok(players) => Delta::CatalogLoaded(players),
            Err(err) => Delta::CatalogFailed(format!("Failed to load player data: {err:#}")),
        };
        let _ = tx.send(delta);
    })
}
