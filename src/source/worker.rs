//! Background fetch: one worker thread, one outcome, one channel slot.
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError, bounded};
use tracing::{debug, info, warn};

use super::UserSource;
use crate::model::User;

/// Result of the initial fetch as seen by the UI thread.
pub type FetchOutcome = std::result::Result<Vec<User>, String>;

pub struct FetchHandle {
    rx: Receiver<FetchOutcome>,
}

/// Start fetching on a worker thread. Dropping the handle abandons the
/// fetch; the worker's late result is then discarded.
pub fn spawn_fetch(source: Box<dyn UserSource>) -> FetchHandle {
    let (tx, rx) = bounded(1);
    let origin = source.describe();
    info!(source = %origin, "starting initial fetch");
    thread::spawn(move || {
        let outcome = match source.fetch() {
            Ok(users) => {
                info!(count = users.len(), "fetch succeeded");
                Ok(users)
            }
            Err(e) => {
                warn!(error = %e, "fetch failed");
                Err(format!("Failed to fetch data: {e}"))
            }
        };
        if tx.send(outcome).is_err() {
            debug!(source = %origin, "fetch result dropped; receiver gone");
        }
    });
    FetchHandle { rx }
}

impl FetchHandle {
    /// Non-blocking poll, called once per UI tick.
    pub fn try_take(&self) -> Option<FetchOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err("Failed to fetch data: worker exited".to_string()))
            }
        }
    }

    /// Block up to `timeout` for the outcome.
    pub fn wait(&self, timeout: Duration) -> Option<FetchOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                Some(Err("Failed to fetch data: worker exited".to_string()))
            }
        }
    }
}
