//! Background purge of abandoned sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::SessionStore;

/// Spawn a task that calls [`SessionStore::purge_expired`] every `every`.
///
/// Complements the per-request purge; it only bounds memory held by sessions
/// nobody touches anymore. The task runs until aborted.
pub fn spawn_sweeper(store: Arc<SessionStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            store.purge_expired();
        }
    })
}
