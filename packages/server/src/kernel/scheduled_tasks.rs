//! Periodic background tasks.
//!
//! - Session sweep: drops expired sessions so the table does not grow
//!   without bound. Expired sessions are already rejected at validation
//!   time; the sweep only reclaims memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domains::auth::SessionAuthenticator;

/// How often expired sessions are swept
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Spawn the session sweeper. Runs until the runtime shuts down.
pub fn start_session_sweeper(
    authenticator: Arc<SessionAuthenticator>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick fires immediately; nothing can have expired yet
        interval.tick().await;

        loop {
            interval.tick().await;
            let removed = authenticator.sweep_expired().await;
            tracing::debug!(removed, "Session sweep complete");
        }
    })
}
