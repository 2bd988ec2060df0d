//! Admission guard: per-channel mutual exclusion for game creation.
//!
//! The start command's lookup-then-insert has a race window: two concurrent
//! starts in one channel could both observe "no game" before either insert
//! lands. The guard closes that window within a single process. It is not a
//! distributed lock; multiple server instances can still race each other,
//! an accepted limitation under the single-instance deployment assumption.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument, warn};

type ChannelKey = (String, String);

/// Keyed in-process critical section around check-then-create.
///
/// Owned by the service instance and injected into the command engine.
/// [`acquire`](AdmissionGuard::acquire) marks a (team, channel) pair the
/// moment the no-existing-game check has passed; the marker clears when the
/// returned permit drops, after the insert attempt completes either way.
#[derive(Debug, Clone, Default)]
pub struct AdmissionGuard {
    held: Arc<Mutex<HashSet<ChannelKey>>>,
}

/// Permit holding a channel's creation marker; releases on drop.
#[derive(Debug)]
pub struct AdmissionPermit {
    key: ChannelKey,
    held: Arc<Mutex<HashSet<ChannelKey>>>,
}

impl AdmissionGuard {
    /// Creates a guard with no channels marked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the channel for creation, or returns `None` when another start
    /// already holds the marker.
    #[instrument(skip(self))]
    pub fn acquire(&self, team_id: &str, channel_id: &str) -> Option<AdmissionPermit> {
        let key = (team_id.to_string(), channel_id.to_string());
        let mut held = self.held.lock().unwrap();
        if !held.insert(key.clone()) {
            warn!(team_id, channel_id, "Creation already in progress");
            return None;
        }
        debug!(team_id, channel_id, "Channel marked for creation");
        Some(AdmissionPermit {
            key,
            held: Arc::clone(&self.held),
        })
    }
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        let mut held = self.held.lock().unwrap();
        held.remove(&self.key);
        debug!(team_id = %self.key.0, channel_id = %self.key.1, "Channel marker cleared");
    }
}
