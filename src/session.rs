//! Player session tracking.
//!
//! Keeps the profile cache in step with connects, disconnects and map changes.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::profile::{ProfileCache, SteamProfileClient};

/// Applies player session events to the profile cache.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    cache: Arc<ProfileCache>,
    profiles: Option<Arc<SteamProfileClient>>,
}

impl SessionTracker {
    /// Create a tracker.
    ///
    /// Without a profile client, connects do not trigger avatar lookups.
    pub fn new(cache: Arc<ProfileCache>, profiles: Option<Arc<SteamProfileClient>>) -> Self {
        Self { cache, profiles }
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<ProfileCache> {
        &self.cache
    }

    /// A player finished connecting: look up their avatar in the background.
    ///
    /// Returns immediately. The returned task resolves to whether a cache
    /// entry was written; `None` when lookups are disabled.
    pub fn on_connect(&self, steam_id: u64) -> Option<JoinHandle<bool>> {
        let profiles = Arc::clone(self.profiles.as_ref()?);
        let cache = Arc::clone(&self.cache);
        let ticket = cache.begin_populate(steam_id);

        Some(tokio::spawn(async move {
            let avatar = match profiles.fetch_avatar(steam_id).await {
                Ok(Some(url)) => Some(url),
                Ok(None) => {
                    debug!(steam_id, "No avatar returned for player");
                    None
                }
                Err(e) => {
                    warn!(steam_id, error = %e, "Avatar lookup failed");
                    None
                }
            };

            let written = cache.complete_populate(ticket, avatar);
            if written {
                debug!(steam_id, "Cached player avatar");
            }
            written
        }))
    }

    /// A player disconnected: drop their cached avatar.
    pub fn on_disconnect(&self, steam_id: u64) {
        if self.cache.evict(steam_id) {
            debug!(steam_id, "Evicted player avatar");
        }
    }

    /// The map or session ended: clear every cached avatar.
    pub fn on_map_end(&self) {
        let count = self.cache.len();
        self.cache.reset();
        info!(cleared = count, "Profile cache reset at map end");
    }
}
