//! Steam id to avatar URL cache.
//!
//! Populated asynchronously when a player connects, evicted when they leave
//! and cleared at map end. Reads never block on network I/O.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Proof that a populate was started for a Steam id.
///
/// Only the most recently issued ticket for an id may write its result;
/// eviction and reset invalidate every outstanding ticket for the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulateTicket {
    steam_id: u64,
    serial: u64,
}

impl PopulateTicket {
    /// Steam id this ticket was issued for.
    pub fn steam_id(&self) -> u64 {
        self.steam_id
    }
}

#[derive(Debug, Default)]
struct CacheState {
    avatars: HashMap<u64, String>,
    /// Newest outstanding ticket serial per Steam id.
    pending: HashMap<u64, u64>,
    next_serial: u64,
}

/// Thread-safe avatar cache.
///
/// Every operation applies under a single lock, so a lookup sees either
/// the state before or after a write, never a partial one.
#[derive(Debug, Default)]
pub struct ProfileCache {
    state: RwLock<CacheState>,
}

impl ProfileCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached avatar URL for `steam_id`, if any.
    pub fn lookup(&self, steam_id: u64) -> Option<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.avatars.get(&steam_id).cloned()
    }

    /// Start a populate for `steam_id`, superseding any earlier one in flight.
    pub fn begin_populate(&self, steam_id: u64) -> PopulateTicket {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.next_serial += 1;
        let serial = state.next_serial;
        state.pending.insert(steam_id, serial);
        PopulateTicket { steam_id, serial }
    }

    /// Finish a populate.
    ///
    /// With `Some(url)` and a current ticket the entry is inserted, replacing
    /// any earlier avatar for the id. A stale ticket (superseded, evicted or
    /// reset) writes nothing. `None` records a failed lookup and only retires
    /// the ticket. Returns whether an entry was written.
    pub fn complete_populate(&self, ticket: PopulateTicket, avatar_url: Option<String>) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if state.pending.get(&ticket.steam_id) != Some(&ticket.serial) {
            return false;
        }
        state.pending.remove(&ticket.steam_id);

        match avatar_url {
            Some(url) => {
                state.avatars.insert(ticket.steam_id, url);
                true
            }
            None => false,
        }
    }

    /// Remove the entry for `steam_id` and cancel any populate in flight.
    ///
    /// Returns whether an entry was removed. Unknown ids are a no-op.
    pub fn evict(&self, steam_id: u64) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.pending.remove(&steam_id);
        state.avatars.remove(&steam_id).is_some()
    }

    /// Remove every entry and cancel every populate in flight.
    pub fn reset(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.avatars.clear();
        state.pending.clear();
    }

    /// Number of cached avatars.
    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.avatars.len()
    }

    /// Whether no avatars are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a populate is in flight for `steam_id`.
    pub fn is_pending(&self, steam_id: u64) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.pending.contains_key(&steam_id)
    }
}
