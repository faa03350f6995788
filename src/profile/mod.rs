//! Player profile avatars.
//!
//! This module provides:
//! - An avatar cache keyed by Steam id
//! - A Steam Web API client used to populate it

mod cache;
mod steam;

pub use cache::{PopulateTicket, ProfileCache};
pub use steam::{parse_player_summaries, SteamProfileClient};
