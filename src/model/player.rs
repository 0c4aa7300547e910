use serde::{Deserialize, Serialize};

/// Live player state returned by the upstream player API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub fid: i64,
    pub nickname: String,
    pub furnace_level: i32,
    /// Opaque secondary attribute (icon reference for the furnace level).
    pub stove_level_content: Option<String>,
    /// Home state the player currently belongs to.
    pub kid: i32,
}

/// Outcome of a single player lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Success(PlayerData),
    /// Upstream rate limit hit; retry after `RequestQueue::get_wait_time`.
    RateLimited,
    /// Upstream confirmed that the player does not exist.
    NotFound,
    /// Any other failure, transport or API. See `FetchFailureKind::classify`.
    Error(String),
}
