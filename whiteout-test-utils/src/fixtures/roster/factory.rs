use chrono::{NaiveDateTime, Utc};

/// Default guild every fixture alliance belongs to.
pub const DEFAULT_GUILD_ID: i64 = 1000;
/// Default state (kingdom) assigned to fixture members.
pub const DEFAULT_KID: i32 = 101;
/// Default furnace level assigned to fixture members.
pub const DEFAULT_FURNACE_LEVEL: i32 = 30;

/// Create an alliance model with default test values.
///
/// # Arguments
/// - `alliance_id` - The alliance ID to use
///
/// # Returns
/// - `entity::alliance::Model` - Alliance named `Alliance {alliance_id}`
pub fn mock_alliance(alliance_id: i32) -> entity::alliance::Model {
    entity::alliance::Model {
        alliance_id,
        name: format!("Alliance {}", alliance_id),
        guild_id: DEFAULT_GUILD_ID,
        created_at: now(),
    }
}

/// Create a roster member model with default test values.
///
/// # Arguments
/// - `fid` - Player ID of the member
/// - `alliance_id` - Alliance the member belongs to
///
/// # Returns
/// - `entity::member::Model` - Member named `Player {fid}` at furnace level 30 in state 101
pub fn mock_member(fid: i64, alliance_id: i32) -> entity::member::Model {
    entity::member::Model {
        fid,
        nickname: format!("Player {}", fid),
        furnace_level: DEFAULT_FURNACE_LEVEL,
        stove_level_content: None,
        kid: DEFAULT_KID,
        alliance_id,
    }
}

pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
