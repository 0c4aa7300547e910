//! SeaORM entity models for the alliance control tables.

pub mod prelude;

pub mod alliance;
pub mod alliance_setting;
pub mod furnace_change;
pub mod invalid_id;
pub mod member;
pub mod nickname_change;
