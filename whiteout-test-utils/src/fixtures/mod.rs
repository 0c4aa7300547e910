//! Test fixture modules for database record creation.
//!
//! - `roster` - Alliances, control settings, members and strike records

pub mod roster;
