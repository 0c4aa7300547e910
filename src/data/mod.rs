//! Data access layer repositories.
//!
//! Repositories are generic over `ConnectionTrait` so the same queries run against a plain
//! connection or inside a transaction opened by the reconciliation engine.

pub mod alliance;
pub mod change_log;
pub mod invalid_id;
pub mod member;
