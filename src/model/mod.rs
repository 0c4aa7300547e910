//! Domain models shared between the reconciliation engine, the request queue and the
//! scheduler.

pub mod job;
pub mod player;
pub mod settings;
pub mod summary;
