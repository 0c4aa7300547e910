//! Alliance control for Whiteout Survival rosters.
//!
//! Periodically re-fetches every tracked member of an alliance from the upstream player API,
//! reconciles the stored roster against the live data and guards against bulk removals caused
//! by upstream outages. All upstream lookups pass through a single rate-aware request queue.

pub mod collaborator;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
pub mod worker;

pub use error::Error;
