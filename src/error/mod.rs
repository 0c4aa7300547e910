//! Error types for alliance control.
//!
//! Domain-specific error types are aggregated into the crate-wide `Error` so that the `?`
//! operator works across repository, queue and scheduler boundaries. Failures of a single
//! member lookup are not errors at all; they are classified with `FetchFailureKind` and
//! folded into the reconciliation summary.

pub mod config;
pub mod control;
pub mod fetch;

use thiserror::Error;

pub use self::{config::ConfigError, control::ControlError, fetch::FetchFailureKind};

/// Main error type for alliance control.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Control errors (unknown alliance, unavailable channel, stopped queue)
/// - External library errors (database, cron scheduler)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Alliance control error (lookup, queue or delivery failure).
    #[error(transparent)]
    ControlError(#[from] ControlError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}
