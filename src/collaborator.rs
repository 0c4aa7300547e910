//! Interfaces to the collaborators alliance control depends on.
//!
//! The upstream player API transport, the chat platform the reports are rendered to and the
//! direct-message channel used for transfer notifications all live outside this crate.
//! They are injected at construction time as trait objects.

use async_trait::async_trait;

use crate::{
    error::Error,
    model::{
        player::FetchResult,
        summary::{CheckProgress, ReconciliationSummary},
    },
};

/// Remote source of live player data.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    async fn fetch_player(&self, fid: i64) -> FetchResult;
}

/// Direct notification channel to a single user.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver `message` to `user_id`.
    ///
    /// Delivery failures are reported as `ControlError::Notification`.
    async fn notify(&self, user_id: i64, message: &str) -> Result<(), Error>;
}

/// Presentation layer receiving progress and results of control passes.
#[async_trait]
pub trait ControlReporter: Send + Sync {
    /// Whether the channel still resolves to something the reporter can post to.
    async fn channel_exists(&self, channel_id: i64) -> bool;

    async fn progress(&self, channel_id: i64, progress: &CheckProgress);

    async fn report(&self, channel_id: i64, summary: &ReconciliationSummary) -> Result<(), Error>;
}
