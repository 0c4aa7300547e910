use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("Alliance {0} does not exist")]
    AllianceNotFound(i32),
    /// The report channel configured for an alliance cannot be resolved.
    #[error("Report channel {0} is unavailable")]
    ChannelUnavailable(i64),
    /// The request queue was stopped before the job ran.
    #[error("Request queue is stopped")]
    QueueStopped,
    /// The worker dropped the job without answering it.
    #[error("Control job was dropped before completion")]
    JobDropped,
    #[error("Failed to deliver notification: {0}")]
    Notification(String),
}
