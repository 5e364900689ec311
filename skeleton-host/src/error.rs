// SkeletonView Host - Error Types
//
// Errors surfaced by the frame scheduler and the render tree. The effects
// themselves never fail; only the plumbing that drives them can.

use thiserror::Error;

use crate::render_tree::NodeId;

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// `start` called while a frame loop is already running
    #[error("Frame scheduler is already running")]
    AlreadyRunning,

    /// Command sent while no frame loop is running
    #[error("Frame scheduler is not running")]
    NotRunning,

    /// Channel closed unexpectedly
    #[error("Internal channel closed unexpectedly")]
    ChannelClosed,

    /// No view is mounted under this id
    #[error("No view mounted with id {0}")]
    UnknownNode(NodeId),

    /// The frame loop task panicked or was aborted
    #[error("Frame loop task failed: {0}")]
    TaskFailed(String),
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for SchedulerError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Self::ChannelClosed
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for SchedulerError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        Self::ChannelClosed
    }
}

impl From<tokio::task::JoinError> for SchedulerError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed(err.to_string())
    }
}

/// Result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchedulerError::UnknownNode(NodeId(7));
        assert!(err.to_string().contains("7"));

        assert!(SchedulerError::AlreadyRunning
            .to_string()
            .contains("already running"));
    }

    #[tokio::test]
    async fn test_send_error_conversion() {
        let (tx, rx) = tokio::sync::mpsc::channel::<u8>(1);
        drop(rx);
        let err: SchedulerError = tx.send(1).await.unwrap_err().into();
        assert!(matches!(err, SchedulerError::ChannelClosed));
    }
}
