//! Order submission port.

use async_trait::async_trait;
use maison_commerce::checkout::{Order, OrderConfirmation};
use std::time::Duration;

/// How long a submission may run before it is treated as failed.
///
/// Enforced by the checkout so an unresponsive backend cannot wedge the
/// payment step.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Submission failures. The cart is always preserved for a manual retry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmissionError {
    /// The backend received the order and refused it.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The order could not be delivered to the backend.
    #[error("submission transport failed: {0}")]
    Transport(String),

    /// The backend did not answer within the configured timeout.
    #[error("submission timed out after {0:?}")]
    TimedOut(Duration),
}

/// Accepts a finalized order.
///
/// Invoked at most once per `place_order` call; there is no automatic retry.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submit the order, returning a confirmation on acceptance.
    async fn submit(&self, order: &Order) -> Result<OrderConfirmation, SubmissionError>;
}
