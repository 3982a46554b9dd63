// webhook-relay-core/src/publisher.rs
use async_trait::async_trait;

use crate::{QueueMessage, RelayError};

/// Sends a single message to the broker under `routing_key`.
///
/// Implementations are shared across request tasks, so `publish` takes `&self`
/// and must tolerate concurrent callers.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, routing_key: &str, message: &QueueMessage) -> Result<(), RelayError>;
}
