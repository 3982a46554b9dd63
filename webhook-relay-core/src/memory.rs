// webhook-relay-core/src/memory.rs
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::{Publisher, QueueMessage, RelayError};

/// A message captured by [`RecordingPublisher`].
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMessage {
    pub routing_key: String,
    pub message: QueueMessage,
}

/// In-process stand-in for a broker connection.
///
/// Keeps every message it is handed, or refuses all of them when built with
/// [`RecordingPublisher::rejecting`].
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<PublishedMessage>>,
    reject_with: Option<String>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            published: Mutex::default(),
            reject_with: Some(reason.into()),
        }
    }

    pub fn published(&self) -> Vec<PublishedMessage> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PublishedMessage>> {
        self.published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, routing_key: &str, message: &QueueMessage) -> Result<(), RelayError> {
        if let Some(reason) = &self.reject_with {
            return Err(RelayError::Publish(reason.clone()));
        }

        self.lock().push(PublishedMessage {
            routing_key: routing_key.to_string(),
            message: message.clone(),
        });
        Ok(())
    }
}
