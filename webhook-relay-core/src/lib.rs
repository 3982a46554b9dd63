pub mod error;
pub mod memory;
pub mod publisher;
pub mod types;

pub use error::RelayError;
pub use memory::{PublishedMessage, RecordingPublisher};
pub use publisher::Publisher;
pub use types::{
    CallbackPayload, DeliveryMode, QueueMessage, DEFAULT_ROUTING_KEY, JSON_CONTENT_TYPE,
};
