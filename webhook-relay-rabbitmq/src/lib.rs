mod amqp_publisher;
mod options;

pub use amqp_publisher::{message_properties, AmqpPublisher};
pub use options::AmqpOptions;
