use async_trait::async_trait;
use lapin::{
    options::{BasicPublishOptions, ConfirmSelectOptions},
    BasicProperties, Channel, Connection, ConnectionProperties,
};
use tracing::{debug, info};

use crate::options::AmqpOptions;
use webhook_relay_core::{Publisher, QueueMessage, RelayError};

/// Publishes on the default exchange over one connection and one channel.
///
/// Both are opened in [`AmqpPublisher::connect`] and never replaced; a broken
/// connection surfaces as publish errors until the process is restarted.
pub struct AmqpPublisher {
    opts: AmqpOptions,
    conn: Connection,
    channel: Channel,
}

impl AmqpPublisher {
    pub async fn connect(opts: AmqpOptions) -> Result<Self, RelayError> {
        let conn = Connection::connect(&opts.uri(), ConnectionProperties::default())
            .await
            .map_err(|e| RelayError::Connection(e.to_string()))?;

        let channel = conn
            .create_channel()
            .await
            .map_err(|e| RelayError::Connection(e.to_string()))?;

        if opts.confirms {
            channel
                .confirm_select(ConfirmSelectOptions { nowait: false })
                .await
                .map_err(|e| RelayError::Connection(e.to_string()))?;
        }

        info!(
            "RabbitMQ connected. uri={} confirms={}",
            opts.redacted_uri(),
            opts.confirms
        );

        Ok(Self {
            opts,
            conn,
            channel,
        })
    }

    pub fn options(&self) -> &AmqpOptions {
        &self.opts
    }

    /// Closes the channel, then the connection.
    pub async fn close(&self) -> Result<(), RelayError> {
        self.channel
            .close(200, "relay shutting down")
            .await
            .map_err(|e| RelayError::Connection(e.to_string()))?;
        self.conn
            .close(200, "relay shutting down")
            .await
            .map_err(|e| RelayError::Connection(e.to_string()))?;

        info!("RabbitMQ connection closed");
        Ok(())
    }
}

/// AMQP properties carried by every relayed message.
pub fn message_properties(message: &QueueMessage) -> BasicProperties {
    BasicProperties::default()
        .with_content_type(message.content_type.clone().into())
        .with_delivery_mode(message.delivery_mode.as_u8())
        .with_timestamp(message.created_at.timestamp().max(0) as u64)
        .with_message_id(message.id.to_string().into())
}

#[async_trait]
impl Publisher for AmqpPublisher {
    async fn publish(&self, routing_key: &str, message: &QueueMessage) -> Result<(), RelayError> {
        let confirm = self
            .channel
            .basic_publish(
                "",
                routing_key,
                BasicPublishOptions {
                    mandatory: false,
                    immediate: false,
                },
                &message.body,
                message_properties(message),
            )
            .await
            .map_err(|e| RelayError::Publish(e.to_string()))?
            .await
            .map_err(|e| RelayError::Publish(e.to_string()))?;

        if confirm.is_nack() {
            return Err(RelayError::Publish("publisher confirm NACK".to_string()));
        }

        debug!(
            "Published message_id={} routing_key={} bytes={}",
            message.id,
            routing_key,
            message.body.len()
        );
        Ok(())
    }
}
