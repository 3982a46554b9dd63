use lapin::{
    options::{BasicGetOptions, QueueDeclareOptions, QueueDeleteOptions},
    types::FieldTable,
    Connection, ConnectionProperties,
};
use webhook_relay_core::{CallbackPayload, Publisher, QueueMessage};
use webhook_relay_rabbitmq::{AmqpOptions, AmqpPublisher};

fn local_options(confirms: bool) -> AmqpOptions {
    // Adjust if your broker uses other credentials/host
    AmqpOptions {
        login: "guest".into(),
        password: "guest".into(),
        host: "localhost".into(),
        port: 5672,
        vhost: "%2f".into(),
        confirms,
    }
}

#[tokio::test]
#[ignore = "requires a RabbitMQ broker on localhost:5672"]
async fn publish_and_fetch() -> Result<(), Box<dyn std::error::Error>> {
    let opts = local_options(true);
    let queue = "webhook_relay.it";

    // Separate connection for the test side, so the relay keeps its single channel
    let conn = Connection::connect(&opts.uri(), ConnectionProperties::default()).await?;
    let ch = conn.create_channel().await?;
    ch.queue_declare(
        queue,
        QueueDeclareOptions {
            auto_delete: true,
            ..Default::default()
        },
        FieldTable::default(),
    )
    .await?;

    let publisher = AmqpPublisher::connect(opts).await?;
    let payload = CallbackPayload::from_slice(br#"{"event":"delivered","message_token":42}"#)?;
    let message = QueueMessage::json(payload.to_vec()?);
    publisher.publish(queue, &message).await?;

    let fetched = ch
        .basic_get(queue, BasicGetOptions { no_ack: true })
        .await?
        .ok_or("no message on queue")?;

    let body: serde_json::Value = serde_json::from_slice(&fetched.delivery.data)?;
    assert_eq!(body["message_token"], 42);
    assert_eq!(
        fetched
            .delivery
            .properties
            .content_type()
            .as_ref()
            .map(|s| s.as_str()),
        Some("application/json")
    );
    assert_eq!(*fetched.delivery.properties.delivery_mode(), Some(1));

    publisher.close().await?;
    ch.queue_delete(queue, QueueDeleteOptions::default()).await?;
    conn.close(200, "done").await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a RabbitMQ broker on localhost:5672"]
async fn wrong_credentials_fail_to_connect() {
    let mut opts = local_options(false);
    opts.password = "definitely-not-the-password".into();

    let result = AmqpPublisher::connect(opts).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn unreachable_broker_fails_to_connect() {
    let mut opts = local_options(false);
    // Nothing listens on port 1
    opts.host = "127.0.0.1".into();
    opts.port = 1;

    let result = AmqpPublisher::connect(opts).await;
    assert!(matches!(
        result,
        Err(webhook_relay_core::RelayError::Connection(_))
    ));
}
