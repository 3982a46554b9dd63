//! Webhook relay: one inbound callback becomes one queue message.
//!
//! Decode, re-encode, publish and respond all happen inside the request.
//! A failure in any step is answered with an error status for that request
//! only; the process and the broker channel stay up.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};
use webhook_relay_core::{CallbackPayload, QueueMessage, JSON_CONTENT_TYPE};

use crate::{error::ApiError, server::AppState};

/// Relays a webhook body to the configured queue and echoes it back.
///
/// The body must be a JSON object; its content type header is not checked.
/// On success the response is `200` with the re-encoded object, which is
/// also exactly the published message body.
///
/// # Errors
///
/// - 400: body is not a JSON object
/// - 500: payload could not be re-encoded
/// - 502: broker publish failed
#[instrument(name = "relay_webhook", skip(state, body), fields(bytes = body.len()))]
pub async fn relay_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let payload = CallbackPayload::from_slice(&body)?;
    let encoded = payload.to_vec()?;

    let message = QueueMessage::json(encoded);
    info!(message_id = %message.id, keys = payload.len(), "Received a callback");
    debug!(
        payload = %String::from_utf8_lossy(&message.body),
        "Callback payload"
    );

    state.publisher.publish(&state.routing_key, &message).await?;

    info!(
        message_id = %message.id,
        routing_key = %state.routing_key,
        "Callback relayed"
    );

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
        message.body,
    )
        .into_response())
}
