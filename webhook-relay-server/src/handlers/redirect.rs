use std::io::ErrorKind;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{error::ApiError, server::AppState};

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Serves the static redirect page, whatever the method or body.
///
/// The file is read on every request, so it can be replaced without a restart.
pub async fn redirect_page(State(state): State<AppState>) -> Result<Response, ApiError> {
    let path = state.redirect_page.as_path();

    let contents = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ApiError::NotFound {
            message: format!("{} does not exist", path.display()),
        },
        _ => ApiError::Internal {
            message: format!("failed to read {}: {e}", path.display()),
        },
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "Serving redirect page");

    Ok(([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], contents).into_response())
}
