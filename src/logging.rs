//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The number of bytes of a request or response body to include in the `info` level logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };
    log_body(
        &format!("Received request: {parts:#?}"),
        "request",
        &body_bytes,
    );

    let response = next.run(Request::from_parts(parts, body_bytes.into())).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_body(
        &format!("Sending response: {parts:#?}"),
        "response",
        &body_bytes,
    );

    Response::from_parts(parts, body_bytes.into())
}

async fn read_body(body: Body) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, usize::MAX).await
}

fn log_body(message: &str, kind: &str, body: &[u8]) {
    let body = String::from_utf8_lossy(body);

    match truncate(&body) {
        Some(truncated) => {
            tracing::info!("{message}\nbody: {truncated}...");
            tracing::debug!("Full {kind} body: {body:?}");
        }
        None => tracing::info!("{message}\nbody: {body:?}"),
    }
}

/// The longest prefix of `text` that fits in [LOG_BODY_LENGTH_LIMIT] bytes, or `None` if
/// `text` already fits.
fn truncate(text: &str) -> Option<&str> {
    if text.len() <= LOG_BODY_LENGTH_LIMIT {
        return None;
    }

    let end = (0..=LOG_BODY_LENGTH_LIMIT)
        .rev()
        .find(|&index| text.is_char_boundary(index))
        .unwrap_or(0);

    Some(&text[..end])
}
