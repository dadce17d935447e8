//! Request routing dispatch.
//!
//! Entry point for HTTP request processing: method gating, body-size
//! guard, and dispatch to the upload and download handlers.

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::handler::{download, upload};
use crate::http;
use crate::logger;

/// Main entry point for HTTP request handling.
///
/// Generic over the body type so tests can drive it with buffered
/// bodies; the server feeds it `hyper::body::Incoming`.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if state.config.logging.access_log {
        logger::log_request(&method, req.uri());
    }

    let response = match method {
        // Preflight always succeeds, any path, no validation.
        Method::OPTIONS => http::build_options_response(),
        Method::POST => handle_post(req, &state, &path).await,
        Method::GET => download::handle_get(&state, &path).await,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    Ok(response)
}

async fn handle_post<B>(req: Request<B>, state: &AppState, path: &str) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    if let Some(response) = check_body_size(&req, state.config.http.max_body_size) {
        return response;
    }

    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            return http::build_500_response();
        }
    };

    upload::handle_upload(state, path, content_type.as_deref(), &body).await
}

/// Validate Content-Length against the configured body-size ceiling.
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
