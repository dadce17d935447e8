//! HTTP response building.
//!
//! Every builder funnels through `finalize`, which stamps the fixed
//! CORS and cache-control header set onto success and error responses
//! alike. Handler code never assembles a `Response` directly.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::Response;

use crate::logger;

/// The fixed header set every response carries.
const COMMON_HEADERS: [(&str, &str); 6] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Cache-Control", "no-store, no-cache, must-revalidate"),
    ("Pragma", "no-cache"),
    ("Expires", "0"),
];

/// Finish a response: inject the common header set and attach the body.
fn finalize(mut builder: Builder, body: Bytes) -> Response<Full<Bytes>> {
    for (name, value) in COMMON_HEADERS {
        builder = builder.header(name, value);
    }
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to build response: {e}"));
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 200 OK with a JSON body.
pub fn build_json_response(json: String) -> Response<Full<Bytes>> {
    finalize(
        Response::builder()
            .status(200)
            .header("Content-Type", "application/json"),
        Bytes::from(json),
    )
}

/// Build 200 OK serving file bytes as an attachment download.
pub fn build_attachment_response(
    file_name: &str,
    content_type: &str,
    data: Vec<u8>,
) -> Response<Full<Bytes>> {
    finalize(
        Response::builder()
            .status(200)
            .header("Content-Type", content_type)
            .header("Content-Length", data.len())
            .header(
                "Content-Disposition",
                format!("attachment; filename=\"{file_name}\""),
            ),
        Bytes::from(data),
    )
}

/// Build 200 OK for a static file.
pub fn build_static_file_response(content_type: &str, data: Vec<u8>) -> Response<Full<Bytes>> {
    finalize(
        Response::builder()
            .status(200)
            .header("Content-Type", content_type)
            .header("Content-Length", data.len()),
        Bytes::from(data),
    )
}

/// Build the empty-body 200 for OPTIONS preflight requests.
pub fn build_options_response() -> Response<Full<Bytes>> {
    finalize(Response::builder().status(200), Bytes::new())
}

/// Build 400 Bad Request.
pub fn build_400_response() -> Response<Full<Bytes>> {
    finalize(
        Response::builder()
            .status(400)
            .header("Content-Type", "text/plain"),
        Bytes::from("400 Bad Request"),
    )
}

/// Build 404 Not Found.
pub fn build_404_response() -> Response<Full<Bytes>> {
    finalize(
        Response::builder()
            .status(404)
            .header("Content-Type", "text/plain"),
        Bytes::from("404 Not Found"),
    )
}

/// Build 405 Method Not Allowed.
pub fn build_405_response() -> Response<Full<Bytes>> {
    finalize(
        Response::builder()
            .status(405)
            .header("Content-Type", "text/plain")
            .header("Allow", "GET, POST, OPTIONS"),
        Bytes::from("405 Method Not Allowed"),
    )
}

/// Build 413 Payload Too Large.
pub fn build_413_response() -> Response<Full<Bytes>> {
    finalize(
        Response::builder()
            .status(413)
            .header("Content-Type", "text/plain"),
        Bytes::from("413 Payload Too Large"),
    )
}

/// Build 500 Internal Server Error.
pub fn build_500_response() -> Response<Full<Bytes>> {
    finalize(
        Response::builder()
            .status(500)
            .header("Content-Type", "text/plain"),
        Bytes::from("500 Internal Server Error"),
    )
}
