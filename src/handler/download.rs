//! GET handling: artifact downloads with static-file fallthrough.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;

use crate::config::AppState;
use crate::http::{self, mime};
use crate::logger;
use crate::storage::{self, filename, static_files};

const DOWNLOAD_PREFIX: &str = "/download/";

/// Handle any GET. `/download/<name>` resolves in the upload directory;
/// everything else (including a download miss) gets static-file
/// semantics rooted at `storage.static_root`.
pub async fn handle_get(state: &AppState, path: &str) -> Response<Full<Bytes>> {
    if let Some(rest) = path.strip_prefix(DOWNLOAD_PREFIX) {
        if let Some(response) = serve_download(state, rest).await {
            return response;
        }
        // Miss: the static fallback's own not-found handling applies.
    }
    serve_static(state, path).await
}

/// Resolve a download reference against the upload directory.
///
/// The final segment is percent-decoded and reduced to its base name
/// before any filesystem use; traversal sequences therefore never leave
/// the upload directory.
async fn serve_download(state: &AppState, rest: &str) -> Option<Response<Full<Bytes>>> {
    let segment = match rest.rfind('/') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    let name = filename::base_name(&decoded)?;

    let data = storage::read_file(&state.config.storage.upload_dir, name).await?;
    let content_type = mime::content_type_for_name(name);
    if state.config.logging.access_log {
        logger::log_response(200, data.len());
    }
    Some(http::build_attachment_response(name, content_type, data))
}

async fn serve_static(state: &AppState, path: &str) -> Response<Full<Bytes>> {
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map_or_else(|_| path.to_string(), |cow| cow.into_owned());

    match static_files::load_from_root(&state.config.storage.static_root, &decoded).await {
        Some((content, content_type)) => {
            if state.config.logging.access_log {
                logger::log_response(200, content.len());
            }
            http::build_static_file_response(content_type, content)
        }
        None => http::build_404_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{test_config, AppState};
    use http_body_util::BodyExt;

    fn state_with_roots(upload_dir: &str, static_root: &str) -> AppState {
        let mut config = test_config(upload_dir);
        config.storage.static_root = static_root.to_string();
        AppState::new(config)
    }

    async fn body_bytes(response: Response<Full<Bytes>>) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn download_serves_artifact_as_attachment() {
        let uploads = tempfile::tempdir().unwrap();
        let web = tempfile::tempdir().unwrap();
        std::fs::write(
            uploads.path().join("cube.obj"),
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3",
        )
        .unwrap();

        let state = state_with_roots(
            uploads.path().to_str().unwrap(),
            web.path().to_str().unwrap(),
        );
        let response = handle_get(&state, "/download/cube.obj").await;

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/x-tgif"
        );
        assert_eq!(
            response.headers().get("Content-Disposition").unwrap(),
            "attachment; filename=\"cube.obj\""
        );
        assert_eq!(
            body_bytes(response).await,
            b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3"
        );
    }

    #[tokio::test]
    async fn mtl_download_is_plain_text() {
        let uploads = tempfile::tempdir().unwrap();
        let web = tempfile::tempdir().unwrap();
        std::fs::write(uploads.path().join("cube.mtl"), "newmtl material0").unwrap();

        let state = state_with_roots(
            uploads.path().to_str().unwrap(),
            web.path().to_str().unwrap(),
        );
        let response = handle_get(&state, "/download/cube.mtl").await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get("Content-Type").unwrap(), "text/plain");
    }

    #[tokio::test]
    async fn content_type_follows_suffix() {
        let uploads = tempfile::tempdir().unwrap();
        let web = tempfile::tempdir().unwrap();
        std::fs::write(uploads.path().join("cube.png"), "pngbytes").unwrap();

        let state = state_with_roots(
            uploads.path().to_str().unwrap(),
            web.path().to_str().unwrap(),
        );
        let response = handle_get(&state, "/download/cube.png").await;
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "image/png"
        );

        std::fs::write(uploads.path().join("blob"), "x").unwrap();
        let response = handle_get(&state, "/download/blob").await;
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn nested_download_path_resolves_final_segment() {
        let uploads = tempfile::tempdir().unwrap();
        let web = tempfile::tempdir().unwrap();
        std::fs::write(uploads.path().join("cube.obj"), "geometry").unwrap();

        let state = state_with_roots(
            uploads.path().to_str().unwrap(),
            web.path().to_str().unwrap(),
        );
        let response = handle_get(&state, "/download/extra/levels/cube.obj").await;
        assert_eq!(response.status(), 200);
        assert_eq!(body_bytes(response).await, b"geometry");
    }

    #[tokio::test]
    async fn percent_encoded_names_decode() {
        let uploads = tempfile::tempdir().unwrap();
        let web = tempfile::tempdir().unwrap();
        std::fs::write(uploads.path().join("my cube.obj"), "geometry").unwrap();

        let state = state_with_roots(
            uploads.path().to_str().unwrap(),
            web.path().to_str().unwrap(),
        );
        let response = handle_get(&state, "/download/my%20cube.obj").await;
        assert_eq!(response.status(), 200);
        assert_eq!(body_bytes(response).await, b"geometry");
    }

    #[tokio::test]
    async fn encoded_traversal_cannot_escape_upload_dir() {
        let root = tempfile::tempdir().unwrap();
        let uploads = root.path().join("uploads");
        std::fs::create_dir(&uploads).unwrap();
        std::fs::write(root.path().join("secret.txt"), "do not leak").unwrap();
        let web = tempfile::tempdir().unwrap();

        let state = state_with_roots(
            uploads.to_str().unwrap(),
            web.path().to_str().unwrap(),
        );

        for payload in [
            "/download/..%2Fsecret.txt",
            "/download/..%2F..%2Fetc%2Fpasswd",
            "/download/%2e%2e/secret.txt",
            "/download/..%5C..%5Csecret.txt",
        ] {
            let response = handle_get(&state, payload).await;
            assert_eq!(response.status(), 404, "payload {payload} leaked");
        }
    }

    #[tokio::test]
    async fn download_miss_falls_through_to_static() {
        let uploads = tempfile::tempdir().unwrap();
        let web = tempfile::tempdir().unwrap();
        // A static file that happens to live under a /download/ path.
        std::fs::create_dir(web.path().join("download")).unwrap();
        std::fs::write(web.path().join("download/readme.txt"), "static copy").unwrap();

        let state = state_with_roots(
            uploads.path().to_str().unwrap(),
            web.path().to_str().unwrap(),
        );

        let response = handle_get(&state, "/download/readme.txt").await;
        assert_eq!(response.status(), 200);
        assert_eq!(body_bytes(response).await, b"static copy");
    }

    #[tokio::test]
    async fn plain_get_serves_static_root() {
        let uploads = tempfile::tempdir().unwrap();
        let web = tempfile::tempdir().unwrap();
        std::fs::write(web.path().join("index.html"), "<h1>home</h1>").unwrap();

        let state = state_with_roots(
            uploads.path().to_str().unwrap(),
            web.path().to_str().unwrap(),
        );

        let response = handle_get(&state, "/").await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );

        let response = handle_get(&state, "/nothing-here").await;
        assert_eq!(response.status(), 404);
        assert_eq!(
            response
                .headers()
                .get("Access-Control-Allow-Origin")
                .unwrap(),
            "*"
        );
    }
}
