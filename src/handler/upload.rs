//! POST /process-image: multipart upload, conversion, artifact writes.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;
use thiserror::Error;

use crate::config::AppState;
use crate::convert::ProcessingError;
use crate::http::{self, multipart};
use crate::logger;
use crate::storage::{self, filename};

pub const UPLOAD_PATH: &str = "/process-image";
const IMAGE_FIELD: &str = "image";

/// Reply body for a successful upload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessReply {
    obj_file_url: String,
    mtl_file_url: String,
}

#[derive(Debug, Error)]
enum UploadError {
    /// Anything the client got wrong; deliberately undistinguished in the
    /// response (wrong path, wrong content type, missing field all look
    /// the same to the caller).
    #[error("bad request: {0}")]
    BadRequest(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Processing(#[from] ProcessingError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Handle a buffered POST body. Path and Content-Type come in raw; every
/// contract violation collapses to one 400, I/O and converter failures
/// to 500.
pub async fn handle_upload(
    state: &AppState,
    path: &str,
    content_type: Option<&str>,
    body: &[u8],
) -> Response<Full<Bytes>> {
    match process_upload(state, path, content_type, body).await {
        Ok(response) => response,
        Err(UploadError::BadRequest(reason)) => {
            logger::log_warning(&format!("Rejected upload: {reason}"));
            http::build_400_response()
        }
        Err(err) => {
            logger::log_error(&format!("Upload failed: {err}"));
            http::build_500_response()
        }
    }
}

async fn process_upload(
    state: &AppState,
    path: &str,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Response<Full<Bytes>>, UploadError> {
    if path != UPLOAD_PATH {
        return Err(UploadError::BadRequest("unexpected POST path"));
    }
    let content_type = content_type.ok_or(UploadError::BadRequest("missing content type"))?;
    let boundary = multipart::boundary(content_type)
        .map_err(|_| UploadError::BadRequest("not multipart/form-data"))?;
    let parts = multipart::parse(body, &boundary)
        .map_err(|_| UploadError::BadRequest("unparsable multipart body"))?;

    let part = multipart::file_part(&parts, IMAGE_FIELD)
        .ok_or(UploadError::BadRequest("missing image field"))?;
    let Some(raw_name) = part.file_name.as_deref() else {
        return Err(UploadError::BadRequest("missing image filename"));
    };
    let name =
        filename::base_name(raw_name).ok_or(UploadError::BadRequest("unusable filename"))?;

    let upload_dir = &state.config.storage.upload_dir;
    storage::write_file(upload_dir, name, &part.data).await?;
    logger::log_upload(name, part.data.len());

    // The conversion seam; today a fixed placeholder. Artifact writes are
    // not transactional with the upload write.
    let artifacts = state.converter.convert(&part.data, name).await?;

    let stem = filename::stem(name);
    let obj_name = format!("{stem}.obj");
    let mtl_name = format!("{stem}.mtl");
    storage::write_file(upload_dir, &obj_name, &artifacts.obj).await?;
    storage::write_file(upload_dir, &mtl_name, &artifacts.mtl).await?;
    logger::log_artifacts(&obj_name, &mtl_name);

    let reply = ProcessReply {
        obj_file_url: format!("/download/{obj_name}"),
        mtl_file_url: format!("/download/{mtl_name}"),
    };
    Ok(http::build_json_response(serde_json::to_string(&reply)?))
}
