//! Static-file fallback.
//!
//! Unmatched GETs are served from `storage.static_root` with plain
//! static-site semantics: directories probe for an index file, misses are
//! a 404 at the handler. The canonicalize-and-contain check keeps resolved
//! paths inside the root.

use std::path::Path;

use tokio::fs;

use crate::http::mime;
use crate::logger;

const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Load a file for a request path, rooted at `static_root`.
///
/// Returns the content and its Content-Type, or `None` for a miss (the
/// caller's 404 applies).
pub async fn load_from_root(static_root: &str, path: &str) -> Option<(Vec<u8>, &'static str)> {
    let relative = path.trim_start_matches('/');

    let root_canonical = match Path::new(static_root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{static_root}': {e}"
            ));
            return None;
        }
    };

    let mut file_path = Path::new(static_root).join(relative);

    // Directory requests probe for an index file.
    if file_path.is_dir() || relative.is_empty() || relative.ends_with('/') {
        for index_file in INDEX_FILES {
            let index_path = file_path.join(index_file);
            if index_path.is_file() {
                file_path = index_path;
                break;
            }
        }
    }

    // A plain miss is a 404, not worth a log line.
    let Ok(file_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_canonical.display()
        ));
        return None;
    }
    if file_canonical.is_dir() {
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}
