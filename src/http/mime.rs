//! MIME type detection.
//!
//! Returns the Content-Type for a file extension. The `.obj`/`.mtl`
//! entries are what the artifact downloads are served as.

/// Get MIME Content-Type based on file extension
///
/// # Examples
/// ```
/// use meshdrop::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("obj")), "application/x-tgif");
/// assert_eq!(get_content_type(Some("mtl")), "text/plain");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Mesh artifacts
        Some("obj") => "application/x-tgif",
        Some("mtl") => "text/plain",

        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // JavaScript/WASM
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Documents
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",

        // Default
        _ => "application/octet-stream",
    }
}

/// Content-Type for a full filename, keyed off its final extension.
pub fn content_type_for_name(name: &str) -> &'static str {
    get_content_type(name.rsplit_once('.').map(|(_, ext)| ext))
}
