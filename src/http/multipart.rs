//! Minimal `multipart/form-data` decoding over a fully buffered body.
//!
//! The service only ever needs one small image part, so the body is
//! collected first and split on the boundary delimiter here. Binary part
//! data passes through untouched, including embedded CRLF sequences.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MultipartError {
    #[error("content type is not multipart/form-data")]
    NotMultipart,
    #[error("multipart boundary missing from content type")]
    MissingBoundary,
    #[error("multipart body is malformed")]
    Malformed,
}

/// One decoded part of a multipart body.
#[derive(Debug)]
pub struct Part {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Extract the boundary from a `Content-Type: multipart/form-data` value.
///
/// Fails if the media type is not multipart/form-data or the boundary
/// parameter is absent.
pub fn boundary(content_type: &str) -> Result<String, MultipartError> {
    let mut params = content_type.split(';');
    let media_type = params.next().unwrap_or("").trim();
    if !media_type.eq_ignore_ascii_case("multipart/form-data") {
        return Err(MultipartError::NotMultipart);
    }

    for param in params {
        if let Some((key, value)) = param.split_once('=') {
            if key.trim().eq_ignore_ascii_case("boundary") {
                let value = value.trim().trim_matches('"');
                if !value.is_empty() {
                    return Ok(value.to_string());
                }
            }
        }
    }
    Err(MultipartError::MissingBoundary)
}

/// Split a buffered multipart body into its parts.
///
/// Parts carrying no `Content-Disposition` name are dropped rather than
/// rejected; the caller decides whether the part it wants is present.
pub fn parse(body: &[u8], boundary: &str) -> Result<Vec<Part>, MultipartError> {
    let delimiter = format!("--{boundary}").into_bytes();
    let mut parts = Vec::new();

    let first = find(body, &delimiter, 0).ok_or(MultipartError::Malformed)?;
    let mut cursor = first + delimiter.len();

    loop {
        let rest = body.get(cursor..).ok_or(MultipartError::Malformed)?;
        if rest.starts_with(b"--") {
            // Closing delimiter, done.
            break;
        }
        if rest.starts_with(b"\r\n") {
            cursor += 2;
        } else {
            return Err(MultipartError::Malformed);
        }

        let end = find(body, &delimiter, cursor).ok_or(MultipartError::Malformed)?;
        let segment = &body[cursor..end];
        // Part data is separated from the next delimiter by CRLF.
        let segment = segment.strip_suffix(b"\r\n").unwrap_or(segment);

        if let Some(part) = parse_part(segment)? {
            parts.push(part);
        }
        cursor = end + delimiter.len();
    }

    Ok(parts)
}

/// First part that is a file upload under the given field name.
pub fn file_part<'a>(parts: &'a [Part], field: &str) -> Option<&'a Part> {
    parts
        .iter()
        .find(|part| part.name == field && part.file_name.is_some())
}

/// Decode a single part segment (headers, blank line, data).
fn parse_part(segment: &[u8]) -> Result<Option<Part>, MultipartError> {
    let split = find(segment, b"\r\n\r\n", 0).ok_or(MultipartError::Malformed)?;
    let header_block = &segment[..split];
    let data = segment[split + 4..].to_vec();

    let header_block =
        std::str::from_utf8(header_block).map_err(|_| MultipartError::Malformed)?;

    let mut name = None;
    let mut file_name = None;
    let mut content_type = None;

    for line in header_block.split("\r\n") {
        let Some((header, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if header.eq_ignore_ascii_case("content-disposition") {
            name = disposition_attribute(value, "name");
            file_name = disposition_attribute(value, "filename");
        } else if header.eq_ignore_ascii_case("content-type") {
            content_type = Some(value.to_string());
        }
    }

    Ok(name.map(|name| Part {
        name,
        file_name,
        content_type,
        data,
    }))
}

/// Pull one attribute out of a `Content-Disposition` value, e.g.
/// `form-data; name="image"; filename="cube.png"`.
fn disposition_attribute(value: &str, key: &str) -> Option<String> {
    for param in value.split(';') {
        let Some((param_key, param_value)) = param.split_once('=') else {
            continue;
        };
        if param_key.trim().eq_ignore_ascii_case(key) {
            return Some(param_value.trim().trim_matches('"').to_string());
        }
    }
    None
}

/// Byte-wise substring search starting at `from`.
fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < from {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|idx| idx + from)
}
