//! HTTP protocol layer.
//!
//! Response framing, MIME tables, and multipart decoding, decoupled from
//! the request handlers that use them.

pub mod mime;
pub mod multipart;
pub mod response;

pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response,
    build_500_response, build_attachment_response, build_json_response, build_options_response,
    build_static_file_response,
};
