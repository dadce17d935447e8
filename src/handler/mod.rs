//! Request handler module.
//!
//! Routing dispatch plus the upload and download operations.

pub mod download;
pub mod router;
pub mod upload;

pub use router::handle_request;
