//! meshdrop: a small HTTP service that accepts image uploads over
//! multipart form data, runs them through a pluggable image-to-mesh
//! conversion step, and serves the generated OBJ/MTL artifact pair back
//! as downloads. Unmatched GETs fall back to plain static-file serving.

pub mod config;
pub mod convert;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod storage;
