//! Logging utilities: server lifecycle, access lines, warnings and errors.
//! Access lines carry a local timestamp; errors go to stderr.

use std::net::SocketAddr;

use chrono::Local;
use hyper::{Method, Uri};

use crate::config::Config;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("meshdrop started");
    println!("Listening on: http://{addr}");
    println!("Upload directory: {}", config.storage.upload_dir);
    println!("Static root: {}", config.storage.static_root);
    if config.logging.access_log {
        println!("Access log: enabled");
    }
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_request(method: &Method, uri: &Uri) {
    println!("[{}] {} {}", timestamp(), method, uri);
}

pub fn log_response(status: u16, size: usize) {
    println!("[{}] -> {} ({} bytes)", timestamp(), status, size);
}

pub fn log_upload(file_name: &str, size: usize) {
    println!("[{}] Stored upload '{}' ({} bytes)", timestamp(), file_name, size);
}

pub fn log_artifacts(obj_name: &str, mtl_name: &str) {
    println!("[{}] Wrote artifacts {} / {}", timestamp(), obj_name, mtl_name);
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_warning(message: &str) {
    eprintln!("[Warning] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[Error] {message}");
}
