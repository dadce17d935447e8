//! Upload directory access.
//!
//! All uploaded files and generated artifacts live flat in one directory.
//! Names passed in here are already reduced by [`filename::base_name`];
//! writes overwrite silently (last writer wins, no coordination).

pub mod filename;
pub mod static_files;

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

/// Create the upload directory (and missing parents) if absent. Idempotent.
pub async fn ensure_upload_dir(dir: &str) -> io::Result<()> {
    fs::create_dir_all(dir).await
}

/// Write bytes verbatim under the upload directory, overwriting.
pub async fn write_file(upload_dir: &str, name: &str, data: &[u8]) -> io::Result<PathBuf> {
    let path = Path::new(upload_dir).join(name);
    fs::write(&path, data).await?;
    Ok(path)
}

/// Read a previously stored file back, `None` when absent.
pub async fn read_file(upload_dir: &str, name: &str) -> Option<Vec<u8>> {
    fs::read(Path::new(upload_dir).join(name)).await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_upload_dir_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested/uploads");
        let dir = dir.to_str().unwrap();

        ensure_upload_dir(dir).await.unwrap();
        ensure_upload_dir(dir).await.unwrap();
        assert!(Path::new(dir).is_dir());
    }

    #[tokio::test]
    async fn write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let dir = dir.path().to_str().unwrap().to_string();

        write_file(&dir, "cube.png", b"pixels").await.unwrap();
        assert_eq!(read_file(&dir, "cube.png").await.unwrap(), b"pixels");
        assert!(read_file(&dir, "missing.png").await.is_none());
    }

    #[tokio::test]
    async fn rewrite_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let dir = dir.path().to_str().unwrap().to_string();

        write_file(&dir, "cube.png", b"first").await.unwrap();
        write_file(&dir, "cube.png", b"second").await.unwrap();
        assert_eq!(read_file(&dir, "cube.png").await.unwrap(), b"second");
    }
}
