//! Image-to-mesh conversion seam.
//!
//! The request handlers only ever talk to `MeshConverter`; swapping the
//! placeholder for a real image-to-3D backend does not touch them.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("conversion backend failed: {0}")]
    Backend(String),
}

/// The geometry/material pair produced for one uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshArtifacts {
    pub obj: Vec<u8>,
    pub mtl: Vec<u8>,
}

/// Turns an uploaded image into a mesh artifact pair.
#[async_trait]
pub trait MeshConverter: Send + Sync {
    async fn convert(
        &self,
        image: &[u8],
        file_name: &str,
    ) -> Result<MeshArtifacts, ProcessingError>;
}

/// Stand-in converter emitting a fixed single-triangle mesh.
pub struct PlaceholderConverter;

const PLACEHOLDER_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3";
const PLACEHOLDER_MTL: &str = "newmtl material0\nKa 1 1 1\nKd 1 1 1\nKs 0 0 0";

#[async_trait]
impl MeshConverter for PlaceholderConverter {
    async fn convert(
        &self,
        _image: &[u8],
        _file_name: &str,
    ) -> Result<MeshArtifacts, ProcessingError> {
        Ok(MeshArtifacts {
            obj: PLACEHOLDER_OBJ.as_bytes().to_vec(),
            mtl: PLACEHOLDER_MTL.as_bytes().to_vec(),
        })
    }
}
