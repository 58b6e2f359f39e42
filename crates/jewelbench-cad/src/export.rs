//! CAD export adapter: loaded mesh in, `.3mf` file out.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use jewelbench_core::types::Material;
use jewelbench_mesh::IndexedMesh;
use tempfile::TempPath;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::codec;
use crate::document::{CadDocument, MeshObject};
use crate::error::{CadError, CadResult};

/// Engine identifier stamped into every exported mesh object.
pub const ENGINE_ID: &str = "JewelBench O.R.I.O.N.";

/// Extension of exported files.
pub const FILE_EXTENSION: &str = "3mf";

/// Media type of exported files.
pub const MEDIA_TYPE: &str = "model/3mf";

/// Build the export document for a mesh.
///
/// The mesh goes onto the Metal layer with its vertex and face order
/// untouched, tagged with `material` and `engine`.
pub fn build_document(mesh: &IndexedMesh, material: Material) -> CadResult<CadDocument> {
    let mut doc = CadDocument::jewelry_layers();
    let mut object = MeshObject::from_mesh(mesh, CadDocument::METAL_LAYER);
    object.set_metadata("material", material.name());
    object.set_metadata("engine", ENGINE_ID);
    doc.add_object(object)?;
    Ok(doc)
}

/// Suggested download file name, e.g. `jewelbench_Gold_18K.3mf`.
pub fn download_name(material: Material) -> String {
    format!("jewelbench_{}.{FILE_EXTENSION}", material.file_stem())
}

/// Writes export documents into a directory.
#[derive(Debug, Clone)]
pub struct CadExporter {
    output_dir: PathBuf,
}

impl CadExporter {
    /// Create an exporter writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Encode the mesh and write it to a uniquely named file.
    ///
    /// A failed write removes the partial file and returns the error.
    pub fn export(&self, mesh: &IndexedMesh, material: Material) -> CadResult<ExportArtifact> {
        let id = Uuid::now_v7();
        let doc = build_document(mesh, material)?;
        let bytes = codec::encode(&doc)?;

        let mut file = tempfile::Builder::new()
            .prefix(&format!("jewelbench-{}-", id.simple()))
            .suffix(&format!(".{FILE_EXTENSION}"))
            .tempfile_in(&self.output_dir)
            .map_err(|source| CadError::OutputDir {
                path: self.output_dir.clone(),
                source,
            })?;

        // On error the NamedTempFile drops here and takes the partial file with it
        file.write_all(&bytes)?;
        file.as_file().sync_all()?;
        let path = file.into_temp_path();

        info!(
            export_id = %id,
            material = %material,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            size = bytes.len(),
            path = %path.display(),
            "CAD export written"
        );

        Ok(ExportArtifact {
            id,
            material,
            size: bytes.len() as u64,
            path,
        })
    }
}

/// An exported file on disk.
///
/// The artifact owns its file: dropping it deletes the file. Call
/// [`ExportArtifact::persist`] to keep it.
pub struct ExportArtifact {
    id: Uuid,
    material: Material,
    size: u64,
    path: TempPath,
}

impl ExportArtifact {
    /// Unique export identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Path of the exported file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Suggested file name for downloads.
    pub fn download_name(&self) -> String {
        download_name(self.material)
    }

    /// Read the exported file into memory.
    pub fn read_bytes(&self) -> CadResult<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }

    /// Move the file to `dest` and release ownership of it.
    ///
    /// Falls back to copy-then-delete when `dest` is on another filesystem.
    pub fn persist(self, dest: impl AsRef<Path>) -> CadResult<PathBuf> {
        let dest = dest.as_ref();
        match self.path.persist(dest) {
            Ok(()) => {}
            Err(err) => {
                warn!(
                    error = %err.error,
                    dest = %dest.display(),
                    "Rename failed, copying export instead"
                );
                // err.path still owns the source and removes it when dropped
                std::fs::copy(&err.path, dest)?;
            }
        }
        debug!(export_id = %self.id, dest = %dest.display(), "Export persisted");
        Ok(dest.to_path_buf())
    }
}

impl fmt::Debug for ExportArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportArtifact")
            .field("id", &self.id)
            .field("material", &self.material)
            .field("size", &self.size)
            .field("path", &self.path.display())
            .finish()
    }
}
