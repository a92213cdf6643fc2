//! OBJ/MTL tile loading.

use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;

use super::material::{MaterialLibrary, MaterialRecord};
use crate::geometry::TriangleMesh;

/// Errors produced while loading tile assets.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("I/O error while reading asset: {0}")]
    Io(#[from] std::io::Error),
}

/// One sub-mesh of a loaded tile, with its shared material.
pub struct SourceMesh {
    pub name: String,
    pub mesh: TriangleMesh,
    pub material: Arc<MaterialRecord>,
}

/// Loads a single tile model (OBJ plus optional MTL) into source meshes.
///
/// Missing or unreadable MTL files degrade to the default material;
/// missing normals are computed from faces. Both paths are logged, not
/// fatal.
pub fn load_tile<P: AsRef<Path>>(path: P) -> Result<Vec<SourceMesh>, AssetError> {
    let path = path.as_ref();
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )?;

    let materials = match materials {
        Ok(materials) => materials,
        Err(err) => {
            warn!("no usable MTL for {}: {err}, using default materials", path.display());
            Vec::new()
        }
    };

    let mut library = MaterialLibrary::new();
    for (i, mtl) in materials.iter().enumerate() {
        library.add(MaterialRecord::from_mtl(mtl, &format!("material_{i}")));
    }

    let mut sources = Vec::with_capacity(models.len());
    for model in &models {
        let mesh = &model.mesh;
        let mut triangle_mesh = TriangleMesh::new(
            mesh.positions.clone(),
            mesh.normals.clone(),
            mesh.texcoords.clone(),
            mesh.indices.clone(),
        );
        triangle_mesh.ensure_normals();

        sources.push(SourceMesh {
            name: model.name.clone(),
            mesh: triangle_mesh,
            material: library.get_or_default(mesh.material_id),
        });
    }

    info!(
        "loaded {}: {} sub-meshes, {} materials",
        path.display(),
        sources.len(),
        library.len()
    );

    Ok(sources)
}

/// Loads a set of tile models, concatenating their sub-meshes in input
/// order.
pub fn load_tile_set<P, I>(paths: I) -> Result<Vec<SourceMesh>, AssetError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = P>,
{
    let mut sources = Vec::new();
    for path in paths {
        sources.extend(load_tile(path)?);
    }
    Ok(sources)
}
