//! Material records shared between fragments.
//!
//! Materials are loaded once per source sub-mesh and shared by every
//! fragment cut from it; a record stays alive as long as the
//! longest-lived fragment referencing it.

use std::sync::Arc;

/// CPU-side material definition with basic PBR properties.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRecord {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
}

impl Default for MaterialRecord {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
        }
    }
}

impl MaterialRecord {
    /// Creates a new material with basic PBR properties
    ///
    /// # Arguments
    /// * `name` - Unique name for this material
    /// * `base_color` - RGBA base color
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
        }
    }

    /// Maps an MTL material onto a record.
    ///
    /// Diffuse color and dissolve become the RGBA base color; shininess
    /// is converted to roughness. MTL has no direct metallic value.
    pub fn from_mtl(mtl: &tobj::Material, fallback_name: &str) -> Self {
        let name = if mtl.name.is_empty() {
            fallback_name.to_string()
        } else {
            mtl.name.clone()
        };

        let diffuse = mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]);
        Self::new(
            &name,
            [
                diffuse[0],
                diffuse[1],
                diffuse[2],
                mtl.dissolve.unwrap_or(1.0),
            ],
            0.0,
            1.0 - (mtl.shininess.unwrap_or(32.0) / 128.0).clamp(0.0, 1.0),
        )
    }
}

/// Centralized material storage for one loaded tile set.
///
/// Records are handed out as [`Arc`] clones so fragments can outlive
/// the library itself.
pub struct MaterialLibrary {
    materials: Vec<Arc<MaterialRecord>>,
    default: Arc<MaterialRecord>,
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
            default: Arc::new(MaterialRecord::default()),
        }
    }

    /// Adds a material and returns its index.
    pub fn add(&mut self, material: MaterialRecord) -> usize {
        self.materials.push(Arc::new(material));
        self.materials.len() - 1
    }

    /// Shared handle to the material at `index`, or the default
    /// material when the index is absent or out of range.
    pub fn get_or_default(&self, index: Option<usize>) -> Arc<MaterialRecord> {
        index
            .and_then(|i| self.materials.get(i))
            .unwrap_or(&self.default)
            .clone()
    }

    /// Shared handle to the default material.
    pub fn default_material(&self) -> Arc<MaterialRecord> {
        self.default.clone()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_sharing() {
        let mut library = MaterialLibrary::new();
        let id = library.add(MaterialRecord::new("brick", [1.0, 0.5, 0.2, 1.0], 0.0, 0.8));

        let a = library.get_or_default(Some(id));
        let b = library.get_or_default(Some(id));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.name, "brick");
    }

    #[test]
    fn test_missing_material_falls_back_to_default() {
        let library = MaterialLibrary::new();
        let material = library.get_or_default(Some(7));
        assert_eq!(material.name, "Default");
        assert_eq!(library.get_or_default(None).name, "Default");
    }

    #[test]
    fn test_clamped_factors() {
        let material = MaterialRecord::new("m", [0.0; 4], 2.0, -1.0);
        assert_eq!(material.metallic, 1.0);
        assert_eq!(material.roughness, 0.0);
    }
}
