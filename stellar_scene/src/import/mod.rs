//! Import module - generic imported-scene graph and the importers producing it
//!
//! Importers decode third-party scene files into an [`ImportedScene`]. The
//! scene builder (`Scene::from_imported`) flattens that graph into entities,
//! models, materials, cameras and lights; importers never touch the scene.

mod gltf_importer;

use std::path::{Path, PathBuf};
use glam::{Quat, Vec2, Vec3, Vec4};
use crate::error::Result;
use crate::resource::Texture;

pub use gltf_importer::GltfImporter;

/// Node of the imported hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedNode {
    pub name: String,
    pub position: Vec3,
    pub orientation: Quat,
    /// Indices into `ImportedScene::meshes`
    pub meshes: Vec<usize>,
    pub children: Vec<ImportedNode>,
}

impl ImportedNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Indexed polygon mesh with one material
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedMesh {
    pub positions: Vec<Vec3>,
    /// Empty or one per position
    pub normals: Vec<Vec3>,
    pub tex_coords: Option<Vec<Vec2>>,
    /// Polygons as vertex indices local to this mesh
    pub faces: Vec<Vec<u32>>,
    /// Index into `ImportedScene::materials`
    pub material: usize,
}

/// Material properties and texture paths as stored in the source file
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMaterial {
    pub name: String,
    pub diffuse_color: Option<Vec4>,
    pub specular_color: Option<Vec4>,
    pub ambient_color: Option<Vec4>,
    pub shininess: Option<f32>,
    pub shininess_strength: Option<f32>,
    /// Texture paths, relative to the source file's directory
    pub diffuse_texture: Option<PathBuf>,
    pub specular_texture: Option<PathBuf>,
    pub normal_texture: Option<PathBuf>,
    pub light_texture: Option<PathBuf>,
    pub height_texture: Option<PathBuf>,
}

impl ImportedMaterial {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            diffuse_color: None,
            specular_color: None,
            ambient_color: None,
            shininess: None,
            shininess_strength: None,
            diffuse_texture: None,
            specular_texture: None,
            normal_texture: None,
            light_texture: None,
            height_texture: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedCamera {
    pub name: String,
    pub position: Vec3,
    pub orientation: Quat,
    /// Field of view in radians
    pub fov: f32,
    pub clip_near: f32,
    pub clip_far: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportedLightKind {
    Directional,
    Point,
    Spot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedLight {
    pub name: String,
    pub kind: ImportedLightKind,
    pub position: Vec3,
    /// World-space direction the light shines along
    pub direction: Vec3,
    pub color: Vec3,
    /// Cone half angles in radians
    pub inner_cone: f32,
    pub outer_cone: f32,
    pub attenuation_linear: f32,
    pub attenuation_quadratic: f32,
}

/// Importer output
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedScene {
    pub roots: Vec<ImportedNode>,
    pub meshes: Vec<ImportedMesh>,
    pub materials: Vec<ImportedMaterial>,
    pub cameras: Vec<ImportedCamera>,
    pub lights: Vec<ImportedLight>,
}

/// Decoder for a third-party scene format
pub trait SceneImporter: Send + Sync {
    /// True when `extension` (without the dot, any case) is handled
    fn supports_extension(&self, extension: &str) -> bool;

    /// Decode the file at `path`
    fn import(&self, path: &Path) -> Result<ImportedScene>;

    /// Load a texture referenced by an imported material.
    ///
    /// `None` leaves the material slot empty.
    fn load_texture(&self, path: &Path) -> Option<Texture> {
        Texture::from_file(path).ok()
    }
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
