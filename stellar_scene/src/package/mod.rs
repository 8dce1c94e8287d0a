//! Package module - offset-indexed resource containers
//!
//! A package is a single file holding named, serialized resources. Its index
//! maps `(name, kind)` to a byte offset. Decoding the entries is delegated to
//! a [`PakReader`]; the scene only seeks to the recorded offset and hands the
//! stream to the reader.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use glam::{Vec3, Vec4};
use crate::actor::{Entity, Light, Particles, Sprite};
use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::resource::{Armature, Material, Model, Script, Texture};
use crate::scene::Scene;

/// Kind of a package entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    SceneSettings,
    Texture,
    Material,
    Model,
    Script,
    Armature,
    Camera,
    Entity,
    Light,
    Particles,
    Sprite,
}

/// One index entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PakIndex {
    pub name: String,
    pub kind: ResourceKind,
    /// Byte offset of the serialized entry
    pub offset: u64,
}

/// Scene-wide values stored in a package
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    pub ambient_color: Vec4,
    pub gravity: Vec3,
    pub physics: bool,
    pub run_scripts: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            ambient_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            gravity: Vec3::new(0.0, 0.0, -9.81),
            physics: true,
            run_scripts: true,
        }
    }
}

fn unsupported(kind: ResourceKind) -> Error {
    Error::InvalidResource(format!("{:?} entries are not supported by this package reader", kind))
}

/// Decoder for one package format
///
/// Entry readers receive the stream positioned at the entry offset. Readers
/// for kinds that reference other entries (materials reference textures,
/// entities reference models and materials) take the scene and resolve those
/// references through its `get_or_load_*` methods, so shared resources are
/// only decoded once.
pub trait PakReader: Send + Sync {
    /// Read the package index
    fn read_index(&self, path: &Path) -> Result<Vec<PakIndex>>;

    /// Open the package positioned at `offset`
    fn open_at(&self, path: &Path, offset: u64) -> Result<Box<dyn Read>> {
        let mut file = File::open(path)
            .map_err(|e| Error::CantOpenFile(format!("{}: {}", path.display(), e)))?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| Error::CorruptPackage(format!("{}: seek to {}: {}", path.display(), offset, e)))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn read_scene_settings(&self, _input: &mut dyn Read) -> Result<SceneSettings> {
        Err(unsupported(ResourceKind::SceneSettings))
    }

    fn read_texture(&self, _input: &mut dyn Read) -> Result<Texture> {
        Err(unsupported(ResourceKind::Texture))
    }

    fn read_model(&self, _input: &mut dyn Read) -> Result<Model> {
        Err(unsupported(ResourceKind::Model))
    }

    fn read_script(&self, _input: &mut dyn Read) -> Result<Script> {
        Err(unsupported(ResourceKind::Script))
    }

    fn read_armature(&self, _input: &mut dyn Read) -> Result<Armature> {
        Err(unsupported(ResourceKind::Armature))
    }

    fn read_material(&self, _input: &mut dyn Read, _scene: &mut Scene) -> Result<Material> {
        Err(unsupported(ResourceKind::Material))
    }

    fn read_camera(&self, _input: &mut dyn Read, _scene: &mut Scene) -> Result<Camera> {
        Err(unsupported(ResourceKind::Camera))
    }

    fn read_entity(&self, _input: &mut dyn Read, _scene: &mut Scene) -> Result<Entity> {
        Err(unsupported(ResourceKind::Entity))
    }

    fn read_light(&self, _input: &mut dyn Read, _scene: &mut Scene) -> Result<Light> {
        Err(unsupported(ResourceKind::Light))
    }

    fn read_particles(&self, _input: &mut dyn Read, _scene: &mut Scene) -> Result<Particles> {
        Err(unsupported(ResourceKind::Particles))
    }

    fn read_sprite(&self, _input: &mut dyn Read, _scene: &mut Scene) -> Result<Sprite> {
        Err(unsupported(ResourceKind::Sprite))
    }
}

/// An opened package: its path, its index and the reader that decodes it
#[derive(Clone)]
pub struct Package {
    file_path: PathBuf,
    indices: Vec<PakIndex>,
    reader: Arc<dyn PakReader>,
}

impl Package {
    /// Read the index of the package at `path`
    pub fn open(path: &Path, reader: Arc<dyn PakReader>) -> Result<Self> {
        let indices = reader.read_index(path)?;
        crate::engine_debug!(
            "stellar::Package",
            "Opened package '{}' ({} entries)",
            path.display(),
            indices.len()
        );
        Ok(Self { file_path: path.to_path_buf(), indices, reader })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Index entries in file order
    pub fn indices(&self) -> &[PakIndex] {
        &self.indices
    }

    /// Entries of one kind, in file order
    pub fn indices_of(&self, kind: ResourceKind) -> impl Iterator<Item = &PakIndex> {
        self.indices.iter().filter(move |i| i.kind == kind)
    }

    /// Find the entry named `name` of kind `kind`
    pub fn index(&self, name: &str, kind: ResourceKind) -> Option<&PakIndex> {
        self.indices.iter().find(|i| i.kind == kind && i.name == name)
    }

    /// Open the package positioned at `offset`
    pub fn open_at(&self, offset: u64) -> Result<Box<dyn Read>> {
        self.reader.open_at(&self.file_path, offset)
    }

    pub fn reader(&self) -> Arc<dyn PakReader> {
        self.reader.clone()
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("file_path", &self.file_path)
            .field("indices", &self.indices.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "package_tests.rs"]
mod tests;
