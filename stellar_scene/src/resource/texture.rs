/// Texture resource - image metadata plus the backend texture it was uploaded to
///
/// Pixel data lives on the graphics device. The scene only needs the name,
/// source path and dimensions, and the handle bound into shader slots.

use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use crate::graphics_device::GpuTextureId;
use super::{Resource, ResourceId};

/// Texture creation descriptor
#[derive(Debug, Clone, Default)]
pub struct TextureDesc {
    pub name: String,
    pub file_path: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub gpu_texture: Option<GpuTextureId>,
}

#[derive(Debug)]
pub struct Texture {
    id: ResourceId,
    name: String,
    file_path: Option<PathBuf>,
    width: u32,
    height: u32,
    gpu_texture: Option<GpuTextureId>,
}

impl Texture {
    pub fn from_desc(desc: TextureDesc) -> Self {
        Self {
            id: ResourceId::next(),
            name: desc.name,
            file_path: desc.file_path,
            width: desc.width,
            height: desc.height,
            gpu_texture: desc.gpu_texture,
        }
    }

    /// Probe an image file for its dimensions.
    ///
    /// The texture is named after the file name; it has no GPU texture until
    /// the caller uploads it and sets one.
    pub fn from_file(path: &Path) -> Result<Self> {
        let (width, height) = image::image_dimensions(path)
            .map_err(|e| Error::CantOpenFile(format!("{}: {}", path.display(), e)))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::from_desc(TextureDesc {
            name,
            file_path: Some(path.to_path_buf()),
            width,
            height,
            gpu_texture: None,
        }))
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn gpu_texture(&self) -> Option<GpuTextureId> {
        self.gpu_texture
    }

    pub fn set_gpu_texture(&mut self, texture: Option<GpuTextureId>) {
        self.gpu_texture = texture;
    }
}

impl Resource for Texture {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
