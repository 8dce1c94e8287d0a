//! Resource-level model type.
//!
//! A `Model` is indexed triangle geometry split into areas. Each area is a
//! contiguous index range drawn with one material: entity material `i`
//! applies to area `i`.
//!
//! # Example
//!
//! ```text
//! Model "crate"
//! ├── vertices / normals / tex_coords (shared by all areas)
//! ├── indices
//! └── areas
//!     ├── [0] first_index 0,  index_count 36   → material 0
//!     └── [1] first_index 36, index_count 12   → material 1
//! ```

use crate::engine_error;
use crate::error::{Error, Result};
use crate::math::AABB;
use glam::{Vec2, Vec3};
use super::{Resource, ResourceId};

/// Contiguous index range drawn with one material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelArea {
    pub first_index: u32,
    pub index_count: u32,
}

/// Model creation descriptor
///
/// `areas` holds per-area triangle lists indexing `vertices`.
#[derive(Debug, Clone, Default)]
pub struct ModelDesc {
    pub name: String,
    pub vertices: Vec<Vec3>,
    /// Empty, or one per vertex
    pub normals: Vec<Vec3>,
    /// Empty, or one per vertex
    pub tex_coords: Vec<Vec2>,
    pub areas: Vec<Vec<u32>>,
}

#[derive(Debug)]
pub struct Model {
    id: ResourceId,
    name: String,
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    indices: Vec<u32>,
    areas: Vec<ModelArea>,
    bounds: AABB,
}

impl Model {
    /// Build a model, validating stream lengths and index ranges
    pub fn from_desc(desc: ModelDesc) -> Result<Self> {
        let invalid = |message: String| {
            engine_error!("stellar::Model", "{}", message);
            Err(Error::InvalidMesh(message))
        };

        let vertex_count = desc.vertices.len();
        if !desc.normals.is_empty() && desc.normals.len() != vertex_count {
            return invalid(format!(
                "Model '{}': {} normals for {} vertices", desc.name, desc.normals.len(), vertex_count));
        }
        if !desc.tex_coords.is_empty() && desc.tex_coords.len() != vertex_count {
            return invalid(format!(
                "Model '{}': {} texture coordinates for {} vertices", desc.name, desc.tex_coords.len(), vertex_count));
        }

        let mut indices = Vec::new();
        let mut areas = Vec::with_capacity(desc.areas.len());
        for (i, area) in desc.areas.iter().enumerate() {
            if area.len() % 3 != 0 {
                return invalid(format!(
                    "Model '{}': area {} has {} indices, not a triangle list", desc.name, i, area.len()));
            }
            if let Some(bad) = area.iter().find(|&&index| index as usize >= vertex_count) {
                return invalid(format!(
                    "Model '{}': area {} references vertex {} of {}", desc.name, i, bad, vertex_count));
            }
            areas.push(ModelArea {
                first_index: indices.len() as u32,
                index_count: area.len() as u32,
            });
            indices.extend_from_slice(area);
        }

        let bounds = AABB::from_points(&desc.vertices).unwrap_or(AABB::new(Vec3::ZERO, Vec3::ZERO));

        Ok(Self {
            id: ResourceId::next(),
            name: desc.name,
            vertices: desc.vertices,
            normals: desc.normals,
            tex_coords: desc.tex_coords,
            indices,
            areas,
            bounds,
        })
    }

    // ===== GEOMETRY =====

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Positions as a flat xyz stream
    pub fn vertex_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Normals as a flat xyz stream
    pub fn normal_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Texture coordinates as a flat uv stream
    pub fn tex_coord_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.tex_coords)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    // ===== AREAS =====

    pub fn areas(&self) -> &[ModelArea] {
        &self.areas
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Index slice of one area
    pub fn area_indices(&self, area: usize) -> Option<&[u32]> {
        let area = self.areas.get(area)?;
        let start = area.first_index as usize;
        self.indices.get(start..start + area.index_count as usize)
    }

    // ===== BOUNDS =====

    /// Local-space bounding box
    pub fn bounds(&self) -> AABB {
        self.bounds
    }
}

impl Resource for Model {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
