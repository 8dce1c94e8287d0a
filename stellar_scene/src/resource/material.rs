/// Material resource - surface colors and up to five texture maps
///
/// A material without lighting, or with a light map, contributes to the
/// unlit pass. Unlit materials are skipped by the per-light pass.

use std::sync::Arc;
use glam::Vec4;
use crate::graphics_device::{ShaderParams, MaterialParams, TextureKind, TextureParams};
use super::{Resource, ResourceId, Texture};

/// Material creation descriptor
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub name: String,
    pub diffuse_color: Vec4,
    pub specular_color: Vec4,
    pub ambient_color: Vec4,
    pub specular_power: f32,
    pub lighting: bool,
    pub diffuse_map: Option<Arc<Texture>>,
    pub normal_map: Option<Arc<Texture>>,
    pub height_map: Option<Arc<Texture>>,
    pub specular_map: Option<Arc<Texture>>,
    pub light_map: Option<Arc<Texture>>,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        let params = MaterialParams::default();
        Self {
            name: String::new(),
            diffuse_color: params.diffuse_color,
            specular_color: params.specular_color,
            ambient_color: params.ambient_color,
            specular_power: params.specular_power,
            lighting: true,
            diffuse_map: None,
            normal_map: None,
            height_map: None,
            specular_map: None,
            light_map: None,
        }
    }
}

#[derive(Debug)]
pub struct Material {
    id: ResourceId,
    name: String,
    diffuse_color: Vec4,
    specular_color: Vec4,
    ambient_color: Vec4,
    specular_power: f32,
    lighting: bool,
    diffuse_map: Option<Arc<Texture>>,
    normal_map: Option<Arc<Texture>>,
    height_map: Option<Arc<Texture>>,
    specular_map: Option<Arc<Texture>>,
    light_map: Option<Arc<Texture>>,
}

impl Material {
    pub fn from_desc(desc: MaterialDesc) -> Self {
        Self {
            id: ResourceId::next(),
            name: desc.name,
            diffuse_color: desc.diffuse_color,
            specular_color: desc.specular_color,
            ambient_color: desc.ambient_color,
            specular_power: desc.specular_power,
            lighting: desc.lighting,
            diffuse_map: desc.diffuse_map,
            normal_map: desc.normal_map,
            height_map: desc.height_map,
            specular_map: desc.specular_map,
            light_map: desc.light_map,
        }
    }

    pub fn new(name: &str) -> Self {
        Self::from_desc(MaterialDesc { name: name.to_string(), ..Default::default() })
    }

    // ===== GETTERS =====

    pub fn diffuse_color(&self) -> Vec4 {
        self.diffuse_color
    }

    pub fn specular_color(&self) -> Vec4 {
        self.specular_color
    }

    pub fn ambient_color(&self) -> Vec4 {
        self.ambient_color
    }

    pub fn specular_power(&self) -> f32 {
        self.specular_power
    }

    /// False for materials drawn only in the unlit pass
    pub fn lighting(&self) -> bool {
        self.lighting
    }

    pub fn diffuse_map(&self) -> Option<&Arc<Texture>> {
        self.diffuse_map.as_ref()
    }

    pub fn normal_map(&self) -> Option<&Arc<Texture>> {
        self.normal_map.as_ref()
    }

    pub fn height_map(&self) -> Option<&Arc<Texture>> {
        self.height_map.as_ref()
    }

    pub fn specular_map(&self) -> Option<&Arc<Texture>> {
        self.specular_map.as_ref()
    }

    pub fn light_map(&self) -> Option<&Arc<Texture>> {
        self.light_map.as_ref()
    }

    /// Texture maps in diffuse, normal, height, specular, light order
    pub fn textures(&self) -> impl Iterator<Item = &Arc<Texture>> {
        [&self.diffuse_map, &self.normal_map, &self.height_map, &self.specular_map, &self.light_map]
            .into_iter()
            .flatten()
    }

    /// True when the material draws something in the unlit pass
    pub fn has_unlit_contribution(&self) -> bool {
        !self.lighting || self.light_map.is_some()
    }

    // ===== SHADER BINDING =====

    /// Write colors and texture slots into `params`.
    ///
    /// Slots are filled in map order, skipping absent maps. The shadow slot
    /// is left untouched.
    pub fn apply(&self, params: &mut ShaderParams) {
        params.material = MaterialParams {
            diffuse_color: self.diffuse_color,
            specular_color: self.specular_color,
            ambient_color: self.ambient_color,
            specular_power: self.specular_power,
            lighting: self.lighting,
        };

        params.clear_material_textures();
        let maps = [
            (TextureKind::ColorMap, &self.diffuse_map),
            (TextureKind::NormalMap, &self.normal_map),
            (TextureKind::HeightMap, &self.height_map),
            (TextureKind::SpecularMap, &self.specular_map),
            (TextureKind::LightMap, &self.light_map),
        ];
        let bound = maps
            .into_iter()
            .filter_map(|(kind, map)| map.as_ref().map(|t| (kind, t)));
        for (slot, (kind, texture)) in bound.enumerate() {
            params.textures[slot] = TextureParams {
                kind,
                texture: texture.gpu_texture(),
                ..Default::default()
            };
        }
    }
}

impl Resource for Material {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
