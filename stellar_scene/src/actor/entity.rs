/// Entity - a model instance drawn with an ordered list of materials
///
/// Material `i` applies to model area `i`; areas without a material draw
/// with the baseline material constants.

use std::sync::Arc;
use glam::{Mat4, Vec3};
use crate::camera::Camera;
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, DrawCall, DrawMode, QueryId, ShaderParams, MaterialParams};
use crate::math::AABB;
use crate::physics::PhysicsBodyDesc;
use crate::resource::{Armature, Material, Model};
use super::{ActorBase, ActorKind, SceneActor, axis_lines, draw_gizmo};

#[derive(Debug, Clone)]
pub struct Entity {
    base: ActorBase,
    model: Option<Arc<Model>>,
    materials: Vec<Arc<Material>>,
    armature: Option<Arc<Armature>>,
    scale: Vec3,
    visible: bool,
    culled: bool,
    /// Model bounds in scaled local space
    bounds: AABB,
    bb_offset: Vec3,
    cull_radius: f32,
    query: Option<QueryId>,
}

impl Entity {
    pub fn new(name: &str) -> Self {
        Self {
            base: ActorBase::new(name),
            model: None,
            materials: Vec::new(),
            armature: None,
            scale: Vec3::ONE,
            visible: true,
            culled: true,
            bounds: AABB::new(Vec3::ZERO, Vec3::ZERO),
            bb_offset: Vec3::ZERO,
            cull_radius: 0.0,
            query: None,
        }
    }

    // ===== MODEL / MATERIALS =====

    pub fn model(&self) -> Option<&Arc<Model>> {
        self.model.as_ref()
    }

    pub fn set_model(&mut self, model: Option<Arc<Model>>) {
        self.model = model;
        self.refresh_bounds();
    }

    pub fn materials(&self) -> &[Arc<Material>] {
        &self.materials
    }

    pub fn material(&self, index: usize) -> Option<&Arc<Material>> {
        self.materials.get(index)
    }

    pub fn add_material(&mut self, material: Arc<Material>) {
        self.materials.push(material);
    }

    /// Replace material `index`; returns false when out of range
    pub fn set_material(&mut self, index: usize, material: Arc<Material>) -> bool {
        match self.materials.get_mut(index) {
            Some(slot) => {
                *slot = material;
                true
            }
            None => false,
        }
    }

    pub fn remove_material(&mut self, index: usize) -> Option<Arc<Material>> {
        (index < self.materials.len()).then(|| self.materials.remove(index))
    }

    pub fn armature(&self) -> Option<&Arc<Armature>> {
        self.armature.as_ref()
    }

    pub fn set_armature(&mut self, armature: Option<Arc<Armature>>) {
        self.armature = armature;
    }

    // ===== TRANSFORM / BOUNDS =====

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.refresh_bounds();
    }

    /// Object-to-world transform including scale
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.base.orientation(), self.base.position())
    }

    /// Scaled local bounds of the model
    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    /// World-space box enclosing the model
    pub fn world_bounds(&self) -> AABB {
        self.bounds.transformed(&self.base.world_matrix())
    }

    /// Center of the scaled local bounds
    pub fn bb_offset(&self) -> Vec3 {
        self.bb_offset
    }

    /// Bounds center in world space
    pub fn world_center(&self) -> Vec3 {
        self.base.position() + self.base.orientation() * self.bb_offset
    }

    /// Radius of the sphere enclosing the scaled bounds
    pub fn cull_radius(&self) -> f32 {
        self.cull_radius
    }

    fn refresh_bounds(&mut self) {
        let Some(model) = &self.model else {
            self.bounds = AABB::new(Vec3::ZERO, Vec3::ZERO);
            self.bb_offset = Vec3::ZERO;
            self.cull_radius = 0.0;
            self.base.set_probe(None);
            return;
        };

        let local = model.bounds();
        let a = local.min * self.scale;
        let b = local.max * self.scale;
        self.bounds = AABB::new(a.min(b), a.max(b));
        self.bb_offset = self.bounds.center();
        self.cull_radius = self.bounds.half_extents().length();

        let half_extents = self.bounds.half_extents().max(Vec3::splat(0.01));
        self.base.set_probe(Some(PhysicsBodyDesc::probe(half_extents)));
    }

    // ===== VISIBILITY =====

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Culled state from the last draw
    pub fn is_culled(&self) -> bool {
        self.culled
    }

    pub(crate) fn set_culled(&mut self, culled: bool) {
        self.culled = culled;
    }

    /// True when the entity has geometry and its bounds touch the camera frustum
    pub fn in_frustum(&self, camera: &Camera) -> bool {
        self.visible && self.model.is_some() && camera.aabb_inside_frustum(&self.world_bounds())
    }

    pub fn occlusion_query(&self) -> Option<QueryId> {
        self.query
    }

    pub(crate) fn set_occlusion_query(&mut self, query: QueryId) {
        self.query = Some(query);
    }

    // ===== DRAWING =====

    /// Issue one draw per model area for `mode`.
    ///
    /// `params` must hold the camera and the stage's render state.
    pub fn draw(&self, mode: DrawMode, params: &mut ShaderParams, device: &mut dyn GraphicsDevice) -> Result<()> {
        let Some(model) = &self.model else {
            return Ok(());
        };
        params.modelview_matrix = params.camera_matrix * self.world_matrix();

        for area in 0..model.area_count() {
            let Some(indices) = model.area_indices(area).filter(|i| !i.is_empty()) else {
                continue;
            };
            if !prepare_material(mode, self.materials.get(area).map(|m| m.as_ref()), params) {
                continue;
            }

            device.set_shader_params(params)?;
            device.draw(&DrawCall {
                owner: self.base.id(),
                mode,
                vertices: model.vertex_data(),
                normals: model.normal_data(),
                tex_coords: model.tex_coord_data(),
                indices,
            })?;
        }
        Ok(())
    }

    /// Bounds box and axes
    pub fn draw_debug(&self, params: &mut ShaderParams, device: &mut dyn GraphicsDevice) -> Result<()> {
        let bounds = self.model.as_ref().map(|_| self.bounds);
        draw_gizmo(
            params,
            device,
            self.base.world_matrix(),
            bounds.as_ref(),
            &axis_lines(self.cull_radius.max(1.0)),
            self.base.is_selected(),
        )
    }
}

/// Load the material state `mode` needs into `params`.
///
/// Returns false when the surface contributes nothing in this mode.
pub(crate) fn prepare_material(mode: DrawMode, material: Option<&Material>, params: &mut ShaderParams) -> bool {
    match mode {
        DrawMode::Ambient | DrawMode::WithLighting => match material {
            Some(m) if mode == DrawMode::WithLighting && !m.lighting() => return false,
            Some(m) => m.apply(params),
            None => {
                params.material = MaterialParams::default();
                params.clear_material_textures();
            }
        },
        DrawMode::WithoutLighting => match material {
            Some(m) if m.has_unlit_contribution() => {
                m.apply(params);
                params.material.lighting = false;
            }
            _ => return false,
        },
        DrawMode::Depth | DrawMode::Particles => {}
    }
    true
}

impl SceneActor for Entity {
    fn base(&self) -> &ActorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActorBase {
        &mut self.base
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Entity
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
