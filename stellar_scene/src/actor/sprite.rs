/// Sprite - a textured unit quad in the XY plane, optionally facing the camera

use std::sync::Arc;
use glam::{Mat4, Quat, Vec2, Vec3};
use crate::camera::Camera;
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, DrawCall, DrawMode, ShaderParams};
use crate::physics::PhysicsBodyDesc;
use crate::resource::Material;
use super::{ActorBase, ActorKind, SceneActor, draw_gizmo};
use super::entity::prepare_material;

const QUAD_VERTICES: [f32; 12] = [
    -0.5, -0.5, 0.0,
    0.5, -0.5, 0.0,
    0.5, 0.5, 0.0,
    -0.5, 0.5, 0.0,
];
const QUAD_NORMALS: [f32; 12] = [
    0.0, 0.0, 1.0,
    0.0, 0.0, 1.0,
    0.0, 0.0, 1.0,
    0.0, 0.0, 1.0,
];
const QUAD_TEX_COORDS: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Minimum probe half extent, so a flat quad still has volume for ray casts
const PROBE_MIN_HALF_EXTENT: f32 = 0.01;

const QUAD_OUTLINE: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, 0.0), Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0), Vec3::new(0.5, 0.5, 0.0),
    Vec3::new(0.5, 0.5, 0.0), Vec3::new(-0.5, 0.5, 0.0),
    Vec3::new(-0.5, 0.5, 0.0), Vec3::new(-0.5, -0.5, 0.0),
];

#[derive(Debug, Clone)]
pub struct Sprite {
    base: ActorBase,
    material: Option<Arc<Material>>,
    scale: Vec2,
    face_camera: bool,
    visible: bool,
    culled: bool,
    /// Orientation used for drawing; follows the camera when `face_camera` is set
    draw_orientation: Quat,
}

impl Sprite {
    pub fn new(name: &str) -> Self {
        let mut sprite = Self {
            base: ActorBase::new(name),
            material: None,
            scale: Vec2::ONE,
            face_camera: false,
            visible: true,
            culled: true,
            draw_orientation: Quat::IDENTITY,
        };
        sprite.refresh_probe();
        sprite
    }

    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.as_ref()
    }

    pub fn set_material(&mut self, material: Option<Arc<Material>>) {
        self.material = material;
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
        self.refresh_probe();
    }

    /// Picking probe sized to the scaled quad
    fn refresh_probe(&mut self) {
        let half_extents = (self.scale.abs() * 0.5).extend(0.0).max(Vec3::splat(PROBE_MIN_HALF_EXTENT));
        self.base.set_probe(Some(PhysicsBodyDesc::probe(half_extents)));
    }

    pub fn face_camera(&self) -> bool {
        self.face_camera
    }

    pub fn set_face_camera(&mut self, face_camera: bool) {
        self.face_camera = face_camera;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_culled(&self) -> bool {
        self.culled
    }

    pub(crate) fn set_culled(&mut self, culled: bool) {
        self.culled = culled;
    }

    /// Radius of the sphere enclosing the scaled quad
    pub fn cull_radius(&self) -> f32 {
        (self.scale * 0.5).length()
    }

    /// Object-to-world transform used for drawing, including scale
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale.extend(1.0),
            self.draw_orientation,
            self.base.position(),
        )
    }

    pub fn in_frustum(&self, camera: &Camera) -> bool {
        self.visible && camera.sphere_inside_frustum(self.base.position(), self.cull_radius())
    }

    /// Take the drawing orientation, turning toward `camera` when billboarded
    pub fn pre_draw(&mut self, camera: &Camera) {
        self.draw_orientation = if self.face_camera {
            camera.base().orientation()
        } else {
            self.base.orientation()
        };
    }

    /// Draw the quad in `mode` with the same material rules as entities
    pub fn draw(&self, mode: DrawMode, params: &mut ShaderParams, device: &mut dyn GraphicsDevice) -> Result<()> {
        if !prepare_material(mode, self.material.as_deref(), params) {
            return Ok(());
        }
        params.modelview_matrix = params.camera_matrix * self.world_matrix();
        device.set_shader_params(params)?;
        device.draw(&DrawCall {
            owner: self.base.id(),
            mode,
            vertices: &QUAD_VERTICES,
            normals: &QUAD_NORMALS,
            tex_coords: &QUAD_TEX_COORDS,
            indices: &QUAD_INDICES,
        })
    }

    /// Quad outline
    pub fn draw_debug(&self, params: &mut ShaderParams, device: &mut dyn GraphicsDevice) -> Result<()> {
        draw_gizmo(params, device, self.world_matrix(), None, &QUAD_OUTLINE, self.base.is_selected())
    }
}

impl SceneActor for Sprite {
    fn base(&self) -> &ActorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActorBase {
        &mut self.base
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Sprite
    }
}

#[cfg(test)]
#[path = "sprite_tests.rs"]
mod tests;
