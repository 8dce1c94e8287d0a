/// Light - sun, point or spot light with distance falloff
///
/// Point and spot lights are at full strength up to `distance`, then fade
/// linearly at `fade_speed` per unit. Spot lights own a shadow camera that
/// looks down the light's -Z axis with a field of view covering the cone.

use glam::{Mat4, Vec3, Vec4};
use crate::camera::Camera;
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, LightParams, ShaderParams};
use super::{ActorBase, ActorKind, SceneActor, axis_lines, draw_gizmo};

const DEFAULT_DISTANCE: f32 = 30.0;
const DEFAULT_FADE_SPEED: f32 = 1.0 / 30.0;
const DEFAULT_INNER_CONE: f32 = 30.0;
const DEFAULT_OUTER_CONE: f32 = 15.0;
const SHADOW_CLIP_NEAR: f32 = 1.0;

/// Light type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightType {
    /// Directional, no falloff
    Sun,
    Point,
    Spot,
}

#[derive(Debug, Clone)]
pub struct Light {
    base: ActorBase,
    light_type: LightType,
    color: Vec4,
    distance: f32,
    fade_speed: f32,
    /// Full-strength cone half angle in degrees
    inner_cone: f32,
    /// Falloff band beyond the inner cone, in degrees
    outer_cone: f32,
    shadows: bool,
    visible: bool,
    shadow_camera: Option<Camera>,
    shadow_matrix: Mat4,
}

impl Light {
    pub fn new(name: &str, light_type: LightType) -> Self {
        let mut light = Self {
            base: ActorBase::new(name),
            light_type: LightType::Point,
            color: Vec4::ONE,
            distance: DEFAULT_DISTANCE,
            fade_speed: DEFAULT_FADE_SPEED,
            inner_cone: DEFAULT_INNER_CONE,
            outer_cone: DEFAULT_OUTER_CONE,
            shadows: false,
            visible: true,
            shadow_camera: None,
            shadow_matrix: Mat4::IDENTITY,
        };
        light.set_light_type(light_type);
        light
    }

    // ===== PROPERTIES =====

    pub fn light_type(&self) -> LightType {
        self.light_type
    }

    /// Change the type; spot lights get a shadow camera, others drop it
    pub fn set_light_type(&mut self, light_type: LightType) {
        self.light_type = light_type;
        if light_type == LightType::Spot {
            if self.shadow_camera.is_none() {
                let name = format!("{}_shadow", self.base.name());
                self.shadow_camera = Some(Camera::new(&name));
            }
            self.refresh_shadow_projection();
        } else {
            self.shadow_camera = None;
        }
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.max(0.0);
        self.refresh_shadow_projection();
    }

    pub fn fade_speed(&self) -> f32 {
        self.fade_speed
    }

    pub fn set_fade_speed(&mut self, fade_speed: f32) {
        self.fade_speed = fade_speed.max(0.0);
        self.refresh_shadow_projection();
    }

    /// Inner and outer cone angles in degrees
    pub fn cone(&self) -> (f32, f32) {
        (self.inner_cone, self.outer_cone)
    }

    pub fn set_cone(&mut self, inner_cone: f32, outer_cone: f32) {
        self.inner_cone = inner_cone.max(0.0);
        self.outer_cone = outer_cone.max(0.0);
        self.refresh_shadow_projection();
    }

    pub fn shadows(&self) -> bool {
        self.shadows
    }

    pub fn set_shadows(&mut self, shadows: bool) {
        self.shadows = shadows;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // ===== SHADOWS =====

    /// Shadow camera, present on spot lights only
    pub fn shadow_camera(&self) -> Option<&Camera> {
        self.shadow_camera.as_ref()
    }

    pub(crate) fn shadow_camera_mut(&mut self) -> Option<&mut Camera> {
        self.shadow_camera.as_mut()
    }

    /// Bias-adjusted light-space matrix used to sample the shadow map,
    /// taking view-space positions of the main camera
    pub fn shadow_matrix(&self) -> &Mat4 {
        &self.shadow_matrix
    }

    pub(crate) fn set_shadow_matrix(&mut self, matrix: Mat4) {
        self.shadow_matrix = matrix;
    }

    /// Distance at which the falloff reaches zero
    pub fn reach(&self) -> f32 {
        if self.fade_speed > 0.0 {
            self.distance + 1.0 / self.fade_speed
        } else {
            f32::MAX
        }
    }

    fn refresh_shadow_projection(&mut self) {
        let fov = ((self.inner_cone + self.outer_cone) * 2.0).clamp(1.0, 179.0);
        let far = self.reach().min(1.0e6).max(SHADOW_CLIP_NEAR * 2.0);
        if let Some(camera) = &mut self.shadow_camera {
            camera.set_perspective(fov, 1.0, SHADOW_CLIP_NEAR, far);
        }
    }

    /// Move the shadow camera onto the light and refresh its frustum
    pub fn pre_draw(&mut self) {
        let (position, orientation) = (self.base.position(), self.base.orientation());
        if let Some(camera) = &mut self.shadow_camera {
            camera.base_mut().set_position(position);
            camera.base_mut().set_orientation(orientation);
            camera.pre_draw();
        }
    }

    // ===== LIGHTING =====

    /// True when any part of a sphere gets light from this light.
    ///
    /// Sun lights reach everything. Cones are not tested here.
    pub fn reaches(&self, center: Vec3, radius: f32) -> bool {
        if self.light_type == LightType::Sun {
            return true;
        }
        let dist = (center - self.base.position()).length() - radius;
        1.0 - (dist - self.distance).max(0.0) * self.fade_speed > 0.0
    }

    /// Load this light into `params`, in the view space of `params.camera_matrix`
    pub fn apply(&self, params: &mut ShaderParams) {
        let view = params.camera_matrix;
        params.light = Some(LightParams {
            light_type: self.light_type,
            position: view.transform_point3(self.base.position()),
            direction: view.transform_vector3(self.base.direction()).normalize_or_zero(),
            color: self.color,
            distance: self.distance,
            fade_speed: self.fade_speed,
            inner_cone_cos: self.inner_cone.to_radians().cos(),
            outer_cone_cos: (self.inner_cone + self.outer_cone).to_radians().cos(),
        });
    }

    // ===== DEBUG =====

    /// Position cross, plus a direction line for sun and spot lights
    pub fn draw_debug(&self, params: &mut ShaderParams, device: &mut dyn GraphicsDevice) -> Result<()> {
        let mut lines = axis_lines(0.5).to_vec();
        if self.light_type != LightType::Point {
            lines.extend_from_slice(&[Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0)]);
        }
        draw_gizmo(params, device, self.base.world_matrix(), None, &lines, self.base.is_selected())
    }
}

impl SceneActor for Light {
    fn base(&self) -> &ActorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActorBase {
        &mut self.base
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Light
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
