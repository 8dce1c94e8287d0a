/// Camera - projection, view, frustum and viewport mapping for one viewpoint.
///
/// Viewport and orthographic extents use `-1` (any value `<= 0`) for
/// "follow the window". The window size is whatever was last passed to
/// `set_window_size`; `Scene::pre_draw` keeps it current.

use glam::{Mat4, Vec3, Vec4};
use winit::dpi::PhysicalSize;
use crate::actor::{ActorBase, ActorKind, SceneActor, draw_gizmo};
use crate::config::DEFAULT_WINDOW_SIZE;
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, Rect2D, ShaderParams};
use crate::math::AABB;
use crate::physics::PhysicsBodyDesc;
use super::frustum::Frustum;

/// Half extent of the picking probe every camera carries
pub const CAMERA_PROBE_HALF_EXTENT: f32 = 0.35;

const DEFAULT_FOV: f32 = 35.0;
const DEFAULT_CLIP_NEAR: f32 = 1.0;
const DEFAULT_CLIP_FAR: f32 = 100.0;

/// Forward/up indicator drawn by the debug gizmo
const GIZMO_LINES: [Vec3; 6] = [
    Vec3::new(-1.5, 0.0, 0.0), Vec3::new(1.5, 0.0, 0.0),
    Vec3::new(0.0, -1.5, 0.0), Vec3::new(0.0, 1.5, 0.0),
    Vec3::new(0.0, 0.0, 0.5), Vec3::new(0.0, 0.0, -3.0),
];

/// Projection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone)]
pub struct Camera {
    base: ActorBase,
    mode: Projection,

    viewport_x: i32,
    viewport_y: i32,
    viewport_width: i32,
    viewport_height: i32,

    /// Vertical field of view in degrees
    fov: f32,
    /// Aspect as requested; `<= 0` derives it from the viewport
    requested_aspect: f32,
    aspect: f32,

    ortho_x: i32,
    ortho_y: i32,
    ortho_width: i32,
    ortho_height: i32,

    clip_near: f32,
    clip_far: f32,
    far_plane_width: f32,
    far_plane_height: f32,

    projection_matrix: Mat4,
    view_matrix: Mat4,
    frustum: Frustum,
    position: Vec3,
    window_size: PhysicalSize<u32>,
}

impl Camera {
    pub fn new(name: &str) -> Self {
        let mut base = ActorBase::new(name);
        base.set_probe(Some(PhysicsBodyDesc::probe(Vec3::splat(CAMERA_PROBE_HALF_EXTENT))));

        let mut camera = Self {
            base,
            mode: Projection::Perspective,
            viewport_x: 0,
            viewport_y: 0,
            viewport_width: -1,
            viewport_height: -1,
            fov: DEFAULT_FOV,
            requested_aspect: -1.0,
            aspect: -1.0,
            ortho_x: 0,
            ortho_y: 0,
            ortho_width: -1,
            ortho_height: -1,
            clip_near: DEFAULT_CLIP_NEAR,
            clip_far: DEFAULT_CLIP_FAR,
            far_plane_width: 0.0,
            far_plane_height: 0.0,
            projection_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            frustum: Frustum::from_view_projection(&Mat4::IDENTITY),
            position: Vec3::ZERO,
            window_size: DEFAULT_WINDOW_SIZE,
        };
        camera.set_perspective(DEFAULT_FOV, -1.0, DEFAULT_CLIP_NEAR, DEFAULT_CLIP_FAR);
        camera
    }

    // ===== PROJECTION =====

    /// Switch to a perspective projection.
    ///
    /// `aspect <= 0` derives the ratio from the effective viewport, always
    /// as long side over short side.
    pub fn set_perspective(&mut self, fov: f32, aspect: f32, clip_near: f32, clip_far: f32) {
        self.mode = Projection::Perspective;
        self.fov = fov;
        self.requested_aspect = aspect;
        self.clip_near = clip_near;
        self.clip_far = clip_far;
        self.rebuild_perspective();
    }

    /// Switch to an orthographic projection over `x..x+width`, `y..y+height`.
    ///
    /// `width`/`height <= 0` fall back to the window size.
    pub fn set_orthographic(&mut self, x: i32, y: i32, width: i32, height: i32, clip_near: f32, clip_far: f32) {
        self.mode = Projection::Orthographic;
        self.ortho_x = x;
        self.ortho_y = y;
        self.ortho_width = width;
        self.ortho_height = height;
        self.clip_near = clip_near;
        self.clip_far = clip_far;
        self.far_plane_width = width as f32;
        self.far_plane_height = height as f32;
        self.rebuild_orthographic();
    }

    fn rebuild_orthographic(&mut self) {
        let (x, y) = (self.ortho_x as f32, self.ortho_y as f32);
        let w = if self.ortho_width > 0 { self.ortho_width as f32 } else { self.window_size.width as f32 };
        let h = if self.ortho_height > 0 { self.ortho_height as f32 } else { self.window_size.height as f32 };
        self.projection_matrix = Mat4::orthographic_rh_gl(x, x + w, y, y + h, self.clip_near, self.clip_far);
    }

    /// True when an orthographic extent follows the window size
    fn follows_window(&self) -> bool {
        self.ortho_width <= 0 || self.ortho_height <= 0
    }

    fn rebuild_perspective(&mut self) {
        self.aspect = self.requested_aspect;
        if self.aspect <= 0.0 {
            let (w, h) = self.viewport_size();
            let (w, h) = (w.max(1) as f32, h.max(1) as f32);
            self.aspect = (w / h).max(h / w);
        }

        self.far_plane_height = 2.0 * (self.fov.to_radians() * 0.5).tan() * self.clip_far;
        self.far_plane_width = self.far_plane_height * self.aspect;

        self.projection_matrix = Mat4::perspective_rh_gl(
            self.fov.to_radians(),
            self.aspect,
            self.clip_near,
            self.clip_far,
        );
    }

    pub fn projection(&self) -> Projection {
        self.mode
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Aspect ratio in use (derived when requested as `<= 0`)
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Near and far clip distances
    pub fn clip(&self) -> (f32, f32) {
        (self.clip_near, self.clip_far)
    }

    /// Far plane extents; unset orthographic extents report the window size
    pub fn far_plane_size(&self) -> (f32, f32) {
        let mut width = self.far_plane_width;
        let mut height = self.far_plane_height;
        if width <= 0.0 {
            width = self.window_size.width as f32;
        }
        if height <= 0.0 {
            height = self.window_size.height as f32;
        }
        (width, height)
    }

    pub fn ortho_offset(&self) -> (i32, i32) {
        (self.ortho_x, self.ortho_y)
    }

    /// Orthographic extents as set (`<= 0` means window size)
    pub fn ortho_size(&self) -> (i32, i32) {
        (self.ortho_width, self.ortho_height)
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    // ===== VIEWPORT =====

    pub fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.viewport_x = x;
        self.viewport_y = y;
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Effective viewport size; unset dimensions report the window size
    pub fn viewport_size(&self) -> (u32, u32) {
        let width = if self.viewport_width > 0 { self.viewport_width as u32 } else { self.window_size.width };
        let height = if self.viewport_height > 0 { self.viewport_height as u32 } else { self.window_size.height };
        (width, height)
    }

    pub fn viewport_offset(&self) -> (i32, i32) {
        (self.viewport_x, self.viewport_y)
    }

    /// Effective viewport rectangle
    pub fn viewport(&self) -> Rect2D {
        let (width, height) = self.viewport_size();
        Rect2D { x: self.viewport_x, y: self.viewport_y, width, height }
    }

    pub fn window_size(&self) -> PhysicalSize<u32> {
        self.window_size
    }

    pub fn set_window_size(&mut self, size: PhysicalSize<u32>) {
        self.window_size = size;
    }

    // ===== PER-FRAME =====

    /// Re-derive the projection from the last-set parameters.
    ///
    /// Orthographic cameras with explicit extents keep their matrix; those
    /// following the window pick up the current window size.
    pub fn update(&mut self) {
        match self.mode {
            Projection::Perspective => self.rebuild_perspective(),
            Projection::Orthographic if self.follows_window() => self.rebuild_orthographic(),
            Projection::Orthographic => {}
        }
    }

    /// Refresh the view matrix, frustum and cached position.
    ///
    /// Must run before any culling test against this camera in a frame.
    pub fn pre_draw(&mut self) {
        self.view_matrix = self.base.world_matrix().inverse();
        self.frustum = Frustum::from_view_projection(&(self.projection_matrix * self.view_matrix));
        self.position = self.base.position();
    }

    /// World-to-view transform as of the last `pre_draw`
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// World position as of the last `pre_draw`
    pub fn cached_position(&self) -> Vec3 {
        self.position
    }

    /// Set the viewport and load this camera into the parameter block
    pub fn apply(&self, params: &mut ShaderParams, device: &mut dyn GraphicsDevice) -> Result<()> {
        let viewport = self.viewport();
        device.set_viewport(viewport)?;

        let view = self.base.world_matrix().inverse();
        params.projection_matrix = self.projection_matrix;
        params.modelview_matrix = view;
        params.camera_matrix = view;
        params.camera_position = self.base.position();
        params.clip_start = self.clip_near;
        params.clip_end = self.clip_far;
        params.viewport_width = viewport.width;
        params.viewport_height = viewport.height;
        Ok(())
    }

    // ===== SCREEN MAPPING =====

    /// World point to window coordinates (x, y in pixels, z depth in 0..1)
    pub fn project(&self, point: Vec3) -> Vec3 {
        let view = self.base.world_matrix().inverse();
        let clip = self.projection_matrix * view * point.extend(1.0);
        if clip.w == 0.0 {
            return Vec3::ZERO;
        }
        let ndc = clip.truncate() / clip.w;
        let viewport = self.viewport();
        Vec3::new(
            viewport.x as f32 + viewport.width as f32 * (ndc.x + 1.0) * 0.5,
            viewport.y as f32 + viewport.height as f32 * (ndc.y + 1.0) * 0.5,
            (ndc.z + 1.0) * 0.5,
        )
    }

    /// Window coordinates (y pointing down) back to a world point
    pub fn unproject(&self, window: Vec3) -> Vec3 {
        let viewport = self.viewport();
        let y = viewport.height as f32 - window.y;

        let ndc = Vec4::new(
            (window.x - viewport.x as f32) / viewport.width.max(1) as f32 * 2.0 - 1.0,
            (y - viewport.y as f32) / viewport.height.max(1) as f32 * 2.0 - 1.0,
            window.z * 2.0 - 1.0,
            1.0,
        );

        let inverse = (self.projection_matrix * self.base.world_matrix().inverse()).inverse();
        let world = inverse * ndc;
        if world.w == 0.0 {
            return Vec3::ZERO;
        }
        world.truncate() / world.w
    }

    // ===== CULLING =====

    pub fn aabb_inside_frustum(&self, aabb: &AABB) -> bool {
        self.frustum.intersects_aabb(aabb)
    }

    pub fn sphere_inside_frustum(&self, center: Vec3, radius: f32) -> bool {
        self.frustum.intersects_sphere(center, radius)
    }

    /// True when the camera sits inside the box grown by the near clip distance
    pub fn inside_aabb(&self, min: Vec3, max: Vec3) -> bool {
        let padded = AABB::new(min, max).padded(self.clip_near);
        let p = self.position;
        p.cmpgt(padded.min).all() && p.cmplt(padded.max).all()
    }

    /// True when the camera sits inside the box circumscribing the sphere
    pub fn inside_sphere(&self, center: Vec3, radius: f32) -> bool {
        let p = self.position;
        p.cmpgt(center - Vec3::splat(radius)).all() && p.cmplt(center + Vec3::splat(radius)).all()
    }

    // ===== DEBUG =====

    /// Frustum edges in camera-local space, as line pairs
    pub fn frustum_lines(&self) -> Vec<Vec3> {
        let (near_w, near_h, far_w, far_h) = match self.mode {
            Projection::Perspective => {
                let near_h = (self.fov.to_radians() * 0.5).tan() * self.clip_near;
                let (far_w, far_h) = self.far_plane_size();
                (near_h * self.aspect, near_h, far_w * 0.5, far_h * 0.5)
            }
            Projection::Orthographic => {
                let (w, h) = self.far_plane_size();
                (w * 0.5, h * 0.5, w * 0.5, h * 0.5)
            }
        };

        let quad = |w: f32, h: f32, z: f32| {
            [Vec3::new(-w, -h, z), Vec3::new(w, -h, z), Vec3::new(w, h, z), Vec3::new(-w, h, z)]
        };
        let near = quad(near_w, near_h, -self.clip_near);
        let far = quad(far_w, far_h, -self.clip_far);

        let mut lines = Vec::with_capacity(24);
        for i in 0..4 {
            let j = (i + 1) % 4;
            lines.extend_from_slice(&[near[i], near[j], far[i], far[j], near[i], far[i]]);
        }
        lines
    }

    /// Probe box, forward/up indicator and frustum wireframe, drawn against
    /// the camera in `params`
    pub fn draw_debug(&self, params: &mut ShaderParams, device: &mut dyn GraphicsDevice) -> Result<()> {
        let probe = AABB::from_center_half_extents(Vec3::ZERO, Vec3::splat(CAMERA_PROBE_HALF_EXTENT));
        let mut lines = GIZMO_LINES.to_vec();
        lines.extend(self.frustum_lines());
        draw_gizmo(
            params,
            device,
            self.base.world_matrix(),
            Some(&probe),
            &lines,
            self.base.is_selected(),
        )
    }
}

impl SceneActor for Camera {
    fn base(&self) -> &ActorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActorBase {
        &mut self.base
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Camera
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
