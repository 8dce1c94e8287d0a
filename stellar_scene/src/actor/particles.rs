/// Particles - an emitter simulating point particles in world space
///
/// Particles spawn at the actor position at `spawn_rate` per second, with a
/// velocity picked between `velocity_min` and `velocity_max` (in the actor's
/// local frame). They fall under `gravity` and die after `life_span` seconds.
/// Without a model each particle is drawn as a camera-facing quad.

use std::sync::Arc;
use glam::{Mat4, Vec3};
use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;
use crate::camera::Camera;
use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, DrawCall, DrawMode, ShaderParams, TextureKind, TextureParams, BlendMode,
};
use crate::math::AABB;
use crate::resource::{Model, Texture};
use super::{ActorBase, ActorKind, SceneActor, axis_lines, draw_gizmo};

const DEFAULT_MAX_COUNT: usize = 100;
const DEFAULT_SPAWN_RATE: f32 = 10.0;
const DEFAULT_LIFE_SPAN: f32 = 2.0;
const DEFAULT_SIZE: f32 = 0.5;
const DEFAULT_SEED: u64 = 0x9E37_79B9;

/// One simulated particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds left before the particle dies
    pub life: f32,
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct Particles {
    base: ActorBase,
    max_count: usize,
    spawn_rate: f32,
    spawn: bool,
    life_span: f32,
    velocity_min: Vec3,
    velocity_max: Vec3,
    gravity: Vec3,
    size: f32,
    blend_mode: BlendMode,
    model: Option<Arc<Model>>,
    texture: Option<Arc<Texture>>,
    visible: bool,
    culled: bool,

    particles: Vec<Particle>,
    spawn_accumulator: f32,
    rng: SmallRng,

    // Billboard geometry rebuilt by pre_draw
    vertices: Vec<f32>,
    normals: Vec<f32>,
    tex_coords: Vec<f32>,
    indices: Vec<u32>,
    bounds: AABB,
}

impl Particles {
    pub fn new(name: &str) -> Self {
        Self {
            base: ActorBase::new(name),
            max_count: DEFAULT_MAX_COUNT,
            spawn_rate: DEFAULT_SPAWN_RATE,
            spawn: true,
            life_span: DEFAULT_LIFE_SPAN,
            velocity_min: Vec3::new(-0.5, 1.0, -0.5),
            velocity_max: Vec3::new(0.5, 2.0, 0.5),
            gravity: Vec3::ZERO,
            size: DEFAULT_SIZE,
            blend_mode: BlendMode::Add,
            model: None,
            texture: None,
            visible: true,
            culled: true,
            particles: Vec::new(),
            spawn_accumulator: 0.0,
            rng: SmallRng::seed_from_u64(DEFAULT_SEED),
            vertices: Vec::new(),
            normals: Vec::new(),
            tex_coords: Vec::new(),
            indices: Vec::new(),
            bounds: AABB::new(Vec3::ZERO, Vec3::ZERO),
        }
    }

    // ===== EMITTER =====

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Set the particle cap; live particles beyond it are dropped
    pub fn set_max_count(&mut self, max_count: usize) {
        self.max_count = max_count;
        self.particles.truncate(max_count);
    }

    pub fn spawn_rate(&self) -> f32 {
        self.spawn_rate
    }

    pub fn set_spawn_rate(&mut self, per_second: f32) {
        self.spawn_rate = per_second.max(0.0);
    }

    pub fn is_spawning(&self) -> bool {
        self.spawn
    }

    pub fn set_spawning(&mut self, spawn: bool) {
        self.spawn = spawn;
    }

    pub fn life_span(&self) -> f32 {
        self.life_span
    }

    pub fn set_life_span(&mut self, seconds: f32) {
        self.life_span = seconds.max(0.0);
    }

    pub fn velocity_range(&self) -> (Vec3, Vec3) {
        (self.velocity_min, self.velocity_max)
    }

    pub fn set_velocity_range(&mut self, min: Vec3, max: Vec3) {
        self.velocity_min = min.min(max);
        self.velocity_max = min.max(max);
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size.max(0.0);
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) {
        self.blend_mode = blend_mode;
    }

    /// Reseed the emitter's random sequence
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    // ===== RESOURCES =====

    pub fn model(&self) -> Option<&Arc<Model>> {
        self.model.as_ref()
    }

    /// Instance a model per particle instead of drawing quads
    pub fn set_model(&mut self, model: Option<Arc<Model>>) {
        self.model = model;
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Option<Arc<Texture>>) {
        self.texture = texture;
    }

    // ===== SIMULATION =====

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Age, move and spawn particles
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        for particle in &mut self.particles {
            particle.life -= dt;
            particle.velocity += self.gravity * dt;
            particle.position += particle.velocity * dt;
        }
        self.particles.retain(|p| p.life > 0.0);

        if !self.spawn || self.life_span <= 0.0 {
            self.spawn_accumulator = 0.0;
            return;
        }

        self.spawn_accumulator += self.spawn_rate * dt;
        let due = self.spawn_accumulator.floor();
        self.spawn_accumulator = if due.is_finite() { self.spawn_accumulator - due } else { 0.0 };

        let room = self.max_count.saturating_sub(self.particles.len());
        let count = (due as usize).min(room);
        let (min, max) = (self.velocity_min, self.velocity_max);
        for _ in 0..count {
            let local = Vec3::new(
                self.rng.gen_range(min.x..=max.x),
                self.rng.gen_range(min.y..=max.y),
                self.rng.gen_range(min.z..=max.z),
            );
            self.particles.push(Particle {
                position: self.base.position(),
                velocity: self.base.orientation() * local,
                life: self.life_span,
                size: self.size,
            });
        }
    }

    // ===== VISIBILITY =====

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

    /// World-space bounds of the live particles as of the last `pre_draw`
    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    pub fn in_frustum(&self, camera: &Camera) -> bool {
        self.visible && !self.particles.is_empty() && camera.aabb_inside_frustum(&self.bounds)
    }

    /// Refresh the bounds and rebuild the billboards facing `camera`
    pub fn pre_draw(&mut self, camera: &Camera) {
        let half = self.particles.iter().fold(0.0f32, |m, p| m.max(p.size * 0.5));
        let points: Vec<Vec3> = self.particles.iter().map(|p| p.position).collect();
        self.bounds = AABB::from_points(&points)
            .map(|b| b.padded(half))
            .unwrap_or_else(|| AABB::new(self.base.position(), self.base.position()));

        self.vertices.clear();
        self.normals.clear();
        self.tex_coords.clear();
        self.indices.clear();
        if self.model.is_some() {
            return;
        }

        let orientation = camera.base().orientation();
        let (right, up, back) = (orientation * Vec3::X, orientation * Vec3::Y, orientation * Vec3::Z);
        for (i, p) in self.particles.iter().enumerate() {
            let (r, u) = (right * p.size * 0.5, up * p.size * 0.5);
            for corner in [p.position - r - u, p.position + r - u, p.position + r + u, p.position - r + u] {
                self.vertices.extend_from_slice(&corner.to_array());
                self.normals.extend_from_slice(&back.to_array());
            }
            self.tex_coords.extend_from_slice(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
            let first = (i * 4) as u32;
            self.indices.extend_from_slice(&[first, first + 1, first + 2, first, first + 2, first + 3]);
        }
    }

    // ===== DRAWING =====

    /// Draw every live particle in `DrawMode::Particles`.
    ///
    /// `params` must hold the camera and the stage's depth state.
    pub fn draw(&self, params: &mut ShaderParams, device: &mut dyn GraphicsDevice) -> Result<()> {
        if self.particles.is_empty() {
            return Ok(());
        }

        params.render.blend_mode = self.blend_mode;
        params.material.lighting = false;
        params.clear_material_textures();
        if let Some(texture) = &self.texture {
            params.textures[0] = TextureParams {
                kind: TextureKind::ColorMap,
                texture: texture.gpu_texture(),
                ..Default::default()
            };
        }

        let Some(model) = &self.model else {
            if self.indices.is_empty() {
                return Ok(());
            }
            params.modelview_matrix = params.camera_matrix;
            device.set_shader_params(params)?;
            return device.draw(&DrawCall {
                owner: self.base.id(),
                mode: DrawMode::Particles,
                vertices: &self.vertices,
                normals: &self.normals,
                tex_coords: &self.tex_coords,
                indices: &self.indices,
            });
        };

        for particle in &self.particles {
            let world = Mat4::from_scale_rotation_translation(
                Vec3::splat(particle.size),
                self.base.orientation(),
                particle.position,
            );
            params.modelview_matrix = params.camera_matrix * world;
            device.set_shader_params(params)?;
            for area in 0..model.area_count() {
                let Some(indices) = model.area_indices(area).filter(|i| !i.is_empty()) else {
                    continue;
                };
                device.draw(&DrawCall {
                    owner: self.base.id(),
                    mode: DrawMode::Particles,
                    vertices: model.vertex_data(),
                    normals: model.normal_data(),
                    tex_coords: model.tex_coord_data(),
                    indices,
                })?;
            }
        }
        Ok(())
    }

    /// Emitter axes, plus the particle bounds when any are alive
    pub fn draw_debug(&self, params: &mut ShaderParams, device: &mut dyn GraphicsDevice) -> Result<()> {
        let selected = self.base.is_selected();
        if !self.particles.is_empty() {
            draw_gizmo(params, device, Mat4::IDENTITY, Some(&self.bounds), &[], selected)?;
        }
        draw_gizmo(params, device, self.base.world_matrix(), None, &axis_lines(0.5), selected)
    }
}

impl SceneActor for Particles {
    fn base(&self) -> &ActorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActorBase {
        &mut self.base
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Particles
    }
}

#[cfg(test)]
#[path = "particles_tests.rs"]
mod tests;
