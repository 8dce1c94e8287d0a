/// Scene draw pass - forward lighting over the per-frame visibility queues
///
/// Every stage starts from a reset parameter block and the active camera,
/// then overrides only the state it needs. Stages: depth pre-pass (rebuilds
/// the queues), occlusion queries, ambient, unlit, one additive pass per
/// light, particles.

use glam::{Mat4, Vec3};
use crate::actor::{Entity, Light, LightType, SceneActor, Sprite};
use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::graphics_device::{
    BlendMode, CompareOp, DrawMode, GraphicsDevice, ShaderParams, TextureKind, TextureParams,
    TextureProjection, WriteMask, SHADOW_MAP_SLOT,
};
use crate::math::about_zero;
use super::{ActorList, EntityKey, Scene, SpriteKey};

/// Clip space (-1..1) to shadow map space (0..1)
const SHADOW_BIAS: Mat4 = Mat4::from_cols_array(&[
    0.5, 0.0, 0.0, 0.0,
    0.0, 0.5, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.5, 0.5, 0.5, 1.0,
]);

/// Polygon offset pulling occlusion boxes in front of the pre-pass depth
const OCCLUSION_OFFSET: (f32, f32) = (-1.0, -1.0);

/// Polygon offset pushing shadow casters back against acne
const SHADOW_OFFSET: (f32, f32) = (2.0, 4.0);

impl Scene {
    /// Draw the frame through the active camera.
    ///
    /// A scene without an active camera draws nothing. `pre_draw` must have
    /// run for this frame.
    pub fn draw(&mut self, config: &RenderConfig, device: &mut dyn GraphicsDevice) -> Result<()> {
        let ambient = self.ambient_color();
        let Scene {
            cameras, entities, lights, particles, sprites,
            active_camera, entity_queue, sprite_queue,
            shader_params: params,
            ..
        } = self;

        let Some(camera) = active_camera.and_then(|key| cameras.get(key)) else {
            return Ok(());
        };

        // Depth pre-pass
        begin_stage(params, camera, device)?;
        params.render.write_mask = WriteMask::empty();

        entity_queue.begin();
        for (key, entity) in entities.iter_mut() {
            let visible = entity.in_frustum(camera);
            entity.set_culled(!visible);
            if visible {
                entity_queue.push(key);
                entity.draw(DrawMode::Depth, params, device)?;
            }
        }
        sprite_queue.begin();
        for (key, sprite) in sprites.iter_mut() {
            let visible = sprite.in_frustum(camera);
            sprite.set_culled(!visible);
            if visible {
                sprite_queue.push(key);
                sprite.draw(DrawMode::Depth, params, device)?;
            }
        }

        // Occlusion queries, read back in the light passes below
        if config.occlusion_culling {
            begin_stage(params, camera, device)?;
            params.render.depth_write = false;
            params.render.depth_func = CompareOp::LessOrEqual;
            params.render.write_mask = WriteMask::empty();
            params.render.cull_face = false;
            (params.render.offset_bias, params.render.offset_scale) = OCCLUSION_OFFSET;

            for &key in entity_queue.live() {
                let Some(entity) = entities.get_mut(key) else {
                    continue;
                };
                let query = match entity.occlusion_query() {
                    Some(query) => query,
                    None => {
                        let query = device.create_query()?;
                        entity.set_occlusion_query(query);
                        query
                    }
                };

                params.modelview_matrix = params.camera_matrix * entity.base().world_matrix();
                device.set_shader_params(params)?;
                device.begin_query(query)?;
                let bounds = entity.bounds();
                device.draw_bounding_box(bounds.min, bounds.max)?;
                device.end_query()?;
            }
        }

        // Ambient
        if !(about_zero(ambient.x) && about_zero(ambient.y) && about_zero(ambient.z)) {
            begin_stage(params, camera, device)?;
            set_additive(params);
            params.ambient_color = ambient;
            draw_queued(DrawMode::Ambient, entity_queue.live(), entities, sprite_queue.live(), sprites, params, device)?;
        }

        // Unlit
        begin_stage(params, camera, device)?;
        set_additive(params);
        draw_queued(DrawMode::WithoutLighting, entity_queue.live(), entities, sprite_queue.live(), sprites, params, device)?;

        // Lights, in list order
        for light in lights.values_mut() {
            if !light.is_visible() {
                continue;
            }

            let shadowed = light.light_type() == LightType::Spot && light.shadows();
            if let Some(shadow_camera) = light.shadow_camera() {
                let touches_queue = entity_queue.live().iter()
                    .filter_map(|key| entities.get(*key))
                    .any(|entity| entity.in_frustum(shadow_camera))
                    || sprite_queue.live().iter()
                        .filter_map(|key| sprites.get(*key))
                        .any(|sprite| sprite.in_frustum(shadow_camera));
                if !touches_queue {
                    continue;
                }

                if shadowed {
                    let matrix = render_shadow_map(shadow_camera, camera, entities, sprites, params, config, device)?;
                    light.set_shadow_matrix(matrix);
                }
            }

            begin_stage(params, camera, device)?;
            set_additive(params);
            light.apply(params);
            if shadowed {
                params.textures[SHADOW_MAP_SLOT] = TextureParams {
                    kind: TextureKind::ShadowMap,
                    texture: Some(config.shadow_map),
                    projection: TextureProjection::Shadow,
                    matrix: *light.shadow_matrix(),
                };
            }

            for &key in entity_queue.live() {
                let Some(entity) = entities.get_mut(key) else {
                    continue;
                };
                let center = entity.world_center();
                let radius = entity.cull_radius();

                if config.occlusion_culling
                    && !occlusion_passed(entity, device)?
                    && !camera.inside_sphere(center, radius)
                {
                    entity.set_culled(true);
                    continue;
                }
                let entity = &*entity;
                if !lit_by(light, center, radius, |shadow| entity.in_frustum(shadow)) {
                    continue;
                }
                entity.draw(DrawMode::WithLighting, params, device)?;
            }

            for &key in sprite_queue.live() {
                let Some(sprite) = sprites.get(key) else {
                    continue;
                };
                let center = sprite.base().position();
                if !lit_by(light, center, sprite.cull_radius(), |shadow| sprite.in_frustum(shadow)) {
                    continue;
                }
                sprite.draw(DrawMode::WithLighting, params, device)?;
            }
        }

        // Particles
        begin_stage(params, camera, device)?;
        params.render.depth_func = CompareOp::LessOrEqual;
        params.render.depth_write = false;
        for system in particles.values_mut() {
            let visible = system.in_frustum(camera);
            system.set_culled(!visible);
            if visible {
                system.draw(params, device)?;
            }
        }

        params.reset();
        entity_queue.trim();
        sprite_queue.trim();
        Ok(())
    }
}

/// Reset the parameter block and load `camera` into it
pub(super) fn begin_stage(
    params: &mut ShaderParams,
    camera: &Camera,
    device: &mut dyn GraphicsDevice,
) -> Result<()> {
    params.reset();
    camera.apply(params, device)
}

/// Depth equal to the pre-pass, no depth write, additive blend
fn set_additive(params: &mut ShaderParams) {
    params.render.depth_func = CompareOp::Equal;
    params.render.depth_write = false;
    params.render.blend_mode = BlendMode::Add;
}

fn draw_queued(
    mode: DrawMode,
    entity_keys: &[EntityKey],
    entities: &ActorList<EntityKey, Entity>,
    sprite_keys: &[SpriteKey],
    sprites: &ActorList<SpriteKey, Sprite>,
    params: &mut ShaderParams,
    device: &mut dyn GraphicsDevice,
) -> Result<()> {
    for entity in entity_keys.iter().filter_map(|key| entities.get(*key)) {
        entity.draw(mode, params, device)?;
    }
    for sprite in sprite_keys.iter().filter_map(|key| sprites.get(*key)) {
        sprite.draw(mode, params, device)?;
    }
    Ok(())
}

/// Depth-only render of every caster inside the shadow frustum.
///
/// Returns the matrix taking view-space positions of `view_camera` into
/// shadow map space.
fn render_shadow_map(
    shadow_camera: &Camera,
    view_camera: &Camera,
    entities: &ActorList<EntityKey, Entity>,
    sprites: &ActorList<SpriteKey, Sprite>,
    params: &mut ShaderParams,
    config: &RenderConfig,
    device: &mut dyn GraphicsDevice,
) -> Result<Mat4> {
    let previous = device.render_target();
    device.set_render_target(Some(config.shadow_target))?;
    device.clear_depth_buffer(1.0)?;

    begin_stage(params, shadow_camera, device)?;
    params.render.write_mask = WriteMask::empty();
    (params.render.offset_bias, params.render.offset_scale) = SHADOW_OFFSET;

    for entity in entities.values().filter(|e| e.in_frustum(shadow_camera)) {
        entity.draw(DrawMode::Depth, params, device)?;
    }
    for sprite in sprites.values().filter(|s| s.in_frustum(shadow_camera)) {
        sprite.draw(DrawMode::Depth, params, device)?;
    }

    device.set_render_target(previous)?;

    Ok(SHADOW_BIAS
        * *shadow_camera.projection_matrix()
        * *shadow_camera.view_matrix()
        * view_camera.view_matrix().inverse())
}

/// Entities without a query yet count as visible
fn occlusion_passed(entity: &Entity, device: &mut dyn GraphicsDevice) -> Result<bool> {
    match entity.occlusion_query() {
        Some(query) => Ok(device.query_result(query)? > 0),
        None => Ok(true),
    }
}

/// Per-type light reach: suns always, points by falloff, spots by shadow frustum
fn lit_by(light: &Light, center: Vec3, radius: f32, in_shadow_frustum: impl FnOnce(&Camera) -> bool) -> bool {
    match light.light_type() {
        LightType::Sun => true,
        LightType::Point => light.reaches(center, radius),
        LightType::Spot => light.shadow_camera().is_some_and(in_shadow_frustum),
    }
}

#[cfg(test)]
#[path = "draw_tests.rs"]
mod tests;
