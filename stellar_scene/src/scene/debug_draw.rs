/// Scene debug pass - gizmos for every actor, seen through the active camera

use crate::error::Result;
use crate::graphics_device::GraphicsDevice;
use super::draw::begin_stage;
use super::Scene;

impl Scene {
    /// Draw entity, particle, sprite and light gizmos, then the frusta of the
    /// non-active cameras. Independent of the visibility queues.
    pub fn draw_debug(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        let Scene {
            cameras, entities, lights, particles, sprites,
            active_camera,
            shader_params: params,
            ..
        } = self;

        let Some(active) = *active_camera else {
            return Ok(());
        };
        let Some(camera) = cameras.get(active) else {
            return Ok(());
        };

        begin_stage(params, camera, device)?;
        for entity in entities.values() {
            entity.draw_debug(params, device)?;
        }

        begin_stage(params, camera, device)?;
        for system in particles.values() {
            system.draw_debug(params, device)?;
        }

        begin_stage(params, camera, device)?;
        for sprite in sprites.values() {
            sprite.draw_debug(params, device)?;
        }

        begin_stage(params, camera, device)?;
        for light in lights.values() {
            light.draw_debug(params, device)?;
        }

        begin_stage(params, camera, device)?;
        for (_, other) in cameras.iter().filter(|(key, _)| *key != active) {
            other.draw_debug(params, device)?;
        }

        params.reset();
        Ok(())
    }
}

#[cfg(test)]
#[path = "debug_draw_tests.rs"]
mod tests;
