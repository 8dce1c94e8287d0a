//! Shared builders for the scene unit tests

use std::sync::Arc;
use glam::Vec3;
use crate::actor::{Entity, SceneActor};
use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::resource::{Model, ModelDesc};
use super::Scene;

/// Axis-aligned box model spanning `-half..half`
pub(crate) fn box_model(name: &str, half: f32) -> Arc<Model> {
    cuboid_model(name, Vec3::splat(half))
}

/// Axis-aligned box model with per-axis half extents
pub(crate) fn cuboid_model(name: &str, half: Vec3) -> Arc<Model> {
    let Vec3 { x, y, z } = half;
    let vertices = vec![
        Vec3::new(-x, -y, -z), Vec3::new(x, -y, -z), Vec3::new(x, y, -z), Vec3::new(-x, y, -z),
        Vec3::new(-x, -y, z), Vec3::new(x, -y, z), Vec3::new(x, y, z), Vec3::new(-x, y, z),
    ];
    let area = vec![
        0, 2, 1, 0, 3, 2,
        4, 5, 6, 4, 6, 7,
        0, 1, 5, 0, 5, 4,
        2, 3, 7, 2, 7, 6,
        1, 2, 6, 1, 6, 5,
        0, 4, 7, 0, 7, 3,
    ];
    Arc::new(Model::from_desc(ModelDesc {
        name: name.to_string(),
        vertices,
        areas: vec![area],
        ..Default::default()
    }).unwrap())
}

/// Unit box entity at `position`
pub(crate) fn box_entity(name: &str, position: Vec3) -> Entity {
    let mut entity = Entity::new(name);
    entity.set_model(Some(box_model(name, 0.5)));
    entity.base_mut().set_position(position);
    entity
}

/// Camera at the origin looking down -Z
pub(crate) fn eye() -> Camera {
    Camera::new("eye")
}

/// pre_draw then draw
pub(crate) fn frame(scene: &mut Scene, config: &RenderConfig, device: &mut MockGraphicsDevice) -> Result<()> {
    scene.pre_draw(config);
    scene.draw(config, device)
}
