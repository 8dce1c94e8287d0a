use glam::Vec3;
use crate::actor::{Light, LightType, SceneActor, GIZMO_COLOR, SELECTED_COLOR};
use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::graphics_device::ShaderParams;
use crate::graphics_device::mock_graphics_device::{DeviceCommand, MockGraphicsDevice};
use crate::scene::test_fixtures::{box_entity, eye};
use super::*;

fn line_counts(device: &MockGraphicsDevice) -> Vec<usize> {
    device.commands.iter()
        .filter_map(|c| match c {
            DeviceCommand::DrawLines { count, .. } => Some(*count),
            _ => None,
        })
        .collect()
}

fn box_count(device: &MockGraphicsDevice) -> usize {
    device.commands.iter().filter(|c| matches!(c, DeviceCommand::DrawBoundingBox { .. })).count()
}

// ============================================================================
// Tests: draw_debug
// ============================================================================

#[test]
fn test_debug_draw_without_camera_is_noop() {
    let mut scene = Scene::new("debug");
    scene.add_entity(box_entity("box", Vec3::new(0.0, 0.0, -10.0)));
    let mut device = MockGraphicsDevice::new();

    scene.draw_debug(&mut device).unwrap();
    assert!(device.commands.is_empty());
}

#[test]
fn test_debug_draw_order_and_skips_active_camera() {
    let mut scene = Scene::new("debug");
    scene.add_camera(eye());
    scene.add_camera(Camera::new("spectator"));
    scene.add_entity(box_entity("box", Vec3::new(0.0, 0.0, -10.0)));
    scene.add_light(Light::new("bulb", LightType::Point));
    scene.pre_draw(&RenderConfig::default());
    let mut device = MockGraphicsDevice::new();

    scene.draw_debug(&mut device).unwrap();

    // Entity axes, point light cross, then the spectator's gizmo and frustum
    assert_eq!(line_counts(&device), vec![6, 6, 30]);
    // Entity bounds and the spectator's probe box
    assert_eq!(box_count(&device), 2);
}

#[test]
fn test_debug_draw_ignores_culling() {
    let mut scene = Scene::new("debug");
    scene.add_camera(eye());
    scene.add_entity(box_entity("behind", Vec3::new(0.0, 0.0, 10.0)));
    let mut device = MockGraphicsDevice::new();

    scene.draw_debug(&mut device).unwrap();
    assert_eq!(box_count(&device), 1);
    assert!(scene.entity_queue().is_empty());
}

#[test]
fn test_debug_draw_highlights_selection() {
    let mut scene = Scene::new("debug");
    scene.add_camera(eye());
    let mut entity = box_entity("picked", Vec3::new(0.0, 0.0, -10.0));
    entity.base_mut().set_selected(true);
    scene.add_entity(entity);
    let mut sun = Light::new("sun", LightType::Sun);
    sun.base_mut().set_selected(false);
    scene.add_light(sun);
    let mut device = MockGraphicsDevice::new();

    scene.draw_debug(&mut device).unwrap();

    let colors: Vec<_> = device.commands.iter()
        .filter_map(|c| match c {
            DeviceCommand::DrawLines { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(colors, vec![SELECTED_COLOR, GIZMO_COLOR]);
    assert_eq!(line_counts(&device), vec![6, 8]);
}

#[test]
fn test_debug_draw_resets_params() {
    let mut scene = Scene::new("debug");
    scene.add_camera(eye());
    scene.add_entity(box_entity("box", Vec3::new(0.0, 0.0, -10.0)));
    let mut device = MockGraphicsDevice::new();

    scene.draw_debug(&mut device).unwrap();
    assert_eq!(*scene.shader_params(), ShaderParams::default());
}

#[test]
fn test_debug_gizmos_ignore_depth() {
    let mut scene = Scene::new("debug");
    scene.add_camera(eye());
    scene.add_entity(box_entity("box", Vec3::new(0.0, 0.0, -10.0)));
    let mut device = MockGraphicsDevice::new();

    scene.draw_debug(&mut device).unwrap();

    let render = device.commands.iter().find_map(|c| match c {
        DeviceCommand::DrawBoundingBox { render, .. } => Some(*render),
        _ => None,
    }).unwrap();
    assert!(!render.depth_test);
    assert!(!render.depth_write);
}
