use glam::{Quat, Vec3};
use crate::graphics_device::mock_graphics_device::{MockGraphicsDevice, DeviceCommand};
use crate::resource::{MaterialDesc, ModelDesc, Resource, TextureDesc, Texture};
use super::*;

fn cube_model() -> Arc<Model> {
    Arc::new(Model::from_desc(ModelDesc {
        name: "cube".to_string(),
        vertices: vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 2.0),
            Vec3::new(-1.0, 1.0, 2.0),
        ],
        areas: vec![vec![0, 1, 2], vec![0, 2, 3]],
        ..Default::default()
    }).unwrap())
}

fn light_mapped() -> Arc<Material> {
    Arc::new(Material::from_desc(MaterialDesc {
        name: "lm".to_string(),
        light_map: Some(Arc::new(Texture::from_desc(TextureDesc::default()))),
        ..Default::default()
    }))
}

// ============================================================================
// Tests: bounds
// ============================================================================

#[test]
fn test_set_model_derives_bounds() {
    let mut entity = Entity::new("e");
    entity.set_model(Some(cube_model()));

    assert_eq!(entity.bounds(), AABB::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 2.0)));
    assert_eq!(entity.bb_offset(), Vec3::new(0.0, 0.0, 1.0));
    assert!((entity.cull_radius() - 3.0f32.sqrt()).abs() < 1e-5);
    assert!(entity.base().probe().is_some());
}

#[test]
fn test_scale_grows_bounds() {
    let mut entity = Entity::new("e");
    entity.set_model(Some(cube_model()));
    entity.set_scale(Vec3::splat(2.0));
    assert_eq!(entity.bounds().max, Vec3::new(2.0, 2.0, 4.0));
    assert_eq!(entity.bb_offset(), Vec3::new(0.0, 0.0, 2.0));
}

#[test]
fn test_world_center_rotates_offset() {
    let mut entity = Entity::new("e");
    entity.set_model(Some(cube_model()));
    entity.base_mut().set_position(Vec3::new(10.0, 0.0, 0.0));
    entity.base_mut().set_orientation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2));
    let center = entity.world_center();
    assert!((center - Vec3::new(10.0, -1.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_clearing_model_resets_bounds() {
    let mut entity = Entity::new("e");
    entity.set_model(Some(cube_model()));
    entity.set_model(None);
    assert_eq!(entity.cull_radius(), 0.0);
    assert!(entity.base().probe().is_none());
}

// ============================================================================
// Tests: materials
// ============================================================================

#[test]
fn test_material_list_edits() {
    let mut entity = Entity::new("e");
    let a = Arc::new(Material::new("a"));
    let b = Arc::new(Material::new("b"));
    entity.add_material(a.clone());
    assert!(entity.set_material(0, b.clone()));
    assert!(!entity.set_material(3, a.clone()));
    assert_eq!(entity.material(0).unwrap().name(), "b");
    assert!(entity.remove_material(0).is_some());
    assert!(entity.remove_material(0).is_none());
}

// ============================================================================
// Tests: frustum
// ============================================================================

#[test]
fn test_in_frustum_requires_model_and_visibility() {
    let mut camera = Camera::new("cam");
    camera.pre_draw();

    let mut entity = Entity::new("e");
    entity.base_mut().set_position(Vec3::new(0.0, 0.0, -10.0));
    assert!(!entity.in_frustum(&camera));

    entity.set_model(Some(cube_model()));
    assert!(entity.in_frustum(&camera));

    entity.set_visible(false);
    assert!(!entity.in_frustum(&camera));

    entity.set_visible(true);
    entity.base_mut().set_position(Vec3::new(0.0, 0.0, 50.0));
    assert!(!entity.in_frustum(&camera));
}

// ============================================================================
// Tests: draw
// ============================================================================

#[test]
fn test_draw_one_call_per_area() {
    let mut entity = Entity::new("e");
    entity.set_model(Some(cube_model()));
    let mut device = MockGraphicsDevice::new();
    let mut params = ShaderParams::default();

    entity.draw(DrawMode::Depth, &mut params, &mut device).unwrap();
    assert_eq!(device.draw_count(entity.id(), DrawMode::Depth), 2);
}

#[test]
fn test_unlit_pass_only_draws_unlit_areas() {
    let mut entity = Entity::new("e");
    entity.set_model(Some(cube_model()));
    entity.add_material(Arc::new(Material::new("lit")));
    entity.add_material(light_mapped());
    let mut device = MockGraphicsDevice::new();
    let mut params = ShaderParams::default();

    entity.draw(DrawMode::WithoutLighting, &mut params, &mut device).unwrap();

    assert_eq!(device.draw_count(entity.id(), DrawMode::WithoutLighting), 1);
    assert!(!device.current.material.lighting);
}

#[test]
fn test_lighting_pass_skips_unlit_materials() {
    let mut entity = Entity::new("e");
    entity.set_model(Some(cube_model()));
    entity.add_material(Arc::new(Material::from_desc(MaterialDesc { lighting: false, ..Default::default() })));
    let mut device = MockGraphicsDevice::new();
    let mut params = ShaderParams::default();

    entity.draw(DrawMode::WithLighting, &mut params, &mut device).unwrap();

    // Area 0 is unlit, area 1 has no material
    assert_eq!(device.draw_count(entity.id(), DrawMode::WithLighting), 1);
}

#[test]
fn test_draw_without_model_is_noop() {
    let entity = Entity::new("e");
    let mut device = MockGraphicsDevice::new();
    entity.draw(DrawMode::Ambient, &mut ShaderParams::default(), &mut device).unwrap();
    assert!(device.commands.is_empty());
}

#[test]
fn test_debug_draw_box_and_axes() {
    let mut entity = Entity::new("e");
    entity.set_model(Some(cube_model()));
    let mut device = MockGraphicsDevice::new();

    entity.draw_debug(&mut ShaderParams::default(), &mut device).unwrap();

    assert!(matches!(device.commands[1], DeviceCommand::DrawBoundingBox { .. }));
    assert!(matches!(device.commands[3], DeviceCommand::DrawLines { count: 6, .. }));
}
