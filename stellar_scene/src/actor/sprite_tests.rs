use crate::graphics_device::mock_graphics_device::{MockGraphicsDevice, DeviceCommand};
use crate::resource::{MaterialDesc, TextureDesc, Texture};
use super::*;

fn light_mapped() -> Arc<Material> {
    Arc::new(Material::from_desc(MaterialDesc {
        name: "glow".to_string(),
        light_map: Some(Arc::new(Texture::from_desc(TextureDesc::default()))),
        ..Default::default()
    }))
}

// ============================================================================
// Tests: culling
// ============================================================================

#[test]
fn test_cull_radius_follows_scale() {
    let mut sprite = Sprite::new("s");
    sprite.set_scale(Vec2::new(6.0, 8.0));
    assert!((sprite.cull_radius() - 5.0).abs() < 1e-5);
}

#[test]
fn test_in_frustum_uses_bounding_sphere() {
    let mut camera = Camera::new("cam");
    camera.pre_draw();

    let mut sprite = Sprite::new("s");
    sprite.base_mut().set_position(Vec3::new(0.0, 0.0, -10.0));
    assert!(sprite.in_frustum(&camera));

    sprite.base_mut().set_position(Vec3::new(0.0, 0.0, 10.0));
    assert!(!sprite.in_frustum(&camera));

    sprite.base_mut().set_position(Vec3::new(0.0, 0.0, -10.0));
    sprite.set_visible(false);
    assert!(!sprite.in_frustum(&camera));
}

// ============================================================================
// Tests: billboarding
// ============================================================================

#[test]
fn test_face_camera_takes_camera_orientation() {
    let mut camera = Camera::new("cam");
    camera.base_mut().set_orientation(Quat::from_rotation_y(0.7));

    let mut sprite = Sprite::new("s");
    sprite.base_mut().set_position(Vec3::new(1.0, 2.0, 3.0));
    sprite.pre_draw(&camera);
    assert_eq!(sprite.world_matrix(), Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));

    sprite.set_face_camera(true);
    sprite.pre_draw(&camera);
    let expected = Mat4::from_rotation_translation(Quat::from_rotation_y(0.7), Vec3::new(1.0, 2.0, 3.0));
    assert!(sprite.world_matrix().abs_diff_eq(expected, 1e-5));
    assert_eq!(sprite.base().orientation(), Quat::IDENTITY);
}

// ============================================================================
// Tests: draw
// ============================================================================

#[test]
fn test_draw_quad_in_each_mode() {
    let mut sprite = Sprite::new("s");
    sprite.set_material(Some(light_mapped()));
    let mut device = MockGraphicsDevice::new();
    let mut params = ShaderParams::default();

    for mode in [DrawMode::Depth, DrawMode::Ambient, DrawMode::WithoutLighting, DrawMode::WithLighting] {
        sprite.draw(mode, &mut params, &mut device).unwrap();
        assert_eq!(device.draw_count(sprite.id(), mode), 1);
    }
    assert!(device.commands.iter().all(|c| match c {
        DeviceCommand::Draw { triangles, .. } => *triangles == 2,
        _ => true,
    }));
}

#[test]
fn test_unlit_pass_skips_plain_material() {
    let sprite = Sprite::new("s");
    let mut device = MockGraphicsDevice::new();
    sprite.draw(DrawMode::WithoutLighting, &mut ShaderParams::default(), &mut device).unwrap();
    assert!(device.commands.is_empty());
}

#[test]
fn test_debug_draw_outline() {
    let mut sprite = Sprite::new("s");
    sprite.base_mut().set_selected(true);
    let mut device = MockGraphicsDevice::new();
    sprite.draw_debug(&mut ShaderParams::default(), &mut device).unwrap();
    assert_eq!(
        device.commands[1],
        DeviceCommand::DrawLines { count: 8, color: crate::actor::SELECTED_COLOR }
    );
}
