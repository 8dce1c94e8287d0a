use glam::Quat;
use crate::graphics_device::mock_graphics_device::{MockGraphicsDevice, DeviceCommand};
use super::*;

// ============================================================================
// Tests: type and shadow camera
// ============================================================================

#[test]
fn test_light_defaults() {
    let light = Light::new("lamp", LightType::Point);
    assert_eq!(light.name(), "lamp");
    assert_eq!(light.distance(), 30.0);
    assert!((light.fade_speed() - 1.0 / 30.0).abs() < 1e-6);
    assert_eq!(light.color(), Vec4::ONE);
    assert!(light.is_visible());
    assert!(!light.shadows());
    assert!(light.shadow_camera().is_none());
}

#[test]
fn test_spot_light_owns_shadow_camera() {
    let mut light = Light::new("spot", LightType::Spot);
    let camera = light.shadow_camera().unwrap();
    assert_eq!(camera.fov(), 90.0);
    assert_eq!(camera.aspect(), 1.0);
    assert_eq!(camera.clip(), (1.0, 60.0));

    light.set_light_type(LightType::Sun);
    assert!(light.shadow_camera().is_none());
}

#[test]
fn test_shadow_camera_follows_cone_and_reach() {
    let mut light = Light::new("spot", LightType::Spot);
    light.set_cone(20.0, 5.0);
    light.set_distance(10.0);
    light.set_fade_speed(0.5);

    let camera = light.shadow_camera().unwrap();
    assert_eq!(camera.fov(), 50.0);
    assert_eq!(camera.clip(), (1.0, 12.0));
}

#[test]
fn test_pre_draw_moves_shadow_camera_onto_light() {
    let mut light = Light::new("spot", LightType::Spot);
    light.base_mut().set_position(Vec3::new(0.0, 10.0, 0.0));
    light.base_mut().set_direction(Vec3::NEG_Y);
    light.pre_draw();

    let camera = light.shadow_camera().unwrap();
    assert_eq!(camera.cached_position(), Vec3::new(0.0, 10.0, 0.0));
    assert!(camera.sphere_inside_frustum(Vec3::ZERO, 0.5));
    assert!(!camera.sphere_inside_frustum(Vec3::new(0.0, 20.0, 0.0), 0.5));
}

// ============================================================================
// Tests: reach
// ============================================================================

#[test]
fn test_point_light_reach_uses_falloff() {
    let mut light = Light::new("lamp", LightType::Point);
    light.set_distance(5.0);
    light.set_fade_speed(1.0);

    // Surface at distance 6 lies exactly where the falloff ends
    assert!(!light.reaches(Vec3::new(7.0, 0.0, 0.0), 1.0));
    assert!(light.reaches(Vec3::new(5.0, 0.0, 0.0), 1.0));
    assert!(light.reaches(Vec3::new(5.5, 0.0, 0.0), 0.0));
    assert_eq!(light.reach(), 6.0);
}

#[test]
fn test_sun_reaches_everything() {
    let light = Light::new("sun", LightType::Sun);
    assert!(light.reaches(Vec3::splat(1.0e5), 0.0));
}

// ============================================================================
// Tests: shader parameters
// ============================================================================

#[test]
fn test_apply_converts_to_view_space() {
    let mut light = Light::new("spot", LightType::Spot);
    light.base_mut().set_position(Vec3::new(0.0, 0.0, -5.0));
    light.base_mut().set_orientation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
    light.set_cone(30.0, 60.0);

    let mut params = ShaderParams::default();
    params.camera_matrix = Mat4::from_translation(Vec3::new(0.0, 0.0, -1.0));
    light.apply(&mut params);

    let lp = params.light.unwrap();
    assert_eq!(lp.light_type, LightType::Spot);
    assert!((lp.position - Vec3::new(0.0, 0.0, -6.0)).length() < 1e-5);
    assert!((lp.direction - Vec3::NEG_X).length() < 1e-5);
    assert!((lp.inner_cone_cos - 30.0f32.to_radians().cos()).abs() < 1e-6);
    assert!(lp.outer_cone_cos.abs() < 1e-6);
}

// ============================================================================
// Tests: debug draw
// ============================================================================

#[test]
fn test_debug_draw_direction_line_for_directional_lights() {
    let mut device = MockGraphicsDevice::new();
    let mut params = ShaderParams::default();

    Light::new("lamp", LightType::Point).draw_debug(&mut params, &mut device).unwrap();
    Light::new("sun", LightType::Sun).draw_debug(&mut params, &mut device).unwrap();

    let counts: Vec<usize> = device.commands.iter().filter_map(|c| match c {
        DeviceCommand::DrawLines { count, .. } => Some(*count),
        _ => None,
    }).collect();
    assert_eq!(counts, vec![6, 8]);
    assert!(!device.commands.iter().any(|c| matches!(c, DeviceCommand::DrawBoundingBox { .. })));
}
