use crate::graphics_device::mock_graphics_device::{MockGraphicsDevice, DeviceCommand};
use crate::resource::ModelDesc;
use super::*;

fn emitter() -> Particles {
    let mut particles = Particles::new("smoke");
    particles.set_spawn_rate(10.0);
    particles.set_life_span(1.0);
    particles.set_velocity_range(Vec3::Y, Vec3::Y);
    particles
}

fn triangle_model() -> Arc<Model> {
    Arc::new(Model::from_desc(ModelDesc {
        name: "tri".to_string(),
        vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        areas: vec![vec![0, 1, 2]],
        ..Default::default()
    }).unwrap())
}

// ============================================================================
// Tests: simulation
// ============================================================================

#[test]
fn test_spawn_rate_accumulates_over_frames() {
    let mut particles = emitter();
    particles.update(0.25);
    assert_eq!(particles.particle_count(), 2);
    particles.update(0.25);
    assert_eq!(particles.particle_count(), 5);
}

#[test]
fn test_spawn_respects_max_count() {
    let mut particles = emitter();
    particles.set_max_count(3);
    particles.update(0.9);
    assert_eq!(particles.particle_count(), 3);
}

#[test]
fn test_huge_spawn_rate_fills_pool_in_one_step() {
    let mut particles = emitter();
    particles.set_max_count(10);
    particles.set_spawn_rate(1.0e9);
    particles.update(1.0);
    assert_eq!(particles.particle_count(), 10);

    // Overflow is dropped, not carried into the next frame
    particles.set_spawn_rate(0.0);
    particles.set_max_count(20);
    particles.update(0.1);
    assert_eq!(particles.particle_count(), 10);
}

#[test]
fn test_full_pool_discards_due_spawns() {
    let mut particles = emitter();
    particles.set_life_span(10.0);
    particles.set_max_count(2);
    particles.update(0.5);
    assert_eq!(particles.particle_count(), 2);

    particles.set_max_count(100);
    particles.update(0.1);
    assert_eq!(particles.particle_count(), 3);
}

#[test]
fn test_same_seed_same_velocities() {
    let spawn = |seed: u64| {
        let mut particles = emitter();
        particles.set_velocity_range(Vec3::NEG_ONE, Vec3::ONE);
        particles.set_seed(seed);
        particles.update(0.5);
        particles.particles().iter().map(|p| p.velocity).collect::<Vec<_>>()
    };
    assert_eq!(spawn(7), spawn(7));
    assert_ne!(spawn(7), spawn(8));
}

#[test]
fn test_particles_die_after_life_span() {
    let mut particles = emitter();
    particles.update(0.1);
    assert_eq!(particles.particle_count(), 1);

    particles.set_spawning(false);
    particles.update(0.5);
    assert_eq!(particles.particle_count(), 1);
    particles.update(0.6);
    assert_eq!(particles.particle_count(), 0);
}

#[test]
fn test_particles_move_and_fall() {
    let mut particles = emitter();
    particles.base_mut().set_position(Vec3::new(2.0, 0.0, 0.0));
    particles.set_gravity(Vec3::new(0.0, -10.0, 0.0));
    particles.update(0.1);
    particles.set_spawning(false);
    particles.update(0.1);

    let p = particles.particles()[0];
    assert!((p.velocity.y - 0.0).abs() < 1e-5);
    assert!((p.position - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    assert!((p.life - 0.9).abs() < 1e-5);
}

#[test]
fn test_velocity_is_in_emitter_frame() {
    let mut particles = emitter();
    particles.base_mut().set_direction(Vec3::X);
    particles.set_velocity_range(Vec3::NEG_Z, Vec3::NEG_Z);
    particles.update(0.1);
    assert!((particles.particles()[0].velocity - Vec3::X).length() < 1e-5);
}

#[test]
fn test_random_velocity_stays_in_range() {
    let mut particles = emitter();
    particles.set_max_count(1000);
    particles.set_spawn_rate(1000.0);
    particles.set_velocity_range(Vec3::new(1.0, -1.0, 0.0), Vec3::new(-1.0, 1.0, 2.0));
    particles.update(0.5);

    assert_eq!(particles.particle_count(), 500);
    for p in particles.particles() {
        assert!(p.velocity.cmpge(Vec3::new(-1.0, -1.0, 0.0)).all());
        assert!(p.velocity.cmple(Vec3::new(1.0, 1.0, 2.0)).all());
    }
}

// ============================================================================
// Tests: culling
// ============================================================================

#[test]
fn test_pre_draw_bounds_and_frustum() {
    let mut camera = Camera::new("cam");
    camera.pre_draw();

    let mut particles = emitter();
    particles.base_mut().set_position(Vec3::new(0.0, 0.0, -10.0));
    particles.pre_draw(&camera);
    assert!(!particles.in_frustum(&camera));

    particles.update(0.1);
    particles.pre_draw(&camera);
    assert!(particles.in_frustum(&camera));
    assert!(particles.bounds().contains_point(Vec3::new(0.0, 0.1, -10.0)));

    particles.set_visible(false);
    assert!(!particles.in_frustum(&camera));
}

// ============================================================================
// Tests: draw
// ============================================================================

#[test]
fn test_billboards_draw_two_triangles_per_particle() {
    let camera = Camera::new("cam");
    let mut particles = emitter();
    particles.update(0.3);
    particles.pre_draw(&camera);

    let mut device = MockGraphicsDevice::new();
    let mut params = ShaderParams::default();
    particles.draw(&mut params, &mut device).unwrap();

    let triangles: Vec<usize> = device.commands.iter().filter_map(|c| match c {
        DeviceCommand::Draw { triangles, render, .. } => {
            assert_eq!(render.blend_mode, BlendMode::Add);
            Some(*triangles)
        }
        _ => None,
    }).collect();
    assert_eq!(triangles, vec![6]);
}

#[test]
fn test_model_particles_draw_one_instance_each() {
    let camera = Camera::new("cam");
    let mut particles = emitter();
    particles.set_model(Some(triangle_model()));
    particles.update(0.3);
    particles.pre_draw(&camera);

    let mut device = MockGraphicsDevice::new();
    particles.draw(&mut ShaderParams::default(), &mut device).unwrap();
    assert_eq!(device.draw_count(particles.id(), DrawMode::Particles), 3);
}

#[test]
fn test_texture_bound_to_first_slot() {
    let camera = Camera::new("cam");
    let mut particles = emitter();
    let texture = Texture::from_desc(crate::resource::TextureDesc {
        gpu_texture: Some(crate::graphics_device::GpuTextureId(7)),
        ..Default::default()
    });
    particles.set_texture(Some(Arc::new(texture)));
    particles.update(0.1);
    particles.pre_draw(&camera);

    let mut device = MockGraphicsDevice::new();
    particles.draw(&mut ShaderParams::default(), &mut device).unwrap();
    assert_eq!(device.current.textures[0].texture, Some(crate::graphics_device::GpuTextureId(7)));
    assert!(!device.current.material.lighting);
}

#[test]
fn test_debug_draw_bounds_only_when_alive() {
    let camera = Camera::new("cam");
    let mut particles = emitter();
    let mut device = MockGraphicsDevice::new();

    particles.draw_debug(&mut ShaderParams::default(), &mut device).unwrap();
    assert_eq!(device.commands.len(), 2);

    particles.update(0.1);
    particles.pre_draw(&camera);
    device.clear();
    particles.draw_debug(&mut ShaderParams::default(), &mut device).unwrap();
    assert!(matches!(device.commands[1], DeviceCommand::DrawBoundingBox { .. }));
    assert!(matches!(device.commands[3], DeviceCommand::DrawLines { count: 6, .. }));
}
