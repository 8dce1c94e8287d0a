use glam::{Quat, Vec3};
use crate::actor::ActorId;
use crate::physics::{PhysicsWorld, PhysicsBodyDesc, PhysicsShape, JointDesc, JointKind};
use super::*;

fn box_at(position: Vec3) -> PhysicsBodyDesc {
    PhysicsBodyDesc {
        shape: PhysicsShape::Box { half_extents: Vec3::splat(0.5) },
        mass: 0.0,
        position,
        orientation: Quat::IDENTITY,
    }
}

// ============================================================================
// Tests: bodies
// ============================================================================

#[test]
fn test_add_and_remove_body() {
    let mut world = SimplePhysicsWorld::new();
    let h = world.add_body(ActorId(1), &box_at(Vec3::ZERO));
    assert_eq!(world.body_count(), 1);
    assert!(world.remove_body(h));
    assert!(!world.remove_body(h));
    assert_eq!(world.body_count(), 0);
}

#[test]
fn test_step_moves_dynamic_bodies_only() {
    let mut world = SimplePhysicsWorld::new();
    let fixed = world.add_body(ActorId(1), &box_at(Vec3::ZERO));
    let falling = world.add_body(ActorId(2), &box_at(Vec3::new(0.0, 0.0, 10.0)).with_mass(1.0));

    world.step(1.0);

    assert_eq!(world.body_transform(fixed).unwrap().0, Vec3::ZERO);
    assert!(world.body_transform(falling).unwrap().0.z < 10.0);
    assert!(world.is_dynamic(falling));
    assert!(!world.is_dynamic(fixed));
    assert_eq!(world.elapsed(), 1.0);
}

#[test]
fn test_gravity_roundtrip() {
    let mut world = SimplePhysicsWorld::new();
    assert_eq!(world.gravity(), DEFAULT_GRAVITY);
    world.set_gravity(Vec3::new(0.0, -1.0, 0.0));
    assert_eq!(world.gravity(), Vec3::new(0.0, -1.0, 0.0));
}

// ============================================================================
// Tests: contacts
// ============================================================================

#[test]
fn test_overlapping_bodies_collide_and_can_be_cleared() {
    let mut world = SimplePhysicsWorld::new();
    let a = world.add_body(ActorId(1), &box_at(Vec3::ZERO));
    let b = world.add_body(ActorId(2), &box_at(Vec3::new(0.5, 0.0, 0.0)));
    world.step(0.0);

    assert_eq!(world.collisions(a).len(), 1);
    assert_eq!(world.collisions(a)[0].actor, ActorId(2));

    world.remove_collisions(a);
    assert!(world.collisions(a).is_empty());
    assert!(world.collisions(b).is_empty());
}

// ============================================================================
// Tests: joints
// ============================================================================

#[test]
fn test_joint_requires_both_bodies() {
    let mut world = SimplePhysicsWorld::new();
    world.add_body(ActorId(1), &box_at(Vec3::ZERO));
    let desc = JointDesc {
        name: "hinge".to_string(),
        kind: JointKind::Hinge,
        owner: ActorId(1),
        other: ActorId(2),
        pivot: Vec3::ZERO,
        axis: Vec3::Z,
    };
    assert!(world.add_joint(&desc).is_none());

    world.add_body(ActorId(2), &box_at(Vec3::X * 3.0));
    let joint = world.add_joint(&desc).unwrap();
    assert_eq!(world.joint_count(), 1);
    assert!(world.remove_joint(joint));
    assert_eq!(world.joint_count(), 0);
}

// ============================================================================
// Tests: ray casts
// ============================================================================

#[test]
fn test_ray_cast_returns_nearest() {
    let mut world = SimplePhysicsWorld::new();
    world.add_body(ActorId(1), &box_at(Vec3::new(0.0, 0.0, -10.0)));
    world.add_body(ActorId(2), &box_at(Vec3::new(0.0, 0.0, -5.0)));

    let hit = world.ray_cast(Vec3::ZERO, Vec3::new(0.0, 0.0, -20.0)).unwrap();
    assert_eq!(hit.actor, ActorId(2));
    assert!((hit.distance - 4.5).abs() < 1e-4);
    assert_eq!(hit.normal, Vec3::Z);
}

#[test]
fn test_ray_cast_all_sorted_and_bounded() {
    let mut world = SimplePhysicsWorld::new();
    world.add_body(ActorId(1), &box_at(Vec3::new(0.0, 0.0, -10.0)));
    world.add_body(ActorId(2), &box_at(Vec3::new(0.0, 0.0, -5.0)));
    world.add_body(ActorId(3), &box_at(Vec3::new(0.0, 0.0, -50.0)));

    let hits = world.ray_cast_all(Vec3::ZERO, Vec3::new(0.0, 0.0, -20.0));
    let actors: Vec<ActorId> = hits.iter().map(|h| h.actor).collect();
    assert_eq!(actors, vec![ActorId(2), ActorId(1)]);
}

#[test]
fn test_ray_cast_sphere() {
    let mut world = SimplePhysicsWorld::new();
    world.add_body(ActorId(4), &PhysicsBodyDesc {
        shape: PhysicsShape::Sphere { radius: 1.0 },
        mass: 0.0,
        position: Vec3::new(5.0, 0.0, 0.0),
        orientation: Quat::IDENTITY,
    });
    let hit = world.ray_cast(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)).unwrap();
    assert!((hit.distance - 4.0).abs() < 1e-4);
    assert!((hit.normal - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-4);
}

#[test]
fn test_degenerate_ray_hits_nothing() {
    let mut world = SimplePhysicsWorld::new();
    world.add_body(ActorId(1), &box_at(Vec3::ZERO));
    assert!(world.ray_cast(Vec3::ONE, Vec3::ONE).is_none());
}
