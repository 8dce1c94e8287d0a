/// PhysicsWorld trait - the opaque simulation a scene steps and queries
///
/// A scene owns two worlds: the primary one (simulated when physics is on)
/// and a debug one that only holds picking probes and is always stepped.

use glam::{Quat, Vec3};
use slotmap::new_key_type;
use crate::actor::ActorId;

new_key_type! {
    /// Body handle inside one physics world
    pub struct PhysicsHandle;
    /// Joint handle inside one physics world
    pub struct JointHandle;
}

/// Collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsShape {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

/// Everything needed to create a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBodyDesc {
    pub shape: PhysicsShape,
    /// Zero mass means static
    pub mass: f32,
    pub position: Vec3,
    pub orientation: Quat,
}

impl PhysicsBodyDesc {
    /// Static box, the shape used for editor picking probes
    pub fn probe(half_extents: Vec3) -> Self {
        Self {
            shape: PhysicsShape::Box { half_extents },
            mass: 0.0,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.mass > 0.0
    }
}

/// Joint kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointKind {
    Hinge,
    BallSocket,
}

/// Constraint between the bodies of two actors
#[derive(Debug, Clone, PartialEq)]
pub struct JointDesc {
    pub name: String,
    pub kind: JointKind,
    pub owner: ActorId,
    pub other: ActorId,
    /// Pivot in the owner's local space
    pub pivot: Vec3,
    pub axis: Vec3,
}

/// Contact or ray hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Actor owning the body that was hit
    pub actor: ActorId,
    pub point: Vec3,
    pub normal: Vec3,
    /// Distance from the ray start
    pub distance: f32,
}

/// Simulation world
pub trait PhysicsWorld: Send {
    /// Advance the simulation by `dt` seconds
    fn step(&mut self, dt: f32);

    fn gravity(&self) -> Vec3;

    fn set_gravity(&mut self, gravity: Vec3);

    /// Create a body owned by `owner`
    fn add_body(&mut self, owner: ActorId, desc: &PhysicsBodyDesc) -> PhysicsHandle;

    /// Destroy a body; returns false for unknown handles
    fn remove_body(&mut self, handle: PhysicsHandle) -> bool;

    /// Forget every contact the body currently takes part in
    fn remove_collisions(&mut self, handle: PhysicsHandle);

    /// Contacts the body currently takes part in
    fn collisions(&self, handle: PhysicsHandle) -> Vec<Collision>;

    /// Teleport a body
    fn set_body_transform(&mut self, handle: PhysicsHandle, position: Vec3, orientation: Quat);

    /// Current body transform, `None` for unknown handles
    fn body_transform(&self, handle: PhysicsHandle) -> Option<(Vec3, Quat)>;

    /// True when the body is simulated (moves under gravity)
    fn is_dynamic(&self, handle: PhysicsHandle) -> bool;

    /// Create a joint; `None` when either actor has no body in this world
    fn add_joint(&mut self, desc: &JointDesc) -> Option<JointHandle>;

    fn remove_joint(&mut self, handle: JointHandle) -> bool;

    fn body_count(&self) -> usize;

    fn joint_count(&self) -> usize;

    /// Nearest hit along the segment `start..end`
    fn ray_cast(&self, start: Vec3, end: Vec3) -> Option<Collision>;

    /// Every hit along the segment `start..end`, nearest first
    fn ray_cast_all(&self, start: Vec3, end: Vec3) -> Vec<Collision>;
}
