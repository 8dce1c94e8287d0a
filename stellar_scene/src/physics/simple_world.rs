/// SimplePhysicsWorld - built-in world with gravity integration and ray casts
///
/// Dynamic bodies fall under gravity; there is no collision response. Contacts
/// are overlapping world bounds, recomputed on every step. Good enough for
/// picking probes and for scenes that do not plug in a full physics engine.

use glam::{Mat4, Quat, Vec3};
use slotmap::SlotMap;
use crate::actor::ActorId;
use crate::math::AABB;
use crate::physics::{
    PhysicsWorld, PhysicsHandle, JointHandle, PhysicsShape, PhysicsBodyDesc, JointDesc, Collision,
};

/// Default gravity (Z up)
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, 0.0, -9.81);

#[derive(Debug, Clone)]
struct Body {
    owner: ActorId,
    shape: PhysicsShape,
    mass: f32,
    position: Vec3,
    orientation: Quat,
    velocity: Vec3,
    contacts: Vec<PhysicsHandle>,
}

impl Body {
    fn world_bounds(&self) -> AABB {
        match self.shape {
            PhysicsShape::Box { half_extents } => {
                AABB::from_center_half_extents(Vec3::ZERO, half_extents)
                    .transformed(&Mat4::from_rotation_translation(self.orientation, self.position))
            }
            PhysicsShape::Sphere { radius } => {
                AABB::from_center_half_extents(self.position, Vec3::splat(radius))
            }
        }
    }

    /// Hit distance and normal along a normalized direction
    fn ray_hit(&self, start: Vec3, dir: Vec3, length: f32) -> Option<(f32, Vec3)> {
        match self.shape {
            PhysicsShape::Sphere { radius } => {
                let oc = start - self.position;
                let b = oc.dot(dir);
                let c = oc.length_squared() - radius * radius;
                let disc = b * b - c;
                if disc < 0.0 {
                    return None;
                }
                let sqrt = disc.sqrt();
                let mut t = -b - sqrt;
                if t < 0.0 {
                    t = -b + sqrt;
                }
                if t < 0.0 || t > length {
                    return None;
                }
                let point = start + dir * t;
                Some((t, (point - self.position).normalize_or_zero()))
            }
            PhysicsShape::Box { .. } => {
                let bounds = self.world_bounds();
                let t = bounds.ray_intersection(start, dir, length)?;
                let point = start + dir * t;
                Some((t, box_face_normal(&bounds, point)))
            }
        }
    }
}

/// Normal of the box face closest to `point`
fn box_face_normal(bounds: &AABB, point: Vec3) -> Vec3 {
    let mut best = f32::MAX;
    let mut normal = Vec3::ZERO;
    for axis in 0..3 {
        let mut n = Vec3::ZERO;
        let to_min = (point[axis] - bounds.min[axis]).abs();
        if to_min < best {
            best = to_min;
            n[axis] = -1.0;
            normal = n;
        }
        let mut n = Vec3::ZERO;
        let to_max = (bounds.max[axis] - point[axis]).abs();
        if to_max < best {
            best = to_max;
            n[axis] = 1.0;
            normal = n;
        }
    }
    normal
}

pub struct SimplePhysicsWorld {
    bodies: SlotMap<PhysicsHandle, Body>,
    joints: SlotMap<JointHandle, JointDesc>,
    gravity: Vec3,
    elapsed: f32,
}

impl SimplePhysicsWorld {
    pub fn new() -> Self {
        Self {
            bodies: SlotMap::with_key(),
            joints: SlotMap::with_key(),
            gravity: DEFAULT_GRAVITY,
            elapsed: 0.0,
        }
    }

    /// Total simulated time
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn body_of(&self, actor: ActorId) -> Option<PhysicsHandle> {
        self.bodies.iter().find(|(_, b)| b.owner == actor).map(|(h, _)| h)
    }

    fn refresh_contacts(&mut self) {
        let bounds: Vec<(PhysicsHandle, AABB)> =
            self.bodies.iter().map(|(h, b)| (h, b.world_bounds())).collect();

        for (_, body) in self.bodies.iter_mut() {
            body.contacts.clear();
        }
        for (i, (a, bounds_a)) in bounds.iter().enumerate() {
            for (b, bounds_b) in &bounds[i + 1..] {
                if bounds_a.intersects(bounds_b) {
                    if let Some(body) = self.bodies.get_mut(*a) {
                        body.contacts.push(*b);
                    }
                    if let Some(body) = self.bodies.get_mut(*b) {
                        body.contacts.push(*a);
                    }
                }
            }
        }
    }
}

impl Default for SimplePhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld for SimplePhysicsWorld {
    fn step(&mut self, dt: f32) {
        let gravity = self.gravity;
        for (_, body) in self.bodies.iter_mut() {
            if body.mass > 0.0 {
                body.velocity += gravity * dt;
                body.position += body.velocity * dt;
            }
        }
        self.elapsed += dt;
        self.refresh_contacts();
    }

    fn gravity(&self) -> Vec3 {
        self.gravity
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    fn add_body(&mut self, owner: ActorId, desc: &PhysicsBodyDesc) -> PhysicsHandle {
        self.bodies.insert(Body {
            owner,
            shape: desc.shape,
            mass: desc.mass,
            position: desc.position,
            orientation: desc.orientation,
            velocity: Vec3::ZERO,
            contacts: Vec::new(),
        })
    }

    fn remove_body(&mut self, handle: PhysicsHandle) -> bool {
        if self.bodies.remove(handle).is_none() {
            return false;
        }
        for (_, body) in self.bodies.iter_mut() {
            body.contacts.retain(|h| *h != handle);
        }
        true
    }

    fn remove_collisions(&mut self, handle: PhysicsHandle) {
        let contacts = match self.bodies.get_mut(handle) {
            Some(body) => std::mem::take(&mut body.contacts),
            None => return,
        };
        for other in contacts {
            if let Some(body) = self.bodies.get_mut(other) {
                body.contacts.retain(|h| *h != handle);
            }
        }
    }

    fn collisions(&self, handle: PhysicsHandle) -> Vec<Collision> {
        let Some(body) = self.bodies.get(handle) else {
            return Vec::new();
        };
        body.contacts
            .iter()
            .filter_map(|h| self.bodies.get(*h))
            .map(|other| Collision {
                actor: other.owner,
                point: other.position,
                normal: (body.position - other.position).normalize_or_zero(),
                distance: body.position.distance(other.position),
            })
            .collect()
    }

    fn set_body_transform(&mut self, handle: PhysicsHandle, position: Vec3, orientation: Quat) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.position = position;
            body.orientation = orientation;
        }
    }

    fn body_transform(&self, handle: PhysicsHandle) -> Option<(Vec3, Quat)> {
        self.bodies.get(handle).map(|b| (b.position, b.orientation))
    }

    fn is_dynamic(&self, handle: PhysicsHandle) -> bool {
        self.bodies.get(handle).map_or(false, |b| b.mass > 0.0)
    }

    fn add_joint(&mut self, desc: &JointDesc) -> Option<JointHandle> {
        self.body_of(desc.owner)?;
        self.body_of(desc.other)?;
        Some(self.joints.insert(desc.clone()))
    }

    fn remove_joint(&mut self, handle: JointHandle) -> bool {
        self.joints.remove(handle).is_some()
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn joint_count(&self) -> usize {
        self.joints.len()
    }

    fn ray_cast(&self, start: Vec3, end: Vec3) -> Option<Collision> {
        self.ray_cast_all(start, end).into_iter().next()
    }

    fn ray_cast_all(&self, start: Vec3, end: Vec3) -> Vec<Collision> {
        let delta = end - start;
        let length = delta.length();
        if length <= 0.0 {
            return Vec::new();
        }
        let dir = delta / length;

        let mut hits: Vec<Collision> = self
            .bodies
            .values()
            .filter_map(|body| {
                let (t, normal) = body.ray_hit(start, dir, length)?;
                Some(Collision { actor: body.owner, point: start + dir * t, normal, distance: t })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

#[cfg(test)]
#[path = "simple_world_tests.rs"]
mod tests;
