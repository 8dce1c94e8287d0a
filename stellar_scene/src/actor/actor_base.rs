/// ActorBase - name, transform, selection state and physics bindings
///
/// Physics bodies and joints are stored as descriptions plus an optional live
/// handle. The handle is only set while the actor belongs to a scene.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::physics::{PhysicsWorld, PhysicsBodyDesc, PhysicsHandle, JointDesc, JointHandle, Collision};
use crate::resource::Script;

static NEXT_ACTOR_ID: AtomicU32 = AtomicU32::new(1);
static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique actor identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

impl ActorId {
    pub fn next() -> Self {
        Self(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Process-unique scene identifier, used as the actor back-reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(pub u32);

impl SceneId {
    pub fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Body description plus its handle in the world it is bound to
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBinding {
    pub desc: PhysicsBodyDesc,
    pub handle: Option<PhysicsHandle>,
}

impl PhysicsBinding {
    fn new(desc: PhysicsBodyDesc) -> Self {
        Self { desc, handle: None }
    }
}

/// Joint description plus its handle in the primary world
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub desc: JointDesc,
    pub handle: Option<JointHandle>,
}

#[derive(Debug, Clone)]
pub struct ActorBase {
    id: ActorId,
    name: String,
    position: Vec3,
    orientation: Quat,
    moved: bool,
    selected: bool,
    scene: Option<SceneId>,
    body: Option<PhysicsBinding>,
    probe: Option<PhysicsBinding>,
    /// Probe handles replaced while bound, removed from the debug world on the next sync
    retired_probes: Vec<PhysicsHandle>,
    joints: Vec<Joint>,
    script: Option<Arc<Script>>,
}

impl ActorBase {
    pub fn new(name: &str) -> Self {
        Self {
            id: ActorId::next(),
            name: name.to_string(),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            moved: true,
            selected: false,
            scene: None,
            body: None,
            probe: None,
            retired_probes: Vec::new(),
            joints: Vec::new(),
            script: None,
        }
    }

    // ===== IDENTITY =====

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Scene the actor currently belongs to
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    // ===== TRANSFORM =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.moved = true;
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation.normalize();
        self.moved = true;
    }

    /// Euler rotation in degrees (X, then Y, then Z)
    pub fn rotation(&self) -> Vec3 {
        let (x, y, z) = self.orientation.to_euler(EulerRot::XYZ);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    pub fn set_rotation(&mut self, degrees: Vec3) {
        self.set_orientation(Quat::from_euler(
            EulerRot::XYZ,
            degrees.x.to_radians(),
            degrees.y.to_radians(),
            degrees.z.to_radians(),
        ));
    }

    /// Turn the actor so its local -Z axis points along `direction`
    pub fn set_direction(&mut self, direction: Vec3) {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        self.set_orientation(Quat::from_rotation_arc(Vec3::NEG_Z, dir));
    }

    /// World-space direction of the local -Z axis
    pub fn direction(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Object-to-world transform
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// True when the transform changed since the last `post_draw`
    pub fn is_moved(&self) -> bool {
        self.moved
    }

    pub(crate) fn clear_moved(&mut self) {
        self.moved = false;
    }

    // ===== SCRIPT =====

    pub fn script(&self) -> Option<&Arc<Script>> {
        self.script.as_ref()
    }

    pub fn set_script(&mut self, script: Option<Arc<Script>>) {
        self.script = script;
    }

    // ===== PHYSICS =====

    /// Primary body; bound into the scene's simulation world
    pub fn physics(&self) -> Option<&PhysicsBinding> {
        self.body.as_ref()
    }

    /// Set the primary body description.
    ///
    /// Takes effect the next time the actor is added to a scene.
    pub fn set_physics(&mut self, desc: Option<PhysicsBodyDesc>) {
        self.body = desc.map(PhysicsBinding::new);
    }

    /// Picking probe; bound into the scene's debug world
    pub fn probe(&self) -> Option<&PhysicsBinding> {
        self.probe.as_ref()
    }

    /// Replace the probe description.
    ///
    /// A bound probe is retired and the new one left unbound; `sync_probe`
    /// applies both to the debug world.
    pub(crate) fn set_probe(&mut self, desc: Option<PhysicsBodyDesc>) {
        if let Some(handle) = self.probe.take().and_then(|p| p.handle) {
            self.retired_probes.push(handle);
        }
        self.probe = desc.map(PhysicsBinding::new);
    }

    /// Drop retired probe bodies and bind a pending probe while in a scene
    pub(crate) fn sync_probe(&mut self, debug_world: &mut dyn PhysicsWorld) {
        for handle in self.retired_probes.drain(..) {
            debug_world.remove_collisions(handle);
            debug_world.remove_body(handle);
        }
        if self.scene.is_none() {
            return;
        }

        let (id, position, orientation) = (self.id, self.position, self.orientation);
        if let Some(probe) = self.probe.as_mut().filter(|p| p.handle.is_none()) {
            let desc = PhysicsBodyDesc { position, orientation, ..probe.desc };
            probe.handle = Some(debug_world.add_body(id, &desc));
        }
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn add_joint(&mut self, desc: JointDesc) {
        self.joints.push(Joint { desc, handle: None });
    }

    /// Bind a joint straight into `world`, for actors already in a scene
    pub(crate) fn add_bound_joint(&mut self, desc: JointDesc, world: &mut dyn PhysicsWorld) -> bool {
        let handle = world.add_joint(&desc);
        self.joints.push(Joint { desc, handle });
        handle.is_some()
    }

    /// Current contacts of the primary body
    pub fn collisions(&self, world: &dyn PhysicsWorld) -> Vec<Collision> {
        match self.body.as_ref().and_then(|b| b.handle) {
            Some(handle) => world.collisions(handle),
            None => Vec::new(),
        }
    }

    /// Bind bodies and joints into the scene's worlds and set the back-reference
    pub(crate) fn attach(
        &mut self,
        scene: SceneId,
        world: &mut dyn PhysicsWorld,
        debug_world: &mut dyn PhysicsWorld,
    ) {
        self.scene = Some(scene);

        let (id, position, orientation) = (self.id, self.position, self.orientation);
        if let Some(body) = &mut self.body {
            let desc = PhysicsBodyDesc { position, orientation, ..body.desc };
            body.handle = Some(world.add_body(id, &desc));
        }
        self.sync_probe(debug_world);
        for joint in &mut self.joints {
            joint.handle = world.add_joint(&joint.desc);
        }
    }

    /// Unbind everything attached by `attach` and drop the joint list
    pub(crate) fn detach(&mut self, world: &mut dyn PhysicsWorld, debug_world: &mut dyn PhysicsWorld) {
        self.scene = None;

        if let Some(handle) = self.body.as_mut().and_then(|b| b.handle.take()) {
            world.remove_collisions(handle);
            world.remove_body(handle);
        }
        if let Some(handle) = self.probe.as_mut().and_then(|p| p.handle.take()) {
            self.retired_probes.push(handle);
        }
        self.sync_probe(debug_world);
        for joint in std::mem::take(&mut self.joints) {
            if let Some(handle) = joint.handle {
                world.remove_joint(handle);
            }
        }
    }

    /// Reconcile the actor transform with its bodies after a world step.
    ///
    /// A transform set by the caller wins over the simulation; otherwise a
    /// dynamic body drives the actor.
    pub(crate) fn sync_physics(&mut self, world: &mut dyn PhysicsWorld, debug_world: &mut dyn PhysicsWorld) {
        self.sync_probe(debug_world);
        let body = self.body.as_ref().and_then(|b| b.handle);

        if !self.moved {
            if let Some(handle) = body.filter(|h| world.is_dynamic(*h)) {
                if let Some((position, orientation)) = world.body_transform(handle) {
                    if position != self.position || orientation != self.orientation {
                        self.position = position;
                        self.orientation = orientation;
                        self.moved = true;
                    }
                }
            }
        } else if let Some(handle) = body {
            world.set_body_transform(handle, self.position, self.orientation);
        }

        if self.moved {
            if let Some(handle) = self.probe.as_ref().and_then(|p| p.handle) {
                debug_world.set_body_transform(handle, self.position, self.orientation);
            }
        }
    }
}

#[cfg(test)]
#[path = "actor_base_tests.rs"]
mod tests;
