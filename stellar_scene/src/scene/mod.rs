//! Scene module - the aggregate root tying actors, resources and physics together
//!
//! A [`Scene`] owns ordered lists of cameras, entities, lights, particle
//! systems and sprites, the resource caches they draw from, and two physics
//! worlds. Each frame runs `update`, `pre_draw`, `draw` and `post_draw` on a
//! single thread.

mod actor_list;
mod visibility_queue;
mod scene;
mod draw;
mod debug_draw;
mod import;
mod loading;
mod scene_manager;

use std::sync::Arc;
use glam::{Quat, Vec3};
use slotmap::new_key_type;
use crate::actor::ActorId;
use crate::error::Result;
use crate::resource::{Armature, Script};

pub use actor_list::ActorList;
pub use visibility_queue::VisibilityQueue;
pub use scene::Scene;
pub use loading::SceneLoader;
pub use scene_manager::SceneManager;

new_key_type! {
    /// Stable handle to a camera of one scene
    pub struct CameraKey;
    /// Stable handle to an entity of one scene
    pub struct EntityKey;
    /// Stable handle to a light of one scene
    pub struct LightKey;
    /// Stable handle to a particle system of one scene
    pub struct ParticlesKey;
    /// Stable handle to a sprite of one scene
    pub struct SpriteKey;
}

/// Any actor of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKey {
    Camera(CameraKey),
    Entity(EntityKey),
    Light(LightKey),
    Particles(ParticlesKey),
    Sprite(SpriteKey),
}

/// Result of a by-name search across kinds
#[derive(Debug, Clone)]
pub enum SceneObject {
    Actor(ActorKey),
    Armature(Arc<Armature>),
}

impl SceneObject {
    pub fn actor(&self) -> Option<ActorKey> {
        match self {
            SceneObject::Actor(key) => Some(*key),
            SceneObject::Armature(_) => None,
        }
    }
}

/// Runs actor scripts during `Scene::update`
pub trait ScriptHost: Send {
    /// Run `script` attached to the actor `actor` named `name`
    fn run(&mut self, script: &Script, actor: ActorId, name: &str) -> Result<()>;
}

/// Receives the active camera's transform during `Scene::update`
pub trait AudioListener: Send {
    fn set_position(&mut self, position: Vec3);

    fn set_orientation(&mut self, forward: Vec3, up: Vec3);
}

/// Forward and up vectors of an orientation (camera space -Z and +Y)
pub(crate) fn forward_up(orientation: Quat) -> (Vec3, Vec3) {
    (orientation * Vec3::NEG_Z, orientation * Vec3::Y)
}

#[cfg(test)]
mod test_fixtures;
