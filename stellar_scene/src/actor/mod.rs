//! Actor module - transform, identity and physics binding shared by every scene object
//!
//! Cameras, entities, lights, particle systems and sprites all embed an
//! [`ActorBase`] and expose it through the [`SceneActor`] trait. The base
//! owns the descriptions of the actor's physics bodies and joints; the
//! scene turns those into live handles when the actor is added and drops
//! them again when it is removed.

mod actor_base;
mod entity;
mod gizmo;
mod light;
mod particles;
mod sprite;

pub use actor_base::{ActorBase, ActorId, SceneId, PhysicsBinding, Joint};
pub use entity::Entity;
pub use gizmo::{GIZMO_COLOR, SELECTED_COLOR};
pub use light::{Light, LightType};
pub use particles::{Particles, Particle};
pub use sprite::Sprite;

pub(crate) use gizmo::{draw_gizmo, axis_lines};

/// Actor kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Camera,
    Entity,
    Light,
    Particles,
    Sprite,
}

/// Common interface of the five actor kinds
pub trait SceneActor {
    fn base(&self) -> &ActorBase;

    fn base_mut(&mut self) -> &mut ActorBase;

    fn kind(&self) -> ActorKind;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn id(&self) -> ActorId {
        self.base().id()
    }
}
